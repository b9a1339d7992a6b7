//! Codecs between typed values and byte streams.
//!
//! # Design
//! A `BodyParser` is stateless: it owns no buffers and can be shared freely.
//! `deserialize` takes the stream by value, so once a parser returns the
//! stream has either been read to completion and dropped, or (for `STREAM`)
//! handed back to the caller untouched. The built-ins compose the same way
//! the layers of a body do: `STRING` reads through `BYTES`, and the JSON
//! codecs read through `STRING`.

use std::fmt;
use std::io::{Cursor, Read};
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{HttpError, Result};

/// An owned, single-pass source of body bytes.
pub type ByteStream = Box<dyn Read + Send>;

/// Bidirectional conversion between `V` and a byte stream.
pub trait BodyParser<V> {
    fn serialize(&self, value: V) -> Result<ByteStream>;

    fn deserialize(&self, stream: ByteStream) -> Result<V>;
}

pub(crate) fn cursor(bytes: Vec<u8>) -> ByteStream {
    Box::new(Cursor::new(bytes))
}

/// Raw bytes; reads the stream to its end.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesParser;

impl BodyParser<Vec<u8>> for BytesParser {
    fn serialize(&self, value: Vec<u8>) -> Result<ByteStream> {
        Ok(cursor(value))
    }

    fn deserialize(&self, mut stream: ByteStream) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        stream
            .read_to_end(&mut buf)
            .map_err(HttpError::deserialization)?;
        Ok(buf)
    }
}

/// UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Parser;

impl BodyParser<String> for Utf8Parser {
    fn serialize(&self, value: String) -> Result<ByteStream> {
        BYTES.serialize(value.into_bytes())
    }

    fn deserialize(&self, stream: ByteStream) -> Result<String> {
        let bytes = BYTES.deserialize(stream)?;
        String::from_utf8(bytes).map_err(HttpError::deserialization)
    }
}

/// A JSON document whose top level is an object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonObjectParser;

impl BodyParser<Map<String, Value>> for JsonObjectParser {
    fn serialize(&self, value: Map<String, Value>) -> Result<ByteStream> {
        STRING.serialize(Value::Object(value).to_string())
    }

    fn deserialize(&self, stream: ByteStream) -> Result<Map<String, Value>> {
        let text = STRING.deserialize(stream)?;
        match serde_json::from_str(&text).map_err(HttpError::deserialization)? {
            Value::Object(map) => Ok(map),
            other => Err(HttpError::deserialization(format!(
                "expected a JSON object, found {}",
                kind(&other)
            ))),
        }
    }
}

/// A JSON document whose top level is an array; element order is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArrayParser;

impl BodyParser<Vec<Value>> for JsonArrayParser {
    fn serialize(&self, value: Vec<Value>) -> Result<ByteStream> {
        STRING.serialize(Value::Array(value).to_string())
    }

    fn deserialize(&self, stream: ByteStream) -> Result<Vec<Value>> {
        let text = STRING.deserialize(stream)?;
        match serde_json::from_str(&text).map_err(HttpError::deserialization)? {
            Value::Array(items) => Ok(items),
            other => Err(HttpError::deserialization(format!(
                "expected a JSON array, found {}",
                kind(&other)
            ))),
        }
    }
}

/// A JSON array treated as a multiset: two arrays are equal when they hold
/// the same elements the same number of times, in any order.
#[derive(Debug, Clone, Default)]
pub struct UnorderedJsonArray(Vec<Value>);

impl UnorderedJsonArray {
    pub fn new(items: Vec<Value>) -> Self {
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.0.contains(value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.0.iter().map(Value::to_string).collect();
        keys.sort_unstable();
        keys
    }
}

impl PartialEq for UnorderedJsonArray {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.sorted_keys() == other.sorted_keys()
    }
}

impl From<Vec<Value>> for UnorderedJsonArray {
    fn from(items: Vec<Value>) -> Self {
        Self(items)
    }
}

/// The unordered counterpart of `JsonArrayParser`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnorderedJsonArrayParser;

impl BodyParser<UnorderedJsonArray> for UnorderedJsonArrayParser {
    fn serialize(&self, value: UnorderedJsonArray) -> Result<ByteStream> {
        JSON_ARRAY.serialize(value.0)
    }

    fn deserialize(&self, stream: ByteStream) -> Result<UnorderedJsonArray> {
        JSON_ARRAY.deserialize(stream).map(UnorderedJsonArray)
    }
}

/// Pass-through: the stream itself is the value. Reading through this
/// parser never closes the stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamParser;

impl BodyParser<ByteStream> for StreamParser {
    fn serialize(&self, value: ByteStream) -> Result<ByteStream> {
        Ok(value)
    }

    fn deserialize(&self, stream: ByteStream) -> Result<ByteStream> {
        Ok(stream)
    }
}

/// Any serde type encoded as a JSON document.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T> Json<T> {
    pub const fn new() -> Self {
        Json(PhantomData)
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Json<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Json<T> {}

impl<T> fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Json")
    }
}

impl<T: Serialize + DeserializeOwned> BodyParser<T> for Json<T> {
    fn serialize(&self, value: T) -> Result<ByteStream> {
        let bytes = serde_json::to_vec(&value).map_err(HttpError::serialization)?;
        Ok(cursor(bytes))
    }

    fn deserialize(&self, stream: ByteStream) -> Result<T> {
        serde_json::from_reader(stream).map_err(HttpError::deserialization)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub const BYTES: BytesParser = BytesParser;
pub const STRING: Utf8Parser = Utf8Parser;
pub const JSON_OBJECT: JsonObjectParser = JsonObjectParser;
pub const JSON_ARRAY: JsonArrayParser = JsonArrayParser;
pub const JSON_ARRAY_UNORDERED: UnorderedJsonArrayParser = UnorderedJsonArrayParser;
pub const STREAM: StreamParser = StreamParser;
