//! Typed header accessors.
//!
//! # Design
//! A `Header<V>` pairs a name with two functions: a `HeaderParser<V>` for the
//! wire-to-value direction and a formatter for the value-to-wire direction.
//! Which formatter is used is decided when the header is declared:
//! `Header::of` formats through `Display`, `Header::of_values` through the
//! value's own `HeaderValue` capability. There is no runtime type sniffing.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use crate::error::{HttpError, Result};
use crate::head::mime::MimeType;

/// A value type that knows its own canonical wire string.
pub trait HeaderValue {
    fn header_value(&self) -> &str;
}

/// Wire-to-value direction of a header codec.
pub trait HeaderParser<V>: Send + Sync {
    /// `Ok(None)` means the raw value is well-formed but maps to nothing.
    fn parse(&self, header: &str, value: &str) -> Result<Option<V>>;
}

/// The raw string, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringParser;

impl HeaderParser<String> for StringParser {
    fn parse(&self, _header: &str, value: &str) -> Result<Option<String>> {
        Ok(Some(value.to_string()))
    }
}

/// Any `FromStr` type; a parse failure is a `HeaderParse` error.
pub struct FromStrParser<T>(PhantomData<fn() -> T>);

impl<T> FromStrParser<T> {
    pub const fn new() -> Self {
        FromStrParser(PhantomData)
    }
}

impl<T> Default for FromStrParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FromStrParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FromStrParser<{}>", std::any::type_name::<T>())
    }
}

impl<T> HeaderParser<T> for FromStrParser<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn parse(&self, header: &str, value: &str) -> Result<Option<T>> {
        value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| HttpError::HeaderParse {
                name: header.to_string(),
                value: value.to_string(),
                reason: e.to_string(),
            })
    }
}

pub const STRING: StringParser = StringParser;
pub const INT: FromStrParser<i32> = FromStrParser::new();
pub const LONG: FromStrParser<i64> = FromStrParser::new();
pub const FLOAT: FromStrParser<f32> = FromStrParser::new();
pub const DOUBLE: FromStrParser<f64> = FromStrParser::new();

/// Lookup table from canonical wire string to value. Unknown strings map to
/// `None`.
#[derive(Debug, Clone)]
pub struct MappedParser<V> {
    table: HashMap<String, V>,
}

impl<V: HeaderValue + Clone> MappedParser<V> {
    pub fn new(values: &[V]) -> Self {
        let table = values
            .iter()
            .map(|v| (v.header_value().to_string(), v.clone()))
            .collect();
        Self { table }
    }
}

impl<V: Clone + Send + Sync> HeaderParser<V> for MappedParser<V> {
    fn parse(&self, _header: &str, value: &str) -> Result<Option<V>> {
        Ok(self.table.get(value).cloned())
    }
}

/// Placeholder codec for a mapped header declared without values. Every
/// parse fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UndefinedParser;

impl<V> HeaderParser<V> for UndefinedParser {
    fn parse(&self, header: &str, _value: &str) -> Result<Option<V>> {
        Err(HttpError::UndefinedHeaderCodec {
            name: header.to_string(),
        })
    }
}

/// A header name bound to a value codec.
pub struct Header<V> {
    name: Cow<'static, str>,
    parser: Arc<dyn HeaderParser<V>>,
    format: fn(&V) -> String,
}

fn display<V: fmt::Display>(value: &V) -> String {
    value.to_string()
}

fn self_described<V: HeaderValue>(value: &V) -> String {
    value.header_value().to_string()
}

impl<V: 'static> Header<V> {
    /// A header whose values are written with `Display` and read with
    /// `parser`.
    pub fn of<P>(name: impl Into<Cow<'static, str>>, parser: P) -> Self
    where
        V: fmt::Display,
        P: HeaderParser<V> + 'static,
    {
        Self {
            name: name.into(),
            parser: Arc::new(parser),
            format: display::<V>,
        }
    }

    /// A header restricted to `values`, written and read through each
    /// value's canonical string. With no values, parsing always fails with
    /// `UndefinedHeaderCodec`.
    pub fn of_values(name: impl Into<Cow<'static, str>>, values: &[V]) -> Self
    where
        V: HeaderValue + Clone + Send + Sync,
    {
        let parser: Arc<dyn HeaderParser<V>> = if values.is_empty() {
            Arc::new(UndefinedParser)
        } else {
            Arc::new(MappedParser::new(values))
        };
        Self {
            name: name.into(),
            parser,
            format: self_described::<V>,
        }
    }
}

impl<V> Header<V> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire form of `value`.
    pub fn format(&self, value: &V) -> String {
        (self.format)(value)
    }

    pub fn parse(&self, raw: &str) -> Result<Option<V>> {
        self.parser.parse(&self.name, raw)
    }
}

impl<V> Clone for Header<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            parser: Arc::clone(&self.parser),
            format: self.format,
        }
    }
}

impl<V> fmt::Debug for Header<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header").field("name", &self.name).finish()
    }
}

pub static USER_AGENT: LazyLock<Header<String>> =
    LazyLock::new(|| Header::of("User-Agent", STRING));
pub static AUTHORIZATION: LazyLock<Header<String>> =
    LazyLock::new(|| Header::of("Authorization", STRING));
pub static ACCEPT: LazyLock<Header<MimeType>> =
    LazyLock::new(|| Header::of_values("Accept", &MimeType::ALL));
pub static CONTENT_TYPE: LazyLock<Header<MimeType>> =
    LazyLock::new(|| Header::of_values("Content-Type", &MimeType::ALL));
pub static CONTENT_LENGTH: LazyLock<Header<i64>> =
    LazyLock::new(|| Header::of("Content-Length", LONG));
