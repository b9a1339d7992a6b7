use std::io::Read;

use bytes::{Bytes, BytesMut};

use super::parser::BodyParser;
use super::Body;
use crate::error::{HttpError, Result};

/// Accumulates bytes and serialized values into a buffered `Body`.
#[derive(Debug, Default, Clone)]
pub struct BodyBuilder {
    buf: BytesMut,
}

impl BodyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Appends `length` bytes of `bytes` starting at `offset`.
    ///
    /// # Panics
    /// If the range runs past the end of `bytes`.
    pub fn append_slice(&mut self, bytes: &[u8], offset: usize, length: usize) -> &mut Self {
        self.append(&bytes[offset..offset + length])
    }

    pub fn append_str(&mut self, text: &str) -> &mut Self {
        self.append(text.as_bytes())
    }

    /// Serializes `value` through `parser` and appends the result.
    pub fn append_value<V, P>(&mut self, parser: &P, value: V) -> Result<&mut Self>
    where
        P: BodyParser<V>,
    {
        let mut stream = parser.serialize(value)?;
        let mut chunk = Vec::new();
        stream
            .read_to_end(&mut chunk)
            .map_err(HttpError::serialization)?;
        self.buf.extend_from_slice(&chunk);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Snapshots the accumulated bytes; the builder can keep appending.
    pub fn build(&self) -> Body {
        Body::buffered(Bytes::copy_from_slice(&self.buf))
    }
}
