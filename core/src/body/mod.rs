//! Request and response content.
//!
//! # Design
//! A `Body` is one of three shapes:
//!
//! - `Empty`: no content at all.
//! - `Buffered`: bytes held in memory. Reading is idempotent because every
//!   read gets a fresh cursor over the same shared `Bytes`.
//! - `Deferred`: a one-shot producer of a stream. The producer is taken out
//!   on first read, so a second read reports `AlreadyConsumed` instead of
//!   silently returning nothing.
//!
//! Streams are closed by dropping them. Because `BodyParser::deserialize`
//! takes the stream by value, the stream is released on every exit path of
//! `get` unless the parser hands it back (`STREAM`) or the caller asks for it
//! directly with `take_stream`.

mod builder;
pub mod parser;

use std::cell::Cell;
use std::fmt;
use std::io::{self, Cursor, Read};

use bytes::Bytes;
use tracing::trace;

use crate::error::{HttpError, Result};

pub use builder::BodyBuilder;
pub use parser::{BodyParser, ByteStream};

type Producer = Box<dyn FnOnce() -> io::Result<ByteStream> + Send>;

enum Content {
    Empty,
    Buffered(Bytes),
    Deferred(Cell<Option<Producer>>),
}

/// Content of a request or response, parsed on demand through a
/// `BodyParser`.
///
/// A deferred body is not `Sync`: it must be read from one place only.
pub struct Body {
    content: Content,
}

impl Body {
    pub fn empty() -> Self {
        Self {
            content: Content::Empty,
        }
    }

    /// In-memory content that can be read any number of times.
    pub fn buffered(bytes: impl Into<Bytes>) -> Self {
        Self {
            content: Content::Buffered(bytes.into()),
        }
    }

    /// Single-use content read from `reader`.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        let stream: ByteStream = Box::new(reader);
        Self::deferred(move || Ok(stream))
    }

    /// Single-use content whose stream is only opened when first read.
    pub fn deferred<F>(producer: F) -> Self
    where
        F: FnOnce() -> io::Result<ByteStream> + Send + 'static,
    {
        Self {
            content: Content::Deferred(Cell::new(Some(Box::new(producer)))),
        }
    }

    /// Serializes `value` through `parser` now; the resulting stream is
    /// handed out once.
    pub fn of<V, P>(parser: &P, value: V) -> Result<Self>
    where
        P: BodyParser<V>,
    {
        let stream = parser.serialize(value)?;
        Ok(Self::from_reader(stream))
    }

    pub fn builder() -> BodyBuilder {
        BodyBuilder::new()
    }

    /// True for an empty body and for zero-length buffered content. A
    /// deferred body is never reported empty since that would require
    /// reading it.
    pub fn is_empty(&self) -> bool {
        match &self.content {
            Content::Empty => true,
            Content::Buffered(bytes) => bytes.is_empty(),
            Content::Deferred(_) => false,
        }
    }

    /// True for a buffered or empty body, which `get` may read repeatedly.
    pub fn is_buffered(&self) -> bool {
        !matches!(self.content, Content::Deferred(_))
    }

    /// True once a deferred body has been read.
    pub fn is_consumed(&self) -> bool {
        match &self.content {
            Content::Deferred(cell) => {
                let producer = cell.take();
                let consumed = producer.is_none();
                cell.set(producer);
                consumed
            }
            _ => false,
        }
    }

    /// Parses the content through `parser`.
    ///
    /// The underlying stream is dropped when `parser` is done with it, on
    /// success and on failure alike.
    pub fn get<V, P>(&self, parser: &P) -> Result<V>
    where
        P: BodyParser<V>,
    {
        let stream = self.open()?;
        parser.deserialize(stream)
    }

    /// Hands the raw stream to the caller without parsing or closing it.
    ///
    /// Returns `None` for an empty body. Like `get`, this consumes a
    /// deferred body.
    pub fn take_stream(&self) -> Result<Option<ByteStream>> {
        if matches!(self.content, Content::Empty) {
            return Ok(None);
        }
        self.open().map(Some)
    }

    /// Like `take_stream`, but a failing producer is reported as the raw
    /// I/O error so an upload can surface it as a transport failure.
    pub(crate) fn take_upload(&self) -> Result<Option<io::Result<ByteStream>>> {
        if matches!(self.content, Content::Empty) {
            return Ok(None);
        }
        self.produce().map(Some)
    }

    fn open(&self) -> Result<ByteStream> {
        self.produce()?.map_err(HttpError::deserialization)
    }

    fn produce(&self) -> Result<io::Result<ByteStream>> {
        match &self.content {
            Content::Empty => Ok(Ok(Box::new(io::empty()))),
            Content::Buffered(bytes) => Ok(Ok(Box::new(Cursor::new(bytes.clone())))),
            Content::Deferred(cell) => {
                let producer = cell.take().ok_or(HttpError::AlreadyConsumed)?;
                trace!("opening deferred body stream");
                Ok(producer())
            }
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            Content::Empty => f.write_str("Body::Empty"),
            Content::Buffered(bytes) => f
                .debug_struct("Body::Buffered")
                .field("len", &bytes.len())
                .finish(),
            Content::Deferred(_) => f
                .debug_struct("Body::Deferred")
                .field("consumed", &self.is_consumed())
                .finish(),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::buffered(bytes)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::buffered(text.into_bytes())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::buffered(Bytes::copy_from_slice(text.as_bytes()))
    }
}
