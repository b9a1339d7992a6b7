//! Error types for the HTTP client model.
//!
//! # Design
//! Every fallible boundary (body codec, header codec, URL parsing, transport
//! call) maps to exactly one variant here. Codec failures keep their
//! underlying cause as a `source` so callers can tell an I/O failure during a
//! read apart from malformed content.

use std::io;

use thiserror::Error;

/// Boxed cause carried by codec errors.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by bodies, heads, URL paths and `Request::send`.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The string is not of the form `scheme://component/...`.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A value could not be turned into a byte stream.
    #[error("body serialization failed: {0}")]
    Serialization(#[source] Cause),

    /// A byte stream could not be turned into a value, either because the
    /// content is malformed or because reading it failed.
    #[error("body deserialization failed: {0}")]
    Deserialization(#[source] Cause),

    /// A present header value does not parse as the header's type.
    #[error("header {name} has unparseable value {value:?}: {reason}")]
    HeaderParse {
        name: String,
        value: String,
        reason: String,
    },

    /// The header was declared with an empty value table.
    #[error("header {name} has no registered values to parse against")]
    UndefinedHeaderCodec { name: String },

    /// A single-use body was read a second time.
    #[error("body stream was already consumed")]
    AlreadyConsumed,

    /// The transport failed or was interrupted; no response was produced.
    #[error("transport error: {0}")]
    Transport(#[source] io::Error),
}

impl HttpError {
    pub(crate) fn serialization(cause: impl Into<Cause>) -> Self {
        HttpError::Serialization(cause.into())
    }

    pub(crate) fn deserialization(cause: impl Into<Cause>) -> Self {
        HttpError::Deserialization(cause.into())
    }
}

pub type Result<T> = std::result::Result<T, HttpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_keeps_io_source() {
        let err = HttpError::Transport(io::Error::new(io::ErrorKind::TimedOut, "deadline"));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "deadline");
        assert_eq!(err.to_string(), "transport error: deadline");
    }

    #[test]
    fn header_parse_message_names_header_and_value() {
        let err = HttpError::HeaderParse {
            name: "Content-Length".to_string(),
            value: "ten".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "header Content-Length has unparseable value \"ten\": invalid digit found in string"
        );
    }

    #[test]
    fn deserialization_wraps_string_cause() {
        let err = HttpError::deserialization("not an object");
        assert!(matches!(err, HttpError::Deserialization(_)));
        assert_eq!(err.to_string(), "body deserialization failed: not an object");
    }
}
