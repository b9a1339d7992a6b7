//! Transport-level plain data and the `Transport` seam.
//!
//! # Design
//! These types describe an exchange the way a transport sees it: flat
//! header pairs, a raw byte stream, a bare status code. `Request::send`
//! converts to and from the richer `Head` / `Body` model on either side of
//! `Transport::execute`, so a transport implementation never depends on the
//! codec machinery and a test can substitute an in-memory transport.

use std::fmt;
use std::io;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::body::ByteStream;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse class of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

impl StatusCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn category(&self) -> StatusCategory {
        match self.0 {
            100..=199 => StatusCategory::Informational,
            200..=299 => StatusCategory::Success,
            300..=399 => StatusCategory::Redirection,
            400..=499 => StatusCategory::ClientError,
            500..=599 => StatusCategory::ServerError,
            _ => StatusCategory::Unknown,
        }
    }

    pub fn is_success(&self) -> bool {
        self.category() == StatusCategory::Success
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl PartialEq<u16> for StatusCode {
    fn eq(&self, other: &u16) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a transport is asked to send.
///
/// `body: None` is the explicit empty-body marker; `Some` carries a stream
/// the transport reads exactly once.
pub struct TransportRequest {
    pub method: HttpMethod,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<ByteStream>,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRequest")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(|_| ".."))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// What a transport hands back. `uri` is where the exchange ended up, which
/// differs from the request URI after redirects.
pub struct TransportResponse {
    pub uri: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: ByteStream,
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("uri", &self.uri)
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Performs the actual network exchange. Blocks until the reply head is
/// available; the reply body may still be streaming when this returns.
///
/// Enforcing `TransportRequest::timeout` is the implementation's job.
pub trait Transport: Send + Sync {
    fn execute(&self, request: TransportRequest) -> io::Result<TransportResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_categories() {
        assert_eq!(StatusCode::new(101).category(), StatusCategory::Informational);
        assert_eq!(StatusCode::new(204).category(), StatusCategory::Success);
        assert_eq!(StatusCode::new(308).category(), StatusCategory::Redirection);
        assert_eq!(StatusCode::new(404).category(), StatusCategory::ClientError);
        assert_eq!(StatusCode::new(503).category(), StatusCategory::ServerError);
        assert_eq!(StatusCode::new(99).category(), StatusCategory::Unknown);
        assert!(StatusCode::from(200).is_success());
        assert!(!StatusCode::from(302).is_success());
    }

    #[test]
    fn status_compares_with_raw_code() {
        assert_eq!(StatusCode::new(200), 200);
        assert_eq!(StatusCode::new(418).to_string(), "418");
    }

    #[test]
    fn methods_render_uppercase() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        let json = serde_json::to_string(&HttpMethod::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
        let back: HttpMethod = serde_json::from_str("\"GET\"").unwrap();
        assert_eq!(back, HttpMethod::Get);
    }
}
