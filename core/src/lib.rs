//! Blocking HTTP client built around a typed content and metadata model.
//!
//! # Overview
//! Callers build a `Head` (ordered header multimap) and a `Body` (deferred,
//! single-use or buffered content), attach them to a `Request`, and `send`
//! it through a `Transport`. The reply comes back as an immutable
//! `Response` whose body is parsed on demand through a `BodyParser`.
//!
//! # Design
//! - The network exchange lives behind the `Transport` trait. The crate
//!   ships `UreqTransport` (feature `ureq`, on by default); tests plug in
//!   in-memory transports.
//! - Header values are typed through `Header<V>`; well-known headers and the
//!   `MimeType` table are process-wide statics built once.
//! - `UrlPath` derives child and parent paths without mutating the
//!   receiver.
//!
//! ```no_run
//! use fluff_http::{parser, Client, ClientConfig, Head, MimeType, ACCEPT};
//!
//! let client = Client::ureq(ClientConfig::default());
//! let head = Head::builder().add_header(&ACCEPT, [MimeType::ApplicationJson]).build();
//! let response = client.get("https://api.example.com/items").with_head(head).send()?;
//! let items = response.body().get(&parser::JSON_ARRAY)?;
//! # Ok::<(), fluff_http::HttpError>(())
//! ```

pub mod body;
pub mod client;
pub mod config;
pub mod error;
pub mod head;
pub mod http;
pub mod path;
pub mod request;
pub mod response;
#[cfg(feature = "ureq")]
mod ureq_transport;

pub use body::parser;
pub use body::{Body, BodyBuilder, BodyParser, ByteStream};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{HttpError, Result};
pub use head::header::{
    Header, HeaderParser, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE,
    USER_AGENT,
};
pub use head::mime::MimeType;
pub use head::{Head, HeadBuilder};
pub use http::{
    HttpMethod, StatusCategory, StatusCode, Transport, TransportRequest, TransportResponse,
};
pub use path::UrlPath;
pub use request::Request;
pub use response::Response;
#[cfg(feature = "ureq")]
pub use ureq_transport::UreqTransport;
