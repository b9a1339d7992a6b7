//! Blocking transport backed by `ureq`.
//!
//! Redirects are followed by the agent and 4xx/5xx replies come back as
//! ordinary responses; only I/O failures and timeouts are errors.
//!
//! Reply header names arrive lowercased from the `http` crate and are
//! title-cased per hyphen-separated word before they reach the `Head`, so
//! `content-type` becomes `Content-Type`. This is a spelling heuristic, not
//! the server's original casing: `etag` comes back as `Etag` and
//! `www-authenticate` as `Www-Authenticate`. Header lookups are exact, so
//! callers reading such headers must use the title-cased form. Other
//! transports pass names through untouched.

use std::io;
use std::time::Duration;

use ::ureq::http;
use ::ureq::{Agent, ResponseExt, SendBody};
use tracing::trace;

use crate::http::{Transport, TransportRequest, TransportResponse};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(CONNECT_TIMEOUT))
            .build()
            .new_agent();
        Self { agent }
    }

    /// Uses a preconfigured agent. It should have `http_status_as_error`
    /// disabled, otherwise error statuses surface as transport failures.
    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: TransportRequest) -> io::Result<TransportResponse> {
        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.uri.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let body = match request.body {
            Some(stream) => SendBody::from_owned_reader(stream),
            None => SendBody::none(),
        };
        let outgoing = builder
            .body(body)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let outgoing = self
            .agent
            .configure_request(outgoing)
            .timeout_global(request.timeout)
            .build();

        let response = self.agent.run(outgoing).map_err(into_io)?;
        let uri = response.get_uri().to_string();
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    canonical_name(name.as_str()),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        trace!(uri = %uri, status, "ureq exchange complete");

        Ok(TransportResponse {
            uri,
            status,
            headers,
            body: Box::new(response.into_body().into_reader()),
        })
    }
}

fn into_io(err: ::ureq::Error) -> io::Error {
    match err {
        ::ureq::Error::Io(e) => e,
        ::ureq::Error::Timeout(t) => io::Error::new(io::ErrorKind::TimedOut, format!("timed out: {t:?}")),
        other => io::Error::other(other),
    }
}

/// `content-type` → `Content-Type`. The `http` crate lowercases names;
/// this restores the conventional spelling the header registry uses.
fn canonical_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
