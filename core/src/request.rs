//! Outgoing requests.
//!
//! # Design
//! A `Request` is mutable until `send`, which takes it by value. That makes
//! the Built → Sent transition a move: a sent request cannot be edited or
//! sent again, and the `Response` keeps it as its origin.
//!
//! Headers a `Client` supplies are kept apart from the caller's head and
//! merged under it when the request is sent, so replacing the head never
//! drops them. A name the caller sets overrides the default of that name.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::body::Body;
use crate::config::DEFAULT_TIMEOUT;
use crate::error::{HttpError, Result};
use crate::head::{Head, HeadBuilder};
use crate::http::{HttpMethod, StatusCode, Transport, TransportRequest};
use crate::response::Response;

pub struct Request {
    transport: Arc<dyn Transport>,
    method: HttpMethod,
    uri: String,
    timeout: Option<Duration>,
    defaults: Head,
    head: Head,
    body: Body,
}

impl Request {
    /// A request with an empty head and body and the default timeout.
    pub fn new(transport: Arc<dyn Transport>, method: HttpMethod, uri: impl Into<String>) -> Self {
        Self {
            transport,
            method,
            uri: uri.into(),
            timeout: Some(DEFAULT_TIMEOUT),
            defaults: Head::empty(),
            head: Head::empty(),
            body: Body::empty(),
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> &mut Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn set_head(&mut self, head: Head) -> &mut Self {
        self.head = head;
        self
    }

    pub fn with_head(mut self, head: Head) -> Self {
        self.head = head;
        self
    }

    /// Edits the head in place through a builder seeded with its entries.
    pub fn edit_head<F>(&mut self, edit: F) -> &mut Self
    where
        F: FnOnce(&mut HeadBuilder),
    {
        let mut builder = HeadBuilder::new();
        builder.merge(&self.head);
        edit(&mut builder);
        self.head = builder.build();
        self
    }

    /// Headers sent under the caller's head; see `outgoing_head`.
    pub fn defaults(&self) -> &Head {
        &self.defaults
    }

    pub(crate) fn with_defaults(mut self, defaults: Head) -> Self {
        self.defaults = defaults;
        self
    }

    /// The head as the transport sees it: every default whose name the
    /// caller's head lacks, followed by the caller's head.
    pub fn outgoing_head(&self) -> Head {
        let mut builder = HeadBuilder::new();
        for (name, values) in self.defaults.iter() {
            if !self.head.contains(name) {
                builder.add(name, values);
            }
        }
        builder.merge(&self.head);
        builder.build()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn set_body(&mut self, body: Body) -> &mut Self {
        self.body = body;
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    fn to_transport(&self) -> Result<TransportRequest> {
        let body = if self.body.is_empty() {
            None
        } else {
            match self.body.take_upload()? {
                Some(Ok(stream)) => Some(stream),
                Some(Err(e)) => {
                    warn!(method = %self.method, uri = %self.uri, error = %e, "request body failed to open");
                    return Err(HttpError::Transport(e));
                }
                None => None,
            }
        };
        Ok(TransportRequest {
            method: self.method,
            uri: self.uri.clone(),
            headers: self.outgoing_head().to_pairs(),
            body,
            timeout: self.timeout,
        })
    }

    /// Dispatches the request and blocks until the transport replies.
    ///
    /// A deferred request body is consumed here; the transport owns and
    /// drops its stream. On failure no response exists.
    pub fn send(self) -> Result<Response> {
        let outgoing = self.to_transport()?;
        debug!(
            method = %self.method,
            uri = %self.uri,
            headers = outgoing.headers.len(),
            has_body = outgoing.body.is_some(),
            "sending request"
        );

        let reply = match self.transport.execute(outgoing) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(method = %self.method, uri = %self.uri, error = %e, "transport failed");
                return Err(HttpError::Transport(e));
            }
        };

        let status = StatusCode::new(reply.status);
        debug!(status = %status, uri = %reply.uri, "received response");
        Ok(Response::new(
            self,
            reply.uri,
            status,
            Head::from(reply.headers),
            Body::from_reader(reply.body),
        ))
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("timeout", &self.timeout)
            .field("defaults", &self.defaults)
            .field("head", &self.head)
            .field("body", &self.body)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read};
    use std::sync::Mutex;

    use super::*;
    use crate::body::parser::{BYTES, STRING};
    use crate::http::TransportResponse;

    /// Records what it was asked to send and answers with a canned reply.
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(TransportRequestSummary, Option<Vec<u8>>)>>,
        fail: bool,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct TransportRequestSummary {
        method: HttpMethod,
        uri: String,
        headers: Vec<(String, String)>,
        timeout: Option<Duration>,
    }

    impl Transport for Recorder {
        fn execute(&self, request: TransportRequest) -> io::Result<TransportResponse> {
            let body = request.body.map(|mut stream| {
                let mut buf = Vec::new();
                stream.read_to_end(&mut buf).map(|_| buf)
            });
            let body = body.transpose()?;
            let summary = TransportRequestSummary {
                method: request.method,
                uri: request.uri.clone(),
                headers: request.headers,
                timeout: request.timeout,
            };
            self.seen.lock().unwrap().push((summary, body));
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "cancelled"));
            }
            Ok(TransportResponse {
                uri: format!("{}?final", request.uri),
                status: 201,
                headers: vec![("X-Reply".to_string(), "yes".to_string())],
                body: Box::new(Cursor::new(b"created".to_vec())),
            })
        }
    }

    #[test]
    fn empty_body_is_sent_as_no_body() {
        let transport = Arc::new(Recorder::default());
        let response = Request::new(transport.clone(), HttpMethod::Get, "http://h/a")
            .send()
            .unwrap();
        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].1, None);
        assert_eq!(seen[0].0.timeout, Some(DEFAULT_TIMEOUT));
        assert_eq!(response.status(), 201);
    }

    #[test]
    fn head_and_body_reach_the_transport() {
        let transport = Arc::new(Recorder::default());
        let head = Head::builder().add("X-A", ["1", "2"]).build();
        let response = Request::new(transport.clone(), HttpMethod::Post, "http://h/items")
            .with_head(head)
            .with_body("payload")
            .with_timeout(None)
            .send()
            .unwrap();

        let seen = transport.seen.lock().unwrap();
        let (summary, body) = &seen[0];
        assert_eq!(summary.method, HttpMethod::Post);
        assert_eq!(
            summary.headers,
            vec![
                ("X-A".to_string(), "1".to_string()),
                ("X-A".to_string(), "2".to_string())
            ]
        );
        assert_eq!(summary.timeout, None);
        assert_eq!(body.as_deref(), Some(&b"payload"[..]));

        assert_eq!(response.uri(), "http://h/items?final");
        assert_eq!(response.head().get("X-Reply"), Some("yes"));
        assert_eq!(response.body().get(&STRING).unwrap(), "created");
        assert_eq!(response.request().body().get(&STRING).unwrap(), "payload");
    }

    #[test]
    fn deferred_body_is_consumed_by_send() {
        let transport = Arc::new(Recorder::default());
        let mut request = Request::new(transport.clone(), HttpMethod::Put, "http://h/blob");
        request.set_body(Body::from_reader(Cursor::new(vec![7u8; 4])));
        let response = request.send().unwrap();
        assert_eq!(transport.seen.lock().unwrap()[0].1, Some(vec![7u8; 4]));
        assert!(matches!(
            response.request().body().get(&BYTES),
            Err(HttpError::AlreadyConsumed)
        ));
    }

    #[test]
    fn consumed_body_cannot_be_sent() {
        let transport = Arc::new(Recorder::default());
        let body = Body::from_reader(Cursor::new(b"x".to_vec()));
        body.get(&BYTES).unwrap();
        let err = Request::new(transport.clone(), HttpMethod::Post, "http://h/")
            .with_body(body)
            .send()
            .unwrap_err();
        assert!(matches!(err, HttpError::AlreadyConsumed));
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn transport_failure_yields_no_response() {
        let transport = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let err = Request::new(transport, HttpMethod::Delete, "http://h/items/1")
            .send()
            .unwrap_err();
        match err {
            HttpError::Transport(e) => assert_eq!(e.kind(), io::ErrorKind::Interrupted),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failing_upload_is_a_transport_error() {
        let transport = Arc::new(Recorder::default());
        let err = Request::new(transport.clone(), HttpMethod::Post, "http://h/upload")
            .with_body(Body::deferred(|| {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "source closed"))
            }))
            .send()
            .unwrap_err();
        match err {
            HttpError::Transport(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn defaults_sit_under_the_callers_head() {
        let transport = Arc::new(Recorder::default());
        let defaults = Head::builder()
            .add("User-Agent", ["fluff/1.0"])
            .add("Accept", ["*/*"])
            .build();
        Request::new(transport.clone(), HttpMethod::Get, "http://h/")
            .with_defaults(defaults)
            .with_head(Head::builder().add("Accept", ["application/json"]).build())
            .send()
            .unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(
            seen[0].0.headers,
            vec![
                ("User-Agent".to_string(), "fluff/1.0".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ]
        );
    }

    #[test]
    fn edit_head_keeps_existing_entries() {
        let transport: Arc<dyn Transport> = Arc::new(Recorder::default());
        let mut request = Request::new(transport, HttpMethod::Get, "http://h/")
            .with_head(Head::builder().add("A", ["1"]).build());
        request.edit_head(|head| {
            head.add("A", ["2"]).add("B", ["3"]).remove("C");
        });
        assert_eq!(request.head().get_all("A").unwrap(), ["1", "2"]);
        assert_eq!(request.head().get("B"), Some("3"));
    }

    #[test]
    fn setters_replace_head_and_body() {
        let transport: Arc<dyn Transport> = Arc::new(Recorder::default());
        let mut request = Request::new(transport, HttpMethod::Patch, "http://h/");
        request
            .set_head(Head::builder().add("A", ["1"]).build())
            .set_body(Body::from("b"))
            .set_timeout(Some(Duration::from_secs(2)));
        assert_eq!(request.head().get("A"), Some("1"));
        assert_eq!(request.body().get(&STRING).unwrap(), "b");
        assert_eq!(request.timeout(), Some(Duration::from_secs(2)));
        assert_eq!(request.method(), HttpMethod::Patch);
        assert_eq!(request.uri(), "http://h/");
    }
}
