//! Replies produced by `Request::send`.

use std::sync::Arc;

use crate::body::Body;
use crate::head::Head;
use crate::http::{StatusCode, Transport};
use crate::request::Request;

/// An immutable reply, together with the request that produced it.
#[derive(Debug)]
pub struct Response {
    request: Request,
    uri: String,
    status: StatusCode,
    head: Head,
    body: Body,
}

impl Response {
    pub(crate) fn new(request: Request, uri: String, status: StatusCode, head: Head, body: Body) -> Self {
        Self {
            request,
            uri,
            status,
            head,
            body,
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        self.request.transport()
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Where the exchange ended up; differs from the request URI after
    /// redirects.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    /// The reply content. Usually a single-use stream.
    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn into_parts(self) -> (StatusCode, Head, Body) {
        (self.status, self.head, self.body)
    }
}
