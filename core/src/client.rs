//! Entry point for building requests.
//!
//! # Design
//! `Client` holds a shared transport handle and a `ClientConfig` and carries
//! no other state. Every request it builds gets its own `Head` and `Body`;
//! the config's headers travel as request defaults, so a caller replacing
//! the head keeps them. Independent requests never share mutable state.

use std::fmt;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::head::header::USER_AGENT;
use crate::head::Head;
use crate::http::{HttpMethod, Transport};
use crate::request::Request;

#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl Client {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: impl Transport + 'static, config: ClientConfig) -> Self {
        Self::from_shared(Arc::new(transport), config)
    }

    pub fn from_shared(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// A client backed by a default `UreqTransport`.
    #[cfg(feature = "ureq")]
    pub fn ureq(config: ClientConfig) -> Self {
        Self::with_config(crate::UreqTransport::new(), config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    fn default_head(&self) -> Head {
        let mut builder = Head::builder();
        for (name, value) in &self.config.default_headers {
            builder.add(name.as_str(), [value]);
        }
        if let Some(user_agent) = &self.config.user_agent {
            builder.remove(USER_AGENT.name());
            builder.add_header(&USER_AGENT, [user_agent.clone()]);
        }
        builder.build()
    }

    pub fn request(&self, method: HttpMethod, uri: impl Into<String>) -> Request {
        Request::new(Arc::clone(&self.transport), method, uri)
            .with_timeout(self.config.timeout)
            .with_defaults(self.default_head())
    }

    pub fn get(&self, uri: impl Into<String>) -> Request {
        self.request(HttpMethod::Get, uri)
    }

    pub fn post(&self, uri: impl Into<String>) -> Request {
        self.request(HttpMethod::Post, uri)
    }

    pub fn put(&self, uri: impl Into<String>) -> Request {
        self.request(HttpMethod::Put, uri)
    }

    pub fn delete(&self, uri: impl Into<String>) -> Request {
        self.request(HttpMethod::Delete, uri)
    }

    pub fn patch(&self, uri: impl Into<String>) -> Request {
        self.request(HttpMethod::Patch, uri)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").field("config", &self.config).finish_non_exhaustive()
    }
}
