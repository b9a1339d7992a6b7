//! Hierarchical URL paths.
//!
//! # Design
//! `UrlPath` is a value type: the rendered `path` string is computed once at
//! construction and `derive` / `parent` always build a new instance. The
//! trailing slash marks a directory, except that a path with a single
//! component (a bare host) always renders with one, so `https://example.com`
//! and `https://example.com/` are the same path.

use std::fmt;
use std::str::FromStr;

use crate::error::{HttpError, Result};

const SCHEME_SEPARATOR: &str = "://";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlPath {
    protocol: String,
    components: Vec<String>,
    directory: bool,
    path: String,
}

impl UrlPath {
    fn new(protocol: String, components: Vec<String>, directory: bool) -> Self {
        let mut path = format!("{protocol}{SCHEME_SEPARATOR}{}", components.join("/"));
        if directory || components.len() == 1 {
            path.push('/');
        }
        Self {
            protocol,
            components,
            directory,
            path,
        }
    }

    /// Parses `scheme://c1/c2/...`. Empty segments are dropped.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.split(SCHEME_SEPARATOR);
        let (Some(protocol), Some(rest), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(HttpError::InvalidUrl(format!(
                "{raw:?} must contain {SCHEME_SEPARATOR:?} exactly once"
            )));
        };
        let components = split_components(rest);
        if components.is_empty() {
            return Err(HttpError::InvalidUrl(format!("{raw:?} has no host")));
        }
        Ok(Self::new(protocol.to_string(), components, raw.ends_with('/')))
    }

    /// Appends the components of `suffix`. The result is a directory iff
    /// `suffix` ends with `/`.
    pub fn derive(&self, suffix: &str) -> Self {
        let mut components = self.components.clone();
        components.extend(split_components(suffix));
        Self::new(self.protocol.clone(), components, suffix.ends_with('/'))
    }

    /// The enclosing directory, or `None` for a bare host.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.components.split_last()?;
        if rest.is_empty() {
            return None;
        }
        Some(Self::new(self.protocol.clone(), rest.to_vec(), true))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn is_directory(&self) -> bool {
        self.directory
    }
}

fn split_components(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

impl fmt::Display for UrlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl FromStr for UrlPath {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl From<&UrlPath> for String {
    fn from(path: &UrlPath) -> Self {
        path.path.clone()
    }
}

impl From<UrlPath> for String {
    fn from(path: UrlPath) -> Self {
        path.path
    }
}
