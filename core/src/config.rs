//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HttpError, Result};

/// Per-request timeout applied when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Settings a `Client` applies to every request it builds.
///
/// Serialized with the timeout in whole seconds:
///
/// ```json
/// { "timeout_secs": 30, "user_agent": "fluff/1.0", "default_headers": [["Accept", "*/*"]] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(rename = "timeout_secs", with = "secs")]
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: None,
            default_headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(HttpError::deserialization)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.as_secs()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_fifteen_seconds() {
        assert_eq!(ClientConfig::default().timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = ClientConfig::from_json(r#"{"user_agent":"fluff/1.0"}"#).unwrap();
        assert_eq!(config.timeout, Some(DEFAULT_TIMEOUT));
        assert_eq!(config.user_agent.as_deref(), Some("fluff/1.0"));
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn null_timeout_disables_it() {
        let config = ClientConfig::from_json(r#"{"timeout_secs":null}"#).unwrap();
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn round_trips_through_json() {
        let config = ClientConfig::default()
            .with_timeout(Some(Duration::from_secs(30)))
            .with_default_header("Accept", "*/*");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["timeout_secs"], 30);
        assert_eq!(json["default_headers"][0][1], "*/*");
        let back: ClientConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn malformed_config_is_rejected() {
        let err = ClientConfig::from_json(r#"{"timeout_secs":"soon"}"#).unwrap_err();
        assert!(matches!(err, HttpError::Deserialization(_)));
    }
}
