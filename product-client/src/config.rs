//! Client settings read from the environment.

use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
    /// Name reported in errors raised by the service error handler.
    pub service_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: None,
            read_timeout: None,
            service_name: "product-service".to_string(),
        }
    }
}

impl ClientConfig {
    /// Read `PRODUCT_API_URL`, `PRODUCT_API_CONNECT_TIMEOUT_MS`,
    /// `PRODUCT_API_READ_TIMEOUT_MS` and `PRODUCT_API_SERVICE_NAME`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            base_url: lookup("PRODUCT_API_URL").unwrap_or(defaults.base_url),
            connect_timeout: millis(&lookup, "PRODUCT_API_CONNECT_TIMEOUT_MS")?,
            read_timeout: millis(&lookup, "PRODUCT_API_READ_TIMEOUT_MS")?,
            service_name: lookup("PRODUCT_API_SERVICE_NAME").unwrap_or(defaults.service_name),
        })
    }
}

fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidValue { key, value })
        })
        .transpose()
}
