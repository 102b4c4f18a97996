//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, port valid)
//! - Check the upstream base URL is an absolute http(s) URL
//! - Check the inbound deadline outlasts the upstream timeout
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::new("listener.port", "must be greater than 0"));
    }
    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::new("listener.host", "must not be empty"));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "upstream.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "upstream.base_url",
            format!("invalid URL '{}': {}", config.upstream.base_url, e),
        )),
    }

    if config.upstream.request_timeout_ms == 0 {
        errors.push(ValidationError::new("upstream.request_timeout_ms", "must be greater than 0"));
    }
    if config.upstream.connect_timeout_ms == 0 {
        errors.push(ValidationError::new("upstream.connect_timeout_ms", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    } else if config.timeouts.request_secs.saturating_mul(1000)
        <= config.upstream.request_timeout_ms
    {
        // The upstream call must give up before the inbound deadline does.
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!(
                "must exceed upstream.request_timeout_ms ({} ms)",
                config.upstream.request_timeout_ms
            ),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address '{}'", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = GatewayConfig::default();
        config.listener.port = 0;
        config.upstream.base_url = "not a url".into();
        config.upstream.request_timeout_ms = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.port",
                "upstream.base_url",
                "upstream.request_timeout_ms",
                "observability.metrics_address",
            ]
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = GatewayConfig::default();
        config.upstream.base_url = "ftp://swapi.example/api".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "upstream.base_url: unsupported scheme 'ftp'");
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_upstream_timeout_must_fit_inside_request_deadline() {
        let mut config = GatewayConfig::default();
        config.upstream.request_timeout_ms = 60_000;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors[0].to_string(),
            "timeouts.request_secs: must exceed upstream.request_timeout_ms (60000 ms)"
        );

        config.upstream.request_timeout_ms = 29_999;
        assert!(validate_config(&config).is_ok());
        config.upstream.request_timeout_ms = 30_000;
        assert!(validate_config(&config).is_err());
    }
}
