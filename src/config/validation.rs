//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees syntactically.
//! Collects every violation instead of stopping at the first so a bad
//! config file can be fixed in one pass.

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic violation found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "upstream.base_url").
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, returning all violations.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            message: format!("not a valid socket address: {:?}", config.listener.bind_address),
        });
    }

    if config.listener.max_connections == 0 {
        errors.push(ValidationError {
            field: "listener.max_connections".into(),
            message: "must be greater than zero".into(),
        });
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError {
                    field: "upstream.base_url".into(),
                    message: format!("unsupported scheme: {:?}", url.scheme()),
                });
            }
            if url.host_str().is_none() {
                errors.push(ValidationError {
                    field: "upstream.base_url".into(),
                    message: "missing host".into(),
                });
            }
        }
        Err(e) => {
            errors.push(ValidationError {
                field: "upstream.base_url".into(),
                message: format!("not a valid URL: {}", e),
            });
        }
    }

    if config.upstream.connect_secs == 0 {
        errors.push(ValidationError {
            field: "upstream.connect_secs".into(),
            message: "must be greater than zero".into(),
        });
    }

    if !config.analysis.path.starts_with('/') {
        errors.push(ValidationError {
            field: "analysis.path".into(),
            message: "must start with '/'".into(),
        });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError {
            field: "security.max_body_size".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".into(),
            message: format!(
                "not a valid socket address: {:?}",
                config.observability.metrics_address
            ),
        });
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
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-addr".into();
        config.upstream.base_url = "ftp://backend".into();
        config.security.max_body_size = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "listener.bind_address"));
        assert!(errors.iter().any(|e| e.field == "upstream.base_url"));
        assert!(errors.iter().any(|e| e.field == "security.max_body_size"));
    }

    #[test]
    fn rejects_relative_analysis_path() {
        let mut config = GatewayConfig::default();
        config.analysis.path = "analysis/".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "analysis.path");
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
