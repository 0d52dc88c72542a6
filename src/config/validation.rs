//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port, limits, timeouts)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ReceiverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ReceiverConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ReceiverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut fail = |field, message: &str| {
        errors.push(ValidationError {
            field,
            message: message.to_string(),
        })
    };

    if config.listener.port == 0 {
        fail("listener.port", "must be between 1 and 65535");
    }
    if config.listener.host.trim().is_empty() {
        fail("listener.host", "must not be empty");
    }
    if config.storage.upload_dir.as_os_str().is_empty() {
        fail("storage.upload_dir", "must not be empty");
    }
    if matches!(&config.storage.records_dir, Some(dir) if dir.as_os_str().is_empty()) {
        fail("storage.records_dir", "must not be empty when set");
    }
    if config.limits.max_body_bytes == 0 {
        fail("limits.max_body_bytes", "must be greater than zero");
    }
    if config.timeouts.request_secs == 0 {
        fail("timeouts.request_secs", "must be greater than zero");
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        fail("observability.metrics_address", "must be a socket address");
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
        assert!(validate_config(&ReceiverConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ReceiverConfig::default();
        config.listener.port = 0;
        config.limits.max_body_bytes = 0;
        config.timeouts.request_secs = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "not-an-address".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.port",
                "limits.max_body_bytes",
                "timeouts.request_secs",
                "observability.metrics_address",
            ]
        );
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = ReceiverConfig::default();
        config.observability.metrics_address = "nonsense".into();
        assert!(validate_config(&config).is_ok());
    }
}
