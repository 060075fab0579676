//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges and cross-field rules.
//! All problems are collected so a bad file is fixed in one round.

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
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

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    match Url::parse(&config.ecfs.base_url) {
        Ok(url) if !url.path().ends_with('/') => errors.push(ValidationError::new(
            "ecfs.base_url",
            "must end with '/'",
        )),
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::new("ecfs.base_url", e.to_string())),
    }

    if config.ecfs.proceeding.trim().is_empty() {
        errors.push(ValidationError::new("ecfs.proceeding", "must not be empty"));
    }

    if config.ecfs.request_timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "ecfs.request_timeout_secs",
            "must be greater than 0",
        ));
    }

    let backoff = &config.backoff;
    if !(backoff.factor > 1.0) || !backoff.factor.is_finite() {
        errors.push(ValidationError::new(
            "backoff.factor",
            "must be a finite number greater than 1",
        ));
    }
    if backoff.initial_delay_ms == 0 {
        errors.push(ValidationError::new(
            "backoff.initial_delay_ms",
            "must be greater than 0",
        ));
    }
    if backoff.max_delay_ms < backoff.initial_delay_ms {
        errors.push(ValidationError::new(
            "backoff.max_delay_ms",
            "must not be smaller than backoff.initial_delay_ms",
        ));
    }

    if config.web.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "web.request_timeout_secs",
            "must be greater than 0",
        ));
    }
    if config.web.max_body_size == 0 {
        errors.push(ValidationError::new("web.max_body_size", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
