//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file. Every
//! field has a default so an empty file (or no file at all) is a valid config.

use serde::{Deserialize, Serialize};

/// Root configuration for the comment service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Remote ECFS API settings.
    pub ecfs: EcfsConfig,

    /// Retry backoff settings.
    pub backoff: BackoffConfig,

    /// Web front end settings.
    pub web: WebConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Remote ECFS API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EcfsConfig {
    /// API root; resource names are resolved against it, so it must end in `/`.
    pub base_url: String,

    /// Proceeding (docket) that web submissions are filed against.
    pub proceeding: String,

    /// JSON file holding the API key.
    pub credentials_path: String,

    /// Per-request timeout. Unset means the transport default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for EcfsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://publicapi.fcc.gov/ecfs/".to_string(),
            proceeding: "17-108".to_string(),
            credentials_path: "conf.json".to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Backoff configuration for API retries.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Multiplier applied to the delay after each transient failure.
    pub factor: f64,

    /// Starting delay in milliseconds (first wait is this times `factor`).
    pub initial_delay_ms: u64,

    /// Give up once the delay would exceed this many milliseconds.
    pub max_delay_ms: u64,

    /// Add up to 10% random jitter to each wait.
    pub jitter: bool,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            factor: 2.0,
            initial_delay_ms: 10,
            max_delay_ms: 10_000,
            jitter: false,
        }
    }
}

/// Web front end configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    /// Directory served for `GET /` and other static paths.
    pub static_dir: String,

    /// Time allowed for static and health requests. `/submit` is bounded
    /// only by the backoff ceiling.
    pub request_timeout_secs: u64,

    /// Maximum form body size in bytes.
    pub max_body_size: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            static_dir: "static".to_string(),
            request_timeout_secs: 60,
            max_body_size: 64 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
