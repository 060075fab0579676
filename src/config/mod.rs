//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config.toml
//!     → loader.rs (parse & deserialize, defaults if absent)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! conf.json
//!     → credentials.rs (API key, read once)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Missing or malformed credentials are a fatal startup error

pub mod credentials;
pub mod loader;
pub mod schema;
pub mod validation;

pub use credentials::{Credentials, CredentialsError};
pub use loader::{load_config, load_config_if_present, ConfigError};
pub use schema::AppConfig;
pub use schema::{BackoffConfig, EcfsConfig, ListenerConfig, ObservabilityConfig, WebConfig};
