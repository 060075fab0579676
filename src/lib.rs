//! Comment filing service for the FCC's Electronic Comment Filing System.

pub mod config;
pub mod ecfs;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::AppConfig;
pub use ecfs::EcfsClient;
pub use error::ClassifiedError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resilience::Backoff;
