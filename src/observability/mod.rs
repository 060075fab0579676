//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - API keys never appear in log fields
//! - Request ID flows through the web layer via tower-http
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
