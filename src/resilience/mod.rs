//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! API call (proceeding lookup / filing submission)
//!     → returns Result<T, ClassifiedError>
//!     → backoff.rs (Transient: grow delay, wait, retry; Fatal: return)
//!     → ceiling exceeded: last transient error surfaces to the caller
//! ```
//!
//! # Design Decisions
//! - Bounded total backoff, unbounded attempt count
//! - Backoff state is per operation, never shared between requests
//! - Async driver for the server, blocking driver for batch callers

pub mod backoff;

pub use backoff::Backoff;
