//! ECFS (Electronic Comment Filing System) API subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     client.rs GET proceedings?name=… → exactly one Proceeding
//!
//! Per submission:
//!     FilingInfo + [Proceeding]
//!     → filing.rs (build EcfsFiling; no proceedings = fatal)
//!     → client.rs (strip proceedings, POST filings)
//!     → FilingConfirmation
//! ```
//!
//! # Error Classes
//! - Transient: transport failure, non-2xx status, undecodable response
//! - Fatal: no proceedings, wrong result count, encoding failure, bad URL

pub mod client;
pub mod filing;
pub mod proceeding;
pub mod types;

pub use client::EcfsClient;
pub use filing::{Address, AddressEntity, EcfsFiling, FilingInfo, InternationalAddress, Named};
pub use proceeding::Proceeding;
pub use types::{ApiError, EcfsError, EcfsResult, FilingConfirmation};
