//! HTTP front end subsystem.
//!
//! # Data Flow
//! ```text
//! POST /submit (form-encoded)
//!     → form.rs (decode, normalize, validate)
//!     → handlers.rs (map to FilingInfo, file under a fresh Backoff)
//!     → response.rs (render confirmation or error page)
//!
//! GET / and other paths
//!     → static directory (tower-http ServeDir)
//! ```

pub mod form;
pub mod handlers;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
