//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound call (proxy exchange, source fetch):
//!     → timeouts.rs (enforce deadline, cancel on expiry)
//!     → caller maps Elapsed/Inner to its own error
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No automatic retries: a proxy failure is reported, a source miss falls
//!   through to the next source

pub mod timeouts;

pub use timeouts::{with_timeout, TimeoutError};
