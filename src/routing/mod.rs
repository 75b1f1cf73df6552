//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query)
//!     → params.rs (decode url/format/source/prefix)
//!     → router.rs (fixed-precedence classification)
//!     → Route (consumed by http::server)
//! ```
//!
//! # Design Decisions
//! - Classification is pure; handlers never re-inspect the request shape
//! - Deterministic: same input always yields the same route
//! - First match wins

pub mod params;
pub mod router;

pub use params::QueryParams;
pub use router::{Route, Router};
