//! Document transforms.
//!
//! # Data Flow
//! ```text
//! fetched document (serde_json::Value)
//!     → prefix.rs (optional: route `api` fields through the relay)
//!     → canonical.rs (compact JSON text, integral floats as integers)
//!     → base58.rs (optional: JSON text → base-58 string)
//!     → response body
//! ```
//!
//! # Design Decisions
//! - Pure functions over borrowed input; every transform returns a new value
//! - `format.rs` is the closed table deciding which transforms run

pub mod base58;
pub mod canonical;
pub mod format;
pub mod prefix;

pub use base58::{encode, encode_bytes};
pub use canonical::canonical_json;
pub use format::OutputFormat;
pub use prefix::rewrite_prefix;
