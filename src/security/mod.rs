//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Proxied request:
//!     → limits.rs (buffer body within max_body_size)
//!     → headers.rs (drop host/content-length before forwarding)
//!
//! Every response:
//!     → headers.rs (strip deny-set from relayed headers, merge CORS)
//! ```
//!
//! # Design Decisions
//! - One fixed CORS policy for every route
//! - No trust in origin framing headers

pub mod headers;
pub mod limits;

pub use headers::{apply_cors, cors_headers, forward_request_headers, relay_response_headers};
