//! Open proxy: forward any request to a caller-named http(s) target.
//!
//! # Data Flow
//! ```text
//! ?url=<target>
//!     → target.rs (loop guard, scheme check, raw-query recovery, parse)
//!     → dispatcher.rs (buffer body, clone request, bounded send)
//!     → security::headers (filter response headers, merge CORS)
//!     → streamed response with the target's status
//! ```
//!
//! # Design Decisions
//! - Every rejection happens before any network activity
//! - One attempt per request; failures become a 502 with details

pub mod dispatcher;
pub mod target;

pub use dispatcher::ProxyDispatcher;
pub use target::ProxyTarget;
