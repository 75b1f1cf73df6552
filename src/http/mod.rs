//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → routing::Router (classify the request)
//!     → preflight / health     → response.rs
//!     → *.json                 → assets.rs
//!     → ?url=                  → proxy::ProxyDispatcher
//!     → ?format=               → format.rs (sources + encoding)
//!     → anything else          → docs.rs
//! ```

pub mod assets;
pub mod docs;
pub mod format;
pub mod request;
pub mod response;
pub mod server;

pub use request::{OriginPolicy, RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
