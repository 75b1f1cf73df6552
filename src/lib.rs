//! Edge relay: an open CORS proxy plus a configuration-subscription
//! endpoint.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ http::server ──▶ routing ──┬──▶ proxy ──────────▶ any http(s) target
//!                                           ├──▶ http::format ──▶ sources ──▶ primary / fallback
//!                                           │                  └─▶ encoding (prefix, base58)
//!                                           ├──▶ http::assets (local *.json)
//!                                           └──▶ http::docs
//!
//!     Cross-cutting: config, error, security (headers, body limits),
//!     resilience (timeouts), observability, lifecycle, net (TLS)
//! ```

// Core subsystems
pub mod config;
pub mod encoding;
pub mod error;
pub mod http;
pub mod net;
pub mod proxy;
pub mod routing;
pub mod sources;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;

pub use config::RelayConfig;
pub use error::RelayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
