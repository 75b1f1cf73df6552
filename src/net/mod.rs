//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! [listener.tls] configured?
//!     no  → tokio TcpListener → axum::serve
//!     yes → tls.rs (load PEM pair) → axum_server::bind_rustls
//! ```

pub mod tls;

pub use tls::{load_tls_config, TlsError};
