//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → every subscriber wakes → servers stop accepting → drain → exit
//! ```
//!
//! # Design Decisions
//! - Startup is fail-fast: config, then catalog, then listener
//! - Shutdown is broadcast so any number of servers can follow it

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
