//! Configuration document sources.
//!
//! # Data Flow
//! ```text
//! source id (query parameter)
//!     → catalog.rs (id → primary + fallback locator; unknown → default)
//!     → resolver.rs (primary attempt, then fallback attempt)
//!     → fetcher.rs (bounded GET + JSON parse per attempt)
//!     → document or AllSourcesExhausted
//! ```
//!
//! # Design Decisions
//! - Catalog is built once at startup and shared read-only
//! - A single failed attempt is logged and absorbed, never surfaced
//! - No merging: the first parseable document is the answer

pub mod catalog;
pub mod fetcher;
pub mod resolver;

pub use catalog::{CatalogError, Locator, SourceCatalog, SourceSpec};
pub use fetcher::{DocumentFetcher, FetchError, HttpFetcher};
pub use resolver::SourceResolver;
