//! Primary/fallback source resolution.

use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::error::RelayError;
use crate::observability::metrics;
use crate::sources::catalog::SourceCatalog;
use crate::sources::fetcher::{DocumentFetcher, HttpFetcher};

/// Resolves a logical source id to a parsed document.
pub struct SourceResolver<F = HttpFetcher> {
    catalog: Arc<SourceCatalog>,
    fetcher: F,
}

impl<F: DocumentFetcher> SourceResolver<F> {
    pub fn new(catalog: Arc<SourceCatalog>, fetcher: F) -> Self {
        Self { catalog, fetcher }
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    /// Fetch the document for `source_id`, trying the primary locator and
    /// then the fallback. Root-relative fallbacks resolve against
    /// `request_origin`. The first parseable document wins; it is returned
    /// as-is, never merged.
    pub async fn resolve(&self, source_id: Option<&str>, request_origin: &str) -> Result<Value, RelayError> {
        let (id, spec) = self.catalog.lookup(source_id);

        if let Some(document) = self.attempt(id, "primary", &spec.primary).await {
            return Ok(document);
        }

        tracing::info!(source = id, "Primary source failed, trying fallback");
        match spec.fallback.resolve(request_origin) {
            Ok(url) => {
                if let Some(document) = self.attempt(id, "fallback", &url).await {
                    return Ok(document);
                }
            }
            Err(e) => {
                tracing::warn!(source = id, origin = request_origin, error = %e, "Cannot resolve fallback locator");
                metrics::record_source_fetch(id, "fallback", "miss");
            }
        }

        tracing::error!(source = id, "All sources exhausted");
        Err(RelayError::AllSourcesExhausted)
    }

    async fn attempt(&self, id: &str, locator: &'static str, url: &Url) -> Option<Value> {
        match self.fetcher.fetch_json(url).await {
            Ok(document) => {
                tracing::debug!(source = id, locator, url = %url, "Source fetched");
                metrics::record_source_fetch(id, locator, "hit");
                Some(document)
            }
            Err(e) => {
                tracing::warn!(source = id, locator, url = %url, error = %e, "Source fetch failed");
                metrics::record_source_fetch(id, locator, "miss");
                None
            }
        }
    }
}
