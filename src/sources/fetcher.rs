//! Document retrieval.
//!
//! # Responsibilities
//! - GET a locator and parse the body as JSON
//! - Bound each attempt with a deadline
//!
//! # Design Decisions
//! - `DocumentFetcher` is the seam between resolution policy and the network
//! - Every failure kind is a `FetchError`; the resolver decides what is soft

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::resilience::{with_timeout, TimeoutError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Retrieves a JSON document from a URL.
pub trait DocumentFetcher: Send + Sync {
    fn fetch_json(&self, url: &Url) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// `reqwest`-backed fetcher with a per-attempt deadline.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

impl DocumentFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Value, FetchError> {
        let attempt = async {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status));
            }
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        };

        with_timeout(self.timeout, attempt).await.map_err(|e| match e {
            TimeoutError::Elapsed(limit) => FetchError::Timeout(limit),
            TimeoutError::Inner(inner) => inner,
        })
    }
}
