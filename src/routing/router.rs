//! Request classification.
//!
//! # Responsibilities
//! - Decide which handler serves a request
//! - Return exactly one route for every request
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Fixed precedence, first match wins:
//!   preflight, health, static asset, proxy, format, documentation
//! - Documentation page is the explicit catch-all

use axum::http::{Method, Request};

use crate::routing::params::QueryParams;

/// What to do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight: 204 with CORS headers.
    Preflight,
    /// Liveness check.
    Health,
    /// `*.json` path served by the asset layer.
    StaticAsset,
    /// Forward to the decoded `url` parameter.
    Proxy { target: String },
    /// Deliver a configuration document.
    Format {
        format: String,
        source: Option<String>,
        prefix: Option<String>,
    },
    /// Usage page.
    Documentation,
}

impl Route {
    /// Low-cardinality label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Preflight => "preflight",
            Route::Health => "health",
            Route::StaticAsset => "asset",
            Route::Proxy { .. } => "proxy",
            Route::Format { .. } => "format",
            Route::Documentation => "docs",
        }
    }
}

/// Classifies requests into routes.
#[derive(Debug, Clone)]
pub struct Router {
    health_path: String,
}

impl Router {
    pub fn new(health_path: impl Into<String>) -> Self {
        Self {
            health_path: health_path.into(),
        }
    }

    pub fn classify<B>(&self, request: &Request<B>) -> Route {
        if request.method() == Method::OPTIONS {
            return Route::Preflight;
        }

        let path = request.uri().path();
        if path == self.health_path {
            return Route::Health;
        }
        if path.ends_with(".json") {
            return Route::StaticAsset;
        }

        let params = QueryParams::parse(request.uri().query());
        if let Some(target) = params.url.filter(|t| !t.is_empty()) {
            return Route::Proxy { target };
        }
        if let Some(format) = params.format {
            return Route::Format {
                format,
                source: params.source.filter(|s| !s.is_empty()),
                prefix: params.prefix.filter(|p| !p.is_empty()),
            };
        }

        Route::Documentation
    }
}
