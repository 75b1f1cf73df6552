//! Request identity and origin.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) unless the client sent one
//! - Work out the origin this service is reachable at for a request
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A configured public origin always wins over request headers

use axum::http::{header, HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Layer assigning `x-request-id` to inbound requests lacking one.
pub fn set_request_id_layer() -> SetRequestIdLayer<UuidRequestId> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), UuidRequestId)
}

/// Layer copying `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// Read access to the request ID.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

/// Derives the service origin (`scheme://host[:port]`) for a request.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    configured: Option<String>,
    fallback_host: String,
    default_scheme: &'static str,
}

impl OriginPolicy {
    /// `configured` is the public origin, if any; `fallback_host` is used
    /// when the request carries no authority at all.
    pub fn new(configured: Option<String>, fallback_host: impl Into<String>) -> Self {
        Self {
            configured,
            fallback_host: fallback_host.into(),
            default_scheme: "http",
        }
    }

    /// Scheme assumed when neither the URI nor `X-Forwarded-Proto` names one.
    pub fn with_default_scheme(mut self, scheme: &'static str) -> Self {
        self.default_scheme = scheme;
        self
    }

    pub fn for_request<B>(&self, request: &Request<B>) -> String {
        if let Some(origin) = &self.configured {
            return origin.clone();
        }

        let scheme = request
            .headers()
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|s| s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https"))
            .or_else(|| request.uri().scheme_str())
            .unwrap_or(self.default_scheme)
            .to_ascii_lowercase();

        let host = request
            .uri()
            .authority()
            .map(|a| a.as_str())
            .or_else(|| request.headers().get(header::HOST).and_then(|v| v.to_str().ok()))
            .filter(|h| !h.is_empty())
            .unwrap_or(&self.fallback_host)
            .to_ascii_lowercase();

        format!("{scheme}://{host}")
    }
}
