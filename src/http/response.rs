//! Response construction.
//!
//! # Responsibilities
//! - Render `RelayError` as a JSON error body
//! - Build the small fixed responses (preflight, health, not found)
//! - Attach the CORS header set to everything the service emits
//!
//! # Design Decisions
//! - Relayed proxy responses get their headers from `security::headers`;
//!   everything else passes through `with_cors`

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::RelayError;
use crate::security::headers::{apply_cors, cors_headers};

pub const JSON_UTF8: &str = "application/json; charset=utf-8";
pub const TEXT_UTF8: &str = "text/plain; charset=utf-8";
pub const HTML_UTF8: &str = "text/html; charset=utf-8";

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = self.to_body().to_string();
        typed(self.status(), JSON_UTF8, body)
    }
}

/// Add the CORS set to any response.
pub fn with_cors(response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    apply_cors(response.headers_mut());
    response
}

/// Response with an explicit content type and the CORS set.
pub fn typed(status: StatusCode, content_type: &'static str, body: impl Into<Body>) -> Response {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    apply_cors(headers);
    response
}

/// 204 carrying only the CORS set.
pub fn preflight() -> Response {
    (StatusCode::NO_CONTENT, cors_headers()).into_response()
}

/// 200 `OK`.
pub fn health() -> Response {
    typed(StatusCode::OK, TEXT_UTF8, "OK")
}

/// 404 `Not found`.
pub fn not_found() -> Response {
    typed(StatusCode::NOT_FOUND, TEXT_UTF8, "Not found")
}
