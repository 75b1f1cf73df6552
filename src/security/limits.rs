//! Request body limits.
//!
//! # Responsibilities
//! - Buffer inbound bodies that must be replayed to a proxy target
//! - Enforce the configured maximum body size while buffering
//!
//! # Design Decisions
//! - GET and HEAD bodies are never read or forwarded
//! - Overflow is reported to the caller, who decides the response

use axum::body::{Body, Bytes};
use axum::http::Method;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to read request body: {0}")]
pub struct BodyReadError(#[from] axum::Error);

/// Whether `method` carries a body that should be forwarded.
pub fn forwards_body(method: &Method) -> bool {
    method != Method::GET && method != Method::HEAD
}

/// Buffer `body` up to `limit` bytes, or `None` for bodiless methods.
pub async fn buffer_body(method: &Method, body: Body, limit: usize) -> Result<Option<Bytes>, BodyReadError> {
    if !forwards_body(method) {
        return Ok(None);
    }
    let bytes = axum::body::to_bytes(body, limit).await?;
    Ok(Some(bytes))
}
