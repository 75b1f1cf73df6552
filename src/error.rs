//! Request-level errors surfaced to callers.
//!
//! Every variant is terminal for the request and renders as
//! `{"error": <display>, ...details}` with the CORS header set
//! (see `http::response`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use thiserror::Error;

use axum::http::StatusCode;

/// Errors that end a request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RelayError {
    /// Proxy target points back at this service.
    #[error("Loop detected: self-fetch blocked")]
    LoopDetected { url: String },

    /// Proxy target is not an http(s) URL.
    #[error("Invalid target URL")]
    InvalidTarget { url: String },

    /// Recovered proxy target does not parse as an absolute URL.
    #[error("Invalid URL")]
    InvalidUrl { url: String },

    /// `format` names no known output format.
    #[error("Invalid format parameter")]
    InvalidFormat { format: String },

    /// Neither the primary nor the fallback source produced a document.
    #[error("Failed to fetch configuration from all sources")]
    AllSourcesExhausted,

    /// Outbound proxy exchange failed or timed out.
    #[error("Proxy Error")]
    Proxy {
        message: String,
        target: String,
        timestamp: DateTime<Utc>,
    },
}

impl RelayError {
    /// Build a proxy failure stamped with the current time.
    pub fn proxy(message: impl Into<String>, target: impl Into<String>) -> Self {
        RelayError::Proxy {
            message: message.into(),
            target: target.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::LoopDetected { .. }
            | RelayError::InvalidTarget { .. }
            | RelayError::InvalidUrl { .. }
            | RelayError::InvalidFormat { .. } => StatusCode::BAD_REQUEST,
            RelayError::AllSourcesExhausted => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Proxy { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Fields merged next to `error` in the response body.
    pub fn details(&self) -> Map<String, Value> {
        let value = match self {
            RelayError::LoopDetected { url }
            | RelayError::InvalidTarget { url }
            | RelayError::InvalidUrl { url } => json!({ "url": url }),
            RelayError::InvalidFormat { format } => json!({ "format": format }),
            RelayError::AllSourcesExhausted => json!({}),
            RelayError::Proxy {
                message,
                target,
                timestamp,
            } => json!({
                "message": message,
                "target": target,
                "timestamp": timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    /// Complete JSON error body.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(self.to_string()));
        body.extend(self.details());
        Value::Object(body)
    }
}
