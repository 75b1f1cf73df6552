//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default source exists)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Validate source locators and the public origin
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field}: {value:?} is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("default source {0:?} is not defined in sources.entries")]
    UnknownDefaultSource(String),

    #[error("source {id:?}: primary {value:?} is not an absolute http(s) URL")]
    InvalidPrimary { id: String, value: String },

    #[error("source {id:?}: fallback {value:?} is neither a root-relative path nor an absolute http(s) URL")]
    InvalidFallback { id: String, value: String },

    #[error("server.public_origin {0:?} is not an absolute http(s) origin")]
    InvalidPublicOrigin(String),

    #[error("server.health_path {0:?} must start with '/'")]
    InvalidHealthPath(String),

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    for (name, secs) in [
        ("proxy_secs", config.timeouts.proxy_secs),
        ("source_fetch_secs", config.timeouts.source_fetch_secs),
        ("request_secs", config.timeouts.request_secs),
    ] {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if !config.sources.entries.contains_key(&config.sources.default) {
        errors.push(ValidationError::UnknownDefaultSource(config.sources.default.clone()));
    }
    for (id, entry) in &config.sources.entries {
        if !is_http_url(&entry.primary) {
            errors.push(ValidationError::InvalidPrimary {
                id: id.clone(),
                value: entry.primary.clone(),
            });
        }
        if !(entry.fallback.starts_with('/') || is_http_url(&entry.fallback)) {
            errors.push(ValidationError::InvalidFallback {
                id: id.clone(),
                value: entry.fallback.clone(),
            });
        }
    }

    if let Some(origin) = &config.server.public_origin {
        let valid = Url::parse(origin)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host() && u.path() == "/")
            .unwrap_or(false);
        if !valid || origin.ends_with('/') {
            errors.push(ValidationError::InvalidPublicOrigin(origin.clone()));
        }
    }

    if !config.server.health_path.starts_with('/') {
        errors.push(ValidationError::InvalidHealthPath(config.server.health_path.clone()));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}
