//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Service identity and local collaborators.
    pub server: ServerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Configuration document sources.
    pub sources: SourcesConfig,

    /// Inbound limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Service identity and local collaborators.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Externally visible origin (e.g. "https://relay.example").
    /// When unset, the origin is derived from each request.
    pub public_origin: Option<String>,

    /// Health check path.
    pub health_path: String,

    /// Directory backing `*.json` requests. No directory means 404.
    pub assets_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            public_origin: None,
            health_path: "/health".to_string(),
            assets_dir: None,
        }
    }
}

/// Timeout configuration for outbound calls and whole requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Proxy exchange deadline (until response headers) in seconds.
    pub proxy_secs: u64,

    /// Deadline for each config source fetch attempt in seconds.
    pub source_fetch_secs: u64,

    /// Whole-request deadline in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            proxy_secs: 9,
            source_fetch_secs: 9,
            request_secs: 30,
        }
    }
}

/// Config document sources, keyed by logical id.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Id used when a request names none or an unknown one.
    pub default: String,

    /// Source definitions.
    pub entries: BTreeMap<String, SourceEntry>,
}

/// One source: a remote primary and a fallback that may be root-relative.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceEntry {
    /// Absolute http(s) URL.
    pub primary: String,

    /// Absolute URL, or a path such as "/full.json" resolved against the
    /// serving origin.
    pub fallback: String,
}

const UPSTREAM_BASE: &str = "https://raw.githubusercontent.com/xixianloux/LunaTV-config/refs/heads/main";

impl Default for SourcesConfig {
    fn default() -> Self {
        let entry = |remote: &str, local: &str| SourceEntry {
            primary: format!("{UPSTREAM_BASE}/{remote}"),
            fallback: local.to_string(),
        };

        let mut entries = BTreeMap::new();
        entries.insert("jin18".to_string(), entry("jin18.json", "/jin18.json"));
        entries.insert("jingjian".to_string(), entry("jingjian.json", "/jingjian.json"));
        entries.insert("full".to_string(), entry("LunaTV-config.json", "/LunaTV-config.json"));

        Self {
            default: "full".to_string(),
            entries,
        }
    }
}

/// Inbound limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum buffered request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
