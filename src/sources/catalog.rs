//! Source catalog: logical source ids mapped to their locators.

use std::collections::HashMap;

use thiserror::Error;
use url::Url;

use crate::config::SourcesConfig;

/// Where a document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Absolute http(s) URL.
    Absolute(Url),
    /// Path on the serving origin, e.g. "/full.json".
    RootRelative(String),
}

impl Locator {
    pub fn parse(value: &str) -> Result<Self, url::ParseError> {
        if value.starts_with('/') {
            Ok(Locator::RootRelative(value.to_string()))
        } else {
            Url::parse(value).map(Locator::Absolute)
        }
    }

    /// Absolute URL for this locator, given the serving origin
    /// (scheme://host[:port], no trailing slash).
    pub fn resolve(&self, origin: &str) -> Result<Url, url::ParseError> {
        match self {
            Locator::Absolute(url) => Ok(url.clone()),
            Locator::RootRelative(path) => Url::parse(&format!("{origin}{path}")),
        }
    }
}

/// Primary and fallback locator for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub primary: Url,
    pub fallback: Locator,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("source {id:?}: invalid {which} locator {value:?}: {source}")]
    InvalidLocator {
        id: String,
        which: &'static str,
        value: String,
        source: url::ParseError,
    },

    #[error("default source {0:?} is not defined")]
    MissingDefault(String),
}

/// Immutable id → SourceSpec table with a designated default.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    entries: HashMap<String, SourceSpec>,
    default_id: String,
}

impl SourceCatalog {
    pub fn from_config(config: &SourcesConfig) -> Result<Self, CatalogError> {
        let mut entries = HashMap::with_capacity(config.entries.len());
        for (id, entry) in &config.entries {
            let invalid = |which, value: &str, source| CatalogError::InvalidLocator {
                id: id.clone(),
                which,
                value: value.to_string(),
                source,
            };
            let primary = Url::parse(&entry.primary).map_err(|e| invalid("primary", &entry.primary, e))?;
            let fallback = Locator::parse(&entry.fallback).map_err(|e| invalid("fallback", &entry.fallback, e))?;
            entries.insert(id.clone(), SourceSpec { primary, fallback });
        }

        if !entries.contains_key(&config.default) {
            return Err(CatalogError::MissingDefault(config.default.clone()));
        }

        Ok(Self {
            entries,
            default_id: config.default.clone(),
        })
    }

    /// Look up `id`; absent or unknown ids resolve to the default source.
    /// Returns the id actually used together with its spec.
    pub fn lookup(&self, id: Option<&str>) -> (&str, &SourceSpec) {
        if let Some((key, spec)) = id.and_then(|id| self.entries.get_key_value(id)) {
            return (key.as_str(), spec);
        }
        let spec = &self.entries[&self.default_id];
        (self.default_id.as_str(), spec)
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// Known ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
