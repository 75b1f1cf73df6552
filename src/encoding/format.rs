//! Output formats for configuration delivery.

use std::fmt;
use std::str::FromStr;

/// The closed set of delivery formats selected by the `format` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Document as fetched.
    Raw,
    /// `api` fields routed through the relay prefix.
    Proxy,
    /// Base-58 of the raw document.
    Base58,
    /// Base-58 of the prefixed document.
    ProxyBase58,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Raw,
        OutputFormat::Proxy,
        OutputFormat::Base58,
        OutputFormat::ProxyBase58,
    ];

    pub fn apply_prefix(self) -> bool {
        matches!(self, OutputFormat::Proxy | OutputFormat::ProxyBase58)
    }

    pub fn apply_base_encoding(self) -> bool {
        matches!(self, OutputFormat::Base58 | OutputFormat::ProxyBase58)
    }

    /// Mnemonic token, e.g. `proxy-base58`.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Raw => "raw",
            OutputFormat::Proxy => "proxy",
            OutputFormat::Base58 => "base58",
            OutputFormat::ProxyBase58 => "proxy-base58",
        }
    }

    /// Numeric token, e.g. `3`.
    pub fn code(self) -> &'static str {
        match self {
            OutputFormat::Raw => "0",
            OutputFormat::Proxy => "1",
            OutputFormat::Base58 => "2",
            OutputFormat::ProxyBase58 => "3",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token that names no format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.code() == token || f.name() == token)
            .ok_or_else(|| UnknownFormat(token.to_string()))
    }
}
