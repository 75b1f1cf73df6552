//! TLS configuration and certificate loading.

use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;

use crate::config::TlsConfig;

#[derive(Debug, Error)]
pub enum TlsError {
    #[error("{kind} file not found: {}", path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    #[error("failed to load certificate/key: {0}")]
    Load(#[from] std::io::Error),
}

fn require(kind: &'static str, path: &Path) -> Result<(), TlsError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(TlsError::NotFound {
            kind,
            path: path.to_path_buf(),
        })
    }
}

/// Load the PEM certificate chain and private key named by `config`.
pub async fn load_tls_config(config: &TlsConfig) -> Result<RustlsConfig, TlsError> {
    let cert = Path::new(&config.cert_path);
    let key = Path::new(&config.key_path);
    require("certificate", cert)?;
    require("private key", key)?;

    Ok(RustlsConfig::from_pem_file(cert, key).await?)
}
