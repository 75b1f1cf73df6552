//! Formatted configuration delivery.

use axum::http::StatusCode;
use axum::response::Response;

use crate::encoding::{self, format::UnknownFormat, OutputFormat};
use crate::error::RelayError;
use crate::http::response::typed;
use crate::sources::{DocumentFetcher, SourceResolver};

const JSON_BODY: &str = "application/json;charset=UTF-8";
const BASE58_BODY: &str = "text/plain;charset=UTF-8";

/// Prefix used when the caller supplies none: route `api` calls back
/// through this service's proxy endpoint.
pub fn default_prefix(origin: &str) -> String {
    format!("{origin}/?url=")
}

/// Resolve `source`, apply the transforms `format` asks for, and render.
pub async fn deliver<F: DocumentFetcher>(
    resolver: &SourceResolver<F>,
    format: &str,
    source: Option<&str>,
    prefix: Option<&str>,
    origin: &str,
) -> Result<Response, RelayError> {
    let format: OutputFormat = format
        .parse()
        .map_err(|UnknownFormat(format)| RelayError::InvalidFormat { format })?;

    let document = resolver.resolve(source, origin).await?;

    let document = if format.apply_prefix() {
        let prefix = prefix.map(str::to_string).unwrap_or_else(|| default_prefix(origin));
        encoding::rewrite_prefix(&document, &prefix)
    } else {
        document
    };

    if format.apply_base_encoding() {
        Ok(typed(StatusCode::OK, BASE58_BODY, encoding::encode(&document)))
    } else {
        Ok(typed(StatusCode::OK, JSON_BODY, encoding::canonical_json(&document)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourcesConfig;
    use crate::sources::{FetchError, SourceCatalog};
    use axum::http::header;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use url::Url;

    /// Answers every URL with the same document, or fails every fetch.
    struct StaticFetcher(Option<Value>);

    impl DocumentFetcher for StaticFetcher {
        async fn fetch_json(&self, _url: &Url) -> Result<Value, FetchError> {
            self.0.clone().ok_or(FetchError::Status(reqwest::StatusCode::BAD_GATEWAY))
        }
    }

    const ORIGIN: &str = "https://relay.example";

    fn resolver(document: Option<Value>) -> SourceResolver<StaticFetcher> {
        let catalog = SourceCatalog::from_config(&SourcesConfig::default()).unwrap();
        SourceResolver::new(Arc::new(catalog), StaticFetcher(document))
    }

    fn sample() -> Value {
        json!({"cache_time": 7200, "api_site": {"a": {"api": "https://a.example/api.php", "name": "A"}}})
    }

    async fn body(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_raw() {
        let response = deliver(&resolver(Some(sample())), "raw", None, None, ORIGIN).await.unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_BODY);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let delivered: Value = serde_json::from_str(&body(response).await).unwrap();
        assert_eq!(delivered, sample());
    }

    #[tokio::test]
    async fn test_proxy_uses_default_prefix() {
        let response = deliver(&resolver(Some(sample())), "1", None, None, ORIGIN).await.unwrap();
        let delivered: Value = serde_json::from_str(&body(response).await).unwrap();
        assert_eq!(
            delivered["api_site"]["a"]["api"],
            "https://relay.example/?url=https://a.example/api.php"
        );
    }

    #[tokio::test]
    async fn test_proxy_with_custom_prefix() {
        let response = deliver(&resolver(Some(sample())), "proxy", None, Some("https://p.example/?u="), ORIGIN)
            .await
            .unwrap();
        let delivered: Value = serde_json::from_str(&body(response).await).unwrap();
        assert_eq!(delivered["api_site"]["a"]["api"], "https://p.example/?u=https://a.example/api.php");
    }

    #[tokio::test]
    async fn test_base58_variants() {
        let raw = deliver(&resolver(Some(sample())), "2", None, None, ORIGIN).await.unwrap();
        assert_eq!(raw.headers()[header::CONTENT_TYPE], BASE58_BODY);
        assert_eq!(body(raw).await, encoding::encode(&sample()));

        let proxied = deliver(&resolver(Some(sample())), "proxy-base58", None, None, ORIGIN).await.unwrap();
        let expected = encoding::encode(&encoding::rewrite_prefix(&sample(), &default_prefix(ORIGIN)));
        assert_eq!(body(proxied).await, expected);
    }

    #[tokio::test]
    async fn test_invalid_format_checked_before_fetch() {
        let err = deliver(&resolver(None), "99", None, None, ORIGIN).await.unwrap_err();
        assert_eq!(err, RelayError::InvalidFormat { format: "99".into() });
    }

    #[tokio::test]
    async fn test_exhausted_sources() {
        let err = deliver(&resolver(None), "0", Some("jin18"), None, ORIGIN).await.unwrap_err();
        assert_eq!(err, RelayError::AllSourcesExhausted);
    }

    #[tokio::test]
    async fn test_json_output_is_canonical() {
        let document: Value = serde_json::from_str(r#"{"cache_time":7200.0}"#).unwrap();
        let response = deliver(&resolver(Some(document)), "raw", None, None, ORIGIN).await.unwrap();
        assert_eq!(body(response).await, r#"{"cache_time":7200}"#);
    }
}
