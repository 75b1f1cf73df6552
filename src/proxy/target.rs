//! Proxy target validation and recovery.
//!
//! # Responsibilities
//! - Refuse targets pointing back at this service, both as named and as
//!   recovered
//! - Require an http(s) scheme before any network activity
//! - Recover the full target from the raw query string
//!
//! # Design Decisions
//! - Recovery is deliberately permissive: everything after the first `url=`
//!   parameter marker up to the end of the query is the target, so a target
//!   carrying its own `&`-separated query survives intact. Parameters placed
//!   after `url` therefore belong to the target, not to the relay.
//! - Percent-decoding leaves `+` alone; only `%XX` escapes are decoded

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::RelayError;

const URL_PARAM: &str = "url=";

/// A validated, absolute proxy target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    url: Url,
    raw: String,
}

impl ProxyTarget {
    /// Validate `param` (the decoded `url` query value) against
    /// `service_origin`, then recover the full target from `raw_query`.
    pub fn from_request(param: &str, raw_query: Option<&str>, service_origin: &str) -> Result<Self, RelayError> {
        if starts_with_ignore_case(param, service_origin) {
            return Err(RelayError::LoopDetected { url: param.to_string() });
        }

        if !has_http_scheme(param) {
            return Err(RelayError::InvalidTarget { url: param.to_string() });
        }

        let raw = match raw_query.and_then(raw_url_tail) {
            Some(tail) => percent_decode_str(tail)
                .decode_utf8()
                .map_err(|_| RelayError::InvalidUrl { url: tail.to_string() })?
                .into_owned(),
            None => param.to_string(),
        };

        let url = Url::parse(&raw).map_err(|_| RelayError::InvalidUrl { url: raw.clone() })?;

        // The recovered tail may differ from `param`; guard what is fetched.
        if same_origin(&url, service_origin) {
            return Err(RelayError::LoopDetected { url: raw });
        }

        Ok(Self { url, raw })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Target as recovered, before URL normalization.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Case-insensitive `^https?://`.
fn has_http_scheme(value: &str) -> bool {
    starts_with_ignore_case(value, "http://") || starts_with_ignore_case(value, "https://")
}

/// Whether `url` has the scheme, host and port of `service_origin`.
fn same_origin(url: &Url, service_origin: &str) -> bool {
    Url::parse(service_origin).is_ok_and(|origin| origin.origin() == url.origin())
}

/// Everything after the first `url=` parameter marker in a raw query.
fn raw_url_tail(query: &str) -> Option<&str> {
    let mut offset = 0;
    for segment in query.split('&') {
        if segment.starts_with(URL_PARAM) {
            let tail = &query[offset + URL_PARAM.len()..];
            return (!tail.is_empty()).then_some(tail);
        }
        offset += segment.len() + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://relay.example";

    fn target(param: &str, query: &str) -> Result<ProxyTarget, RelayError> {
        ProxyTarget::from_request(param, Some(query), ORIGIN)
    }

    #[test]
    fn test_loop_detected() {
        for param in [ORIGIN, "https://relay.example/?url=https://a.example/", "https://relay.example.evil/"] {
            let err = target(param, &format!("url={param}")).unwrap_err();
            assert_eq!(err, RelayError::LoopDetected { url: param.to_string() });
        }
    }

    #[test]
    fn test_loop_detected_ignoring_case() {
        let param = "HTTPS://Relay.Example/health";
        let err = target(param, &format!("url={param}")).unwrap_err();
        assert_eq!(err, RelayError::LoopDetected { url: param.to_string() });
    }

    #[test]
    fn test_loop_detected_in_recovered_tail() {
        // `%75rl` form-decodes to `url`, so the decoded parameter names an
        // allowed host while the raw tail names this service.
        let err = target(
            "https://ok.example/",
            "%75rl=https://ok.example/&url=https://relay.example/health",
        )
        .unwrap_err();
        assert_eq!(
            err,
            RelayError::LoopDetected {
                url: "https://relay.example/health".into()
            }
        );
    }

    #[test]
    fn test_loop_detected_by_normalized_origin() {
        for raw in ["https://relay.example:443/x", "https://RELAY.EXAMPLE/x", "https://relay%2Eexample/x"] {
            let err = target("https://ok.example/", &format!("url={raw}"));
            assert!(matches!(err, Err(RelayError::LoopDetected { .. })), "{raw}");
        }
    }

    #[test]
    fn test_other_port_is_not_a_loop() {
        let t = ProxyTarget::from_request(
            "http://localhost:9001/x",
            Some("url=http://localhost:9001/x"),
            "http://127.0.0.1:9000",
        )
        .unwrap();
        assert_eq!(t.url().port(), Some(9001));

        let t = target("https://ok.example/", "url=http://relay.example/x").unwrap();
        assert_eq!(t.url().scheme(), "http");
    }

    #[test]
    fn test_loop_check_precedes_scheme_check() {
        let err = ProxyTarget::from_request("ftp://self/x", Some("url=ftp://self/x"), "ftp://self").unwrap_err();
        assert!(matches!(err, RelayError::LoopDetected { .. }));
    }

    #[test]
    fn test_invalid_scheme() {
        for param in ["not-a-url", "ftp://files.example/", "//a.example/", "httpx://a"] {
            let err = target(param, &format!("url={param}")).unwrap_err();
            assert_eq!(err, RelayError::InvalidTarget { url: param.to_string() });
        }
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let t = target("HTTPS://Origin.Example/a", "url=HTTPS://Origin.Example/a").unwrap();
        assert_eq!(t.url().as_str(), "https://origin.example/a");
    }

    #[test]
    fn test_recovers_ampersand_query() {
        let t = target(
            "https://origin.example/api.php?ac=list",
            "url=https://origin.example/api.php?ac=list&pg=2&wd=x",
        )
        .unwrap();
        assert_eq!(t.as_str(), "https://origin.example/api.php?ac=list&pg=2&wd=x");
        assert_eq!(t.url().query(), Some("ac=list&pg=2&wd=x"));
    }

    #[test]
    fn test_recovers_after_other_params() {
        let t = target("https://origin.example/", "format=1&url=https://origin.example/?a=1&b=2").unwrap();
        assert_eq!(t.as_str(), "https://origin.example/?a=1&b=2");
    }

    #[test]
    fn test_percent_decoded() {
        let t = target(
            "https://origin.example/search?q=a b",
            "url=https%3A%2F%2Forigin.example%2Fsearch%3Fq%3Da%20b%26page%3D2",
        )
        .unwrap();
        assert_eq!(t.as_str(), "https://origin.example/search?q=a b&page=2");
        assert_eq!(t.url().as_str(), "https://origin.example/search?q=a%20b&page=2");
    }

    #[test]
    fn test_plus_is_not_a_space() {
        let t = target("https://origin.example/?q=a b", "url=https://origin.example/?q=a+b").unwrap();
        assert_eq!(t.as_str(), "https://origin.example/?q=a+b");
    }

    #[test]
    fn test_similar_param_names_ignored() {
        assert_eq!(raw_url_tail("curl=x&url=https://a/"), Some("https://a/"));
        assert_eq!(raw_url_tail("myurl=https://a/"), None);
        assert_eq!(raw_url_tail("url="), None);
    }

    #[test]
    fn test_invalid_url_after_recovery() {
        let err = target("http://", "url=http://").unwrap_err();
        assert_eq!(err, RelayError::InvalidUrl { url: "http://".into() });

        let err = target("http://a.example/", "url=http://a.example/%FF").unwrap_err();
        assert!(matches!(err, RelayError::InvalidUrl { .. }));
    }

    #[test]
    fn test_without_raw_query_uses_param() {
        let t = ProxyTarget::from_request("https://origin.example/x", None, ORIGIN).unwrap();
        assert_eq!(t.as_str(), "https://origin.example/x");
    }
}
