//! Header manipulation: CORS and relayed response headers.
//!
//! # Responsibilities
//! - Provide the fixed CORS header set attached to every response
//! - Strip hop-by-hop, framing and cookie headers from relayed responses
//! - Drop inbound headers the outbound client must derive itself
//!
//! # Design Decisions
//! - CORS is merged last so it overrides any origin-supplied value
//! - Framing headers are left to the relay layer, which re-frames the body

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Fixed CORS header set.
pub const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, PUT, DELETE, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
    (header::ACCESS_CONTROL_MAX_AGE, "86400"),
];

/// Response headers never copied from an origin.
pub const EXCLUDED_RESPONSE_HEADERS: [&str; 7] = [
    "content-encoding",
    "content-length",
    "transfer-encoding",
    "connection",
    "keep-alive",
    "set-cookie",
    "set-cookie2",
];

/// Inbound headers not forwarded; the client sets them for the target.
/// Content negotiation is left to the client, which decodes what it accepts.
pub const EXCLUDED_REQUEST_HEADERS: [&str; 3] = ["host", "content-length", "accept-encoding"];

/// Insert the CORS set, replacing existing values of the same names.
pub fn apply_cors(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}

/// A header map holding only the CORS set.
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(CORS_HEADERS.len());
    apply_cors(&mut headers);
    headers
}

/// Headers to send back for a relayed origin response.
pub fn relay_response_headers(origin: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(origin.len() + CORS_HEADERS.len());
    for (name, value) in origin {
        if !EXCLUDED_RESPONSE_HEADERS.contains(&name.as_str()) {
            out.append(name.clone(), value.clone());
        }
    }
    apply_cors(&mut out);
    out
}

/// Headers to send to the target for an inbound request.
pub fn forward_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if !EXCLUDED_REQUEST_HEADERS.contains(&name.as_str()) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_headers() -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        h.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        h.insert(header::CONTENT_LENGTH, HeaderValue::from_static("42"));
        h.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        h.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        h.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        h.append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
        h.append(header::SET_COOKIE, HeaderValue::from_static("b=2"));
        h.insert("set-cookie2", HeaderValue::from_static("c=3"));
        h.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("https://only.example"));
        h.append("x-custom", HeaderValue::from_static("one"));
        h.append("x-custom", HeaderValue::from_static("two"));
        h
    }

    #[test]
    fn test_cors_set() {
        let h = cors_headers();
        assert_eq!(h.len(), 4);
        assert_eq!(h[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(h[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }

    #[test]
    fn test_relay_strips_deny_set() {
        let out = relay_response_headers(&origin_headers());
        for name in EXCLUDED_RESPONSE_HEADERS {
            assert!(!out.contains_key(name), "{name} should be stripped");
        }
        assert_eq!(out[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_relay_keeps_multi_valued_headers() {
        let out = relay_response_headers(&origin_headers());
        let values: Vec<_> = out.get_all("x-custom").iter().collect();
        assert_eq!(values, vec!["one", "two"]);
    }

    #[test]
    fn test_cors_overrides_origin() {
        let out = relay_response_headers(&origin_headers());
        let values: Vec<_> = out.get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN).iter().collect();
        assert_eq!(values, vec!["*"]);
        assert_eq!(out[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type, Authorization");
    }

    #[test]
    fn test_forward_drops_client_derived_headers() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::HOST, HeaderValue::from_static("relay.example"));
        inbound.insert(header::CONTENT_LENGTH, HeaderValue::from_static("3"));
        inbound.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        inbound.insert(header::COOKIE, HeaderValue::from_static("s=1"));
        inbound.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("br"));

        let out = forward_request_headers(&inbound);
        assert!(!out.contains_key(header::HOST));
        assert!(!out.contains_key(header::ACCEPT_ENCODING));
        assert!(!out.contains_key(header::CONTENT_LENGTH));
        assert_eq!(out[header::AUTHORIZATION], "Bearer t");
        assert_eq!(out[header::COOKIE], "s=1");
    }
}
