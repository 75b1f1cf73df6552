//! Proxy dispatch: clone the inbound request against the target and relay
//! the answer.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use hyper::ext::ReasonPhrase;

use crate::error::RelayError;
use crate::proxy::target::ProxyTarget;
use crate::resilience::{with_timeout, TimeoutError};
use crate::security::headers::{forward_request_headers, relay_response_headers};
use crate::security::limits::buffer_body;

/// Forwards requests to arbitrary http(s) targets.
#[derive(Debug, Clone)]
pub struct ProxyDispatcher {
    client: reqwest::Client,
    timeout: Duration,
    max_body_size: usize,
}

impl ProxyDispatcher {
    pub fn new(client: reqwest::Client, timeout: Duration, max_body_size: usize) -> Self {
        Self {
            client,
            timeout,
            max_body_size,
        }
    }

    /// Validate `target_param`, forward `request` to it and relay the response.
    ///
    /// The deadline covers the exchange up to the response head; the body is
    /// then streamed through as it arrives.
    pub async fn dispatch(
        &self,
        request: Request<Body>,
        target_param: &str,
        service_origin: &str,
    ) -> Result<Response<Body>, RelayError> {
        let target = ProxyTarget::from_request(target_param, request.uri().query(), service_origin)?;

        let (parts, body) = request.into_parts();
        let body = buffer_body(&parts.method, body, self.max_body_size)
            .await
            .map_err(|e| RelayError::proxy(e.to_string(), target.as_str()))?;

        tracing::debug!(
            method = %parts.method,
            url = %target.url(),
            "Forwarding to target"
        );

        let mut outbound = self
            .client
            .request(parts.method.clone(), target.url().clone())
            .headers(forward_request_headers(&parts.headers));
        if let Some(bytes) = body {
            outbound = outbound.body(bytes);
        }

        let upstream = with_timeout(self.timeout, outbound.send()).await.map_err(|e| {
            let message = match e {
                TimeoutError::Elapsed(limit) => format!("no response within {}ms", limit.as_millis()),
                TimeoutError::Inner(inner) => inner.to_string(),
            };
            tracing::warn!(url = %target.as_str(), error = %message, "Proxy request failed");
            RelayError::proxy(message, target.as_str())
        })?;

        let status = upstream.status();
        let headers = relay_response_headers(upstream.headers());
        tracing::debug!(url = %target.url(), status = %status, "Relaying target response");

        // Present only when the origin sent a non-canonical phrase.
        let reason = upstream.extensions().get::<ReasonPhrase>().cloned();

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        if let Some(reason) = reason {
            response.extensions_mut().insert(reason);
        }
        Ok(response)
    }
}
