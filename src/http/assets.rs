//! `*.json` assets served from the configured directory.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::http::response::{not_found, with_cors};

/// Serve `request` from `assets`, or 404 when no directory is configured or
/// the file is missing.
pub async fn serve(assets: Option<&ServeDir>, request: Request<Body>) -> Response {
    let Some(dir) = assets else {
        return not_found();
    };

    let response = match dir.clone().oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    };
    if response.status() == StatusCode::NOT_FOUND {
        return not_found();
    }

    with_cors(response.map(Body::new))
}
