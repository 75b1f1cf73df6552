//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Wire up middleware (request ID, tracing, request timeout, CORS)
//! - Build the shared state: classifier, resolver, dispatcher, assets
//! - Serve plain TCP or TLS until the shutdown signal fires

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RelayConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, OriginPolicy, RequestIdExt};
use crate::http::response::{health, preflight};
use crate::http::{assets, docs, format};
use crate::observability::metrics;
use crate::security::headers::apply_cors;
use crate::proxy::ProxyDispatcher;
use crate::routing::{Route, Router as RouteClassifier};
use crate::sources::{CatalogError, HttpFetcher, SourceCatalog, SourceResolver};

const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid source catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteClassifier>,
    pub resolver: Arc<SourceResolver>,
    pub dispatcher: Arc<ProxyDispatcher>,
    pub assets: Option<ServeDir>,
    pub origin: Arc<OriginPolicy>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl HttpServer {
    /// Build the server and all request-path subsystems from `config`.
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        let config = Arc::new(config);
        let client = reqwest::Client::builder().build()?;

        let catalog = Arc::new(SourceCatalog::from_config(&config.sources)?);
        let fetcher = HttpFetcher::new(client.clone(), Duration::from_secs(config.timeouts.source_fetch_secs));
        let resolver = Arc::new(SourceResolver::new(catalog, fetcher));

        let dispatcher = Arc::new(ProxyDispatcher::new(
            client,
            Duration::from_secs(config.timeouts.proxy_secs),
            config.security.max_body_size,
        ));

        let scheme = if config.listener.tls.is_some() { "https" } else { "http" };
        let origin = Arc::new(
            OriginPolicy::new(config.server.public_origin.clone(), config.listener.bind_address.clone())
                .with_default_scheme(scheme),
        );

        let state = AppState {
            routes: Arc::new(RouteClassifier::new(config.server.health_path.clone())),
            resolver,
            dispatcher,
            assets: config.server.assets_dir.as_ref().map(ServeDir::new),
            origin,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request.request_id(),
            )
        });

        Router::new()
            .route("/", any(relay_handler))
            .route("/{*path}", any(relay_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::map_response(ensure_cors))
            .layer(trace)
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight
    /// requests.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve TLS on `addr` until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received, draining connections");
            drain.graceful_shutdown(Some(DRAIN_TIMEOUT));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Covers responses produced by the layers themselves, such as the 408 from
/// the request timeout.
async fn ensure_cors<B>(mut response: Response<B>) -> Response<B> {
    apply_cors(response.headers_mut());
    response
}

/// Single entry point: classify, then hand off to the matching handler.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = state.routes.classify(&request);
    let label = route.label();
    let origin = state.origin.for_request(&request);

    tracing::debug!(route = label, origin = %origin, "Request classified");

    let response = match route {
        Route::Preflight => preflight(),
        Route::Health => health(),
        Route::StaticAsset => assets::serve(state.assets.as_ref(), request).await,
        Route::Proxy { target } => state
            .dispatcher
            .dispatch(request, &target, &origin)
            .await
            .into_response(),
        Route::Format {
            format: requested,
            source,
            prefix,
        } => {
            format::deliver(&state.resolver, &requested, source.as_deref(), prefix.as_deref(), &origin)
                .await
                .into_response()
        }
        Route::Documentation => docs::render(&origin, state.resolver.catalog()),
    };

    metrics::record_request(&method, response.status().as_u16(), label, start);
    response
}
