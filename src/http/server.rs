//! Gateway HTTP server.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (tracing, request ID, rate limiting)
//! - Dispatch requests through the route table
//! - Forward matched requests to upstream targets
//!
//! # Design Decisions
//! - Requests are handled independently and concurrently; the rate
//!   limiter holds the only shared mutable state
//! - Rate limiting runs before routing so rejected requests never reach
//!   an upstream

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::http::response::GatewayError;
use crate::observability::metrics;
use crate::routing::RouteTable;
use crate::security::{rate_limit_middleware, RateLimiter};
use crate::upstream::{ProxyClient, UpstreamManager};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
    pub upstreams: Arc<UpstreamManager>,
    pub client: ProxyClient,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new gateway server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let table = Arc::new(RouteTable::from_config(config.routes.clone()));
        let upstreams = Arc::new(UpstreamManager::from_config(config.upstreams.clone()));
        let client = ProxyClient::new(&config.timeouts);

        let state = AppState {
            table,
            upstreams,
            client,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state);

        if config.rate_limit.enabled {
            let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
            router = router.layer(middleware::from_fn_with_state(
                limiter,
                rate_limit_middleware,
            ));
        }

        router.layer(RequestIdLayer).layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            upstreams = self.config.upstreams.len(),
            rate_limit_enabled = self.config.rate_limit.enabled,
            "Gateway server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Gateway server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Main proxy handler.
/// Looks up the route, resolves the upstream, and forwards the request.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().unwrap_or("unknown").to_string();
    let path = request.uri().path().to_string();
    let method = request.method().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Proxying request"
    );

    // 1. Match route
    let route = match state.table.match_request(&request) {
        Some(route) => route,
        None => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            metrics::record_request(&method, 404, "none", start_time);
            return GatewayError::NoRoute { path }.into_response();
        }
    };

    // 2. Resolve upstream
    let upstream = match state.upstreams.get(&route.upstream) {
        Some(upstream) => upstream,
        None => {
            tracing::error!(
                request_id = %request_id,
                route = %route.name,
                upstream = %route.upstream,
                "Route references unknown upstream"
            );
            metrics::record_request(&method, 502, "none", start_time);
            return GatewayError::UnknownUpstream {
                name: route.upstream.clone(),
            }
            .into_response();
        }
    };

    // 3. Forward and relay
    match state.client.forward(&upstream, request).await {
        Ok(response) => {
            let status = response.status().as_u16();
            metrics::record_request(&method, status, &upstream.name, start_time);
            response
        }
        Err(error) => {
            tracing::error!(
                request_id = %request_id,
                upstream = %upstream.name,
                error = %error,
                "Upstream error"
            );
            let status = error.status().as_u16();
            metrics::record_request(&method, status, &upstream.name, start_time);
            error.into_response()
        }
    }
}
