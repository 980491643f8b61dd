//! User service HTTP server.
//!
//! # Responsibilities
//! - Serve the health, user info, and query endpoints
//! - Validate query requests and run them through the query engine
//!
//! # Design Decisions
//! - A missing or empty query is a structured error in a 200 response,
//!   not a protocol failure
//! - The query body is read leniently: malformed JSON is treated the
//!   same as a missing query field
//! - The engine is injected as shared state, not a process singleton

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::request::RequestIdLayer;
use crate::retrieval::QueryEngine;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct ServiceState {
    pub engine: Arc<QueryEngine>,
}

/// HTTP server for the user service.
pub struct ServiceServer {
    router: Router,
    config: ServiceConfig,
}

impl ServiceServer {
    /// Create a new service server with the given configuration and engine.
    pub fn new(config: ServiceConfig, engine: Arc<QueryEngine>) -> Self {
        let state = ServiceState { engine };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: ServiceState) -> Router {
        Router::new()
            .route("/", get(health))
            .route("/user/info", get(user_info))
            .route("/genai/query", post(genai_query))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "User service starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("User service stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
}

#[derive(Serialize)]
struct UserBody {
    user: &'static str,
}

#[derive(Serialize)]
struct QueryBody {
    query: String,
    response: String,
}

#[derive(Serialize)]
struct QueryErrorBody {
    error: &'static str,
}

/// Health endpoint; fixed message regardless of retrieval state.
async fn health() -> Json<StatusBody> {
    Json(StatusBody {
        status: "user service running",
    })
}

async fn user_info() -> Json<UserBody> {
    Json(UserBody { user: "demo-user" })
}

/// Query endpoint: retrieve relevant passages and compose a response.
async fn genai_query(State(state): State<ServiceState>, body: Bytes) -> Response {
    let query = serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("query").and_then(|q| q.as_str().map(str::to_owned)));

    let query = match query {
        Some(q) if !q.trim().is_empty() => q,
        _ => {
            return Json(QueryErrorBody {
                error: "Query required",
            })
            .into_response();
        }
    };

    match state.engine.answer(&query).await {
        Ok(response) => Json(QueryBody { query, response }).into_response(),
        Err(error) => {
            tracing::error!(error = %error, "Retrieval failed");
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(QueryErrorBody {
                    error: "Retrieval failed",
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::MemoryStore;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let engine = Arc::new(QueryEngine::new(Box::new(MemoryStore::new()), 4));
        ServiceServer::build_router(
            &ServiceConfig::default(),
            ServiceState { engine },
        )
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_fixed_status() {
        let response = test_router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"status": "user service running"}));
    }

    #[tokio::test]
    async fn test_missing_query_is_structured_error() {
        for body in ["{}", r#"{"query": ""}"#, r#"{"query": "   "}"#, "not json"] {
            let request = Request::post("/genai/query")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap();
            let response = test_router().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(json, serde_json::json!({"error": "Query required"}));
        }
    }

    #[tokio::test]
    async fn test_query_echoed_unchanged() {
        let request = Request::post("/genai/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"query": "What Is The Gateway?"}"#))
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["query"], "What Is The Gateway?");
        assert!(!json["response"].as_str().unwrap().is_empty());
    }
}
