//! Gateway error responses.
//!
//! # Responsibilities
//! - Classify gateway-level failures
//! - Map each failure to an HTTP status and a JSON error body
//!
//! # Design Decisions
//! - Error bodies carry a stable public message; internals stay in logs
//! - 404 no route, 502 unreachable or misconfigured, 504 deadline exceeded

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Gateway-level request failure.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No configured route matches the request path.
    #[error("no route matches path `{path}`")]
    NoRoute { path: String },

    /// A matched route references an upstream missing from the registry.
    #[error("route references unknown upstream `{name}`")]
    UnknownUpstream { name: String },

    /// The upstream did not respond within the configured deadline.
    #[error("upstream `{upstream}` did not respond within {deadline:?}")]
    Timeout {
        upstream: String,
        deadline: Duration,
    },

    /// The upstream connection could not be established or failed mid-flight.
    #[error("upstream `{upstream}` is unreachable")]
    Unavailable {
        upstream: String,
        #[source]
        source: hyper_util::client::legacy::Error,
    },
}

impl GatewayError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::NoRoute { .. } => StatusCode::NOT_FOUND,
            GatewayError::UnknownUpstream { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Unavailable { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            GatewayError::NoRoute { .. } => "No matching route found",
            GatewayError::UnknownUpstream { .. } => "Upstream not configured",
            GatewayError::Timeout { .. } => "Upstream request timed out",
            GatewayError::Unavailable { .. } => "Upstream request failed",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
