//! Rate-limited routing gateway with pluggable backend retrieval.
//!
//! Two binaries share this library: the `gateway`, which matches request
//! paths against a prefix route table, applies a per-client token-bucket
//! rate limit, and forwards to upstream targets; and the `user-service`,
//! the upstream it fronts, which serves a health endpoint, a user info
//! endpoint, and a retrieval-augmented query endpoint.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod retrieval;
pub mod routing;
pub mod security;
pub mod service;
pub mod upstream;

pub use config::{GatewayConfig, ServiceConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use service::ServiceServer;
