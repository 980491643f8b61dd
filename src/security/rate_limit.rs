//! Rate limiting middleware.
//!
//! # Responsibilities
//! - Maintain a token bucket per client key
//! - Refill tokens by elapsed time, capped at burst capacity
//! - Admit or reject in one atomic check-and-decrement step
//!
//! # Design Decisions
//! - Keyed by client IP
//! - Buckets live behind a single mutex so concurrent callers sharing a
//!   key cannot over-admit
//! - Rejection returns 429 with a JSON body; no retry by the gateway

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::RateLimitConfig;
use crate::observability::metrics;

/// A token bucket for a single client key.
#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn new(capacity: f64, now: Instant) -> Self {
        Self {
            tokens: capacity,
            last_update: now,
        }
    }

    /// Refill by elapsed time, then take one token if available.
    fn try_acquire_at(&mut self, now: Instant, capacity: f64, replenish_rate: f64) -> bool {
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        self.tokens = (self.tokens + elapsed * replenish_rate).min(capacity);
        self.last_update = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Shared state for the per-key rate limiter.
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    replenish_rate: f64,
    burst_capacity: f64,
}

impl RateLimiter {
    /// Create a rate limiter from configuration.
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            replenish_rate: config.replenish_rate as f64,
            burst_capacity: config.burst_capacity as f64,
        }
    }

    /// Check whether a request for `key` is admitted right now.
    pub fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }

    fn allow_at(&self, key: &str, now: Instant) -> bool {
        let mut buckets = self.buckets.lock().expect("rate limiter mutex poisoned");
        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::new(self.burst_capacity, now));

        bucket.try_acquire_at(now, self.burst_capacity, self.replenish_rate)
    }
}

/// Middleware function enforcing the per-client rate limit.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let key = addr.ip().to_string();

    if limiter.allow(&key) {
        next.run(request).await
    } else {
        tracing::warn!(client = %key, "Rate limit exceeded");
        metrics::record_rate_limited(&key);

        let body = Body::from(r#"{"error":"Rate limit exceeded"}"#);
        let mut response = Response::new(body);
        *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        response
    }
}
