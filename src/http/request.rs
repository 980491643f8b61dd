//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Preserve an inbound `x-request-id` when the client supplies one
//! - Make the ID available to handlers and the forwarded request
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The ID travels both as a header (propagated upstream) and as a
//!   request extension (read by handlers)

use std::task::{Context, Poll};

use axum::http::{HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// A per-request correlation ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a fresh UUID v4 request ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extension trait for reading the request ID off a request.
pub trait RequestIdExt {
    /// The assigned request ID, if any.
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
            .or_else(|| {
                self.headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
            })
    }
}

/// Tower layer that assigns a request ID to every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service wrapper applied by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let id = match req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
        {
            Some(existing) => RequestId(existing.to_string()),
            None => {
                let id = RequestId::generate();
                if let Ok(value) = HeaderValue::from_str(&id.0) {
                    req.headers_mut().insert(X_REQUEST_ID, value);
                }
                id
            }
        };
        req.extensions_mut().insert(id);

        self.inner.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Response;
    use std::convert::Infallible;
    use tower::util::service_fn;
    use tower::ServiceExt;

    fn echo_id_service(
    ) -> impl Service<Request<Body>, Response = Response<Body>, Error = Infallible> {
        RequestIdLayer.layer(service_fn(|req: Request<Body>| async move {
            let id = req.request_id().unwrap_or("missing").to_string();
            Ok(Response::new(Body::from(id)))
        }))
    }

    #[tokio::test]
    async fn test_generates_id_when_absent() {
        let request = Request::builder().body(Body::empty()).unwrap();
        let response = echo_id_service().oneshot(request).await.unwrap();

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let id = String::from_utf8(body.to_vec()).unwrap();
        assert_ne!(id, "missing");
        assert_eq!(id.len(), 36); // UUID v4 text form
    }

    #[tokio::test]
    async fn test_preserves_existing_id() {
        let request = Request::builder()
            .header(X_REQUEST_ID, "caller-supplied")
            .body(Body::empty())
            .unwrap();
        let response = echo_id_service().oneshot(request).await.unwrap();

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"caller-supplied");
    }
}
