//! Forwarding client for upstream calls.
//!
//! # Responsibilities
//! - Forward a request to the resolved upstream target
//! - Relay the response back unmodified
//! - Enforce connect and request deadlines
//!
//! # Design Decisions
//! - Only scheme and authority are rewritten; path, headers, method and
//!   body pass through untouched
//! - Deadline exceeded maps to Timeout (504), transport failure to
//!   Unavailable (502)
//! - No retries: the upstream sees at most one request per client request

use std::time::Duration;

use axum::body::Body;
use axum::http::uri::{Authority, Scheme};
use axum::http::{Request, Response, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::TimeoutConfig;
use crate::http::response::GatewayError;
use crate::upstream::target::Upstream;

/// HTTP client that forwards requests to upstream targets.
#[derive(Clone)]
pub struct ProxyClient {
    inner: Client<HttpConnector, Body>,
    request_timeout: Duration,
}

impl ProxyClient {
    /// Create a forwarding client with the configured deadlines.
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let inner = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            inner,
            request_timeout: Duration::from_secs(timeouts.request_secs),
        }
    }

    /// Forward `request` to `upstream`, relaying the response unmodified.
    pub async fn forward(
        &self,
        upstream: &Upstream,
        request: Request<Body>,
    ) -> Result<Response<Body>, GatewayError> {
        let (mut parts, body) = request.into_parts();
        parts.uri = rewrite_uri(&parts.uri, upstream);
        let request = Request::from_parts(parts, body);

        match tokio::time::timeout(self.request_timeout, self.inner.request(request)).await {
            Ok(Ok(response)) => {
                let (parts, body) = response.into_parts();
                Ok(Response::from_parts(parts, Body::new(body)))
            }
            Ok(Err(source)) => Err(GatewayError::Unavailable {
                upstream: upstream.name.clone(),
                source,
            }),
            Err(_) => Err(GatewayError::Timeout {
                upstream: upstream.name.clone(),
                deadline: self.request_timeout,
            }),
        }
    }
}

/// Point the request URI at the upstream, keeping path and query intact.
fn rewrite_uri(original: &Uri, upstream: &Upstream) -> Uri {
    let mut parts = original.clone().into_parts();
    parts.scheme = Some(Scheme::HTTP);
    parts.authority = Authority::try_from(upstream.addr.to_string().as_str()).ok();
    if parts.path_and_query.is_none() {
        parts.path_and_query = Some(axum::http::uri::PathAndQuery::from_static("/"));
    }

    Uri::from_parts(parts).unwrap_or_else(|_| original.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_uri_preserves_path_and_query() {
        let upstream = Upstream::new("user-service", "127.0.0.1:8000".parse().unwrap());
        let original: Uri = "/genai/query?verbose=1".parse().unwrap();

        let rewritten = rewrite_uri(&original, &upstream);
        assert_eq!(
            rewritten.to_string(),
            "http://127.0.0.1:8000/genai/query?verbose=1"
        );
    }

    #[test]
    fn test_rewrite_uri_replaces_authority() {
        let upstream = Upstream::new("user-service", "127.0.0.1:8000".parse().unwrap());
        let original: Uri = "/".parse().unwrap();

        let rewritten = rewrite_uri(&original, &upstream);
        assert_eq!(rewritten.to_string(), "http://127.0.0.1:8000/");
    }
}
