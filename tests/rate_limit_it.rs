//! Rate limiting tests against a running gateway.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rag_gateway::config::{RouteConfig, UpstreamConfig};

mod common;

fn route_all(upstream: &str) -> RouteConfig {
    RouteConfig {
        name: "all".into(),
        path_prefix: "/".into(),
        upstream: upstream.into(),
        priority: 0,
    }
}

#[tokio::test]
async fn test_burst_then_reject_then_refill() {
    let backend_addr = common::start_mock_backend("ok").await;

    let mut config = common::base_gateway_config();
    config.routes.push(route_all("web"));
    config.upstreams.push(UpstreamConfig {
        name: "web".into(),
        address: backend_addr.to_string(),
    });
    config.rate_limit.enabled = true;
    config.rate_limit.burst_capacity = 3;
    config.rate_limit.replenish_rate = 2;

    let (gateway_addr, shutdown) = common::spawn_gateway(config).await;
    let client = common::http_client();
    let url = format!("http://{}/ping", gateway_addr);

    // The full burst is admitted.
    for i in 0..3 {
        let res = client.get(&url).send().await.expect("Gateway unreachable");
        assert_eq!(res.status(), 200, "burst request {i} should be admitted");
    }

    // The next request is rejected.
    let res = client.get(&url).send().await.expect("Gateway unreachable");
    assert_eq!(res.status(), 429);
    let json: serde_json::Value = res.json().await.unwrap();
    assert_eq!(json["error"], "Rate limit exceeded");

    // At 2 tokens/s, one token is back well within a second.
    tokio::time::sleep(Duration::from_millis(800)).await;
    let res = client.get(&url).send().await.expect("Gateway unreachable");
    assert_eq!(res.status(), 200, "admission should resume after refill");

    shutdown.trigger();
}

#[tokio::test]
async fn test_rejected_request_never_reaches_upstream() {
    let hits = Arc::new(AtomicU32::new(0));
    let h = hits.clone();
    let backend_addr = common::start_programmable_backend(move |_req| {
        let h = h.clone();
        async move {
            h.fetch_add(1, Ordering::SeqCst);
            (200, "ok".to_string())
        }
    })
    .await;

    let mut config = common::base_gateway_config();
    config.routes.push(route_all("web"));
    config.upstreams.push(UpstreamConfig {
        name: "web".into(),
        address: backend_addr.to_string(),
    });
    config.rate_limit.enabled = true;
    config.rate_limit.burst_capacity = 1;
    config.rate_limit.replenish_rate = 1;

    let (gateway_addr, shutdown) = common::spawn_gateway(config).await;
    let client = common::http_client();
    let url = format!("http://{}/ping", gateway_addr);

    let res = client.get(&url).send().await.expect("Gateway unreachable");
    assert_eq!(res.status(), 200);

    let res = client.get(&url).send().await.expect("Gateway unreachable");
    assert_eq!(res.status(), 429);

    assert_eq!(
        hits.load(Ordering::SeqCst),
        1,
        "Rejected request must not be forwarded"
    );

    shutdown.trigger();
}
