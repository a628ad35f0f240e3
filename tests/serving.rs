//! End-to-end tests through a real listener.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use service_mux::lifecycle::startup::build_mux;
use service_mux::routing::{Handler, Middleware, RouteOptions};
use service_mux::MuxConfig;

mod common;

fn text(body: &'static str) -> Handler {
    Handler::from_fn(move |_req| async move { body })
}

#[tokio::test]
async fn test_builtin_routes_and_global_middleware() {
    let config = MuxConfig::default();
    let mux = build_mux(&config).unwrap();
    let server = common::start_server(config, mux).await;
    let client = common::client();

    let res = client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["server"], "service-mux");
    assert!(res.headers().contains_key("x-request-id"));
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let res = client
        .get(server.url("/"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["route"], "GET /");
    assert_eq!(body["request_id"], "trace-me");
}

#[tokio::test]
async fn test_unmatched_request_is_bare_404() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let config = MuxConfig::default();
    let mut mux = service_mux::Mux::from_config(&config);
    mux.middleware(Middleware::from_fn(move |req, next: Handler| {
        counter.fetch_add(1, Ordering::SeqCst);
        next.serve(req)
    }));
    mux.route("GET /users", text("users")).unwrap();

    let server = common::start_server(config, mux).await;
    let client = common::client();

    let res = client.get(server.url("/missing")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.text().await.unwrap().is_empty());

    let res = client.post(server.url("/users")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    let res = client.get(server.url("/users")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "users");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_host_routing_over_the_wire() {
    let config = MuxConfig::default();
    let mux = service_mux::Mux::from_config(&config);
    mux.route("GET /status", text("hostless")).unwrap();
    mux.route("GET example.com/status", text("hosted-status")).unwrap();
    mux.route("GET example.com/only", text("hosted-only")).unwrap();

    let server = common::start_server(config, mux).await;
    let client = common::client();

    let res = client
        .get(server.url("/status"))
        .header("host", "example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "hostless");

    let res = client
        .get(server.url("/only"))
        .header("host", "example.com:8080")
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "hosted-only");

    let res = client.get(server.url("/only")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_route_middleware_can_short_circuit() {
    let config = MuxConfig::default();
    let mux = service_mux::Mux::from_config(&config);
    let require_token = Middleware::from_fn(|req: Request<Body>, next: Handler| async move {
        if req.headers().contains_key("authorization") {
            next.serve(req).await
        } else {
            StatusCode::UNAUTHORIZED.into_response()
        }
    });
    mux.register(
        "GET /private",
        text("secret"),
        RouteOptions::new().middleware(require_token),
    )
    .unwrap();

    let server = common::start_server(config, mux).await;
    let client = common::client();

    let res = client.get(server.url("/private")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(server.url("/private"))
        .header("authorization", "Bearer token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "secret");
}
