//! Built-in endpoints.

use axum::{body::Body, http::Request, Json};
use serde::Serialize;

use crate::http::middleware::RequestId;
use crate::routing::{Handler, RouteMetadata};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Liveness endpoint: `{"status":"ok"}`.
pub fn health() -> Handler {
    Handler::from_fn(|_req| async { Json(HealthStatus { status: "ok" }) })
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: &'static str,
    /// Registration pattern that served this request.
    pub route: Option<String>,
    pub request_id: Option<String>,
}

/// Describes the running service and the route that matched.
pub fn service_info(service: impl Into<String>) -> Handler {
    let service = service.into();
    Handler::from_fn(move |req: Request<Body>| {
        let info = ServiceInfo {
            service: service.clone(),
            version: env!("CARGO_PKG_VERSION"),
            route: req.extensions().get::<RouteMetadata>().map(|m| m.pattern.clone()),
            request_id: req
                .extensions()
                .get::<RequestId>()
                .map(|id| id.as_str().to_string()),
        };
        async move { Json(info) }
    })
}
