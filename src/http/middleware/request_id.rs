//! Request ID propagation.
//!
//! # Responsibilities
//! - Reuse an incoming `X-Request-ID` or generate a UUID v4
//! - Expose it to inner handlers through request extensions
//! - Echo it on the response

use axum::http::{HeaderName, HeaderValue};
use uuid::Uuid;

use crate::routing::{Handler, Middleware};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// The request ID, available to handlers via `req.extensions()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Middleware attaching a [`RequestId`] to every request.
pub fn request_id() -> Middleware {
    Middleware::from_fn(|mut req, next: Handler| async move {
        let id = req
            .headers()
            .get(&X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        req.extensions_mut().insert(RequestId(id.clone()));
        let mut response = next.serve(req).await;

        if let Ok(value) = HeaderValue::from_str(&id) {
            response.headers_mut().insert(X_REQUEST_ID, value);
        }
        response
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::build_chain;
    use axum::{body::Body, http::Request};

    fn echo() -> Handler {
        Handler::from_fn(|req: Request<Body>| async move {
            req.extensions()
                .get::<RequestId>()
                .map(|id| id.as_str().to_string())
                .unwrap_or_default()
        })
    }

    #[tokio::test]
    async fn test_incoming_id_is_preserved() {
        let handler = build_chain(&[request_id()], &[], echo());
        let req = Request::builder()
            .uri("/")
            .header("x-request-id", "req-123")
            .body(Body::empty())
            .unwrap();

        let response = handler.serve(req).await;
        assert_eq!(response.headers()["x-request-id"], "req-123");
        let body = axum::body::to_bytes(response.into_body(), 64).await.unwrap();
        assert_eq!(&body[..], b"req-123");
    }

    #[tokio::test]
    async fn test_missing_id_is_generated() {
        let handler = build_chain(&[request_id()], &[], echo());
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = handler.serve(req).await;
        let id = response.headers()["x-request-id"].to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
