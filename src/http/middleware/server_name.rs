//! `Server` response header.

use axum::http::{header, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::routing::Middleware;

/// Stamp every response with `Server: <name>`, unless the handler set one.
///
/// Names that are not valid header values are replaced by the crate name.
pub fn server_name(name: &str) -> Middleware {
    let value = HeaderValue::from_str(name)
        .unwrap_or_else(|_| HeaderValue::from_static(env!("CARGO_PKG_NAME")));
    Middleware::from_layer(SetResponseHeaderLayer::if_not_present(header::SERVER, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{build_chain, Handler};
    use axum::{body::Body, http::Request};

    #[tokio::test]
    async fn test_sets_server_header() {
        let handler = build_chain(
            &[server_name("auth-service")],
            &[],
            Handler::from_fn(|_req| async { "ok" }),
        );
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = handler.serve(req).await;
        assert_eq!(response.headers()["server"], "auth-service");
    }

    #[tokio::test]
    async fn test_handler_header_wins() {
        let handler = build_chain(
            &[server_name("outer")],
            &[],
            Handler::from_fn(|_req| async { ([(header::SERVER, "inner")], "ok") }),
        );
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = handler.serve(req).await;
        assert_eq!(response.headers()["server"], "inner");
    }
}
