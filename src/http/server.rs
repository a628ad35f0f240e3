//! HTTP server setup.
//!
//! # Responsibilities
//! - Wrap the mux in an axum `Router` as its fallback service
//! - Apply transport-level layers (tracing, request timeout)
//! - Serve on a listener until shutdown is signalled
//!
//! # Design Decisions
//! - The mux does all routing; axum only provides the HTTP/1.1 and HTTP/2 server
//! - Timeouts are enforced outside the mux, so the router never observes deadlines

use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::MuxConfig;
use crate::routing::Mux;

/// HTTP server hosting a fully registered [`Mux`].
pub struct HttpServer {
    router: Router,
    config: MuxConfig,
}

impl HttpServer {
    /// Registration must be complete before this is called.
    pub fn new(config: MuxConfig, mux: Mux) -> Self {
        tracing::info!(routes = ?mux.routes(), "Routes registered");
        let router = Self::build_router(&config, mux);
        Self { router, config }
    }

    #[allow(deprecated)]
    fn build_router(config: &MuxConfig, mux: Mux) -> Router {
        Router::new()
            .fallback_service(mux)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` fires or its sender is dropped.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            service = %self.config.server.name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
