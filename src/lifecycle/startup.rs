//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the mux from configuration
//! - Install the global middleware stack
//! - Register the built-in endpoints
//!
//! # Design Decisions
//! - Fail fast: any registration error is returned to `main` and is fatal
//! - Globals are installed before any route so every route composes them

use crate::config::MuxConfig;
use crate::http::handlers;
use crate::http::middleware::{request_id, server_name};
use crate::routing::{Mux, MuxError};

/// Mux with the standard global middleware and built-in routes.
///
/// Callers register their own endpoints on the returned mux before serving.
pub fn build_mux(config: &MuxConfig) -> Result<Mux, MuxError> {
    let mut mux = Mux::from_config(config);
    mux.middleware(request_id())
        .middleware(server_name(&config.server.name));

    mux.route("GET /health", handlers::health())?;
    mux.route("GET /", handlers::service_info(config.server.name.clone()))?;

    Ok(mux)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Handler;

    #[test]
    fn test_builtin_routes() {
        let mux = build_mux(&MuxConfig::default()).unwrap();
        assert_eq!(mux.routes(), vec!["GET /", "GET /health"]);
    }

    #[test]
    fn test_builtin_routes_cannot_be_shadowed() {
        let mux = build_mux(&MuxConfig::default()).unwrap();
        let err = mux
            .route("GET /health", Handler::from_fn(|_req| async { "mine" }))
            .unwrap_err();
        assert!(err.to_string().contains("\"GET /health\""));
    }
}
