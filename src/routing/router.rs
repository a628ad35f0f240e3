//! The request multiplexer.
//!
//! # Responsibilities
//! - Registration entry point: parse, compose, insert
//! - Dispatch: normalize the request, log it, resolve, call the entry
//! - Explicit 404 when nothing matches
//!
//! # Design Decisions
//! - Hostless routes are checked before host-qualified ones
//! - Resolution is a single table query returning the composed handler
//! - Unmatched requests run no middleware and get an empty 404
//! - `Mux` is a cheap clone sharing one table, so it can be handed to the
//!   server as a tower `Service`

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::future::{BoxFuture, FutureExt};
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;

use crate::config::{LoggingConfig, MuxConfig};
use crate::http::request::{hostname, loggable_headers, DEFAULT_EXCLUDED_HEADERS};
use crate::observability::metrics::{self, DispatchOutcome};
use crate::routing::chain::{build_chain, Handler, Middleware};
use crate::routing::error::MuxError;
use crate::routing::pattern::RoutePattern;
use crate::routing::table::{MuxEntry, RouteMetadata, RouteTable};

/// Router-wide settings.
#[derive(Debug, Clone)]
pub struct MuxSettings {
    /// Insert [`RouteMetadata`](crate::routing::RouteMetadata) into matched requests.
    pub metadata: bool,
    /// Header names left out of the request log (case-insensitive).
    pub excluded_headers: Vec<String>,
}

impl Default for MuxSettings {
    fn default() -> Self {
        Self {
            metadata: true,
            excluded_headers: DEFAULT_EXCLUDED_HEADERS
                .iter()
                .map(|h| h.to_ascii_lowercase())
                .collect(),
        }
    }
}

impl MuxSettings {
    pub fn from_config(config: &MuxConfig) -> Self {
        Self {
            metadata: config.routing.metadata,
            excluded_headers: lowercase(&config.logging),
        }
    }
}

fn lowercase(logging: &LoggingConfig) -> Vec<String> {
    logging
        .excluded_headers
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect()
}

/// Per-registration configuration.
#[derive(Debug, Clone)]
pub struct RouteOptions {
    middleware: Vec<Middleware>,
    globals: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            middleware: Vec::new(),
            globals: true,
        }
    }
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append route-only middleware; it runs after the global list.
    pub fn middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Skip the router's global middleware for this route.
    pub fn without_globals(mut self) -> Self {
        self.globals = false;
        self
    }
}

/// HTTP request multiplexer keyed by method, host and path.
#[derive(Clone)]
pub struct Mux {
    table: Arc<RouteTable>,
    globals: Vec<Middleware>,
    settings: Arc<MuxSettings>,
}

impl Default for Mux {
    fn default() -> Self {
        Self::new(MuxSettings::default())
    }
}

impl Mux {
    pub fn new(settings: MuxSettings) -> Self {
        Self {
            table: Arc::new(RouteTable::new()),
            globals: Vec::new(),
            settings: Arc::new(settings),
        }
    }

    pub fn from_config(config: &MuxConfig) -> Self {
        Self::new(MuxSettings::from_config(config))
    }

    /// Append global middleware, applied to every route registered afterwards.
    pub fn middleware(&mut self, middleware: Middleware) -> &mut Self {
        self.globals.push(middleware);
        self
    }

    /// Register `handler` under `pattern` (`METHOD [HOST]/PATH`).
    ///
    /// The middleware chain is composed here, once. Errors are configuration
    /// errors and should abort startup.
    pub fn register(
        &self,
        pattern: &str,
        handler: Handler,
        options: RouteOptions,
    ) -> Result<(), MuxError> {
        let route = RoutePattern::parse(pattern)?;

        let globals: &[Middleware] = if options.globals { &self.globals } else { &[] };
        let mut handler = build_chain(globals, &options.middleware, handler);

        if self.settings.metadata {
            let metadata = RouteMetadata::new(&route, pattern);
            let inner = handler;
            handler = Handler::from_fn(move |mut req: Request<Body>| {
                req.extensions_mut().insert(metadata.clone());
                inner.serve(req)
            });
        }

        let entry = self.table.register(MuxEntry::new(route, pattern, handler))?;
        metrics::record_registered(self.table.len());

        tracing::debug!(
            pattern = %entry.pattern(),
            route = %entry.route(),
            middleware = globals.len() + options.middleware.len(),
            "Route registered"
        );
        Ok(())
    }

    /// Register with default options.
    pub fn route(&self, pattern: &str, handler: Handler) -> Result<(), MuxError> {
        self.register(pattern, handler, RouteOptions::default())
    }

    /// The entry that would serve `req`, hostless routes first.
    pub fn resolve<B>(&self, req: &Request<B>) -> Option<Arc<MuxEntry>> {
        let host = hostname(req);
        self.lookup(req.method(), &host, req.uri().path())
    }

    /// The registration pattern that would serve `req`.
    pub fn pattern<B>(&self, req: &Request<B>) -> Option<String> {
        self.resolve(req).map(|entry| entry.pattern().to_string())
    }

    /// Registered patterns, sorted.
    pub fn routes(&self) -> Vec<String> {
        self.table.patterns()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    fn lookup(
        &self,
        method: &axum::http::Method,
        host: &str,
        path: &str,
    ) -> Option<Arc<MuxEntry>> {
        self.table.lookup(method, "", path).or_else(|| {
            if host.is_empty() {
                None
            } else {
                self.table.lookup(method, host, path)
            }
        })
    }

    /// Resolve and serve one request.
    pub fn dispatch(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let host = hostname(&req);

        if tracing::enabled!(tracing::Level::INFO) {
            let headers = loggable_headers(req.headers(), &self.settings.excluded_headers);
            tracing::info!(
                host = %host,
                method = %method,
                path = %path,
                headers = ?headers,
                "HTTP(s) Request"
            );
        }

        match self.lookup(&method, &host, &path) {
            Some(entry) => {
                metrics::record_dispatch(&method, DispatchOutcome::Matched);
                entry.handler().serve(req)
            }
            None => {
                tracing::debug!(host = %host, method = %method, path = %path, "No route matched");
                metrics::record_dispatch(&method, DispatchOutcome::NotFound);
                async { StatusCode::NOT_FOUND.into_response() }.boxed()
            }
        }
    }
}

impl Service<Request<Body>> for Mux {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let fut = self.dispatch(req);
        async move { Ok(fut.await) }.boxed()
    }
}
