//! Handlers, middleware and chain composition.
//!
//! # Responsibilities
//! - Type-erase endpoint handlers into a cheap, clonable [`Handler`]
//! - Represent middleware as `Handler -> Handler` transformers
//! - Compose global and per-route middleware around an endpoint, once
//!
//! # Design Decisions
//! - Composition happens at registration; dispatch is a single call into the
//!   already-built handler
//! - The first listed middleware is the outermost wrapper and runs first
//! - Middleware may short-circuit by answering without calling `next`

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use futures_util::future::{BoxFuture, FutureExt};
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service, ServiceExt};

type HandlerFn = dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync;
type WrapFn = dyn Fn(Handler) -> Handler + Send + Sync;

/// A type-erased request handler.
///
/// Cloning is an `Arc` bump, so a handler can be shared by every request
/// served from the table.
#[derive(Clone)]
pub struct Handler {
    inner: Arc<HandlerFn>,
}

impl Handler {
    /// Build a handler from an async function.
    pub fn from_fn<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        let inner: Arc<HandlerFn> = Arc::new(move |req: Request<Body>| {
            let fut = f(req);
            async move { fut.await.into_response() }.boxed()
        });
        Self { inner }
    }

    /// Build a handler from any infallible tower service.
    pub fn from_service<S>(service: S) -> Self
    where
        S: Service<Request<Body>, Response = Response, Error = Infallible>
            + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        Self::from_fn(move |req| {
            let service = service.clone();
            async move {
                match service.oneshot(req).await {
                    Ok(response) => response,
                    Err(never) => match never {},
                }
            }
        })
    }

    /// Run the handler on one request.
    pub fn serve(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        (self.inner)(req)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

impl Service<Request<Body>> for Handler {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let fut = self.serve(req);
        async move { Ok(fut.await) }.boxed()
    }
}

/// A handler transformer.
#[derive(Clone)]
pub struct Middleware {
    wrap: Arc<WrapFn>,
}

impl Middleware {
    /// Raw wrap semantics: receive the next handler, return the wrapped one.
    pub fn new<F>(wrap: F) -> Self
    where
        F: Fn(Handler) -> Handler + Send + Sync + 'static,
    {
        Self { wrap: Arc::new(wrap) }
    }

    /// Middleware written as `async fn(request, next) -> response`.
    ///
    /// Not calling `next.serve(..)` short-circuits the rest of the chain.
    pub fn from_fn<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request<Body>, Handler) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        let f = Arc::new(f);
        Self::new(move |next: Handler| {
            let f = f.clone();
            Handler::from_fn(move |req| (f)(req, next.clone()))
        })
    }

    /// Adapt a tower layer whose service keeps the response type and never fails.
    pub fn from_layer<L>(layer: L) -> Self
    where
        L: Layer<Handler> + Send + Sync + 'static,
        L::Service: Service<Request<Body>, Response = Response, Error = Infallible>
            + Clone
            + Send
            + Sync
            + 'static,
        <L::Service as Service<Request<Body>>>::Future: Send + 'static,
    {
        Self::new(move |next| Handler::from_service(layer.layer(next)))
    }

    pub fn wrap(&self, next: Handler) -> Handler {
        (self.wrap)(next)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}

/// Compose `globals` then `route` middleware around `endpoint`.
pub fn build_chain(globals: &[Middleware], route: &[Middleware], endpoint: Handler) -> Handler {
    let middlewares: Vec<&Middleware> = globals.iter().chain(route.iter()).collect();
    if middlewares.is_empty() {
        return endpoint;
    }

    middlewares
        .into_iter()
        .rev()
        .fold(endpoint, |handler, middleware| middleware.wrap(handler))
}
