//! Metrics collection.
//!
//! # Metrics
//! - `mux_requests_total` (counter): dispatched requests by method, outcome
//! - `mux_routes_registered` (gauge): entries in the route table
//!
//! # Design Decisions
//! - Uses the `metrics` facade; exposition is left to the host process
//! - Labels are bounded: standard methods or `other`, `matched` / `not_found`;
//!   paths are never labels

use axum::http::Method;

/// Result of resolving one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Matched,
    NotFound,
}

impl DispatchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchOutcome::Matched => "matched",
            DispatchOutcome::NotFound => "not_found",
        }
    }
}

pub fn record_dispatch(method: &Method, outcome: DispatchOutcome) {
    metrics::counter!(
        "mux_requests_total",
        "method" => method_label(method),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Fixed label for a request method; extension methods collapse to `other`.
pub fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "HEAD" => "HEAD",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "CONNECT" => "CONNECT",
        "OPTIONS" => "OPTIONS",
        "TRACE" => "TRACE",
        "PATCH" => "PATCH",
        _ => "other",
    }
}

pub fn record_registered(total: usize) {
    metrics::gauge!("mux_routes_registered").set(total as f64);
}
