//! Request normalization for routing and the request log.
//!
//! # Responsibilities
//! - Extract the routing host (URI authority or Host header, port stripped)
//! - Reduce request headers to the subset worth logging
//!
//! # Design Decisions
//! - Host is lowercased to match registration
//! - A host that cannot be split is used unchanged
//! - High-volume headers are dropped before logging, not after

use axum::http::{header, HeaderMap, Request};
use std::collections::BTreeMap;

/// Headers left out of the request log unless configured otherwise.
pub const DEFAULT_EXCLUDED_HEADERS: &[&str] = &[
    "Accept",
    "Accept-Encoding",
    "Accept-Language",
    "Connection",
    "Content-Length",
    "Content-Type",
    "Upgrade-Insecure-Requests",
    "Sec-Fetch-Mode",
    "Sec-Fetch-Site",
    "Sec-Fetch-Resource",
    "Sec-Fetch-User",
    "Sec-Fetch-Dest",
    "User-Agent",
    "X-Forwarded-Client-Cert",
    "X-Forwarded-For",
    "X-Forwarded-Proto",
    "X-Request-ID",
    "Traceparent",
    "Tracestate",
    "X-Envoy-Attempt-Count",
    "Postman-Token",
];

const IDE_COOKIE_PREFIXES: &[&str] = &["goland", "webstorm"];

/// The host a request is addressed to, without port, lowercased.
///
/// An absolute-form target (`GET http://host/path`) and HTTP/2 `:authority`
/// both land in the URI and win over any Host header.
pub fn hostname<B>(req: &Request<B>) -> String {
    let raw = req
        .uri()
        .authority()
        .map(|a| a.host())
        .or_else(|| req.headers().get(header::HOST).and_then(|h| h.to_str().ok()))
        .unwrap_or_default();

    normalize_host(raw)
}

/// Port and brackets stripped, lowercased. Applied to registered hosts too.
pub fn normalize_host(host: &str) -> String {
    strip_port(host).to_ascii_lowercase()
}

/// Remove a `:port` suffix and IPv6 brackets.
pub fn strip_port(host: &str) -> &str {
    if !host.contains(':') {
        return host;
    }

    if let Some(rest) = host.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((addr, tail)) if tail.is_empty() || tail.starts_with(':') => addr,
            _ => host,
        };
    }

    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') && port.bytes().all(|b| b.is_ascii_digit()) => {
            name
        }
        _ => host,
    }
}

/// Headers for the request log, keyed by lowercase name.
///
/// `excluded` must be lowercase. Multiple values are joined with `", "`;
/// values that are not valid UTF-8 are skipped.
pub fn loggable_headers(headers: &HeaderMap, excluded: &[String]) -> BTreeMap<String, String> {
    let mut mapping = BTreeMap::new();

    for name in headers.keys() {
        let key = name.as_str();
        if excluded.iter().any(|e| e == key) {
            continue;
        }

        let values: Vec<String> = headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(|v| redact(name, v))
            .collect();

        if !values.is_empty() {
            mapping.insert(key.to_string(), values.join(", "));
        }
    }

    mapping
}

fn redact(name: &header::HeaderName, value: &str) -> String {
    if *name == header::COOKIE {
        let lower = value.to_ascii_lowercase();
        if IDE_COOKIE_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            return "IDE-[...]".to_string();
        }
    } else if *name == header::USER_AGENT {
        return value.split(' ').next().unwrap_or_default().to_string();
    }
    value.to_string()
}
