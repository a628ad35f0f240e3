//! Registration pattern parsing.
//!
//! # Responsibilities
//! - Split `METHOD [HOST]/PATH` into its three parts
//! - Reject malformed patterns before anything touches the table
//!
//! # Design Decisions
//! - Host is normalized the way dispatch normalizes request hosts: lowercased,
//!   port and IPv6 brackets stripped
//! - Path is kept byte-for-byte; it is compared against the escaped request path
//! - A remainder without `/` is a bare host served at `/`

use axum::http::Method;
use std::fmt;

use crate::http::request::normalize_host;
use crate::routing::error::MuxError;

/// A parsed registration: the unique key of one table entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePattern {
    pub method: Method,
    /// Empty for hostless routes.
    pub host: String,
    pub path: String,
}

impl RoutePattern {
    /// Parse `METHOD [HOST]/PATH`.
    pub fn parse(pattern: &str) -> Result<Self, MuxError> {
        let (method, remainder) = pattern
            .split_once(' ')
            .ok_or_else(|| MuxError::invalid(pattern, "missing space between method and path"))?;

        if method.is_empty() {
            return Err(MuxError::invalid(pattern, "empty method"));
        }
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| MuxError::invalid(pattern, "method is not a valid HTTP token"))?;

        if remainder.is_empty() {
            return Err(MuxError::invalid(pattern, "pattern must include a path or a hostname"));
        }
        if remainder.chars().any(char::is_whitespace) {
            return Err(MuxError::invalid(pattern, "unexpected whitespace after method"));
        }

        let (host, path) = match remainder.find('/') {
            None => (remainder, "/".to_string()),
            Some(0) => ("", remainder.to_string()),
            Some(idx) => (&remainder[..idx], remainder[idx..].to_string()),
        };

        let host = normalize_host(host);
        if !remainder.starts_with('/') && host.is_empty() {
            return Err(MuxError::invalid(pattern, "empty hostname"));
        }

        Ok(Self { method, host, path })
    }

    pub fn is_hostless(&self) -> bool {
        self.host.is_empty()
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.method, self.host, self.path)
    }
}
