//! Registration errors.
//!
//! Both variants are configuration errors raised during startup. Callers are
//! expected to propagate them out of `main`; a misconfigured service never
//! starts serving.

use thiserror::Error;

/// Errors raised while populating the route table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MuxError {
    /// The registration string is not `METHOD [HOST]/PATH`.
    #[error("invalid pattern \"{pattern}\": {reason} - pattern must follow [METHOD ][HOST]/[PATH] or [METHOD ]/[PATH]")]
    InvalidPattern { pattern: String, reason: &'static str },

    /// Another registration already owns the same (method, host, path).
    #[error("duplicate mux registered for host ({host}), path ({path}), method ({method}): \"{existing}\" conflicts with \"{attempted}\"")]
    DuplicateRoute {
        method: String,
        host: String,
        path: String,
        /// Pattern of the entry already in the table.
        existing: String,
        /// Pattern that was rejected.
        attempted: String,
    },
}

impl MuxError {
    pub(crate) fn invalid(pattern: &str, reason: &'static str) -> Self {
        MuxError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        }
    }
}
