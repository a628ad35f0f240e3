//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML. Every field
//! has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::http::request::DEFAULT_EXCLUDED_HEADERS;

/// Root configuration for a mux-hosted service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MuxConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Server identity and request limits.
    pub server: ServerConfig,

    /// Router behavior.
    pub routing: RoutingConfig,

    /// Log output and request log filtering.
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Value of the `Server` response header and the service name in logs.
    pub name: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Attach the matched route's metadata to each request.
    pub metadata: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self { metadata: true }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set.
    pub filter: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,

    /// Headers omitted from the per-request log line.
    pub excluded_headers: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "service_mux=info,tower_http=info".to_string(),
            json: false,
            excluded_headers: DEFAULT_EXCLUDED_HEADERS
                .iter()
                .map(|h| h.to_string())
                .collect(),
        }
    }
}
