//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MuxConfig (validated, immutable)
//!     → read once at startup by the server and the router
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; routes are fixed at startup anyway
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, LoggingConfig, MuxConfig, RoutingConfig, ServerConfig};
pub use validation::{validate_config, ValidationError};
