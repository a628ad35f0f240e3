//! Reusable middleware for services hosted on the mux.
//!
//! The router composes middleware but owns none of it; these are the small
//! pieces the bundled server installs globally.

pub mod request_id;
pub mod server_name;

pub use request_id::{request_id, RequestId, X_REQUEST_ID};
pub use server_name::server_name;
