//! Server tests.
//!
//! - `common` - shared state and user/trip helpers
//! - `handlers` - handler tests calling the axum handlers directly
//! - `router` - requests through the full router (health, auth header, metrics)

pub mod common;

mod handlers;
