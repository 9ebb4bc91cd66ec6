//! HTTP surface of the booking backend: router, access guard, error mapping
//! and the startup sequence.

pub mod errors;
pub mod guard;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use routes::{build_router, ServerState};
pub use startup::{bootstrap, load_config, serve};
