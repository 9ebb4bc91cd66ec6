//! Business layer on top of `models`.
//! - `auth`: registration, login, token verification and role checks.
//! - `booking`: catalog, orders and reviews, with status changes routed through
//!   the order lifecycle.
//!
//! Persistence sits behind repository traits so handlers and tests can run
//! against the in-memory implementations.

pub mod auth;
pub mod booking;
pub mod errors;
#[cfg(test)]
pub mod test_support;
