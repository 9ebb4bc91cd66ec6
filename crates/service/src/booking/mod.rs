//! Catalog, orders and reviews.
//!
//! `lifecycle` is the pure status state machine; `service` applies it and then
//! persists through a [`repository::BookingRepository`].

pub mod lifecycle;
pub mod repo;
pub mod repository;
pub mod service;

pub use lifecycle::{LifecycleError, OrderLifecycle};
pub use service::BookingService;
