//! Entities and data access for users, services, orders and reviews.
//!
//! Each entity module carries its sea-orm model plus the handful of queries the
//! service layer needs. `db` owns pool construction and the health probe.

pub mod catalog;
pub mod db;
pub mod errors;
pub mod order;
pub mod review;
pub mod user;

#[cfg(test)]
mod tests;
