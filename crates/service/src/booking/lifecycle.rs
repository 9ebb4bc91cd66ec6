//! Order status state machine.
//!
//! ```text
//! Pending   -> Confirmed   admin
//! Pending   -> Cancelled   admin or owner
//! Confirmed -> Completed   admin
//! Confirmed -> Cancelled   admin
//! ```
//!
//! `Completed` and `Cancelled` are terminal. Everything not listed is illegal,
//! self-loops included.

use models::order::{self, OrderStatus};
use thiserror::Error;

use crate::auth::Claims;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("illegal transition from {from} to {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },
    #[error("not allowed to move order from {from} to {to}")]
    Forbidden { from: OrderStatus, to: OrderStatus },
}

/// Who may take an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permitted {
    AdminOnly,
    AdminOrOwner,
}

impl Permitted {
    fn admits(&self, claims: &Claims, owner_id: i32) -> bool {
        match self {
            Permitted::AdminOnly => claims.is_admin(),
            Permitted::AdminOrOwner => claims.is_admin() || claims.subject_id == owner_id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderLifecycle;

impl OrderLifecycle {
    /// The edge table. `None` means the edge does not exist.
    pub fn edge(from: OrderStatus, to: OrderStatus) -> Option<Permitted> {
        use OrderStatus::*;
        match (from, to) {
            (Pending, Confirmed) => Some(Permitted::AdminOnly),
            (Pending, Cancelled) => Some(Permitted::AdminOrOwner),
            (Confirmed, Completed) => Some(Permitted::AdminOnly),
            (Confirmed, Cancelled) => Some(Permitted::AdminOnly),
            _ => None,
        }
    }

    pub fn is_terminal(status: OrderStatus) -> bool {
        matches!(status, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Legality is checked before the actor.
    pub fn check(
        from: OrderStatus,
        to: OrderStatus,
        claims: &Claims,
        owner_id: i32,
    ) -> Result<(), LifecycleError> {
        let permitted = Self::edge(from, to).ok_or(LifecycleError::IllegalTransition { from, to })?;
        if permitted.admits(claims, owner_id) {
            Ok(())
        } else {
            Err(LifecycleError::Forbidden { from, to })
        }
    }

    /// Apply `to` to an in-memory order. Storage is not touched.
    pub fn transition(
        order: &order::Model,
        to: OrderStatus,
        claims: &Claims,
    ) -> Result<order::Model, LifecycleError> {
        Self::check(order.status, to, claims, order.user_id)?;
        Ok(order::Model { status: to, ..order.clone() })
    }
}
