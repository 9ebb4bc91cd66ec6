use std::sync::Arc;

use models::catalog::{self, NewService};
use models::order::{self, OrderStatus};
use models::review::{self, NewReview};
use tracing::{info, instrument, warn};

use super::lifecycle::OrderLifecycle;
use super::repository::BookingRepository;
use crate::auth::Claims;
use crate::errors::ServiceError;

/// Review payload as submitted by a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewInput {
    pub rating: i32,
    pub comment: String,
}

#[derive(Clone)]
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_service(&self, input: NewService) -> Result<catalog::Model, ServiceError> {
        input.validate()?;
        let created = self.repo.create_service(input).await?;
        info!(service_id = created.id, "service_created");
        Ok(created)
    }

    pub async fn list_services(&self) -> Result<Vec<catalog::Model>, ServiceError> {
        self.repo.list_services().await
    }

    /// New orders always start in `Pending` and belong to the caller.
    #[instrument(skip(self, claims), fields(user_id = claims.subject_id))]
    pub async fn create_order(&self, claims: &Claims, service_id: i32) -> Result<order::Model, ServiceError> {
        let created = self.repo.create_order(claims.subject_id, service_id).await?;
        info!(order_id = created.id, "order_created");
        Ok(created)
    }

    pub async fn my_orders(&self, claims: &Claims) -> Result<Vec<order::Model>, ServiceError> {
        self.repo.orders_for_user(claims.subject_id).await
    }

    pub async fn all_orders(&self) -> Result<Vec<order::Model>, ServiceError> {
        self.repo.all_orders().await
    }

    /// Owner or admin, in any status.
    #[instrument(skip(self, claims), fields(user_id = claims.subject_id))]
    pub async fn delete_order(&self, claims: &Claims, order_id: i32) -> Result<(), ServiceError> {
        let existing = self.load_order(order_id).await?;
        if !claims.is_admin() && existing.user_id != claims.subject_id {
            return Err(ServiceError::Forbidden(format!("order {order_id} belongs to another user")));
        }
        if !self.repo.delete_order(order_id).await? {
            return Err(ServiceError::not_found("order", order_id));
        }
        info!(order_id, "order_deleted");
        Ok(())
    }

    /// Validate against the lifecycle, then write with compare-and-set on the
    /// status that was read. Losing a concurrent race yields `Conflict`.
    #[instrument(skip(self, claims), fields(user_id = claims.subject_id, next = %next))]
    pub async fn update_order_status(
        &self,
        claims: &Claims,
        order_id: i32,
        next: OrderStatus,
    ) -> Result<order::Model, ServiceError> {
        let current = self.load_order(order_id).await?;
        let target = OrderLifecycle::transition(&current, next, claims)?;

        match self.repo.compare_and_set_status(order_id, current.status, target.status).await? {
            Some(updated) => {
                info!(order_id, from = %current.status, to = %updated.status, event = "order_status_changed");
                Ok(updated)
            }
            None => {
                warn!(order_id, expected = %current.status, "order status changed concurrently");
                Err(ServiceError::Conflict(format!("order {order_id} was modified concurrently")))
            }
        }
    }

    pub async fn cancel_order(&self, claims: &Claims, order_id: i32) -> Result<order::Model, ServiceError> {
        self.update_order_status(claims, order_id, OrderStatus::Cancelled).await
    }

    /// Only the owner may review, only once, and only after completion.
    #[instrument(skip(self, claims, input), fields(user_id = claims.subject_id))]
    pub async fn create_review(
        &self,
        claims: &Claims,
        order_id: i32,
        input: ReviewInput,
    ) -> Result<review::Model, ServiceError> {
        let existing = self.load_order(order_id).await?;
        if existing.user_id != claims.subject_id {
            return Err(ServiceError::Forbidden(format!("order {order_id} belongs to another user")));
        }
        if existing.status != OrderStatus::Completed {
            return Err(ServiceError::Conflict(format!(
                "order {order_id} is {}, reviews require a completed order",
                existing.status
            )));
        }
        review::validate_rating(input.rating)?;

        let created = self
            .repo
            .create_review(NewReview {
                order_id,
                user_id: claims.subject_id,
                rating: input.rating,
                comment: input.comment.trim().to_string(),
            })
            .await?;
        info!(order_id, review_id = created.id, "review_created");
        Ok(created)
    }

    pub async fn list_reviews(&self) -> Result<Vec<review::Model>, ServiceError> {
        self.repo.list_reviews().await
    }

    async fn load_order(&self, order_id: i32) -> Result<order::Model, ServiceError> {
        self.repo
            .find_order(order_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("order", order_id))
    }
}
