use async_trait::async_trait;
use models::catalog::{self, NewService};
use models::order::{self, OrderStatus};
use models::review::{self, NewReview};

use crate::errors::ServiceError;

/// Data access for the booking domain.
///
/// Implementations report a broken reference as `NotFound`, a uniqueness
/// violation as `Conflict` and anything else from storage as `Persistence`.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_service(&self, input: NewService) -> Result<catalog::Model, ServiceError>;
    async fn list_services(&self) -> Result<Vec<catalog::Model>, ServiceError>;

    async fn create_order(&self, user_id: i32, service_id: i32) -> Result<order::Model, ServiceError>;
    async fn find_order(&self, id: i32) -> Result<Option<order::Model>, ServiceError>;
    async fn orders_for_user(&self, user_id: i32) -> Result<Vec<order::Model>, ServiceError>;
    async fn all_orders(&self) -> Result<Vec<order::Model>, ServiceError>;
    /// `false` when there was nothing to delete.
    async fn delete_order(&self, id: i32) -> Result<bool, ServiceError>;
    /// Move the order to `next` only if it is still in `expected`.
    /// `None` when no row matched.
    async fn compare_and_set_status(
        &self,
        id: i32,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<order::Model>, ServiceError>;

    async fn create_review(&self, input: NewReview) -> Result<review::Model, ServiceError>;
    async fn list_reviews(&self) -> Result<Vec<review::Model>, ServiceError>;
}

/// In-memory repository with the same constraint behaviour as the database
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Tables {
        services: BTreeMap<i32, catalog::Model>,
        orders: BTreeMap<i32, order::Model>,
        reviews: BTreeMap<i32, review::Model>,
        next_id: i32,
    }

    impl Tables {
        fn next_id(&mut self) -> i32 {
            self.next_id += 1;
            self.next_id
        }
    }

    #[derive(Default)]
    pub struct MockBookingRepository {
        tables: Mutex<Tables>,
        calls: AtomicUsize,
    }

    impl MockBookingRepository {
        /// Number of repository calls made so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.tables.lock().unwrap()
        }
    }

    #[async_trait]
    impl BookingRepository for MockBookingRepository {
        async fn create_service(&self, input: NewService) -> Result<catalog::Model, ServiceError> {
            input.validate()?;
            let mut t = self.tables();
            let id = t.next_id();
            let svc = catalog::Model {
                id,
                name: input.name.trim().to_string(),
                description: input.description,
                price: input.price,
                duration_minutes: input.duration_minutes,
                image_url: input.image_url,
            };
            t.services.insert(id, svc.clone());
            Ok(svc)
        }

        async fn list_services(&self) -> Result<Vec<catalog::Model>, ServiceError> {
            Ok(self.tables().services.values().cloned().collect())
        }

        async fn create_order(&self, user_id: i32, service_id: i32) -> Result<order::Model, ServiceError> {
            let mut t = self.tables();
            if !t.services.contains_key(&service_id) {
                return Err(ServiceError::not_found("service", service_id));
            }
            let id = t.next_id();
            let o = order::Model { id, user_id, service_id, status: OrderStatus::Pending, created_at: Utc::now().into() };
            t.orders.insert(id, o.clone());
            Ok(o)
        }

        async fn find_order(&self, id: i32) -> Result<Option<order::Model>, ServiceError> {
            Ok(self.tables().orders.get(&id).cloned())
        }

        async fn orders_for_user(&self, user_id: i32) -> Result<Vec<order::Model>, ServiceError> {
            Ok(self.tables().orders.values().filter(|o| o.user_id == user_id).cloned().collect())
        }

        async fn all_orders(&self) -> Result<Vec<order::Model>, ServiceError> {
            Ok(self.tables().orders.values().cloned().collect())
        }

        async fn delete_order(&self, id: i32) -> Result<bool, ServiceError> {
            let mut t = self.tables();
            let removed = t.orders.remove(&id).is_some();
            // ON DELETE CASCADE
            t.reviews.retain(|_, r| r.order_id != id);
            Ok(removed)
        }

        async fn compare_and_set_status(
            &self,
            id: i32,
            expected: OrderStatus,
            next: OrderStatus,
        ) -> Result<Option<order::Model>, ServiceError> {
            let mut t = self.tables();
            match t.orders.get_mut(&id) {
                Some(o) if o.status == expected => {
                    o.status = next;
                    Ok(Some(o.clone()))
                }
                _ => Ok(None),
            }
        }

        async fn create_review(&self, input: NewReview) -> Result<review::Model, ServiceError> {
            review::validate_rating(input.rating)?;
            let mut t = self.tables();
            if !t.orders.contains_key(&input.order_id) {
                return Err(ServiceError::not_found("order", input.order_id));
            }
            if t.reviews.values().any(|r| r.order_id == input.order_id) {
                return Err(ServiceError::Conflict(format!("order {} already reviewed", input.order_id)));
            }
            let id = t.next_id();
            let r = review::Model {
                id,
                order_id: input.order_id,
                user_id: input.user_id,
                rating: input.rating,
                comment: input.comment,
                created_at: Utc::now().into(),
            };
            t.reviews.insert(id, r.clone());
            Ok(r)
        }

        async fn list_reviews(&self) -> Result<Vec<review::Model>, ServiceError> {
            Ok(self.tables().reviews.values().rev().cloned().collect())
        }
    }
}
