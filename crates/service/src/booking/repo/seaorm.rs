use models::catalog::{self, NewService};
use models::order::{self, OrderStatus};
use models::review::{self, NewReview};
use sea_orm::DatabaseConnection;

use crate::booking::repository::BookingRepository;
use crate::errors::ServiceError;

pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create_service(&self, input: NewService) -> Result<catalog::Model, ServiceError> {
        Ok(catalog::create(&self.db, input).await?)
    }

    async fn list_services(&self) -> Result<Vec<catalog::Model>, ServiceError> {
        Ok(catalog::list_all(&self.db).await?)
    }

    async fn create_order(&self, user_id: i32, service_id: i32) -> Result<order::Model, ServiceError> {
        Ok(order::create(&self.db, user_id, service_id).await?)
    }

    async fn find_order(&self, id: i32) -> Result<Option<order::Model>, ServiceError> {
        Ok(order::find(&self.db, id).await?)
    }

    async fn orders_for_user(&self, user_id: i32) -> Result<Vec<order::Model>, ServiceError> {
        Ok(order::list_for_user(&self.db, user_id).await?)
    }

    async fn all_orders(&self) -> Result<Vec<order::Model>, ServiceError> {
        Ok(order::list_all(&self.db).await?)
    }

    async fn delete_order(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(order::delete(&self.db, id).await?)
    }

    async fn compare_and_set_status(
        &self,
        id: i32,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<order::Model>, ServiceError> {
        if !order::compare_and_set_status(&self.db, id, expected, next).await? {
            return Ok(None);
        }
        Ok(order::find(&self.db, id).await?)
    }

    async fn create_review(&self, input: NewReview) -> Result<review::Model, ServiceError> {
        Ok(review::create(&self.db, input).await?)
    }

    async fn list_reviews(&self) -> Result<Vec<review::Model>, ServiceError> {
        Ok(review::list_all(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique_email};
    use models::user::{self, Role};
    use rust_decimal::Decimal;

    fn window_clean() -> NewService {
        NewService {
            name: "Window clean".into(),
            description: String::new(),
            price: Decimal::new(4500, 2),
            duration_minutes: 60,
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn stale_status_update_matches_nothing() {
        let Some(db) = get_db().await else { return };
        let owner = user::create(&db, &unique_email("booking_repo"), "hash", Role::Customer).await.unwrap();
        let repo = SeaOrmBookingRepository::new(db);

        let svc = repo.create_service(window_clean()).await.unwrap();
        let o = repo.create_order(owner.id, svc.id).await.unwrap();

        let moved = repo.compare_and_set_status(o.id, OrderStatus::Pending, OrderStatus::Confirmed).await.unwrap();
        assert_eq!(moved.map(|m| m.status), Some(OrderStatus::Confirmed));

        let stale = repo.compare_and_set_status(o.id, OrderStatus::Pending, OrderStatus::Cancelled).await.unwrap();
        assert!(stale.is_none());
    }

    #[tokio::test]
    async fn duplicate_review_is_a_conflict() {
        let Some(db) = get_db().await else { return };
        let owner = user::create(&db, &unique_email("review_repo"), "hash", Role::Customer).await.unwrap();
        let repo = SeaOrmBookingRepository::new(db);

        let svc = repo.create_service(window_clean()).await.unwrap();
        let o = repo.create_order(owner.id, svc.id).await.unwrap();
        let input = NewReview { order_id: o.id, user_id: owner.id, rating: 4, comment: "good".into() };

        repo.create_review(input.clone()).await.unwrap();
        assert!(matches!(repo.create_review(input).await, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn concurrent_reviews_for_one_order_admit_exactly_one() {
        let Some(db) = get_db().await else { return };
        let owner = user::create(&db, &unique_email("review_race"), "hash", Role::Customer).await.unwrap();
        let repo = SeaOrmBookingRepository::new(db);

        let svc = repo.create_service(window_clean()).await.unwrap();
        let o = repo.create_order(owner.id, svc.id).await.unwrap();
        let input = |rating| NewReview { order_id: o.id, user_id: owner.id, rating, comment: String::new() };

        let (a, b) = tokio::join!(repo.create_review(input(5)), repo.create_review(input(3)));
        let conflicts = [&a, &b].into_iter().filter(|r| matches!(**r, Err(ServiceError::Conflict(_)))).count();
        assert_eq!(conflicts, 1, "{a:?} / {b:?}");
        assert!(a.is_ok() || b.is_ok());

        let stored = repo.list_reviews().await.unwrap();
        assert_eq!(stored.iter().filter(|r| r.order_id == o.id).count(), 1);
    }
}
