use std::fmt;

use chrono::Utc;
use sea_orm::{entity::prelude::*, sea_query::Expr, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::db::collect_rows;
use crate::errors::ModelError;
use crate::{catalog, user};

/// Booking status. The set is closed; the database enforces it with a CHECK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub service_id: i32,
    pub status: OrderStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Service,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Service => Entity::belongs_to(catalog::Entity)
                .from(Column::ServiceId)
                .to(catalog::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<catalog::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a new order in `Pending`. A dangling user or service id surfaces as
/// `ModelError::NotFound` through the foreign keys.
pub async fn create(db: &DatabaseConnection, user_id: i32, service_id: i32) -> Result<Model, ModelError> {
    let am = ActiveModel {
        user_id: Set(user_id),
        service_id: Set(service_id),
        status: Set(OrderStatus::Pending),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn list_for_user(db: &DatabaseConnection, user_id: i32) -> Result<Vec<Model>, ModelError> {
    let stream = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_asc(Column::Id)
        .stream(db)
        .await?;
    Ok(collect_rows("orders", stream).await?)
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    let stream = Entity::find().order_by_asc(Column::Id).stream(db).await?;
    Ok(collect_rows("orders", stream).await?)
}

/// `UPDATE orders SET status = to WHERE id = ? AND status = from`.
///
/// Returns `false` when no row matched: the order is gone or its status moved on.
pub async fn compare_and_set_status(
    db: &DatabaseConnection,
    id: i32,
    from: OrderStatus,
    to: OrderStatus,
) -> Result<bool, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Status, Expr::value(to))
        .filter(Column::Id.eq(id))
        .filter(Column::Status.eq(from))
        .exec(db)
        .await?;
    Ok(res.rows_affected == 1)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(OrderStatus::Cancelled).unwrap(), "cancelled");
        let parsed: OrderStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(parsed, OrderStatus::Confirmed);
        assert!(serde_json::from_str::<OrderStatus>("\"shipped\"").is_err());
    }

    #[test]
    fn display_matches_stored_value() {
        for status in OrderStatus::iter() {
            assert_eq!(status.to_string(), status.to_value());
        }
    }
}
