use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::db::collect_rows;
use crate::errors::ModelError;
use crate::order;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Order,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Order => Entity::belongs_to(order::Entity).from(Column::OrderId).to(order::Column::Id).into(),
        }
    }
}

impl Related<order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub order_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: String,
}

pub fn validate_rating(rating: i32) -> Result<(), ModelError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(ModelError::Validation(format!("rating must be between {MIN_RATING} and {MAX_RATING}")))
    }
}

/// Insert a review. A second review for the same order violates
/// `UNIQUE(order_id)` and comes back as `ModelError::Conflict`.
pub async fn create(db: &DatabaseConnection, input: NewReview) -> Result<Model, ModelError> {
    validate_rating(input.rating)?;
    let am = ActiveModel {
        order_id: Set(input.order_id),
        user_id: Set(input.user_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    let stream = Entity::find().order_by_desc(Column::CreatedAt).stream(db).await?;
    Ok(collect_rows("reviews", stream).await?)
}
