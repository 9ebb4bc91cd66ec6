//! Bookable cleaning services.

use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::db::collect_rows;
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub duration_minutes: i32,
    pub image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewService {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub duration_minutes: i32,
    #[serde(default)]
    pub image_url: String,
}

impl NewService {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("name required".into()));
        }
        if self.price.is_sign_negative() {
            return Err(ModelError::Validation("price must not be negative".into()));
        }
        if self.price.scale() > 2 {
            return Err(ModelError::Validation("price has more than two decimal places".into()));
        }
        if self.duration_minutes <= 0 {
            return Err(ModelError::Validation("duration_minutes must be positive".into()));
        }
        Ok(())
    }
}

pub async fn create(db: &DatabaseConnection, input: NewService) -> Result<Model, ModelError> {
    input.validate()?;
    let am = ActiveModel {
        name: Set(input.name.trim().to_string()),
        description: Set(input.description),
        price: Set(input.price),
        duration_minutes: Set(input.duration_minutes),
        image_url: Set(input.image_url),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    let stream = Entity::find().order_by_asc(Column::Id).stream(db).await?;
    Ok(collect_rows("services", stream).await?)
}
