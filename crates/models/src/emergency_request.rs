use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const STATUS_PENDING: &str = "pending";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "emergency_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub phone_number: String,
    pub category: String,
    pub area: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    pub created_at: DateTimeUtc,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    phone: &str,
    category: &str,
    area: &str,
    message: &str,
) -> Result<Model, ModelError> {
    if phone.trim().is_empty() || category.trim().is_empty() || area.trim().is_empty() {
        return Err(ModelError::Validation("phone, category and area required".into()));
    }
    let am = ActiveModel {
        phone_number: Set(phone.to_string()),
        category: Set(category.to_string()),
        area: Set(area.to_string()),
        message: Set(Some(message.to_string())),
        created_at: Set(Utc::now()),
        status: Set(STATUS_PENDING.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
