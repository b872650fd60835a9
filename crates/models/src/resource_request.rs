use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::emergency_request::STATUS_PENDING;
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resource_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub resource_type: String,
    pub quantity: i32,
    pub area: String,
    pub requester_phone: Option<String>,
    pub created_at: DateTimeUtc,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    resource_type: &str,
    quantity: i32,
    area: &str,
    requester_phone: Option<&str>,
) -> Result<Model, ModelError> {
    if resource_type.trim().is_empty() || area.trim().is_empty() {
        return Err(ModelError::Validation("resource type and area required".into()));
    }
    if quantity <= 0 {
        return Err(ModelError::Validation("quantity must be positive".into()));
    }
    let am = ActiveModel {
        resource_type: Set(resource_type.to_string()),
        quantity: Set(quantity),
        area: Set(area.to_string()),
        requester_phone: Set(requester_phone.map(str::to_string)),
        created_at: Set(Utc::now()),
        status: Set(STATUS_PENDING.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
