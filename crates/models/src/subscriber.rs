use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, QuerySelect, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscribers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub phone_number: String,
    pub area: Option<String>,
    pub subscribed_at: DateTimeUtc,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_phone<C: ConnectionTrait>(db: &C, phone: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::PhoneNumber.eq(phone)).one(db).await?)
}

pub async fn create<C: ConnectionTrait>(db: &C, phone: &str, area: &str) -> Result<Model, ModelError> {
    if phone.trim().is_empty() { return Err(ModelError::Validation("phone number required".into())); }
    let am = ActiveModel {
        phone_number: Set(phone.to_string()),
        area: Set(Some(area.to_string())),
        subscribed_at: Set(Utc::now()),
        is_active: Set(true),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Mark an existing subscriber active again and move it to `area`.
pub async fn reactivate<C: ConnectionTrait>(db: &C, existing: Model, area: &str) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    am.is_active = Set(true);
    am.area = Set(Some(area.to_string()));
    Ok(am.update(db).await?)
}

/// Phone numbers of active subscribers, optionally restricted to one area (exact match).
pub async fn active_phones<C: ConnectionTrait>(db: &C, area: Option<&str>) -> Result<Vec<String>, ModelError> {
    let mut query = Entity::find().filter(Column::IsActive.eq(true));
    if let Some(area) = area {
        query = query.filter(Column::Area.eq(area));
    }
    let phones = query
        .select_only()
        .column(Column::PhoneNumber)
        .order_by_asc(Column::Id)
        .into_tuple::<String>()
        .all(db)
        .await?;
    Ok(phones)
}
