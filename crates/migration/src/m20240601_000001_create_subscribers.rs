//! Create `subscribers` table.
//!
//! `phone_number` carries the only uniqueness constraint in the schema.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscribers::Table)
                    .if_not_exists()
                    .col(pk_auto(Subscribers::Id))
                    .col(string_len(Subscribers::PhoneNumber, 20).unique_key().not_null())
                    .col(ColumnDef::new(Subscribers::Area).string_len(100).null())
                    .col(
                        timestamp_with_time_zone(Subscribers::SubscribedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(boolean(Subscribers::IsActive).default(true).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Subscribers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Subscribers { Table, Id, PhoneNumber, Area, SubscribedAt, IsActive }
