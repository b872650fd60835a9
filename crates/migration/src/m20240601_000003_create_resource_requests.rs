//! Create `resource_requests` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResourceRequests::Table)
                    .if_not_exists()
                    .col(pk_auto(ResourceRequests::Id))
                    .col(string_len(ResourceRequests::ResourceType, 100).not_null())
                    .col(integer(ResourceRequests::Quantity).not_null())
                    .col(string_len(ResourceRequests::Area, 100).not_null())
                    // Optional contact; no confirmation SMS when absent
                    .col(ColumnDef::new(ResourceRequests::RequesterPhone).string_len(20).null())
                    .col(
                        timestamp_with_time_zone(ResourceRequests::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(string_len(ResourceRequests::Status, 20).default("pending").not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ResourceRequests::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ResourceRequests { Table, Id, ResourceType, Quantity, Area, RequesterPhone, CreatedAt, Status }
