//! Create `emergency_requests` table. Rows are append-only; duplicates allowed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmergencyRequests::Table)
                    .if_not_exists()
                    .col(pk_auto(EmergencyRequests::Id))
                    .col(string_len(EmergencyRequests::PhoneNumber, 20).not_null())
                    .col(string_len(EmergencyRequests::Category, 50).not_null())
                    .col(string_len(EmergencyRequests::Area, 100).not_null())
                    .col(ColumnDef::new(EmergencyRequests::Message).text().null())
                    .col(
                        timestamp_with_time_zone(EmergencyRequests::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(string_len(EmergencyRequests::Status, 20).default("pending").not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(EmergencyRequests::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum EmergencyRequests { Table, Id, PhoneNumber, Category, Area, Message, CreatedAt, Status }
