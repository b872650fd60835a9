use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Subscribers: broadcast lookup filters on is_active and area
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subscribers_active_area")
                    .table(Subscribers::Table)
                    .col(Subscribers::IsActive)
                    .col(Subscribers::Area)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_subscribers_active_area")
                    .table(Subscribers::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Subscribers { Table, IsActive, Area }
