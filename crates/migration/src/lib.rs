//! Migrator registering the alert tables.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_subscribers;
mod m20240601_000002_create_emergency_requests;
mod m20240601_000003_create_resource_requests;
mod m20240601_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_subscribers::Migration),
            Box::new(m20240601_000002_create_emergency_requests::Migration),
            Box::new(m20240601_000003_create_resource_requests::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000004_add_indexes::Migration),
        ]
    }
}
