use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::debug;

use models::{emergency_request, resource_request, subscriber};

use crate::alerts::domain::{NewEmergency, NewResource, SubscribeOutcome};
use crate::alerts::repository::AlertRepository;
use crate::errors::ServiceError;

/// `AlertRepository` over a SeaORM connection pool.
///
/// Writes run inside a transaction taken from the pool; an early return drops
/// the transaction, which rolls it back and hands the connection back.
#[derive(Clone)]
pub struct SeaOrmAlertRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAlertRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl AlertRepository for SeaOrmAlertRepository {
    async fn subscribe(&self, phone: &str, area: &str) -> Result<SubscribeOutcome, ServiceError> {
        let txn = self.db.begin().await?;
        let outcome = match subscriber::find_by_phone(&txn, phone).await? {
            Some(existing) => {
                debug!(id = existing.id, "reactivating subscriber");
                subscriber::reactivate(&txn, existing, area).await?;
                SubscribeOutcome::Reactivated
            }
            None => {
                subscriber::create(&txn, phone, area).await?;
                SubscribeOutcome::Created
            }
        };
        txn.commit().await?;
        Ok(outcome)
    }

    async fn create_emergency(&self, req: &NewEmergency) -> Result<i32, ServiceError> {
        let txn = self.db.begin().await?;
        let row = emergency_request::create(&txn, &req.phone, &req.category, &req.area, &req.message).await?;
        txn.commit().await?;
        Ok(row.id)
    }

    async fn create_resource(&self, req: &NewResource) -> Result<i32, ServiceError> {
        let txn = self.db.begin().await?;
        let row = resource_request::create(&txn, &req.resource_type, req.quantity, &req.area, req.phone.as_deref()).await?;
        txn.commit().await?;
        Ok(row.id)
    }

    async fn active_subscriber_phones(&self, area: Option<&str>) -> Result<Vec<String>, ServiceError> {
        Ok(subscriber::active_phones(&self.db, area).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn resubscribe_keeps_single_row_with_latest_area() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let repo = SeaOrmAlertRepository::new(db.clone());

        assert_eq!(repo.subscribe("+911111111111", "Zone A").await?, SubscribeOutcome::Created);
        assert_eq!(repo.subscribe("+911111111111", "Zone B").await?, SubscribeOutcome::Reactivated);

        assert_eq!(subscriber::Entity::find().count(&db).await?, 1);
        let row = subscriber::find_by_phone(&db, "+911111111111").await?.unwrap();
        assert_eq!(row.area.as_deref(), Some("Zone B"));
        assert!(row.is_active);
        Ok(())
    }

    #[tokio::test]
    async fn inserts_requests_and_filters_broadcast_targets() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let repo = SeaOrmAlertRepository::new(db.clone());

        let e = NewEmergency { phone: "9876543210".into(), category: "medical".into(), area: "Zone A".into(), message: String::new() };
        repo.create_emergency(&e).await?;
        repo.create_emergency(&e).await?;
        assert_eq!(emergency_request::Entity::find().count(&db).await?, 2);

        let r = NewResource { resource_type: "blankets".into(), quantity: 40, area: "Zone B".into(), phone: None };
        let id = repo.create_resource(&r).await?;
        let stored = resource_request::Entity::find_by_id(id).one(&db).await?.unwrap();
        assert_eq!(stored.quantity, 40);
        assert_eq!(stored.requester_phone, None);

        repo.subscribe("+911111111111", "Zone A").await?;
        repo.subscribe("+912222222222", "Zone B").await?;
        assert_eq!(repo.active_subscriber_phones(Some("Zone A")).await?, vec!["+911111111111".to_string()]);
        assert_eq!(repo.active_subscriber_phones(None).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn subscribe_reports_unavailable_when_pool_closed() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let repo = SeaOrmAlertRepository::new(db.clone());
        db.close().await?;

        let err = repo.subscribe("+911111111111", "Zone A").await.unwrap_err();
        assert!(matches!(err, ServiceError::StorageUnavailable(_)), "got {err:?}");
        Ok(())
    }
}
