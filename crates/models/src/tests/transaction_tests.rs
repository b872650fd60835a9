use super::setup_test_db;
use crate::subscriber;
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};
use anyhow::Result;

/// Committed work is visible afterwards
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let db = setup_test_db().await?;
    let txn = db.begin().await?;
    subscriber::create(&txn, "+911111111111", "Zone A").await?;
    txn.commit().await?;
    assert!(subscriber::find_by_phone(&db, "+911111111111").await?.is_some());
    Ok(())
}

/// Dropping a transaction without commit discards its work
#[tokio::test]
async fn test_transaction_drop_rolls_back() -> Result<()> {
    let db = setup_test_db().await?;
    {
        let txn = db.begin().await?;
        subscriber::create(&txn, "+911111111111", "Zone A").await?;
    }
    assert_eq!(subscriber::Entity::find().count(&db).await?, 0);
    Ok(())
}
