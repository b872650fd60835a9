use async_trait::async_trait;

use super::domain::{NewEmergency, NewResource, SubscribeOutcome};
use crate::errors::ServiceError;

/// Repository abstraction for alert persistence.
///
/// Each method is one unit of work: it acquires storage, commits, and
/// releases it again on every exit path.
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Select by phone, then reactivate-and-move or insert. Not atomic across
    /// concurrent callers; a racing duplicate insert fails on the unique key.
    async fn subscribe(&self, phone: &str, area: &str) -> Result<SubscribeOutcome, ServiceError>;
    async fn create_emergency(&self, req: &NewEmergency) -> Result<i32, ServiceError>;
    async fn create_resource(&self, req: &NewResource) -> Result<i32, ServiceError>;
    async fn active_subscriber_phones(&self, area: Option<&str>) -> Result<Vec<String>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::alerts::domain::SubscriberRecord;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAlertRepository {
        subscribers: Mutex<Vec<SubscriberRecord>>,
        emergencies: Mutex<Vec<NewEmergency>>,
        resources: Mutex<Vec<NewResource>>,
        unavailable: AtomicBool,
        // Row another request commits between our select and our insert
        interleaved: Mutex<Option<SubscriberRecord>>,
    }

    impl MockAlertRepository {
        pub fn seed_subscriber(&self, phone: &str, area: &str, is_active: bool) {
            self.subscribers.lock().unwrap().push(SubscriberRecord {
                phone: phone.to_string(),
                area: Some(area.to_string()),
                is_active,
            });
        }

        /// Simulate a storage outage: every operation fails before touching data.
        pub fn set_unavailable(&self, down: bool) {
            self.unavailable.store(down, Ordering::SeqCst);
        }

        /// Make the next `subscribe` observe a concurrent insert of the same
        /// phone landing after its lookup, reproducing the check-then-insert race.
        pub fn interleave_subscribe(&self, phone: &str, area: &str) {
            *self.interleaved.lock().unwrap() = Some(SubscriberRecord {
                phone: phone.to_string(),
                area: Some(area.to_string()),
                is_active: true,
            });
        }

        pub fn subscribers(&self) -> Vec<SubscriberRecord> {
            self.subscribers.lock().unwrap().clone()
        }

        pub fn emergencies(&self) -> Vec<NewEmergency> {
            self.emergencies.lock().unwrap().clone()
        }

        pub fn resources(&self) -> Vec<NewResource> {
            self.resources.lock().unwrap().clone()
        }

        fn check_available(&self) -> Result<(), ServiceError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ServiceError::StorageUnavailable("mock storage offline".into()));
            }
            Ok(())
        }
    }

    // Ids follow insertion order, like an auto-increment column starting at 1
    pub(crate) fn next_id(len: usize) -> Result<i32, ServiceError> {
        i32::try_from(len).map_err(|_| ServiceError::Storage("id space exhausted".into()))
    }

    #[async_trait]
    impl AlertRepository for MockAlertRepository {
        async fn subscribe(&self, phone: &str, area: &str) -> Result<SubscribeOutcome, ServiceError> {
            self.check_available()?;
            let existing = self.subscribers.lock().unwrap().iter().position(|s| s.phone == phone);
            if let Some(racer) = self.interleaved.lock().unwrap().take() {
                self.subscribers.lock().unwrap().push(racer);
            }
            let mut subs = self.subscribers.lock().unwrap();
            match existing {
                Some(idx) => {
                    subs[idx].is_active = true;
                    subs[idx].area = Some(area.to_string());
                    Ok(SubscribeOutcome::Reactivated)
                }
                None => {
                    if subs.iter().any(|s| s.phone == phone) {
                        return Err(ServiceError::Storage(format!("duplicate phone_number {phone}")));
                    }
                    subs.push(SubscriberRecord { phone: phone.to_string(), area: Some(area.to_string()), is_active: true });
                    Ok(SubscribeOutcome::Created)
                }
            }
        }

        async fn create_emergency(&self, req: &NewEmergency) -> Result<i32, ServiceError> {
            self.check_available()?;
            let mut rows = self.emergencies.lock().unwrap();
            rows.push(req.clone());
            next_id(rows.len())
        }

        async fn create_resource(&self, req: &NewResource) -> Result<i32, ServiceError> {
            self.check_available()?;
            let mut rows = self.resources.lock().unwrap();
            rows.push(req.clone());
            next_id(rows.len())
        }

        async fn active_subscriber_phones(&self, area: Option<&str>) -> Result<Vec<String>, ServiceError> {
            self.check_available()?;
            let subs = self.subscribers.lock().unwrap();
            Ok(subs
                .iter()
                .filter(|s| s.is_active)
                .filter(|s| area.map_or(true, |a| s.area.as_deref() == Some(a)))
                .map(|s| s.phone.clone())
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockAlertRepository;
    use super::*;

    #[tokio::test]
    async fn mock_ids_count_up_per_table() {
        let repo = MockAlertRepository::default();
        let e = NewEmergency { phone: "9876543210".into(), category: "fire".into(), area: "Zone A".into(), message: String::new() };
        let r = NewResource { resource_type: "water".into(), quantity: 5, area: "Zone A".into(), phone: None };

        assert_eq!(repo.create_emergency(&e).await.unwrap(), 1);
        assert_eq!(repo.create_emergency(&e).await.unwrap(), 2);
        assert_eq!(repo.create_resource(&r).await.unwrap(), 1);
    }

    #[test]
    fn id_overflow_is_a_storage_error() {
        assert_eq!(mock::next_id(7).unwrap(), 7);
        assert!(matches!(mock::next_id(i32::MAX as usize + 1), Err(ServiceError::Storage(_))));
    }
}
