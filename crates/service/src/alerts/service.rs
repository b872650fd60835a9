use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::domain::{
    parse_quantity, present, BroadcastInput, BroadcastReport, EmergencyCategory, EmergencyInput,
    NewEmergency, NewResource, ResourceInput, SubscribeInput, SubscribeOutcome, DEFAULT_AREA,
};
use super::repository::AlertRepository;
use crate::errors::ServiceError;
use crate::notify::Notifier;

const MISSING_FIELDS: &str = "Missing required fields";

/// Alert workflows independent of the web framework.
///
/// Every operation validates first, then runs one storage unit of work, then
/// sends its confirmation. Notification failures are logged by the notifier
/// and never turn a committed operation into an error.
#[derive(Clone)]
pub struct AlertService {
    repo: Arc<dyn AlertRepository>,
    notifier: Notifier,
}

impl AlertService {
    pub fn new(repo: Arc<dyn AlertRepository>, notifier: Notifier) -> Self { Self { repo, notifier } }

    /// Register or reactivate a phone number for area alerts.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::alerts::{AlertService, domain::{SubscribeInput, SubscribeOutcome}, repository::mock::MockAlertRepository};
    /// use service::notify::{Notifier, mock::RecordingGateway};
    /// let svc = AlertService::new(Arc::new(MockAlertRepository::default()), Notifier::new(Arc::new(RecordingGateway::default()), "+91"));
    /// let input = SubscribeInput { phone: Some("9876543210".into()), area: None };
    /// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    /// assert_eq!(rt.block_on(svc.subscribe(input)).unwrap(), SubscribeOutcome::Created);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn subscribe(&self, input: SubscribeInput) -> Result<SubscribeOutcome, ServiceError> {
        let phone = present(input.phone).ok_or_else(|| ServiceError::validation("Phone number is required"))?;
        let area = present(input.area).unwrap_or_else(|| DEFAULT_AREA.to_string());

        let outcome = self.repo.subscribe(&phone, &area).await?;
        info!(phone = %phone, area = %area, ?outcome, "subscriber_saved");

        let sms = format!("SDRRAS Alert: {} You will receive updates for {} area.", outcome.message(), area);
        self.notifier.notify(&phone, &sms).await;
        Ok(outcome)
    }

    /// Record an emergency request and confirm it to the requester.
    #[instrument(skip(self, input))]
    pub async fn emergency_request(&self, input: EmergencyInput) -> Result<i32, ServiceError> {
        let (Some(phone), Some(category), Some(area)) =
            (present(input.phone), present(input.category), present(input.area))
        else {
            return Err(ServiceError::validation(MISSING_FIELDS));
        };
        let req = NewEmergency { phone, category, area, message: input.message.unwrap_or_default() };

        let id = self.repo.create_emergency(&req).await?;
        info!(id, category = %req.category, area = %req.area, "emergency_request_saved");

        let symbol = EmergencyCategory::parse(&req.category).symbol();
        let sms = format!(
            "SDRRAS Emergency: {} Your {} request for {} has been registered. Help is on the way!",
            symbol,
            req.category.to_uppercase(),
            req.area
        );
        self.notifier.notify(&req.phone, &sms).await;
        Ok(id)
    }

    /// Record a resource request; confirm only when a contact phone was given.
    #[instrument(skip(self, input))]
    pub async fn resource_request(&self, input: ResourceInput) -> Result<i32, ServiceError> {
        let (Some(resource_type), Some(quantity), Some(area)) =
            (present(input.resource), input.quantity.filter(|q| !q.is_null()), present(input.area))
        else {
            return Err(ServiceError::validation(MISSING_FIELDS));
        };
        let quantity = parse_quantity(&quantity)?;
        let req = NewResource { resource_type, quantity, area, phone: present(input.phone) };

        let id = self.repo.create_resource(&req).await?;
        info!(id, resource = %req.resource_type, quantity, area = %req.area, "resource_request_saved");

        if let Some(phone) = &req.phone {
            let sms = format!(
                "SDRRAS: Your request for {}x {} in {} has been submitted. We'll process it soon!",
                req.quantity, req.resource_type, req.area
            );
            self.notifier.notify(phone, &sms).await;
        }
        Ok(id)
    }

    /// Send `message` to every active subscriber, optionally only those in one area.
    ///
    /// Sends are sequential; a failed send is skipped and not counted.
    #[instrument(skip(self, input))]
    pub async fn broadcast(&self, input: BroadcastInput) -> Result<BroadcastReport, ServiceError> {
        let message = present(input.message).ok_or_else(|| ServiceError::validation("Message is required"))?;
        let area = present(input.area);

        let phones = self.repo.active_subscriber_phones(area.as_deref()).await?;
        let sms = format!("SDRRAS ALERT: {}", message);
        let mut delivered = 0;
        for phone in &phones {
            if self.notifier.notify(phone, &sms).await {
                delivered += 1;
            }
        }

        let report = BroadcastReport { recipients: phones.len(), delivered };
        if report.delivered < report.recipients {
            warn!(area = ?area, recipients = report.recipients, delivered = report.delivered, "broadcast partially delivered");
        } else {
            info!(area = ?area, recipients = report.recipients, "broadcast delivered");
        }
        Ok(report)
    }
}
