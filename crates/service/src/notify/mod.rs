//! Outbound text-message dispatch.
//!
//! `SmsGateway` is the seam to the external provider; `Notifier` wraps a
//! gateway and turns every outcome into a logged boolean so that delivery
//! problems never reach the caller's primary operation.

pub mod phone;
pub mod twilio;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

pub use phone::normalize_phone;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("sms gateway not configured")]
    NotConfigured,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rejected by gateway (status {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Provider acknowledgement for an accepted message.
#[derive(Debug, Clone, PartialEq)]
pub struct SmsReceipt {
    pub sid: String,
}

#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// `to` is already normalized to international format.
    async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, NotificationError>;
}

/// Gateway used when no provider credentials are configured.
pub struct DisabledGateway;

#[async_trait]
impl SmsGateway for DisabledGateway {
    async fn send(&self, _to: &str, _body: &str) -> Result<SmsReceipt, NotificationError> {
        Err(NotificationError::NotConfigured)
    }
}

#[derive(Clone)]
pub struct Notifier {
    gateway: Arc<dyn SmsGateway>,
    country_code: String,
}

impl Notifier {
    pub fn new(gateway: Arc<dyn SmsGateway>, country_code: impl Into<String>) -> Self {
        Self { gateway, country_code: country_code.into() }
    }

    /// Normalize `phone` and deliver `body`. Returns whether the gateway accepted it.
    pub async fn notify(&self, phone: &str, body: &str) -> bool {
        let to = normalize_phone(phone, &self.country_code);
        match self.gateway.send(&to, body).await {
            Ok(receipt) => {
                debug!(to = %to, sid = %receipt.sid, "sms sent");
                true
            }
            Err(e) => {
                warn!(to = %to, error = %e, "sms delivery failed");
                false
            }
        }
    }
}

/// Recording gateway for tests and local runs.
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub struct SentMessage {
        pub to: String,
        pub body: String,
    }

    #[derive(Default)]
    pub struct RecordingGateway {
        sent: Mutex<Vec<SentMessage>>,
        attempts: Mutex<usize>,
        failing: Mutex<HashSet<String>>,
        fail_all: Mutex<bool>,
    }

    impl RecordingGateway {
        /// Every send to `to` (normalized form) fails with a transport error.
        pub fn fail_for(&self, to: &str) {
            self.failing.lock().unwrap().insert(to.to_string());
        }

        pub fn fail_all(&self) {
            *self.fail_all.lock().unwrap() = true;
        }

        /// Messages the gateway accepted, in order.
        pub fn sent(&self) -> Vec<SentMessage> {
            self.sent.lock().unwrap().clone()
        }

        /// Every call to `send`, successful or not.
        pub fn attempts(&self) -> usize {
            *self.attempts.lock().unwrap()
        }
    }

    #[async_trait]
    impl SmsGateway for RecordingGateway {
        async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, NotificationError> {
            let n = {
                let mut attempts = self.attempts.lock().unwrap();
                *attempts += 1;
                *attempts
            };
            if *self.fail_all.lock().unwrap() || self.failing.lock().unwrap().contains(to) {
                return Err(NotificationError::Transport(format!("simulated failure for {to}")));
            }
            self.sent.lock().unwrap().push(SentMessage { to: to.to_string(), body: body.to_string() });
            Ok(SmsReceipt { sid: format!("SM{n:032}") })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::RecordingGateway;
    use super::*;

    #[tokio::test]
    async fn notify_normalizes_before_sending() {
        let gw = Arc::new(RecordingGateway::default());
        let notifier = Notifier::new(gw.clone(), "+91");
        assert!(notifier.notify("09876543210", "hello").await);
        let sent = gw.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "+919876543210");
        assert_eq!(sent[0].body, "hello");
    }

    #[tokio::test]
    async fn notify_swallows_gateway_errors() {
        let gw = Arc::new(RecordingGateway::default());
        gw.fail_all();
        let notifier = Notifier::new(gw.clone(), "+91");
        assert!(!notifier.notify("+14155550100", "hello").await);
        assert_eq!(gw.attempts(), 1);
        assert!(gw.sent().is_empty());
    }

    #[tokio::test]
    async fn disabled_gateway_reports_not_configured() {
        let err = DisabledGateway.send("+14155550100", "x").await.unwrap_err();
        assert!(matches!(err, NotificationError::NotConfigured));
        let notifier = Notifier::new(Arc::new(DisabledGateway), "+91");
        assert!(!notifier.notify("9876543210", "x").await);
    }
}
