use std::sync::Arc;

use configs::AppConfig;
use sea_orm::DatabaseConnection;
use service::alerts::{repo::seaorm::SeaOrmAlertRepository, repository::AlertRepository, AlertService};
use service::notify::{twilio::TwilioGateway, DisabledGateway, Notifier, SmsGateway};
use tracing::{info, warn};

/// Shared handler state. Everything inside is immutable and cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub alerts: AlertService,
    pub frontend_dir: String,
}

impl AppState {
    pub fn new(repo: Arc<dyn AlertRepository>, notifier: Notifier, frontend_dir: impl Into<String>) -> Self {
        Self { alerts: AlertService::new(repo, notifier), frontend_dir: frontend_dir.into() }
    }

    /// Wire the production collaborators: SeaORM storage and the configured SMS gateway.
    pub fn from_config(cfg: &AppConfig, db: DatabaseConnection) -> Self {
        let repo: Arc<dyn AlertRepository> = Arc::new(SeaOrmAlertRepository::new(db));
        Self::new(repo, build_notifier(cfg), cfg.frontend_dir.clone())
    }
}

fn build_notifier(cfg: &AppConfig) -> Notifier {
    let gateway: Arc<dyn SmsGateway> = match TwilioGateway::from_config(&cfg.sms) {
        Ok(gw) => {
            info!(api_base = %cfg.sms.api_base, "sms gateway configured");
            Arc::new(gw)
        }
        Err(e) => {
            warn!(error = %e, "sms delivery disabled; confirmations and broadcasts will not be sent");
            Arc::new(DisabledGateway)
        }
    };
    Notifier::new(gateway, cfg.sms.country_code.clone())
}
