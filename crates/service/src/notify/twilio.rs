//! Twilio Programmable Messaging client.
use std::time::Duration;

use async_trait::async_trait;
use configs::SmsConfig;
use serde::Deserialize;
use tracing::instrument;

use super::{NotificationError, SmsGateway, SmsReceipt};

pub struct TwilioGateway {
    client: reqwest::Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

#[derive(Deserialize)]
struct MessageResource {
    sid: String,
}

impl TwilioGateway {
    /// Build a client from config; fails with `NotConfigured` when any credential is missing.
    pub fn from_config(cfg: &SmsConfig) -> Result<Self, NotificationError> {
        let (Some(account_sid), Some(auth_token), Some(from_number)) =
            (cfg.account_sid.clone(), cfg.auth_token.clone(), cfg.from_number.clone())
        else {
            return Err(NotificationError::NotConfigured);
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            account_sid,
            auth_token,
            from_number,
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/2010-04-01/Accounts/{}/Messages.json", self.api_base, self.account_sid)
    }
}

#[async_trait]
impl SmsGateway for TwilioGateway {
    #[instrument(skip(self, body))]
    async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, NotificationError> {
        let resp = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", self.from_number.as_str()), ("Body", body)])
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected { status: status.as_u16(), body });
        }
        let msg = resp
            .json::<MessageResource>()
            .await
            .map_err(|e| NotificationError::Transport(format!("invalid gateway response: {e}")))?;
        Ok(SmsReceipt { sid: msg.sid })
    }
}
