use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

/// Area stored when a subscriber does not name one.
pub const DEFAULT_AREA: &str = "Not specified";

/// `POST /subscribe` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeInput {
    pub phone: Option<String>,
    pub area: Option<String>,
}

/// `POST /emergency-request` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmergencyInput {
    pub phone: Option<String>,
    pub category: Option<String>,
    pub area: Option<String>,
    pub message: Option<String>,
}

/// `POST /resource-request` body. `quantity` may arrive as a number or a numeric string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceInput {
    pub resource: Option<String>,
    pub quantity: Option<Value>,
    pub area: Option<String>,
    pub phone: Option<String>,
}

/// `POST /broadcast-alert` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BroadcastInput {
    pub message: Option<String>,
    pub area: Option<String>,
}

/// Validated emergency row ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmergency {
    pub phone: String,
    pub category: String,
    pub area: String,
    pub message: String,
}

/// Validated resource row ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    pub resource_type: String,
    pub quantity: i32,
    pub area: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Created,
    Reactivated,
}

impl SubscribeOutcome {
    pub fn message(self) -> &'static str {
        match self {
            SubscribeOutcome::Created => "Successfully subscribed for disaster alerts!",
            SubscribeOutcome::Reactivated => "Your subscription has been reactivated!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmergencyCategory {
    Sos,
    Medical,
    Shelter,
    Food,
    Other,
}

impl EmergencyCategory {
    /// Exact, case-sensitive lookup; anything unrecognized is `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "sos" => EmergencyCategory::Sos,
            "medical" => EmergencyCategory::Medical,
            "shelter" => EmergencyCategory::Shelter,
            "food" => EmergencyCategory::Food,
            _ => EmergencyCategory::Other,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            EmergencyCategory::Sos => "🆘",
            EmergencyCategory::Medical => "🏥",
            EmergencyCategory::Shelter => "🏠",
            EmergencyCategory::Food => "🍲",
            EmergencyCategory::Other => "⚠️",
        }
    }
}

/// Outcome of one broadcast fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    pub recipients: usize,
    pub delivered: usize,
}

impl BroadcastReport {
    pub fn message(&self) -> String {
        format!("Alert sent to {} subscribers", self.delivered)
    }
}

/// A subscriber as seen by the service layer
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriberRecord {
    pub phone: String,
    pub area: Option<String>,
    pub is_active: bool,
}

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Accept a positive integer given as a JSON number or numeric string.
pub(crate) fn parse_quantity(value: &Value) -> Result<i32, ServiceError> {
    let invalid = || ServiceError::validation("Quantity must be a positive integer");
    let n = match value {
        Value::Number(n) => n.as_i64().ok_or_else(invalid)?,
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    if n <= 0 {
        return Err(invalid());
    }
    i32::try_from(n).map_err(|_| invalid())
}
