use axum::{extract::{rejection::JsonRejection, State}, Json};
use common::types::Ack;
use service::alerts::domain::{BroadcastInput, EmergencyInput, ResourceInput, SubscribeInput};
use tracing::debug;

use crate::errors::ApiError;
use crate::state::AppState;

type ApiResult = Result<Json<Ack>, ApiError>;

/// Malformed or non-JSON bodies are reported like any other validation failure.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(v)) => Ok(v),
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "rejected request body");
            Err(ApiError::bad_request("Invalid JSON body"))
        }
    }
}

/// Subscribe a phone number for alerts
pub async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<SubscribeInput>, JsonRejection>,
) -> ApiResult {
    let input = body(payload)?;
    let outcome = state
        .alerts
        .subscribe(input)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to subscribe"))?;
    Ok(Json(Ack::new(outcome.message())))
}

/// Register an emergency request
pub async fn emergency_request(
    State(state): State<AppState>,
    payload: Result<Json<EmergencyInput>, JsonRejection>,
) -> ApiResult {
    let input = body(payload)?;
    state
        .alerts
        .emergency_request(input)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to submit request"))?;
    Ok(Json(Ack::new("Emergency request submitted successfully")))
}

/// Register a resource request
pub async fn resource_request(
    State(state): State<AppState>,
    payload: Result<Json<ResourceInput>, JsonRejection>,
) -> ApiResult {
    let input = body(payload)?;
    state
        .alerts
        .resource_request(input)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to submit request"))?;
    Ok(Json(Ack::new("Resource request submitted successfully")))
}

/// Fan an alert out to active subscribers, optionally filtered by area
pub async fn broadcast_alert(
    State(state): State<AppState>,
    payload: Result<Json<BroadcastInput>, JsonRejection>,
) -> ApiResult {
    let input = body(payload)?;
    let report = state
        .alerts
        .broadcast(input)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to broadcast alert"))?;
    Ok(Json(Ack::new(report.message())))
}
