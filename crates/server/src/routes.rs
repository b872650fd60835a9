use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod alerts;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: landing page, health and alert endpoints
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let frontend = state.frontend_dir.trim_end_matches('/').to_string();
    let index = ServeFile::new(format!("{frontend}/index.html"));

    // Public pages (landing + static assets + health)
    let public = Router::new()
        .route_service("/", index)
        .route("/health", get(health))
        .fallback_service(ServeDir::new(frontend));

    let alert_routes = Router::new()
        .route("/subscribe", post(alerts::subscribe))
        .route("/emergency-request", post(alerts::emergency_request))
        .route("/resource-request", post(alerts::resource_request))
        .route("/broadcast-alert", post(alerts::broadcast_alert))
        .with_state(state);

    // Compose
    public
        .merge(alert_routes)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // One span per request carrying method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // Status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx are recorded at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
