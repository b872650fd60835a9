use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::alerts::repository::mock::MockAlertRepository;
use service::notify::{mock::RecordingGateway, Notifier};
use tower::ServiceExt;

use server::routes;
use server::state::AppState;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

struct TestApp {
    router: Router,
    repo: Arc<MockAlertRepository>,
    gateway: Arc<RecordingGateway>,
}

fn build_app() -> TestApp {
    let repo = Arc::new(MockAlertRepository::default());
    let gateway = Arc::new(RecordingGateway::default());
    let state = AppState::new(repo.clone(), Notifier::new(gateway.clone(), "+91"), "/nonexistent-frontend");
    TestApp { router: routes::build_router(state, cors()), repo, gateway }
}

async fn post(app: &TestApp, path: &str, body: Body) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    let res = app.router.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), 64 * 1024).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn post_json(app: &TestApp, path: &str, body: Value) -> (StatusCode, Value) {
    post(app, path, Body::from(body.to_string())).await
}

#[tokio::test]
async fn health_ok() {
    let app = build_app();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn subscribe_new_then_reactivated() {
    let app = build_app();
    let (status, body) = post_json(&app, "/subscribe", json!({"phone": "9876543210", "area": "Zone A"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Successfully subscribed for disaster alerts!"}));

    let (status, body) = post_json(&app, "/subscribe", json!({"phone": "9876543210", "area": "Zone B"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Your subscription has been reactivated!");

    let subs = app.repo.subscribers();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].area.as_deref(), Some("Zone B"));
    assert!(subs[0].is_active);
}

#[tokio::test]
async fn subscribe_without_phone_is_400_and_writes_nothing() {
    let app = build_app();
    let (status, body) = post_json(&app, "/subscribe", json!({"area": "Zone A"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Phone number is required"}));
    assert!(app.repo.subscribers().is_empty());
    assert_eq!(app.gateway.attempts(), 0);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = build_app();
    let (status, body) = post(&app, "/subscribe", Body::from("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON body");
}

#[tokio::test]
async fn subscribe_reports_success_even_if_sms_fails() {
    let app = build_app();
    app.gateway.fail_all();
    let (status, body) = post_json(&app, "/subscribe", json!({"phone": "9876543210"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn storage_outage_is_500_without_detail() {
    let app = build_app();
    app.repo.set_unavailable(true);
    let (status, body) = post_json(&app, "/broadcast-alert", json!({"message": "Flood"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Database connection failed"}));
}

#[tokio::test]
async fn racing_duplicate_subscribe_is_500() {
    let app = build_app();
    app.repo.interleave_subscribe("9876543210", "Zone A");
    let (status, body) = post_json(&app, "/subscribe", json!({"phone": "9876543210", "area": "Zone B"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to subscribe"}));
    assert_eq!(app.repo.subscribers().len(), 1);
}

#[tokio::test]
async fn emergency_request_flow() {
    let app = build_app();
    let (status, body) = post_json(
        &app,
        "/emergency-request",
        json!({"phone": "9876543210", "category": "sos", "area": "Zone A", "message": "trapped on roof"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Emergency request submitted successfully");
    assert!(app.gateway.sent()[0].body.contains("🆘"));

    let (status, body) = post_json(&app, "/emergency-request", json!({"phone": "9876543210", "area": "Zone A"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(app.repo.emergencies().len(), 1);
}

#[tokio::test]
async fn resource_request_without_phone_sends_nothing() {
    let app = build_app();
    let (status, body) = post_json(&app, "/resource-request", json!({"resource": "water", "quantity": "5", "area": "Zone C"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Resource request submitted successfully");
    assert_eq!(app.gateway.attempts(), 0);
    assert_eq!(app.repo.resources()[0].quantity, 5);
}

#[tokio::test]
async fn resource_request_rejects_bad_quantity() {
    let app = build_app();
    let (status, body) = post_json(&app, "/resource-request", json!({"resource": "water", "quantity": -2, "area": "Zone C"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Quantity must be a positive integer");
    assert!(app.repo.resources().is_empty());
}

#[tokio::test]
async fn broadcast_to_zone_a_hits_only_active_member() {
    let app = build_app();
    app.repo.seed_subscriber("+911111111111", "Zone A", true);
    app.repo.seed_subscriber("+912222222222", "Zone B", true);
    app.repo.seed_subscriber("+913333333333", "Zone A", false);

    let (status, body) = post_json(&app, "/broadcast-alert", json!({"message": "Cyclone landfall at 18:00", "area": "Zone A"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Alert sent to 1 subscribers"}));
    let sent = app.gateway.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "+911111111111");
}

#[tokio::test]
async fn broadcast_count_excludes_failed_sends() {
    let app = build_app();
    app.repo.seed_subscriber("+911111111111", "Zone A", true);
    app.repo.seed_subscriber("+912222222222", "Zone A", true);
    app.gateway.fail_for("+911111111111");

    let (status, body) = post_json(&app, "/broadcast-alert", json!({"message": "Boil water"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Alert sent to 1 subscribers");
}

#[tokio::test]
async fn broadcast_without_message_is_400() {
    let app = build_app();
    let (status, body) = post_json(&app, "/broadcast-alert", json!({"area": "Zone A"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");
}
