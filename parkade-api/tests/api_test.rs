use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use futures_util::StreamExt;
use parkade_api::notifications::profile_notifications;
use parkade_api::{app, AppState};
use parkade_core::ProfileId;
use parkade_store::app_config::Config;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

async fn test_app() -> Router {
    let state = AppState::in_memory(&Config::default());
    state.services.catalog.ensure_seeded().await.unwrap();
    app(state)
}

async fn send(app: &Router, method: Method, uri: &str, profile: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(profile) = profile {
        builder = builder.header("x-profile-id", profile);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn booking(space_type: &str, hours: u32, space_id: &str) -> Value {
    json!({
        "type": space_type,
        "duration_hours": hours,
        "space_id": space_id,
        "payment_method": "card",
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_standard_three_hour_booking_flow() {
    let app = test_app().await;

    let (status, listings) = send(&app, Method::GET, "/v1/spaces?type=standard", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listings[0]["available_count"], 1);

    let (status, quote) = send(
        &app,
        Method::POST,
        "/v1/quotes",
        None,
        Some(json!({ "type": "standard", "duration_hours": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["total_cents"], 750);
    assert_eq!(quote["display"], "€7.50");

    let (status, confirmation) =
        send(&app, Method::POST, "/v1/bookings", None, Some(booking("standard", 3, "S1"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(confirmation["next_view"], "tickets");
    assert_eq!(confirmation["ticket"]["parkingSpot"], "S1");
    assert_eq!(confirmation["notification"]["title"], "Parking Space Booked");

    let (_, listings) = send(&app, Method::GET, "/v1/spaces?type=standard", None, None).await;
    assert_eq!(listings[0]["available_count"], 0);

    let (_, tickets) = send(&app, Method::GET, "/v1/tickets", None, None).await;
    let tickets = tickets.as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["cancellable"], true);
    assert_eq!(tickets[0]["cancellable_minutes_left"], 5);

    let (_, feed) = send(&app, Method::GET, "/v1/notifications", None, None).await;
    assert_eq!(feed["unread_count"], 1);
}

#[tokio::test]
async fn test_booking_taken_space_conflicts() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::POST, "/v1/bookings", None, Some(booking("standard", 1, "S2"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::POST, "/v1/bookings", Some("alice"), Some(booking("premium", 2, "P1"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, Method::POST, "/v1/bookings", Some("bob"), Some(booking("premium", 2, "P1"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_booking_validation_errors() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::POST, "/v1/bookings", None, Some(booking("standard", 25, "S1"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/v1/bookings", None, Some(booking("premium", 2, "S1"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/v1/bookings", None, Some(booking("standard", 2, "Z9"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_ticket_restores_space() {
    let app = test_app().await;

    let (_, confirmation) = send(&app, Method::POST, "/v1/bookings", None, Some(booking("premium", 4, "P2"))).await;
    let ticket_id = confirmation["ticket"]["id"].as_str().unwrap().to_string();

    let (status, outcome) = send(&app, Method::DELETE, &format!("/v1/tickets/{}", ticket_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["space_restored"], true);
    assert_eq!(outcome["notification"]["title"], "Ticket Cancelled");

    let (_, tickets) = send(&app, Method::GET, "/v1/tickets", None, None).await;
    assert!(tickets.as_array().unwrap().is_empty());

    let (_, listings) = send(&app, Method::GET, "/v1/spaces?type=premium", None, None).await;
    assert_eq!(listings[0]["available_count"], 2);

    let (status, _) = send(&app, Method::DELETE, &format!("/v1/tickets/{}", ticket_id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_membership_makes_bookings_free() {
    let app = test_app().await;

    let (status, change) = send(&app, Method::POST, "/v1/membership", Some("carol"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(change["status"]["is_premium_member"], true);
    assert!(change["status"]["valid_until"].is_string());

    let (status, _) = send(&app, Method::POST, "/v1/membership", Some("carol"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, quote) = send(
        &app,
        Method::POST,
        "/v1/quotes",
        Some("carol"),
        Some(json!({ "type": "premium", "duration_hours": 5 })),
    )
    .await;
    assert_eq!(quote["total_cents"], 0);
    assert_eq!(quote["display"], "Free");

    let (status, change) = send(&app, Method::DELETE, "/v1/membership", Some("carol"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(change["status"]["is_premium_member"], false);

    let (status, _) = send(&app, Method::DELETE, "/v1/membership", Some("carol"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_opening_notifications_marks_them_read() {
    let app = test_app().await;
    send(&app, Method::POST, "/v1/membership", None, None).await;

    let (status, feed) = send(&app, Method::POST, "/v1/notifications/open", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed["unread_count"], 1);

    let (_, feed) = send(&app, Method::GET, "/v1/notifications", None, None).await;
    assert_eq!(feed["unread_count"], 0);
    assert_eq!(feed["notifications"][0]["read"], true);
}

#[tokio::test]
async fn test_profiles_are_isolated() {
    let app = test_app().await;
    send(&app, Method::POST, "/v1/bookings", Some("dave"), Some(booking("standard", 2, "S1"))).await;

    let (_, snapshot) = send(&app, Method::GET, "/v1/profile", Some("dave"), None).await;
    assert_eq!(snapshot["id"], "dave");
    assert_eq!(snapshot["tickets"].as_array().unwrap().len(), 1);

    let (_, snapshot) = send(&app, Method::GET, "/v1/profile", None, None).await;
    assert_eq!(snapshot["id"], "default");
    assert!(snapshot["tickets"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_profile_header_rejected() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/v1/tickets", Some("not a valid id!"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_payment_methods_listed() {
    let app = test_app().await;
    let (status, methods) = send(&app, Method::GET, "/v1/payment-methods", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(methods.as_array().unwrap().len(), 4);
    assert_eq!(methods[0]["id"], "card");
}

#[tokio::test]
async fn test_malformed_booking_body_is_json_400() {
    let app = test_app().await;

    let bodies = [
        json!({ "type": "compact", "duration_hours": 2, "space_id": "S1", "payment_method": "card" }),
        json!({ "type": "standard", "duration_hours": -1, "space_id": "S1", "payment_method": "card" }),
        json!({ "type": "standard", "duration_hours": 2, "space_id": "S1", "payment_method": "bitcoin" }),
    ];
    for body in bodies {
        let (status, response) = send(&app, Method::POST, "/v1/bookings", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"].is_string());
    }

    let (_, tickets) = send(&app, Method::GET, "/v1/tickets", None, None).await;
    assert!(tickets.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_space_type_query_is_json_400() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/v1/spaces?type=compact", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_notification_stream_only_carries_own_profile() {
    let state = AppState::in_memory(&Config::default());
    state.services.catalog.ensure_seeded().await.unwrap();
    let app = app(state.clone());

    let bob = ProfileId::parse("bob").unwrap();
    let bob_stream = profile_notifications(state.sse_tx.subscribe(), bob);
    tokio::pin!(bob_stream);

    let (status, _) = send(&app, Method::POST, "/v1/bookings", Some("alice"), Some(booking("premium", 1, "P1"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/v1/membership", Some("bob"), None).await;
    assert_eq!(status, StatusCode::OK);

    // alice's booking was published first, so bob's first item proves it was skipped
    let first = tokio::time::timeout(Duration::from_secs(1), bob_stream.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.title, "Welcome to Premium!");
}
