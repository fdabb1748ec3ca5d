mod common;

use actix_web::{test, App};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use coliving_booking_api::configure;
use coliving_booking_api::services::platform_client::{
    AvailabilityRequest, AvailabilityResponse, PlatformClient,
};
use common::{sample_user, start_stub_platform, test_state, SLOW_ADULTS};

fn availability_request(adults: u32) -> AvailabilityRequest {
    serde_json::from_value(json!({
        "listing": "listing-1",
        "start": "2024-07-01T14:00:00Z",
        "end": "2024-07-04T11:00:00Z",
        "adults": adults,
    }))
    .unwrap()
}

#[actix_rt::test]
async fn test_availability_is_proxied() {
    let url = start_stub_platform().await;
    let app = test::init_service(App::new().app_data(test_state(url)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings/availability")
        .set_json(json!({
            "channel": "session-1",
            "request": availability_request(2),
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["isAvailable"], true);
}

#[actix_rt::test]
async fn test_stale_availability_response_is_discarded() {
    let url = start_stub_platform().await;
    let client = Arc::new(PlatformClient::new(url, Duration::from_secs(2)).unwrap());

    let slow_client = client.clone();
    let slow = actix_rt::spawn(async move {
        let request = availability_request(SLOW_ADULTS as u32);
        slow_client.check_availability("session-1", &request).await
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let fast = client
        .check_availability("session-1", &availability_request(2))
        .await
        .unwrap();
    assert_eq!(
        fast,
        Some(AvailabilityResponse {
            is_available: true,
            reason: None,
        })
    );

    let slow = slow.await.unwrap().unwrap();
    assert_eq!(slow, None);
}

#[actix_rt::test]
async fn test_other_channels_are_not_discarded() {
    let url = start_stub_platform().await;
    let client = PlatformClient::new(url, Duration::from_secs(2)).unwrap();

    let crowded = availability_request(12);
    let single = availability_request(1);
    let (a, b) = tokio::join!(
        client.check_availability("session-a", &crowded),
        client.check_availability("session-b", &single),
    );

    assert_eq!(
        a.unwrap().unwrap().reason.as_deref(),
        Some("Not enough beds")
    );
    assert!(b.unwrap().unwrap().is_available);
}

#[actix_rt::test]
async fn test_upstream_failure_maps_to_bad_gateway() {
    let url = start_stub_platform().await;
    let app = test::init_service(App::new().app_data(test_state(url)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings/calculate-totals")
        .set_json(json!({
            "channel": "session-1",
            "request": {
                "start": "2024-07-01T14:00:00Z",
                "end": "2024-07-04T11:00:00Z",
                "adults": 2
            }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 502);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("pricing engine down"));
}

#[actix_rt::test]
async fn test_update_forwards_editable_booking() {
    let url = start_stub_platform().await;
    let app = test::init_service(App::new().app_data(test_state(url)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings/update")
        .set_json(json!({
            "bookingId": "booking-paid",
            "update": { "adults": 3 },
            "actor": sample_user(&[]),
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["_id"], "booking-paid");
    assert_eq!(body["adults"], 3);
}

#[actix_rt::test]
async fn test_update_rejects_cancelled_booking() {
    let url = start_stub_platform().await;
    let app = test::init_service(App::new().app_data(test_state(url)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings/update")
        .set_json(json!({
            "bookingId": "booking-cancelled",
            "update": { "adults": 3 },
            "actor": sample_user(&[]),
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
}

#[actix_rt::test]
async fn test_admin_may_edit_checked_out_booking() {
    let url = start_stub_platform().await;
    let app = test::init_service(App::new().app_data(test_state(url)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings/update")
        .set_json(json!({
            "bookingId": "booking-checked-out",
            "update": { "adults": 1 },
            "actor": sample_user(&["admin"]),
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_rt::test]
async fn test_update_uses_stored_status() {
    let url = start_stub_platform().await;
    let app = test::init_service(App::new().app_data(test_state(url)).configure(configure)).await;

    // a stale form still showing "paid" must not unlock a cancelled booking
    let req = test::TestRequest::post()
        .uri("/api/bookings/update")
        .set_json(json!({
            "bookingId": "booking-cancelled",
            "booking": { "status": "paid" },
            "update": { "adults": 3 },
            "actor": sample_user(&[]),
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
}

#[actix_rt::test]
async fn test_update_of_unknown_booking_is_bad_gateway() {
    let url = start_stub_platform().await;
    let app = test::init_service(App::new().app_data(test_state(url)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings/update")
        .set_json(json!({
            "bookingId": "booking-missing",
            "update": { "adults": 3 },
            "actor": sample_user(&[]),
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 502);
}

#[actix_rt::test]
async fn test_update_rejects_id_with_path_characters() {
    let url = start_stub_platform().await;
    let app = test::init_service(App::new().app_data(test_state(url)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings/update")
        .set_json(json!({
            "bookingId": "..",
            "update": { "adults": 3 },
            "actor": sample_user(&["admin"]),
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
