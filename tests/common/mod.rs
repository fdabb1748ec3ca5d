#![allow(dead_code)]

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use coliving_booking_api::{
    config::AppConfig, models::booking_config::BookingConfig,
    services::platform_client::PlatformClient, AppState,
};

/// Guests count that makes the stub platform answer slowly.
pub const SLOW_ADULTS: u64 = 99;

pub fn test_booking_config() -> BookingConfig {
    BookingConfig {
        utility_fiat_val: 5.0,
        food_option_price: 12.0,
        is_utility_option_enabled: true,
        is_food_option_enabled: true,
        weekly_rental_discount: 10.0,
        monthly_rental_discount: 25.0,
        max_nights_to_pay_with_tokens: 14,
        max_nights_to_pay_with_credits: 3,
        ..BookingConfig::default()
    }
}

pub fn test_state(platform_api_url: Url) -> web::Data<AppState> {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        platform_api_url: platform_api_url.clone(),
        platform_timeout: Duration::from_secs(2),
        booking: test_booking_config(),
    };
    let platform = PlatformClient::new(platform_api_url, config.platform_timeout)
        .expect("failed to build platform client");

    web::Data::new(AppState { config, platform })
}

/// State whose platform API is never reached.
pub fn offline_state() -> web::Data<AppState> {
    test_state(Url::parse("http://127.0.0.1:9/").unwrap())
}

pub fn sample_listing(private: bool) -> Value {
    json!({
        "_id": "listing-1",
        "name": "Cabin",
        "fiatPrice": { "val": 30.0, "cur": "EUR" },
        "tokenPrice": { "val": 1.0, "cur": "TDF" },
        "beds": 4,
        "private": private,
        "quantity": 1,
        "priceDuration": "night"
    })
}

pub fn sample_booking(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "start": "2024-07-01T14:00:00Z",
        "end": "2024-07-04T11:00:00Z",
        "adults": 2,
        "listing": "listing-1",
        "createdBy": "user-1",
        "rentalFiat": { "val": 180.0, "cur": "EUR" },
        "status": status,
    })
}

pub fn sample_user(roles: &[&str]) -> Value {
    json!({
        "_id": "user-1",
        "screenname": "alex",
        "roles": roles,
    })
}

/// Start a fake platform API on a random local port.
pub async fn start_stub_platform() -> Url {
    let server = HttpServer::new(|| {
        App::new()
            .route("/", web::get().to(|| async { "OK" }))
            .route(
                "/bookings/listing/availability",
                web::post().to(stub_availability),
            )
            .route(
                "/bookings/calculate-totals",
                web::post().to(stub_calculate_totals),
            )
            .route("/bookings/update/{id}", web::patch().to(stub_update))
            .route("/bookings/{id}", web::get().to(stub_get_booking))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("failed to bind stub platform");

    let port = server.addrs()[0].port();
    actix_rt::spawn(server.run());

    Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap()
}

async fn stub_availability(body: web::Json<Value>) -> impl Responder {
    let adults = body["adults"].as_u64().unwrap_or(0);
    if adults == SLOW_ADULTS {
        sleep(Duration::from_millis(400)).await;
        return HttpResponse::Ok().json(json!({ "isAvailable": false, "reason": "slow" }));
    }
    if adults > 10 {
        return HttpResponse::Ok().json(json!({ "isAvailable": false, "reason": "Not enough beds" }));
    }
    HttpResponse::Ok().json(json!({ "isAvailable": true }))
}

async fn stub_calculate_totals() -> impl Responder {
    HttpResponse::InternalServerError().body("pricing engine down")
}

/// Stored status of the bookings the stub platform knows about.
fn stub_status(id: &str) -> Option<&'static str> {
    match id {
        "booking-paid" => Some("paid"),
        "booking-cancelled" => Some("cancelled"),
        "booking-checked-out" => Some("checked-out"),
        _ => None,
    }
}

async fn stub_get_booking(path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match stub_status(&id) {
        Some(status) => HttpResponse::Ok().json(sample_booking(&id, status)),
        None => HttpResponse::NotFound().body("booking not found"),
    }
}

async fn stub_update(path: web::Path<String>, body: web::Json<Value>) -> impl Responder {
    let id = path.into_inner();
    let mut booking = sample_booking(&id, stub_status(&id).unwrap_or("confirmed"));
    if let Some(adults) = body.get("adults") {
        booking["adults"] = adults.clone();
    }
    HttpResponse::Ok().json(booking)
}
