use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let platform_result = check_platform_api(&state).await;
    health
        .services
        .insert("platform_api".to_string(), platform_result.clone());

    let config_result = check_booking_config(&state);
    health
        .services
        .insert("booking_config".to_string(), config_result.clone());

    if platform_result.status != "ok" || config_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_platform_api(state: &AppState) -> ServiceStatus {
    match state.platform.ping().await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Reached {}", state.platform.base_url())),
        },
        Err(e) => {
            log::warn!("Platform API health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to reach platform API: {}", e)),
            }
        }
    }
}

fn check_booking_config(state: &AppState) -> ServiceStatus {
    let booking = &state.config.booking;
    if booking.fiat_currency == booking.token_currency {
        return ServiceStatus {
            status: "error".to_string(),
            details: Some("Fiat and token currency must differ".to_string()),
        };
    }

    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!(
            "{} / {} in {}",
            booking.fiat_currency, booking.token_currency, booking.time_zone
        )),
    }
}
