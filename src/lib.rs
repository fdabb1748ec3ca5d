use actix_web::web;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::AppConfig;
use services::platform_client::PlatformClient;

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub config: AppConfig,
    pub platform: PlatformClient,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/pricing")
                        .route("/totals", web::post().to(routes::pricing::totals))
                        .route(
                            "/display-total",
                            web::post().to(routes::pricing::display_total),
                        ),
                )
                .service(
                    web::scope("/payment")
                        .route("/type", web::post().to(routes::payment::payment_type))
                        .route(
                            "/booking-type",
                            web::post().to(routes::payment::booking_payment_type),
                        )
                        .route("/delta", web::post().to(routes::payment::payment_delta)),
                )
                .route("/timeline", web::post().to(routes::timeline::build))
                .service(
                    web::scope("/bookings")
                        .route(
                            "/availability",
                            web::post().to(routes::bookings::availability),
                        )
                        .route(
                            "/calculate-totals",
                            web::post().to(routes::bookings::calculate_totals),
                        )
                        .route("/update", web::post().to(routes::bookings::update)),
                ),
        );
}
