use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::price::Price;
use crate::services::payment_delta_service::PaymentDeltaService;
use crate::services::payment_type_service::PaymentTypeService;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTypeInput {
    #[serde(default)]
    pub use_credits: bool,
    pub duration: i64,
    pub currency: String,
    /// Falls back to the community's configured allowance.
    pub max_nights_to_pay_with_tokens: Option<u32>,
    pub max_nights_to_pay_with_credits: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPaymentTypeInput {
    #[serde(default)]
    pub use_credits: bool,
    #[serde(default)]
    pub use_tokens: bool,
    pub rental_fiat: Option<Price>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDeltaInput {
    pub total: f64,
    pub updated_total: f64,
    #[serde(default)]
    pub use_tokens: bool,
    #[serde(default)]
    pub use_credits: bool,
    pub rental_token: Price,
    pub updated_accommodation_total: f64,
    pub rental_fiat_cur: Option<String>,
}

/*
    /api/payment/type
*/
pub async fn payment_type(
    state: web::Data<AppState>,
    input: web::Json<PaymentTypeInput>,
) -> Result<HttpResponse, ApiError> {
    if input.duration <= 0 {
        return Err(ApiError::BadRequest(
            "Duration must be at least one night or hour".to_string(),
        ));
    }

    let booking = &state.config.booking;
    let payment_type = PaymentTypeService::payment_type(
        input.use_credits,
        input.duration,
        &input.currency,
        input
            .max_nights_to_pay_with_tokens
            .unwrap_or(booking.max_nights_to_pay_with_tokens),
        input
            .max_nights_to_pay_with_credits
            .unwrap_or(booking.max_nights_to_pay_with_credits),
        booking,
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({ "paymentType": payment_type })))
}

/*
    /api/payment/booking-type
*/
pub async fn booking_payment_type(input: web::Json<BookingPaymentTypeInput>) -> impl Responder {
    let payment_type = PaymentTypeService::booking_payment_type(
        input.use_credits,
        input.use_tokens,
        input.rental_fiat.as_ref(),
    );

    HttpResponse::Ok().json(serde_json::json!({ "paymentType": payment_type }))
}

/*
    /api/payment/delta (null when the edit moves no money)
*/
pub async fn payment_delta(
    state: web::Data<AppState>,
    input: web::Json<PaymentDeltaInput>,
) -> impl Responder {
    let input = input.into_inner();
    let rental_fiat_cur = input
        .rental_fiat_cur
        .unwrap_or_else(|| state.config.booking.fiat_currency.clone());

    let delta = PaymentDeltaService::payment_delta(
        input.total,
        input.updated_total,
        input.use_tokens,
        input.use_credits,
        &input.rental_token,
        input.updated_accommodation_total,
        &rental_fiat_cur,
    );

    HttpResponse::Ok().json(delta)
}
