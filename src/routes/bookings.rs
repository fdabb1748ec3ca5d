use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::{booking::BookingRequest, user::User};
use crate::services::platform_client::{AvailabilityRequest, BookingUpdate};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityInput {
    /// Identifies the booking form session the check belongs to.
    pub channel: String,
    pub request: AvailabilityRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTotalsInput {
    pub channel: String,
    pub request: BookingRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInput {
    pub booking_id: String,
    pub update: BookingUpdate,
    pub actor: User,
}

/*
    /api/bookings/availability
*/
pub async fn availability(
    state: web::Data<AppState>,
    input: web::Json<AvailabilityInput>,
) -> Result<HttpResponse, ApiError> {
    let input = input.into_inner();
    if input.request.end <= input.request.start {
        return Err(ApiError::BadRequest(
            "Booking end must be after its start".to_string(),
        ));
    }

    match state
        .platform
        .check_availability(&input.channel, &input.request)
        .await?
    {
        Some(availability) => Ok(HttpResponse::Ok().json(availability)),
        None => Err(ApiError::Stale),
    }
}

/*
    /api/bookings/calculate-totals
*/
pub async fn calculate_totals(
    state: web::Data<AppState>,
    input: web::Json<CalculateTotalsInput>,
) -> Result<HttpResponse, ApiError> {
    let input = input.into_inner();

    match state
        .platform
        .calculate_totals(&input.channel, &input.request)
        .await?
    {
        Some(totals) => Ok(HttpResponse::Ok().json(totals)),
        None => Err(ApiError::Stale),
    }
}

/*
    /api/bookings/update
*/
pub async fn update(
    state: web::Data<AppState>,
    input: web::Json<UpdateInput>,
) -> Result<HttpResponse, ApiError> {
    let input = input.into_inner();

    // the stored status decides, not whatever the form last saw
    let booking = state.platform.get_booking(&input.booking_id).await?;
    if !booking.status.is_editable(input.actor.is_admin()) {
        log::info!(
            "Rejected edit of booking {} in status {:?} by {}",
            booking.id,
            booking.status,
            input.actor.id
        );
        return Err(ApiError::NotEditable(booking.id));
    }

    let updated = state
        .platform
        .update_booking(&booking.id, &input.update)
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}
