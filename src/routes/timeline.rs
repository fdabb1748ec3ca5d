use actix_web::{web, HttpResponse};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::{
    booking::Booking,
    listing::Listing,
    timeline::{AccommodationUnit, BookingItem},
    user::User,
};
use crate::error::ApiError;
use crate::services::timeline_service::{TimelineService, MAX_TIMELINE_LANES};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineInput {
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub users: Vec<User>,
    pub listings: Vec<Listing>,
    /// Time zone of the browser rendering the calendar.
    pub viewer_time_zone: Option<Tz>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub groups: Vec<AccommodationUnit>,
    pub items: Vec<BookingItem>,
}

/*
    /api/timeline
*/
pub async fn build(
    state: web::Data<AppState>,
    input: web::Json<TimelineInput>,
) -> Result<HttpResponse, ApiError> {
    let lanes = TimelineService::lane_total(&input.listings);
    if lanes > MAX_TIMELINE_LANES {
        return Err(ApiError::BadRequest(format!(
            "Listings need {} timeline lanes, at most {} are supported",
            lanes, MAX_TIMELINE_LANES
        )));
    }

    let property_tz = state.config.booking.time_zone;
    let viewer_tz = input.viewer_time_zone.unwrap_or(property_tz);

    let groups = TimelineService::format_listings(&input.listings);
    let rows = TimelineService::bookings_with_user_and_listing(
        &input.bookings,
        &input.users,
        &input.listings,
        property_tz,
        viewer_tz,
    );
    let items = TimelineService::generate_booking_items(&rows, &groups);

    log::debug!(
        "Timeline built: {} lanes, {} items from {} bookings",
        groups.len(),
        items.len(),
        input.bookings.len()
    );

    Ok(HttpResponse::Ok().json(TimelineResponse { groups, items }))
}
