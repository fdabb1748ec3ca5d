use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::{booking::BookingRequest, listing::Listing, user::User};
use crate::services::pricing_service::{DisplayTotalComponents, PricingService};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsInput {
    pub request: BookingRequest,
    pub listing: Option<Listing>,
    pub user: Option<User>,
}

/*
    /api/pricing/totals
*/
pub async fn totals(
    state: web::Data<AppState>,
    input: web::Json<TotalsInput>,
) -> Result<HttpResponse, ApiError> {
    let input = input.into_inner();
    validate_request(&input.request)?;

    if let (Some(listing_id), Some(listing)) = (&input.request.listing, &input.listing) {
        if *listing_id != listing.id {
            return Err(ApiError::BadRequest(format!(
                "Request is for listing {} but listing {} was supplied",
                listing_id, listing.id
            )));
        }
    }

    let is_team_member = input.user.as_ref().is_some_and(User::is_team_member);
    let totals = PricingService::booking_totals(
        &input.request,
        input.listing.as_ref(),
        &state.config.booking,
        is_team_member,
    );

    Ok(HttpResponse::Ok().json(totals))
}

/*
    /api/pricing/display-total
*/
pub async fn display_total(input: web::Json<DisplayTotalComponents>) -> HttpResponse {
    HttpResponse::Ok().json(PricingService::display_total_from_components(&input))
}

fn validate_request(request: &BookingRequest) -> Result<(), ApiError> {
    if request.end <= request.start {
        return Err(ApiError::BadRequest(
            "Booking end must be after its start".to_string(),
        ));
    }
    if request.adults == 0 {
        return Err(ApiError::BadRequest(
            "A booking needs at least one adult".to_string(),
        ));
    }
    Ok(())
}
