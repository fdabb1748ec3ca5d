use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::services::platform_client::PlatformError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Booking {0} can no longer be edited")]
    NotEditable(String),
    #[error("A newer request superseded this one")]
    Stale,
    #[error("Platform API failure: {0}")]
    Upstream(#[from] PlatformError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotEditable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Stale => StatusCode::CONFLICT,
            ApiError::Upstream(PlatformError::InvalidBookingId(_)) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Upstream(err) = self {
            log::error!("Upstream error: {}", err);
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
