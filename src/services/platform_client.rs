//! Client for the community platform's REST API.
//!
//! Availability and price checks are re-sent every time a guest changes a
//! booking form. They go through a [`RequestSequencer`] so that only the
//! response to the latest request on a channel is ever returned; older
//! responses resolve to `Ok(None)`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::models::booking::{Booking, BookingRequest};
use crate::services::pricing_service::BookingTotals;
use crate::services::request_sequencer::RequestSequencer;

const AVAILABILITY_PATH: &str = "bookings/listing/availability";
const CALCULATE_TOTALS_PATH: &str = "bookings/calculate-totals";
const UPDATE_PATH: &str = "bookings/update/";
const BOOKING_PATH: &str = "bookings/";

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Platform API returned {status}: {body}")]
    ApiError { status: StatusCode, body: String },
    #[error("Invalid booking id: {0:?}")]
    InvalidBookingId(String),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub listing: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    #[serde(default)]
    pub pets: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub is_available: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adults: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_or_bed_numbers: Option<Vec<u32>>,
}

pub struct PlatformClient {
    base_url: Url,
    client: reqwest::Client,
    sequencer: RequestSequencer,
}

impl PlatformClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, PlatformError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: with_trailing_slash(base_url),
            client,
            sequencer: RequestSequencer::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn check_availability(
        &self,
        channel: &str,
        request: &AvailabilityRequest,
    ) -> Result<Option<AvailabilityResponse>, PlatformError> {
        self.sequenced_post(channel, AVAILABILITY_PATH, request).await
    }

    pub async fn calculate_totals(
        &self,
        channel: &str,
        request: &BookingRequest,
    ) -> Result<Option<BookingTotals>, PlatformError> {
        self.sequenced_post(channel, CALCULATE_TOTALS_PATH, request).await
    }

    /// Current state of a booking as the platform stores it.
    pub async fn get_booking(&self, booking_id: &str) -> Result<Booking, PlatformError> {
        let url = self.booking_url(BOOKING_PATH, booking_id)?;
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    pub async fn update_booking(
        &self,
        booking_id: &str,
        update: &BookingUpdate,
    ) -> Result<Booking, PlatformError> {
        let url = self.booking_url(UPDATE_PATH, booking_id)?;
        log::info!("Updating booking {}", booking_id);

        let response = self.client.patch(url).json(update).send().await?;
        read_json(response).await
    }

    /// `{base}{path}{booking_id}` with the id escaped as a single path segment.
    fn booking_url(&self, path: &str, booking_id: &str) -> Result<Url, PlatformError> {
        if booking_id.is_empty() || booking_id == "." || booking_id == ".." {
            return Err(PlatformError::InvalidBookingId(booking_id.to_string()));
        }

        let mut url = self.base_url.join(path)?;
        url.path_segments_mut()
            .map_err(|_| PlatformError::InvalidBookingId(booking_id.to_string()))?
            .pop_if_empty()
            .push(booking_id);
        Ok(url)
    }

    /// Reachability check used by the health endpoint.
    pub async fn ping(&self) -> Result<(), PlatformError> {
        let response = self.client.get(self.base_url.clone()).send().await?;
        if response.status().is_server_error() {
            return Err(PlatformError::ApiError {
                status: response.status(),
                body: String::new(),
            });
        }
        Ok(())
    }

    async fn sequenced_post<B, T>(
        &self,
        channel: &str,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, PlatformError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        let ticket = self.sequencer.issue(channel);
        log::debug!("POST {} (channel {}, seq {})", url, channel, ticket.seq());

        let result = match self.client.post(url).json(body).send().await {
            Ok(response) => read_json(response).await,
            Err(err) => Err(err.into()),
        };

        // settle only once the body is read, a newer request may have gone
        // out while it was streaming
        if !self.sequencer.settle(&ticket) {
            log::info!(
                "Discarding stale response for channel {} (seq {})",
                channel,
                ticket.seq()
            );
            return Ok(None);
        }

        result.map(Some)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, PlatformError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::warn!("Platform API error {}: {}", status, body);
        return Err(PlatformError::ApiError { status, body });
    }
    Ok(response.json::<T>().await?)
}
