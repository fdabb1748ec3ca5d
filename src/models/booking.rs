use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::price::Price;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Open,
    Pending,
    Confirmed,
    Paid,
    TokensStaked,
    CreditsPaid,
    CheckedIn,
    CheckedOut,
    Cancelled,
    Rejected,
    PendingRefund,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BookingStatus::CheckedOut | BookingStatus::Cancelled | BookingStatus::Rejected
        )
    }

    /// Terminal bookings are frozen unless an admin overrides.
    pub fn is_editable(self, is_admin: bool) -> bool {
        is_admin || !self.is_terminal()
    }

    /// Whether the stay still occupies a bed on the timeline.
    pub fn occupies_calendar(self) -> bool {
        !matches!(
            self,
            BookingStatus::Cancelled | BookingStatus::Rejected | BookingStatus::PendingRefund
        )
    }
}

/// A reservation as returned by the platform API.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    #[serde(default)]
    pub pets: u32,
    pub listing: Option<String>,
    pub created_by: Option<String>,
    #[serde(default)]
    pub use_tokens: bool,
    #[serde(default)]
    pub use_credits: bool,
    pub rental_fiat: Option<Price>,
    pub rental_token: Option<Price>,
    pub utility_fiat: Option<Price>,
    pub food_fiat: Option<Price>,
    pub event_fiat: Option<Price>,
    pub status: BookingStatus,
    #[serde(default)]
    pub room_or_bed_numbers: Vec<u32>,
    pub volunteer_id: Option<String>,
    #[serde(default)]
    pub is_team_booking: bool,
}

/// Booking parameters sent when a guest requests or edits a stay.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    #[serde(default)]
    pub pets: u32,
    pub listing: Option<String>,
    #[serde(default)]
    pub use_tokens: bool,
    #[serde(default)]
    pub use_credits: bool,
    pub volunteer_id: Option<String>,
    #[serde(default)]
    pub is_team_booking: bool,
    #[serde(default)]
    pub event_total: f64,
}
