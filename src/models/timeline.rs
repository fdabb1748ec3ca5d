use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::booking::BookingStatus;

/// One lane of the timeline: a private room or a single bed in a shared one.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationUnit {
    pub id: u32,
    pub listing_id: String,
    /// Lane id of the listing's first unit.
    pub base_id: u32,
    pub title: String,
}

/// A booking flattened together with its guest and listing.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingRow {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub adults: u32,
    pub listing_id: String,
    pub listing_name: String,
    pub private: bool,
    pub user_id: Option<String>,
    pub user_name: String,
    pub room_or_bed_numbers: Vec<u32>,
}

/// A bar placed on a lane of the timeline.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingItem {
    pub id: String,
    pub booking_id: String,
    pub group: u32,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Set when no free lane was left for the booking.
    #[serde(default)]
    pub conflict: bool,
}
