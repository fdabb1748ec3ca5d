//! Shapes bookings, guests and listings into lanes and bars for the booking
//! calendar.
//!
//! Lanes are numbered from 1. Every listing owns a contiguous run of lanes:
//! one per unit for private listings and one per bed for shared ones.
//! Bookings that name their room or bed numbers are pinned to those lanes.
//! The rest are placed by greedy interval colouring, so two overlapping
//! stays never share a lane while a free one exists.

use std::collections::HashMap;

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::models::{
    booking::Booking,
    listing::Listing,
    timeline::{AccommodationUnit, BookingItem, BookingRow},
    user::User,
};

const UNKNOWN_GUEST: &str = "Unknown guest";

/// Most lanes a single timeline may hold across all of its listings.
pub const MAX_TIMELINE_LANES: u64 = 10_000;

pub struct TimelineService;

type Interval = (DateTime<Utc>, DateTime<Utc>);

impl TimelineService {
    /// Shift `instant` so that a viewer in `viewer_tz` sees the wall-clock
    /// time the property sees in `property_tz`.
    pub fn convert_time_to_timeline_format(
        instant: DateTime<Utc>,
        property_tz: Tz,
        viewer_tz: Tz,
    ) -> DateTime<Utc> {
        let wall = instant.with_timezone(&property_tz).naive_local();
        match Self::resolve_local(viewer_tz, wall) {
            Some(shifted) => shifted,
            None => {
                // wall time falls in the viewer's DST gap
                Self::resolve_local(viewer_tz, wall + Duration::hours(1)).unwrap_or(instant)
            }
        }
    }

    fn resolve_local(tz: Tz, wall: NaiveDateTime) -> Option<DateTime<Utc>> {
        match tz.from_local_datetime(&wall) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
            LocalResult::None => None,
        }
    }

    /// Join bookings with their guest and listing into flat rows.
    /// Bookings whose listing is unknown are dropped.
    pub fn bookings_with_user_and_listing(
        bookings: &[Booking],
        users: &[User],
        listings: &[Listing],
        property_tz: Tz,
        viewer_tz: Tz,
    ) -> Vec<BookingRow> {
        let users: HashMap<&str, &User> = users.iter().map(|u| (u.id.as_str(), u)).collect();
        let listings: HashMap<&str, &Listing> =
            listings.iter().map(|l| (l.id.as_str(), l)).collect();

        bookings
            .iter()
            .filter_map(|booking| {
                let listing_id = booking.listing.as_deref()?;
                let Some(listing) = listings.get(listing_id) else {
                    log::warn!(
                        "Booking {} references unknown listing {}",
                        booking.id,
                        listing_id
                    );
                    return None;
                };
                let user = booking
                    .created_by
                    .as_deref()
                    .and_then(|id| users.get(id));

                Some(BookingRow {
                    id: booking.id.clone(),
                    start: Self::convert_time_to_timeline_format(
                        booking.start,
                        property_tz,
                        viewer_tz,
                    ),
                    end: Self::convert_time_to_timeline_format(booking.end, property_tz, viewer_tz),
                    status: booking.status,
                    adults: booking.adults,
                    listing_id: listing.id.clone(),
                    listing_name: listing.name.clone(),
                    private: listing.private,
                    user_id: booking.created_by.clone(),
                    user_name: user
                        .map(|u| u.screenname.clone())
                        .unwrap_or_else(|| UNKNOWN_GUEST.to_string()),
                    room_or_bed_numbers: booking.room_or_bed_numbers.clone(),
                })
            })
            .collect()
    }

    /// One lane per private unit or shared bed, ids starting at 1.
    pub fn format_listings(listings: &[Listing]) -> Vec<AccommodationUnit> {
        let lanes = Self::lane_total(listings).min(MAX_TIMELINE_LANES);
        let mut units = Vec::with_capacity(lanes as usize);
        let mut next_id = 1;

        for listing in listings {
            let base_id = next_id;
            for unit in 1..=listing.quantity {
                let unit_name = if listing.quantity > 1 {
                    format!("{} {}", listing.name, unit)
                } else {
                    listing.name.clone()
                };

                if listing.private {
                    units.push(AccommodationUnit {
                        id: next_id,
                        listing_id: listing.id.clone(),
                        base_id,
                        title: unit_name,
                    });
                    next_id += 1;
                    continue;
                }

                for bed in 1..=listing.beds.max(1) {
                    units.push(AccommodationUnit {
                        id: next_id,
                        listing_id: listing.id.clone(),
                        base_id,
                        title: format!("{} - bed {}", unit_name, bed),
                    });
                    next_id += 1;
                }
            }
        }

        units
    }

    pub fn lane_total(listings: &[Listing]) -> u64 {
        listings.iter().map(Listing::lane_count).sum()
    }

    /// Place every booking row on one or more lanes.
    pub fn generate_booking_items(
        rows: &[BookingRow],
        units: &[AccommodationUnit],
    ) -> Vec<BookingItem> {
        let mut lanes_by_listing: HashMap<&str, Vec<u32>> = HashMap::new();
        for unit in units {
            lanes_by_listing
                .entry(unit.listing_id.as_str())
                .or_default()
                .push(unit.id);
        }

        let mut rows: Vec<&BookingRow> = rows
            .iter()
            .filter(|row| row.status.occupies_calendar())
            .filter(|row| {
                let known = lanes_by_listing.contains_key(row.listing_id.as_str());
                if !known {
                    log::warn!("No timeline lanes for listing {}", row.listing_id);
                }
                known
            })
            .collect();
        rows.sort_by(|a, b| (a.start, a.end, &a.id).cmp(&(b.start, b.end, &b.id)));

        let mut occupied: HashMap<u32, Vec<Interval>> = HashMap::new();
        let mut items = Vec::new();
        let mut unplaced = Vec::new();

        // Pinned bookings claim their lanes first.
        for row in &rows {
            let lanes = &lanes_by_listing[row.listing_id.as_str()];
            let Some(pinned) = Self::pinned_lanes(row, lanes) else {
                unplaced.push(*row);
                continue;
            };

            let split = pinned.len() > 1;
            for (number, lane) in pinned {
                let conflict = Self::is_taken(&occupied, lane, (row.start, row.end));
                if conflict {
                    log::warn!("Booking {} overlaps another stay on lane {}", row.id, lane);
                }
                occupied.entry(lane).or_default().push((row.start, row.end));
                let id = if split {
                    format!("{}-{}", row.id, number)
                } else {
                    row.id.clone()
                };
                items.push(Self::item(row, id, lane, conflict));
            }
        }

        for row in unplaced {
            let lanes = &lanes_by_listing[row.listing_id.as_str()];
            let interval = (row.start, row.end);
            let free = lanes
                .iter()
                .copied()
                .find(|lane| !Self::is_taken(&occupied, *lane, interval));

            let (lane, conflict) = match free {
                Some(lane) => (lane, false),
                None => {
                    log::warn!(
                        "No free lane for booking {} on listing {}",
                        row.id,
                        row.listing_id
                    );
                    (lanes[0], true)
                }
            };
            occupied.entry(lane).or_default().push(interval);
            items.push(Self::item(row, row.id.clone(), lane, conflict));
        }

        items.sort_by(|a, b| {
            (a.start_time, a.group, &a.id).cmp(&(b.start_time, b.group, &b.id))
        });
        items
    }

    /// Lanes named by the booking's room or bed numbers, or `None` when the
    /// booking has no usable numbers and must be placed automatically.
    fn pinned_lanes(row: &BookingRow, lanes: &[u32]) -> Option<Vec<(u32, u32)>> {
        if row.room_or_bed_numbers.is_empty() {
            return None;
        }
        let mut numbers = row.room_or_bed_numbers.clone();
        numbers.sort_unstable();
        numbers.dedup();

        let base = lanes[0];
        let pinned: Vec<(u32, u32)> = numbers
            .iter()
            .filter(|n| **n >= 1 && (**n as usize) <= lanes.len())
            .map(|n| (*n, base + n - 1))
            .collect();

        if pinned.len() != numbers.len() {
            log::warn!(
                "Booking {} has bed numbers outside listing {}",
                row.id,
                row.listing_id
            );
            return None;
        }
        Some(pinned)
    }

    fn is_taken(occupied: &HashMap<u32, Vec<Interval>>, lane: u32, interval: Interval) -> bool {
        occupied.get(&lane).is_some_and(|taken| {
            taken
                .iter()
                .any(|(start, end)| interval.0 < *end && *start < interval.1)
        })
    }

    fn item(row: &BookingRow, id: String, lane: u32, conflict: bool) -> BookingItem {
        BookingItem {
            id,
            booking_id: row.id.clone(),
            group: lane,
            title: format!("{} ({})", row.user_name, row.adults),
            start_time: row.start,
            end_time: row.end,
            conflict,
        }
    }
}
