use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::{
    booking::BookingRequest,
    booking_config::BookingConfig,
    listing::Listing,
    price::{round_money, Price, CREDITS_CURRENCY},
};
use crate::services::payment_type_service::{PaymentType, PaymentTypeService};

const WEEK_DAYS: i64 = 7;
const MONTH_DAYS: i64 = 28;

pub struct PricingService;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTotalComponents {
    pub rental: Option<Price>,
    pub utility: Option<Price>,
    pub food: Option<Price>,
    #[serde(default = "enabled")]
    pub is_utility_option_enabled: bool,
    #[serde(default = "enabled")]
    pub is_food_option_enabled: bool,
    pub default_currency: String,
}

fn enabled() -> bool {
    true
}

/// Every line item of a booking request, priced.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingTotals {
    /// Nights, or hours for hourly listings.
    pub duration: i64,
    pub duration_in_days: i64,
    pub discount_rate: f64,
    pub rental_fiat: Price,
    pub rental_token: Price,
    pub utility_fiat: Price,
    pub food_fiat: Price,
    pub event_fiat: Price,
    pub total: Price,
    pub payment_type: PaymentType,
}

impl PricingService {
    /// Utilities are charged per adult per night. Team bookings and a
    /// disabled or unconfigured utility option cost nothing.
    pub fn utility_total(
        utility_fiat_val: f64,
        adults: u32,
        duration: i64,
        discount_rate: f64,
        is_team_booking: bool,
        is_utility_option_enabled: bool,
    ) -> f64 {
        if is_team_booking || !is_utility_option_enabled || utility_fiat_val == 0.0 {
            return 0.0;
        }
        utility_fiat_val * adults as f64 * duration as f64 * discount_rate
    }

    /// Food is charged per adult per day and never for hourly bookings.
    pub fn food_total(
        is_hourly_booking: bool,
        food_price: f64,
        duration_in_days: i64,
        adults: u32,
        is_food_option_enabled: bool,
        is_team_member: bool,
    ) -> f64 {
        if is_hourly_booking || !is_food_option_enabled || is_team_member || food_price == 0.0 {
            return 0.0;
        }
        food_price * adults as f64 * duration_in_days as f64
    }

    /// Accommodation cost in whichever currency the guest pays with.
    ///
    /// Private listings are priced per unit, shared listings per adult.
    /// Hourly listings are never discounted. Volunteer and team stays are free.
    #[allow(clippy::too_many_arguments)]
    pub fn accommodation_total(
        listing: Option<&Listing>,
        use_tokens: bool,
        use_credits: bool,
        adults: u32,
        duration: i64,
        discount_rate: f64,
        volunteer_id: Option<&str>,
        is_team_booking: bool,
    ) -> f64 {
        let listing = match listing {
            Some(listing) => listing,
            None => return 0.0,
        };
        if volunteer_id.is_some_and(|id| !id.is_empty()) || is_team_booking {
            return 0.0;
        }

        let price = listing.unit_price(use_tokens || use_credits);
        let discount_rate = if listing.is_hourly() { 1.0 } else { discount_rate };
        let multiplier = if listing.private { 1.0 } else { adults as f64 };

        round_money(price.val * multiplier * duration as f64 * discount_rate)
    }

    /// Amount due in fiat. Accommodation only counts when it is not covered
    /// by tokens or credits.
    pub fn fiat_total(
        is_team_booking: bool,
        event_total: f64,
        utility_total: f64,
        food_total: f64,
        accommodation_fiat_total: f64,
        use_tokens: bool,
        use_credits: bool,
    ) -> f64 {
        if is_team_booking {
            return 0.0;
        }
        let mut total = utility_total + food_total + event_total;
        if !use_tokens && !use_credits {
            total += accommodation_fiat_total;
        }
        total
    }

    /// Total shown to the guest, skipping options that are switched off.
    pub fn display_total_from_components(components: &DisplayTotalComponents) -> Price {
        let included = [
            (components.rental.as_ref(), true),
            (components.utility.as_ref(), components.is_utility_option_enabled),
            (components.food.as_ref(), components.is_food_option_enabled),
        ];

        let mut sum = 0.0;
        let mut currency: Option<&str> = None;
        for (price, is_enabled) in included {
            let Some(price) = price.filter(|_| is_enabled) else {
                continue;
            };
            sum += price.val;
            if currency.is_none() && !price.cur.is_empty() {
                currency = Some(price.cur.as_str());
            }
        }

        Price::new(
            round_money(sum),
            currency.unwrap_or(components.default_currency.as_str()),
        )
    }

    /// Rental multiplier for a stay length: monthly beats weekly beats daily.
    pub fn discount_rate(duration_in_days: i64, config: &BookingConfig) -> f64 {
        let percent = if duration_in_days >= MONTH_DAYS {
            config.monthly_rental_discount
        } else if duration_in_days >= WEEK_DAYS {
            config.weekly_rental_discount
        } else {
            config.daily_rental_discount
        };
        1.0 - percent.clamp(0.0, 100.0) / 100.0
    }

    /// Nights between check-in and check-out, counted on the property's
    /// calendar. A same-day stay counts as one.
    pub fn duration_in_days(start: DateTime<Utc>, end: DateTime<Utc>, time_zone: Tz) -> i64 {
        if end <= start {
            return 0;
        }
        let start_day = start.with_timezone(&time_zone).date_naive();
        let end_day = end.with_timezone(&time_zone).date_naive();
        (end_day - start_day).num_days().max(1)
    }

    /// Hours between start and end, partial hours rounded up.
    pub fn duration_in_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        let minutes = (end - start).num_minutes();
        if minutes <= 0 {
            return 0;
        }
        (minutes + 59) / 60
    }

    /// Price every line item of a booking request against a listing.
    /// Team members eat for free even on their private stays.
    pub fn booking_totals(
        request: &BookingRequest,
        listing: Option<&Listing>,
        config: &BookingConfig,
        is_team_member: bool,
    ) -> BookingTotals {
        let is_hourly = listing.is_some_and(Listing::is_hourly);
        let duration_in_days = Self::duration_in_days(request.start, request.end, config.time_zone);
        let duration = if is_hourly {
            Self::duration_in_hours(request.start, request.end)
        } else {
            duration_in_days
        };
        let discount_rate = Self::discount_rate(duration_in_days, config);
        let pays_in_kind = request.use_tokens || request.use_credits;

        let accommodation = Self::accommodation_total(
            listing,
            request.use_tokens,
            request.use_credits,
            request.adults,
            duration,
            discount_rate,
            request.volunteer_id.as_deref(),
            request.is_team_booking,
        );
        let utility = round_money(Self::utility_total(
            config.utility_fiat_val,
            request.adults,
            duration_in_days,
            discount_rate,
            request.is_team_booking,
            config.is_utility_option_enabled,
        ));
        let food = round_money(Self::food_total(
            is_hourly,
            config.food_option_price,
            duration_in_days,
            request.adults,
            config.is_food_option_enabled,
            request.is_team_booking || is_team_member,
        ));
        let event = round_money(request.event_total);

        let (rental_fiat, rental_token) = if pays_in_kind {
            (0.0, accommodation)
        } else {
            (accommodation, 0.0)
        };
        let total = Self::fiat_total(
            request.is_team_booking,
            event,
            utility,
            food,
            rental_fiat,
            request.use_tokens,
            request.use_credits,
        );

        let in_kind_currency = if request.use_credits {
            CREDITS_CURRENCY
        } else {
            config.token_currency.as_str()
        };
        let payment_currency = if request.use_tokens {
            config.token_currency.as_str()
        } else {
            config.fiat_currency.as_str()
        };
        let payment_type = PaymentTypeService::payment_type(
            request.use_credits,
            duration,
            payment_currency,
            config.max_nights_to_pay_with_tokens,
            config.max_nights_to_pay_with_credits,
            config,
        );

        log::debug!(
            "Priced booking request: duration={} discount={} rental_fiat={} rental_token={} total={}",
            duration,
            discount_rate,
            rental_fiat,
            rental_token,
            total
        );

        BookingTotals {
            duration,
            duration_in_days,
            discount_rate,
            rental_fiat: Price::new(rental_fiat, config.fiat_currency.as_str()),
            rental_token: Price::new(rental_token, in_kind_currency),
            utility_fiat: Price::new(utility, config.fiat_currency.as_str()),
            food_fiat: Price::new(food, config.fiat_currency.as_str()),
            event_fiat: Price::new(event, config.fiat_currency.as_str()),
            total: Price::new(round_money(total), config.fiat_currency.as_str()),
            payment_type,
        }
    }
}
