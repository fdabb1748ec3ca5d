use serde::{Deserialize, Serialize};

use super::price::Price;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceDuration {
    #[default]
    Night,
    Hour,
}

/// An accommodation unit offered by the community.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub fiat_price: Price,
    pub token_price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiat_hourly_price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_hourly_price: Option<Price>,
    #[serde(default = "default_one")]
    pub beds: u32,
    #[serde(default)]
    pub private: bool,
    #[serde(default = "default_one")]
    pub quantity: u32,
    #[serde(default)]
    pub price_duration: PriceDuration,
}

fn default_one() -> u32 {
    1
}

impl Listing {
    pub fn is_hourly(&self) -> bool {
        self.price_duration == PriceDuration::Hour
    }

    /// Price applicable to a booking. Token and credit bookings both settle
    /// against the token price; hourly listings use their hourly variant
    /// when one is configured.
    pub fn unit_price(&self, pay_with_tokens_or_credits: bool) -> &Price {
        match (pay_with_tokens_or_credits, self.is_hourly()) {
            (true, true) => self.token_hourly_price.as_ref().unwrap_or(&self.token_price),
            (true, false) => &self.token_price,
            (false, true) => self.fiat_hourly_price.as_ref().unwrap_or(&self.fiat_price),
            (false, false) => &self.fiat_price,
        }
    }

    /// Number of timeline lanes the listing occupies.
    pub fn lane_count(&self) -> u64 {
        let quantity = u64::from(self.quantity);
        if self.private {
            quantity
        } else {
            quantity * u64::from(self.beds.max(1))
        }
    }
}
