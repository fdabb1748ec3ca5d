use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Community-wide booking settings. Passed explicitly into every pricing
/// call so that the calculators stay pure.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingConfig {
    pub fiat_currency: String,
    pub token_currency: String,
    pub utility_fiat_val: f64,
    pub food_option_price: f64,
    pub is_utility_option_enabled: bool,
    pub is_food_option_enabled: bool,
    /// Percentages, e.g. `10.0` for 10% off.
    pub daily_rental_discount: f64,
    pub weekly_rental_discount: f64,
    pub monthly_rental_discount: f64,
    pub max_nights_to_pay_with_tokens: u32,
    pub max_nights_to_pay_with_credits: u32,
    pub time_zone: Tz,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            fiat_currency: "EUR".to_string(),
            token_currency: "TDF".to_string(),
            utility_fiat_val: 0.0,
            food_option_price: 0.0,
            is_utility_option_enabled: false,
            is_food_option_enabled: false,
            daily_rental_discount: 0.0,
            weekly_rental_discount: 0.0,
            monthly_rental_discount: 0.0,
            max_nights_to_pay_with_tokens: 0,
            max_nights_to_pay_with_credits: 0,
            time_zone: Tz::UTC,
        }
    }
}

impl BookingConfig {
    pub fn is_fiat(&self, currency: &str) -> bool {
        currency == self.fiat_currency
    }

    pub fn is_token(&self, currency: &str) -> bool {
        currency == self.token_currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BookingConfig = serde_json::from_value(json!({
            "utilityFiatVal": 5.0,
            "timeZone": "Europe/Lisbon",
        }))
        .unwrap();

        assert_eq!(config.utility_fiat_val, 5.0);
        assert_eq!(config.fiat_currency, "EUR");
        assert_eq!(config.time_zone, chrono_tz::Europe::Lisbon);
        assert!(config.is_token("TDF"));
        assert!(!config.is_fiat("TDF"));
    }
}
