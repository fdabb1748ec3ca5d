use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;
use thiserror::Error;
use url::Url;

use crate::models::booking_config::BookingConfig;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const PLATFORM_API_URL: &str = "http://localhost:4001/";
const PLATFORM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub platform_api_url: Url,
    pub platform_timeout: Duration,
    pub booking: BookingConfig,
}

impl AppConfig {
    /// Read settings from the environment, falling back to defaults for
    /// anything unset. Values that are set but do not parse are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = BookingConfig::default();

        let booking = BookingConfig {
            fiat_currency: env_or("FIAT_CURRENCY", defaults.fiat_currency)?,
            token_currency: env_or("TOKEN_CURRENCY", defaults.token_currency)?,
            utility_fiat_val: env_or("UTILITY_FIAT_VAL", defaults.utility_fiat_val)?,
            food_option_price: env_or("FOOD_OPTION_PRICE", defaults.food_option_price)?,
            is_utility_option_enabled: env_or(
                "UTILITY_OPTION_ENABLED",
                defaults.is_utility_option_enabled,
            )?,
            is_food_option_enabled: env_or("FOOD_OPTION_ENABLED", defaults.is_food_option_enabled)?,
            daily_rental_discount: env_or("DAILY_RENTAL_DISCOUNT", defaults.daily_rental_discount)?,
            weekly_rental_discount: env_or(
                "WEEKLY_RENTAL_DISCOUNT",
                defaults.weekly_rental_discount,
            )?,
            monthly_rental_discount: env_or(
                "MONTHLY_RENTAL_DISCOUNT",
                defaults.monthly_rental_discount,
            )?,
            max_nights_to_pay_with_tokens: env_or(
                "MAX_NIGHTS_TO_PAY_WITH_TOKENS",
                defaults.max_nights_to_pay_with_tokens,
            )?,
            max_nights_to_pay_with_credits: env_or(
                "MAX_NIGHTS_TO_PAY_WITH_CREDITS",
                defaults.max_nights_to_pay_with_credits,
            )?,
            time_zone: env_or::<Tz>("PROPERTY_TIME_ZONE", defaults.time_zone)?,
        };

        let platform_api_url = match env::var("PLATFORM_API_URL") {
            Ok(value) => Url::parse(&value).map_err(|_| ConfigError::InvalidValue {
                key: "PLATFORM_API_URL",
                value,
            })?,
            Err(_) => Url::parse(PLATFORM_API_URL).map_err(|_| ConfigError::InvalidValue {
                key: "PLATFORM_API_URL",
                value: PLATFORM_API_URL.to_string(),
            })?,
        };

        Ok(Self {
            host: env_or("HOST", HOST.to_string())?,
            port: env_or("PORT", PORT)?,
            platform_api_url,
            platform_timeout: Duration::from_secs(env_or(
                "PLATFORM_TIMEOUT_SECS",
                PLATFORM_TIMEOUT_SECS,
            )?),
            booking,
        })
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}
