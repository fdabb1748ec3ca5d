use serde::{Deserialize, Serialize};

use crate::models::{booking_config::BookingConfig, price::Price};

/// How a booking is settled. Always derived from the booking's flags and
/// never stored on its own.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Fiat,
    FullTokens,
    PartialTokens,
    FullCredits,
    PartialCredits,
}

pub struct PaymentTypeService;

impl PaymentTypeService {
    /// Classify a prospective booking from the currency the guest picked and
    /// how many nights the community lets them cover in tokens or credits.
    ///
    /// A zero token allowance means tokens are not accepted, so such a
    /// booking is settled in fiat.
    pub fn payment_type(
        use_credits: bool,
        duration: i64,
        currency: &str,
        max_nights_to_pay_with_tokens: u32,
        max_nights_to_pay_with_credits: u32,
        config: &BookingConfig,
    ) -> PaymentType {
        let max_tokens = i64::from(max_nights_to_pay_with_tokens);
        let max_credits = i64::from(max_nights_to_pay_with_credits);

        if config.is_fiat(currency) {
            if !use_credits || max_credits == 0 {
                return PaymentType::Fiat;
            }
            if max_credits < duration {
                return PaymentType::PartialCredits;
            }
            return PaymentType::FullCredits;
        }

        if config.is_token(currency) {
            if max_tokens == 0 {
                return PaymentType::Fiat;
            }
            if max_tokens < duration {
                return PaymentType::PartialTokens;
            }
            return PaymentType::FullTokens;
        }

        PaymentType::Fiat
    }

    /// Classify an existing booking. A fiat remainder next to a credits or
    /// tokens flag means only part of the stay was covered in kind.
    pub fn booking_payment_type(
        use_credits: bool,
        use_tokens: bool,
        rental_fiat: Option<&Price>,
    ) -> PaymentType {
        let has_fiat_remainder = rental_fiat.is_some_and(Price::is_set);
        match (use_credits, use_tokens, has_fiat_remainder) {
            (true, _, true) => PaymentType::PartialCredits,
            (true, _, false) => PaymentType::FullCredits,
            (false, true, true) => PaymentType::PartialTokens,
            (false, true, false) => PaymentType::FullTokens,
            (false, false, _) => PaymentType::Fiat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiat_currency_with_credits() {
        let config = BookingConfig::default();
        assert_eq!(
            PaymentTypeService::payment_type(true, 5, "EUR", 0, 3, &config),
            PaymentType::PartialCredits
        );
        assert_eq!(
            PaymentTypeService::payment_type(true, 3, "EUR", 0, 3, &config),
            PaymentType::FullCredits
        );
        assert_eq!(
            PaymentTypeService::payment_type(false, 3, "EUR", 0, 3, &config),
            PaymentType::Fiat
        );
        assert_eq!(
            PaymentTypeService::payment_type(true, 3, "EUR", 0, 0, &config),
            PaymentType::Fiat
        );
    }

    #[test]
    fn test_token_currency() {
        let config = BookingConfig::default();
        assert_eq!(
            PaymentTypeService::payment_type(false, 5, "TDF", 2, 0, &config),
            PaymentType::PartialTokens
        );
        assert_eq!(
            PaymentTypeService::payment_type(false, 2, "TDF", 2, 0, &config),
            PaymentType::FullTokens
        );
    }

    #[test]
    fn test_zero_token_allowance_falls_back_to_fiat() {
        let config = BookingConfig::default();
        assert_eq!(
            PaymentTypeService::payment_type(false, 2, "TDF", 0, 0, &config),
            PaymentType::Fiat
        );
    }

    #[test]
    fn test_unknown_currency_is_fiat() {
        let config = BookingConfig::default();
        assert_eq!(
            PaymentTypeService::payment_type(true, 2, "USD", 5, 5, &config),
            PaymentType::Fiat
        );
    }

    #[test]
    fn test_booking_payment_type() {
        let none = Price::new(0.0, "EUR");
        let remainder = Price::new(20.0, "EUR");

        assert_eq!(
            PaymentTypeService::booking_payment_type(true, false, Some(&none)),
            PaymentType::FullCredits
        );
        assert_eq!(
            PaymentTypeService::booking_payment_type(true, false, Some(&remainder)),
            PaymentType::PartialCredits
        );
        assert_eq!(
            PaymentTypeService::booking_payment_type(false, true, None),
            PaymentType::FullTokens
        );
        assert_eq!(
            PaymentTypeService::booking_payment_type(false, true, Some(&remainder)),
            PaymentType::PartialTokens
        );
        assert_eq!(
            PaymentTypeService::booking_payment_type(false, false, Some(&remainder)),
            PaymentType::Fiat
        );
    }

    #[test]
    fn test_payment_type_wire_names() {
        assert_eq!(
            serde_json::to_value(PaymentType::PartialCredits).unwrap(),
            serde_json::json!("PARTIAL_CREDITS")
        );
    }
}
