use serde::{Deserialize, Serialize};

use crate::models::price::{round_money, Price};

/// Outstanding amounts after a booking edit. Positive values are owed by
/// the guest, negative values are refunded.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaymentDelta {
    pub fiat: Price,
    pub token: Price,
}

pub struct PaymentDeltaService;

impl PaymentDeltaService {
    /// Compare the totals of a booking before and after an edit.
    ///
    /// Returns `None` when the edit does not move any money. For token and
    /// credit bookings that is decided by the accommodation delta alone.
    /// Deltas are compared after rounding to cents, so float residue from
    /// summing line items never reads as a change.
    pub fn payment_delta(
        total: f64,
        updated_total: f64,
        use_tokens: bool,
        use_credits: bool,
        rental_token: &Price,
        updated_accommodation_total: f64,
        rental_fiat_cur: &str,
    ) -> Option<PaymentDelta> {
        let fiat_delta = round_money(updated_total - total);

        if use_tokens || use_credits {
            let token_delta = round_money(updated_accommodation_total - rental_token.val);
            if token_delta == 0.0 {
                return None;
            }
            return Some(PaymentDelta {
                fiat: Price::new(fiat_delta, rental_fiat_cur),
                token: Price::new(token_delta, rental_token.cur.as_str()),
            });
        }

        if fiat_delta == 0.0 {
            return None;
        }
        Some(PaymentDelta {
            fiat: Price::new(fiat_delta, rental_fiat_cur),
            token: Price::zero(rental_token.cur.as_str()),
        })
    }
}
