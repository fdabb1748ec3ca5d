use serde::{Deserialize, Serialize};

pub const CREDITS_CURRENCY: &str = "credits";

/// A monetary amount tagged with its currency code.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Price {
    pub val: f64,
    pub cur: String,
}

impl Price {
    pub fn new(val: f64, cur: impl Into<String>) -> Self {
        Self {
            val,
            cur: cur.into(),
        }
    }

    pub fn zero(cur: impl Into<String>) -> Self {
        Self::new(0.0, cur)
    }

    /// True when the amount is non-zero. Mirrors how the platform treats a
    /// fiat remainder on a token or credit booking.
    pub fn is_set(&self) -> bool {
        self.val != 0.0 && !self.val.is_nan()
    }
}

/// Round to 2 decimal places, half away from zero.
pub fn round_money(amount: f64) -> f64 {
    if !amount.is_finite() {
        return 0.0;
    }
    let rounded = (amount * 100.0).round() / 100.0;
    // avoid serializing -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
