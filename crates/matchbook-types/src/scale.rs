//! Fixed-point conversion between external decimal values and book integers.
//!
//! All book arithmetic (comparisons, subtraction, tick stepping) runs on
//! integers; decimals exist only at the API boundary. A value is shifted by
//! 10^n and rounded half-away-from-zero on the way in, and divided back out
//! on the way out.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_SHIFT;
use crate::error::{MatchbookError, Result};

fn pow10(shift: u32) -> Decimal {
    Decimal::from_i128_with_scale(10_i128.pow(shift), 0)
}

/// Scale `value` by `10^shift` and round half-away-from-zero to an integer.
///
/// Fails when `shift` exceeds [`MAX_SHIFT`] or the shifted value does not fit
/// an `i64`.
pub fn shift_to_int(value: Decimal, shift: u32) -> Result<i64> {
    if shift > MAX_SHIFT {
        return Err(MatchbookError::ShiftOutOfRange {
            shift,
            max: MAX_SHIFT,
        });
    }
    let out_of_range = || MatchbookError::ValueOutOfRange { value, shift };
    let scaled = value.checked_mul(pow10(shift)).ok_or_else(out_of_range)?;
    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(out_of_range)
}

/// Inverse of [`shift_to_int`]: interpret `value` at `10^-shift`.
///
/// `shift` must be at most [`MAX_SHIFT`]; every caller passes a shift that was
/// validated when the pair was configured.
#[must_use]
pub fn shift_to_float(value: i64, shift: u32) -> Decimal {
    Decimal::new(value, shift)
}

/// The fixed decimal-scaling configuration of one trading pair.
///
/// Bundles the price and amount shifts so call sites cannot transpose the two
/// exponents. Fixed for the lifetime of an exchange instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    price_shift: u32,
    amount_shift: u32,
}

impl Scale {
    pub fn new(price_shift: u32, amount_shift: u32) -> Result<Self> {
        for shift in [price_shift, amount_shift] {
            if shift > MAX_SHIFT {
                return Err(MatchbookError::ShiftOutOfRange {
                    shift,
                    max: MAX_SHIFT,
                });
            }
        }
        Ok(Self {
            price_shift,
            amount_shift,
        })
    }

    #[must_use]
    pub fn price_shift(&self) -> u32 {
        self.price_shift
    }

    #[must_use]
    pub fn amount_shift(&self) -> u32 {
        self.amount_shift
    }

    pub fn price_to_int(&self, price: Decimal) -> Result<i64> {
        shift_to_int(price, self.price_shift)
    }

    pub fn amount_to_int(&self, amount: Decimal) -> Result<i64> {
        shift_to_int(amount, self.amount_shift)
    }

    #[must_use]
    pub fn price_to_decimal(&self, price: i64) -> Decimal {
        shift_to_float(price, self.price_shift)
    }

    #[must_use]
    pub fn amount_to_decimal(&self, amount: i64) -> Decimal {
        shift_to_float(amount, self.amount_shift)
    }
}
