//! Configuration for a single trading pair.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{MatchbookError, Result};
use crate::scale::{shift_to_int, Scale};

/// Per-pair configuration.
///
/// The tick size is given as a decimal and scaled by `price_shift` when the
/// book is created; [`PairConfig::validate`] rejects any combination where
/// that scaling loses precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairConfig {
    /// Pair symbol (e.g., "ETH/USDT").
    pub pair: String,
    /// Price granularity. Levels exist only at integer multiples of this.
    pub tick_size: Decimal,
    /// Decimal digits carried into integer prices.
    pub price_shift: u32,
    /// Decimal digits carried into integer amounts.
    pub amount_shift: u32,
}

impl PairConfig {
    #[must_use]
    pub fn new(pair: impl Into<String>, tick_size: Decimal) -> Self {
        Self {
            pair: pair.into(),
            tick_size,
            price_shift: constants::DEFAULT_PRICE_SHIFT,
            amount_shift: constants::DEFAULT_AMOUNT_SHIFT,
        }
    }

    #[must_use]
    pub fn with_shifts(mut self, price_shift: u32, amount_shift: u32) -> Self {
        self.price_shift = price_shift;
        self.amount_shift = amount_shift;
        self
    }

    /// Create a default ETH/USDT pair config (whole-dollar ticks).
    #[must_use]
    pub fn eth_usdt() -> Self {
        Self::new("ETH/USDT", Decimal::ONE)
    }

    /// Check that the tick size survives price scaling intact.
    pub fn validate(&self) -> Result<()> {
        if self.tick_size <= Decimal::ZERO {
            return Err(MatchbookError::InvalidTickSize {
                tick: self.tick_size,
                shift: self.price_shift,
            });
        }
        let scale = Scale::new(self.price_shift, self.amount_shift)?;
        let scaled = shift_to_int(self.tick_size, self.price_shift)?;
        // A tick that scales to zero or rounds would misalign every level key.
        if scaled < 1 || scale.price_to_decimal(scaled) != self.tick_size {
            return Err(MatchbookError::InvalidTickSize {
                tick: self.tick_size,
                shift: self.price_shift,
            });
        }
        Ok(())
    }

    pub fn scale(&self) -> Result<Scale> {
        Scale::new(self.price_shift, self.amount_shift)
    }

    /// Tick size in integer price units.
    pub fn scaled_tick(&self) -> Result<i64> {
        self.validate()?;
        shift_to_int(self.tick_size, self.price_shift)
    }
}
