//! Error types for the matchbook engine.
//!
//! All errors use the `MB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Value / scaling errors
//! - 3xx: Store errors
//! - 4xx: Settlement errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Order, Side, UserId};

/// Central error enum for all matchbook operations.
#[derive(Debug, Error)]
pub enum MatchbookError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// No resting order matches the given price and `(timestamp, user, side)`
    /// identity. Returned by cancel and deplete.
    #[error("MB_ERR_100: Invalid order: no {side} order for {user} at price {price} with timestamp {timestamp}")]
    InvalidOrder {
        side: Side,
        user: UserId,
        price: i64,
        timestamp: i64,
    },

    /// A depletion must leave the order partially resting: the requested
    /// reduction equals or exceeds the resting amount (or is non-positive).
    #[error("MB_ERR_101: Invalid depletion amount: requested {requested} against resting {available}")]
    InvalidDepletionAmount { requested: i64, available: i64 },

    // =================================================================
    // Value / Scaling Errors (2xx)
    // =================================================================
    /// Order amount must scale to a positive integer.
    #[error("MB_ERR_200: Order amount must be positive, got {0}")]
    AmountNotPositive(Decimal),

    /// Order price must scale to a positive integer.
    #[error("MB_ERR_201: Order price must be positive, got {0}")]
    PriceNotPositive(Decimal),

    /// The decimal shift exceeds what an `i64` book can represent.
    #[error("MB_ERR_202: Decimal shift {shift} exceeds maximum {max}")]
    ShiftOutOfRange { shift: u32, max: u32 },

    /// A decimal value does not fit the book's fixed-point range once shifted.
    #[error("MB_ERR_203: Value {value} out of range for shift {shift}")]
    ValueOutOfRange { value: Decimal, shift: u32 },

    /// The configured tick size does not survive price scaling.
    #[error("MB_ERR_204: Tick size {tick} is invalid for price shift {shift}")]
    InvalidTickSize { tick: Decimal, shift: u32 },

    /// Order price (scaled) is not a multiple of the book's tick size.
    #[error("MB_ERR_205: Price {price} is not on the tick grid (tick size {tick})")]
    PriceOffTick { price: i64, tick: i64 },

    // =================================================================
    // Store Errors (3xx)
    // =================================================================
    /// `put` on a key that already exists.
    #[error("MB_ERR_300: Store key already exists: {0}")]
    DuplicateKey(String),

    /// `set` or `del` on a key that does not exist.
    #[error("MB_ERR_301: Store key not found: {0}")]
    MissingKey(String),

    /// A stored value failed to encode or decode.
    #[error("MB_ERR_302: Serialization error: {0}")]
    Serialization(String),

    // =================================================================
    // Settlement Errors (4xx)
    // =================================================================
    /// Not enough balance to cover a withdrawal or trade leg.
    #[error("MB_ERR_400: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// A trade with this sequence number has already been settled.
    #[error("MB_ERR_401: Trade already settled: seq {0}")]
    TradeAlreadySettled(u64),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error: a book invariant did not hold.
    #[error("MB_ERR_900: Internal error: {0}")]
    Internal(String),
}

impl MatchbookError {
    /// Build the cancel/deplete miss error from the order that was sought.
    #[must_use]
    pub fn invalid_order(target: &Order) -> Self {
        Self::InvalidOrder {
            side: target.side,
            user: target.user.clone(),
            price: target.price,
            timestamp: target.timestamp,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MatchbookError>;

// Conversion from serde_json::Error (store value encoding)
impl From<serde_json::Error> for MatchbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
