//! # matchbook-types
//!
//! Shared types, errors, and configuration for the **matchbook** order book
//! and matching engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`UserId`], [`Asset`]
//! - **Order model**: [`Order`], [`OrderRequest`], [`Side`]
//! - **Trade model**: [`Trade`]
//! - **Book metadata**: [`BookMetadata`] (best/worst bid/ask bounds + tick)
//! - **Fixed-point codec**: [`Scale`], [`shift_to_int`], [`shift_to_float`]
//! - **Configuration**: [`PairConfig`]
//! - **Errors**: [`MatchbookError`] with `MB_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod metadata;
pub mod order;
pub mod scale;
pub mod trade;

// Re-export all primary types at crate root for ergonomic imports:
//   use matchbook_types::{Order, Side, Trade, Scale, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use metadata::*;
pub use order::*;
pub use scale::*;
pub use trade::*;

// Constants are accessed via `matchbook_types::constants::FOO`
// (not re-exported to avoid name collisions).
