//! System-wide constants for the matchbook engine.

/// Largest supported decimal shift. 10^18 is the biggest power of ten that
/// still fits in an `i64`, so larger shifts could never produce valid prices.
pub const MAX_SHIFT: u32 = 18;

/// Decimal shift applied to prices when none is configured.
pub const DEFAULT_PRICE_SHIFT: u32 = 0;

/// Decimal shift applied to amounts when none is configured.
pub const DEFAULT_AMOUNT_SHIFT: u32 = 0;

/// Settlement dedup window size (number of trade sequence numbers remembered
/// before the oldest is evicted).
pub const SETTLEMENT_DEDUP_CAPACITY: usize = 500_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "matchbook";
