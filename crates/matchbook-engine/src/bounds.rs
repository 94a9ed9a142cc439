//! Best/worst bound maintenance.
//!
//! The metadata record tracks the occupied price range per side so the
//! matcher knows where to start scanning without touching level keys.
//! Resting an order can only widen its own side; emptying a level can only
//! narrow its side, and only when the level sat on an edge of the range.

use matchbook_store::KeyValueStore;
use matchbook_types::{BookMetadata, Result, Side};

use crate::book::LevelBook;
use crate::scan::TickRange;

/// Widen `side`'s range to include a newly rested order at `price`.
///
/// Returns whether the metadata changed. The first order on an empty side
/// sets both the best and worst bound to its price.
pub fn widen_for_resting(meta: &mut BookMetadata, side: Side, price: i64) -> bool {
    let mut changed = false;
    match side {
        Side::Buy => {
            if meta.best_bid.is_none_or(|best| price > best) {
                meta.best_bid = Some(price);
                changed = true;
            }
            if meta.worst_bid.is_none_or(|worst| price < worst) {
                meta.worst_bid = Some(price);
                changed = true;
            }
        }
        Side::Sell => {
            if meta.best_ask.is_none_or(|best| price < best) {
                meta.best_ask = Some(price);
                changed = true;
            }
            if meta.worst_ask.is_none_or(|worst| price > worst) {
                meta.worst_ask = Some(price);
                changed = true;
            }
        }
    }
    changed
}

/// Recompute `side`'s range after the level at `price` was emptied.
///
/// A removal that leaves orders at its level, or empties a level strictly
/// inside the range, cannot move a bound; only an emptied edge level forces
/// a rescan. The rescan walks the old range tick by tick, ascending, and
/// records the lowest and highest prices still occupied. Both bounds go to
/// `None` when nothing is left on the side.
///
/// Returns whether the metadata changed. Call only after the emptied queue
/// has been persisted, so the walk observes the removal.
pub fn repair_after_removal<S: KeyValueStore>(
    book: &LevelBook<S>,
    meta: &mut BookMetadata,
    side: Side,
    price: i64,
) -> Result<bool> {
    if meta.best(side) != Some(price) && meta.worst(side) != Some(price) {
        return Ok(false);
    }
    let (lowest, highest) = match side {
        Side::Buy => (meta.worst_bid, meta.best_bid),
        Side::Sell => (meta.best_ask, meta.worst_ask),
    };
    let (Some(lowest), Some(highest)) = (lowest, highest) else {
        return Ok(false);
    };

    let mut new_lowest = None;
    let mut new_highest = None;
    for level_price in TickRange::new(lowest, highest, meta.tick_size) {
        if book.has_orders_at(level_price)? {
            if new_lowest.is_none() {
                new_lowest = Some(level_price);
            }
            new_highest = Some(level_price);
        }
    }
    let before = (meta.best(side), meta.worst(side));
    meta.set_side_range(side, new_lowest, new_highest);
    Ok((meta.best(side), meta.worst(side)) != before)
}
