//! Match planning against a frozen view of the book.
//!
//! Matching runs in two phases. `plan_match` scans the opposing side in
//! price-time priority and only records what it would do: which makers are
//! consumed outright, which single maker is partially depleted, and how much
//! of the incoming order is left. The exchange then applies the plan as a
//! batch. Nothing in this module mutates the book, so the scan can never
//! observe its own removals.

use matchbook_store::KeyValueStore;
use matchbook_types::{BookMetadata, Order, Result, Side};

use crate::book::LevelBook;
use crate::scan::OrderScan;

/// One maker consumed, fully or partially, by an incoming order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fill {
    /// The resting order as the scan observed it.
    pub maker: Order,
    /// Matched amount in scaled units; the trade executes at `maker.price`.
    pub amount: i64,
    /// Whether the maker is consumed entirely (removal from the book) or
    /// left resting with a reduced amount (in-place depletion). At most the
    /// final fill of a plan can be a depletion.
    pub exhausts_maker: bool,
}

/// The outcome of one matching scan, applied after the scan completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPlan {
    /// Makers to consume, in price-then-arrival order.
    pub fills: Vec<Fill>,
    /// Taker amount left unmatched; rests in the book when positive.
    pub remaining: i64,
}

impl MatchPlan {
    fn unmatched(amount: i64) -> Self {
        Self {
            fills: Vec::new(),
            remaining: amount,
        }
    }

    /// Total amount matched across all fills.
    #[must_use]
    pub fn matched(&self) -> i64 {
        self.fills.iter().map(|fill| fill.amount).sum()
    }
}

/// Whether `taker` can trade against the opposing best price at all.
#[must_use]
pub fn crosses(meta: &BookMetadata, taker: &Order) -> bool {
    match taker.side {
        Side::Buy => meta.best_ask.is_some_and(|ask| taker.price >= ask),
        Side::Sell => meta.best_bid.is_some_and(|bid| taker.price <= bid),
    }
}

/// Whether a maker at `level_price` is still within `taker`'s limit.
fn price_valid(taker: &Order, level_price: i64) -> bool {
    match taker.side {
        Side::Buy => level_price <= taker.price,
        Side::Sell => level_price >= taker.price,
    }
}

/// Scan the opposing side best-to-worst and plan `taker`'s fills.
///
/// Makers are visited in price-time priority: levels from best to worst by
/// tick, FIFO within each level. The scan ends at the first maker whose
/// price falls outside the taker's limit (every later maker is priced worse)
/// or when the taker is exhausted. A maker larger than the remaining taker
/// amount becomes the plan's single depletion fill.
pub fn plan_match<S: KeyValueStore>(
    book: &LevelBook<S>,
    meta: &BookMetadata,
    taker: &Order,
) -> Result<MatchPlan> {
    if !crosses(meta, taker) {
        return Ok(MatchPlan::unmatched(taker.amount));
    }
    let (start, end, step) = match taker.side {
        Side::Buy => (meta.best_ask, meta.worst_ask, meta.tick_size),
        Side::Sell => (meta.best_bid, meta.worst_bid, -meta.tick_size),
    };
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(MatchPlan::unmatched(taker.amount));
    };

    let mut fills = Vec::new();
    let mut remaining = taker.amount;
    let mut scan = OrderScan::new(book, start, end, step);
    while remaining > 0 {
        let Some(maker) = scan.next() else { break };
        let maker = maker?;
        if !price_valid(taker, maker.price) {
            break;
        }
        if maker.amount > remaining {
            fills.push(Fill {
                maker,
                amount: remaining,
                exhausts_maker: false,
            });
            remaining = 0;
        } else {
            remaining -= maker.amount;
            let amount = maker.amount;
            fills.push(Fill {
                maker,
                amount,
                exhausts_maker: true,
            });
        }
    }
    Ok(MatchPlan { fills, remaining })
}
