//! The aggregate root for one trading pair.
//!
//! [`TradingPairExchange`] owns the level book, the bounds metadata, the
//! per-user indices, the trade queue and the order clock. Callers submit
//! decimal amounts and prices; everything past this boundary is fixed-point
//! integers. One instance serves exactly one pair, with its scaling and
//! tick size fixed at creation.

use rust_decimal::Decimal;

use matchbook_store::KeyValueStore;
use matchbook_types::{
    BookMetadata, MatchbookError, Order, OrderRequest, PairConfig, Result, Scale, Trade, UserId,
};

use crate::book::LevelBook;
use crate::bounds;
use crate::clock::LogicalClock;
use crate::matching::{self, Fill};
use crate::queue::TradeQueue;
use crate::scan::OrderScan;
use crate::users::UserIndex;

/// Order book, matcher and trade queue for a single trading pair.
#[derive(Debug)]
pub struct TradingPairExchange<S> {
    pair: String,
    scale: Scale,
    tick_size: i64,
    book: LevelBook<S>,
    users: UserIndex,
    trades: TradeQueue,
    clock: LogicalClock,
    next_trade_seq: u64,
}

impl<S: KeyValueStore> TradingPairExchange<S> {
    /// Create the exchange for `config`, initializing its book in `store`.
    ///
    /// The store must be empty; an exchange never adopts existing state.
    pub fn init(config: &PairConfig, store: S) -> Result<Self> {
        config.validate()?;
        let scale = config.scale()?;
        let tick_size = config.scaled_tick()?;
        let book = LevelBook::init(store, &BookMetadata::new(tick_size))?;
        tracing::info!(pair = %config.pair, tick_size, "Exchange initialized");
        Ok(Self {
            pair: config.pair.clone(),
            scale,
            tick_size,
            book,
            users: UserIndex::new(),
            trades: TradeQueue::new(),
            clock: LogicalClock::new(),
            next_trade_seq: 0,
        })
    }

    // =================================================================
    // Order intake
    // =================================================================

    /// Accept an order: match whatever crosses, rest the remainder.
    ///
    /// Returns the timestamp assigned to the order. Together with the user
    /// and side it identifies the order for a later cancel or deplete (the
    /// caller can also recover the full resting order from
    /// [`TradingPairExchange::pending_orders_for`]).
    pub fn add_order(&mut self, request: &OrderRequest) -> Result<i64> {
        let taker = self.admit(request)?;
        let mut meta = self.book.metadata()?;

        // Plan against a frozen book, then apply as a batch.
        let plan = matching::plan_match(&self.book, &meta, &taker)?;
        let mut meta_changed = false;
        for fill in &plan.fills {
            self.commit_fill(&taker, fill, &mut meta, &mut meta_changed)?;
        }

        // A fully matched taker never touches the book.
        if plan.remaining > 0 {
            let resting = Order {
                amount: plan.remaining,
                ..taker.clone()
            };
            self.book.insert(&resting)?;
            self.users.add_pending(resting);
            if bounds::widen_for_resting(&mut meta, taker.side, taker.price) {
                meta_changed = true;
            }
        }

        if meta_changed {
            self.book.set_metadata(&meta)?;
        }

        tracing::info!(
            pair = %self.pair,
            side = %taker.side,
            user = %taker.user,
            price = taker.price,
            amount = taker.amount,
            fills = plan.fills.len(),
            rested = plan.remaining,
            "Order accepted"
        );
        Ok(taker.timestamp)
    }

    /// Remove a resting order identified by `(timestamp, user, side)` at its
    /// price.
    pub fn cancel_order(&mut self, order: &Order) -> Result<()> {
        let remaining = self.book.remove(order)?;
        self.users.remove_pending(order);
        if remaining == 0 {
            let mut meta = self.book.metadata()?;
            if bounds::repair_after_removal(&self.book, &mut meta, order.side, order.price)? {
                self.book.set_metadata(&meta)?;
            }
            self.book.delete_level(order.price)?;
        }
        tracing::info!(
            pair = %self.pair,
            side = %order.side,
            user = %order.user,
            price = order.price,
            "Order cancelled"
        );
        Ok(())
    }

    /// Reduce a resting order's amount by a decimal `amount`, leaving it
    /// resting. Bounds never move on depletion.
    pub fn deplete_order(&mut self, order: &Order, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(MatchbookError::AmountNotPositive(amount));
        }
        let scaled = self.scale.amount_to_int(amount)?;
        if scaled < 1 {
            return Err(MatchbookError::ValueOutOfRange {
                value: amount,
                shift: self.scale.amount_shift(),
            });
        }
        self.book.deplete(order, scaled)?;
        self.users.deplete_pending(order, scaled);
        tracing::debug!(
            pair = %self.pair,
            user = %order.user,
            price = order.price,
            depleted = scaled,
            "Order depleted"
        );
        Ok(())
    }

    // =================================================================
    // Trade queue and history
    // =================================================================

    /// Pop the oldest unsettled trade, consuming it.
    pub fn pop_next_trade(&mut self) -> Option<Trade> {
        self.trades.pop_next()
    }

    /// The oldest unsettled trade, without consuming it.
    #[must_use]
    pub fn peek_next_trade(&self) -> Option<&Trade> {
        self.trades.peek()
    }

    #[must_use]
    pub fn trade_queue_len(&self) -> usize {
        self.trades.len()
    }

    /// Record a settled trade into both parties' histories.
    ///
    /// Each party's entry is their own side of the trade: the maker order
    /// and the re-priced taker order, both carrying the matched amount.
    pub fn add_trade_to_trade_history(&mut self, trade: &Trade) {
        self.users
            .record_history(&trade.maker_order.user, trade.maker_order.clone());
        self.users
            .record_history(&trade.taker_order.user, trade.taker_order.clone());
    }

    /// The user's matched-trade entries, newest first.
    #[must_use]
    pub fn trade_history_for(&self, user: &UserId) -> &[Order] {
        self.users.history_for(user)
    }

    /// The user's resting orders, newest first.
    #[must_use]
    pub fn pending_orders_for(&self, user: &UserId) -> &[Order] {
        self.users.pending_for(user)
    }

    // =================================================================
    // Book queries
    // =================================================================

    /// Every resting order, ascending by price, FIFO within a level.
    pub fn all_orders(&self) -> Result<Vec<Order>> {
        let meta = self.book.metadata()?;
        let mut all = Vec::new();
        // Bids first: a non-crossed book keeps every bid below every ask.
        for (lowest, highest) in [
            (meta.worst_bid, meta.best_bid),
            (meta.best_ask, meta.worst_ask),
        ] {
            let (Some(start), Some(end)) = (lowest, highest) else {
                continue;
            };
            for order in OrderScan::new(&self.book, start, end, meta.tick_size) {
                all.push(order?);
            }
        }
        Ok(all)
    }

    /// The current bounds and tick size.
    pub fn metadata(&self) -> Result<BookMetadata> {
        self.book.metadata()
    }

    #[must_use]
    pub fn pair(&self) -> &str {
        &self.pair
    }

    #[must_use]
    pub fn scale(&self) -> Scale {
        self.scale
    }

    #[must_use]
    pub fn tick_size(&self) -> i64 {
        self.tick_size
    }

    // =================================================================
    // Internals
    // =================================================================

    /// Validate a request and scale it into a timestamped book order.
    fn admit(&mut self, request: &OrderRequest) -> Result<Order> {
        if request.amount <= Decimal::ZERO {
            return Err(MatchbookError::AmountNotPositive(request.amount));
        }
        if request.price <= Decimal::ZERO {
            return Err(MatchbookError::PriceNotPositive(request.price));
        }
        let amount = self.scale.amount_to_int(request.amount)?;
        let price = self.scale.price_to_int(request.price)?;
        if amount < 1 {
            return Err(MatchbookError::ValueOutOfRange {
                value: request.amount,
                shift: self.scale.amount_shift(),
            });
        }
        if price < 1 {
            return Err(MatchbookError::ValueOutOfRange {
                value: request.price,
                shift: self.scale.price_shift(),
            });
        }
        // Off-grid prices would be invisible to the tick-stepping scans.
        if price % self.tick_size != 0 {
            return Err(MatchbookError::PriceOffTick {
                price,
                tick: self.tick_size,
            });
        }
        Ok(Order {
            side: request.side,
            amount,
            price,
            user: request.user.clone(),
            timestamp: self.clock.next(),
        })
    }

    /// Apply one planned fill: mutate the book, then queue the trade.
    fn commit_fill(
        &mut self,
        taker: &Order,
        fill: &Fill,
        meta: &mut BookMetadata,
        meta_changed: &mut bool,
    ) -> Result<()> {
        if fill.exhausts_maker {
            let remaining = self
                .book
                .remove(&fill.maker)
                .map_err(|err| Self::invariant_violation("matched maker not in book", &err))?;
            if !self.users.remove_pending(&fill.maker) {
                tracing::warn!(
                    user = %fill.maker.user,
                    price = fill.maker.price,
                    "Matched maker was missing from the pending index"
                );
            }
            if remaining == 0 {
                if bounds::repair_after_removal(&self.book, meta, fill.maker.side, fill.maker.price)? {
                    *meta_changed = true;
                }
                self.book.delete_level(fill.maker.price)?;
            }
        } else {
            self.book
                .deplete(&fill.maker, fill.amount)
                .map_err(|err| Self::invariant_violation("matched maker not depletable", &err))?;
            if !self.users.deplete_pending(&fill.maker, fill.amount) {
                tracing::warn!(
                    user = %fill.maker.user,
                    price = fill.maker.price,
                    "Depleted maker was missing from the pending index"
                );
            }
        }

        let trade = self.build_trade(taker, fill);
        tracing::debug!(
            seq = trade.seq,
            price = trade.price(),
            amount = trade.quantity(),
            maker = %trade.maker_order.user,
            taker = %trade.taker_order.user,
            "Trade matched"
        );
        self.trades.push(trade);
        Ok(())
    }

    /// Build the trade record for a fill. The maker's price is authoritative;
    /// the taker's copy is re-priced to it.
    fn build_trade(&mut self, taker: &Order, fill: &Fill) -> Trade {
        let maker_order = Order {
            amount: fill.amount,
            ..fill.maker.clone()
        };
        let taker_order = Order {
            side: taker.side,
            amount: fill.amount,
            price: fill.maker.price,
            user: taker.user.clone(),
            timestamp: taker.timestamp,
        };
        let seq = self.next_trade_seq;
        self.next_trade_seq += 1;
        Trade {
            maker_order,
            taker_order,
            timestamp: taker.timestamp,
            seq,
        }
    }

    /// The makers in a plan were just observed in the book; failing to
    /// consume one means the store was mutated underneath us.
    fn invariant_violation(context: &str, err: &MatchbookError) -> MatchbookError {
        tracing::error!(context, %err, "Book invariant violated while applying a match");
        MatchbookError::Internal(format!("{context}: {err}"))
    }
}
