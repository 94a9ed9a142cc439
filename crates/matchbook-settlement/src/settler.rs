//! Drains an exchange's trade queue into the balance ledger.
//!
//! Settlement runs strictly after matching. For each trade the settler:
//! 1. Rejects replays via the [`SettledWindow`].
//! 2. Moves the traded quantity of the base asset seller → buyer.
//! 3. Moves `quantity × price` of the quote asset buyer → seller, valued at
//!    the maker's price.
//! 4. Pops the trade and commits it to both parties' histories.
//!
//! A trade that fails its funds check stays queued and reaches no history;
//! the operator can top up the ledger and retry.

use matchbook_engine::TradingPairExchange;
use matchbook_store::KeyValueStore;
use matchbook_types::constants::SETTLEMENT_DEDUP_CAPACITY;
use matchbook_types::{Asset, MatchbookError, Result, Scale, Trade};

use crate::ledger::BalanceLedger;
use crate::window::SettledWindow;

/// Settles trades for one trading pair against an in-memory ledger.
#[derive(Debug)]
pub struct TradeSettler {
    ledger: BalanceLedger,
    settled: SettledWindow,
    base: Asset,
    quote: Asset,
}

impl TradeSettler {
    /// Create a settler moving `base` and `quote` assets between traders.
    #[must_use]
    pub fn new(base: impl Into<Asset>, quote: impl Into<Asset>) -> Self {
        Self::with_dedup_capacity(base, quote, SETTLEMENT_DEDUP_CAPACITY)
    }

    /// As [`TradeSettler::new`], with an explicit replay-window size.
    #[must_use]
    pub fn with_dedup_capacity(
        base: impl Into<Asset>,
        quote: impl Into<Asset>,
        capacity: usize,
    ) -> Self {
        Self {
            ledger: BalanceLedger::new(),
            settled: SettledWindow::new(capacity),
            base: base.into(),
            quote: quote.into(),
        }
    }

    #[must_use]
    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    /// Mutable ledger access, for deposits and withdrawals.
    pub fn ledger_mut(&mut self) -> &mut BalanceLedger {
        &mut self.ledger
    }

    // =================================================================
    // Settlement
    // =================================================================

    /// Settle one trade: move both legs at the maker's price.
    ///
    /// `scale` converts the trade's fixed-point quantity and price back into
    /// ledger decimals. Fails without moving funds when the sequence was
    /// already settled or either party cannot cover their leg.
    pub fn settle_trade(&mut self, trade: &Trade, scale: Scale) -> Result<()> {
        if self.settled.is_settled(trade.seq) {
            return Err(MatchbookError::TradeAlreadySettled(trade.seq));
        }

        let quantity = scale.amount_to_decimal(trade.quantity());
        let quote_amount = scale.price_to_decimal(trade.price()) * quantity;
        let buyer = trade.buyer();
        let seller = trade.seller();

        // Base leg first. If the quote leg then fails, put the base back so
        // a funds error leaves both parties untouched.
        self.ledger.transfer(seller, buyer, &self.base, quantity)?;
        if let Err(err) = self
            .ledger
            .transfer(buyer, seller, &self.quote, quote_amount)
        {
            // The buyer just received exactly `quantity`, so this holds.
            self.ledger
                .transfer(buyer, seller, &self.base, quantity)
                .map_err(|undo| {
                    MatchbookError::Internal(format!("base leg unwind failed: {undo}"))
                })?;
            return Err(err);
        }

        // Marked only once both legs are through, so a failed settle stays
        // retryable.
        self.settled.mark_settled(trade.seq)
    }

    /// Settle the oldest queued trade and commit it to both parties'
    /// histories. Returns the settled sequence number, or `None` when the
    /// queue is empty.
    ///
    /// On error the trade stays at the head of the queue.
    pub fn settle_next<S: KeyValueStore>(
        &mut self,
        exchange: &mut TradingPairExchange<S>,
    ) -> Result<Option<u64>> {
        let Some(trade) = exchange.peek_next_trade() else {
            return Ok(None);
        };
        let trade = trade.clone();
        self.settle_trade(&trade, exchange.scale())?;
        exchange.pop_next_trade();
        exchange.add_trade_to_trade_history(&trade);
        tracing::info!(
            pair = exchange.pair(),
            seq = trade.seq,
            price = trade.price(),
            amount = trade.quantity(),
            buyer = %trade.buyer(),
            seller = %trade.seller(),
            "Trade settled"
        );
        Ok(Some(trade.seq))
    }

    /// Settle every queued trade in order. Returns how many were settled.
    ///
    /// Stops at the first failing trade, which stays queued.
    pub fn settle_all<S: KeyValueStore>(
        &mut self,
        exchange: &mut TradingPairExchange<S>,
    ) -> Result<usize> {
        let mut count = 0;
        while self.settle_next(exchange)?.is_some() {
            count += 1;
        }
        Ok(count)
    }
}
