//! # matchbook-engine
//!
//! **Single-pair limit order book with price-time matching.**
//!
//! The engine owns one pair's book, matches incoming orders against resting
//! liquidity and queues the resulting trades for the settlement collaborator
//! to drain. It is:
//!
//! - **Synchronous**: every call commits its store writes before returning
//! - **Fixed-point**: decimals stop at the API boundary; the book holds
//!   scaled integers end to end
//! - **Two-phase**: a matching scan runs against a frozen book and records a
//!   plan; removals and depletions apply afterwards as a batch
//!
//! [`TradingPairExchange`] is the entry point; everything else backs it.

pub mod book;
pub mod bounds;
pub mod clock;
pub mod exchange;
pub mod matching;
pub mod queue;
pub mod scan;
pub mod users;

pub use book::LevelBook;
pub use clock::LogicalClock;
pub use exchange::TradingPairExchange;
pub use matching::{Fill, MatchPlan, crosses, plan_match};
pub use queue::TradeQueue;
pub use scan::{OrderScan, TickRange};
pub use users::UserIndex;
