//! # matchbook-settlement
//!
//! Settlement plane for the matchbook engine: a per-user, per-asset balance
//! ledger and a settler that drains an exchange's trade queue.
//!
//! - **Decoupled**: matching emits trades into a queue; settlement pops them
//!   whenever it runs, in match order.
//! - **Two legs per trade**: base asset seller → buyer, quote asset
//!   buyer → seller, both valued at the maker's price.
//! - **Replay-safe**: a bounded window of settled sequence numbers rejects
//!   double-settlement.
//! - **Retryable**: a trade that fails its funds check stays queued and is
//!   not recorded anywhere.

pub mod ledger;
pub mod settler;
pub mod window;

pub use ledger::BalanceLedger;
pub use settler::TradeSettler;
pub use window::SettledWindow;
