//! Integration test: matched trades flowing into settlement
//!
//! ADD → MATCH → SETTLE → HISTORY
//!
//! Drives the exchange and a `TradeSettler` together: the engine queues
//! trades, the settler drains them into the ledger and commits both
//! parties' histories.

use matchbook_engine::TradingPairExchange;
use matchbook_settlement::TradeSettler;
use matchbook_store::MemoryStore;
use matchbook_types::{MatchbookError, OrderRequest, PairConfig, Side, UserId};
use rust_decimal::Decimal;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

fn user(name: &str) -> UserId {
    UserId::new(name)
}

fn make_exchange() -> TradingPairExchange<MemoryStore> {
    let config = PairConfig::new("ETH/USDT", dec(1));
    TradingPairExchange::init(&config, MemoryStore::new()).unwrap()
}

fn make_settler() -> TradeSettler {
    TradeSettler::new("ETH", "USDT")
}

#[test]
fn matched_trade_settles_base_and_quote() {
    let mut exchange = make_exchange();
    let mut settler = make_settler();
    settler
        .ledger_mut()
        .deposit(&user("alice"), "ETH", dec(10))
        .unwrap();
    settler
        .ledger_mut()
        .deposit(&user("bob"), "USDT", dec(500))
        .unwrap();

    exchange
        .add_order(&OrderRequest::sell(dec(10), dec(50), "alice"))
        .unwrap();
    exchange
        .add_order(&OrderRequest::buy(dec(10), dec(50), "bob"))
        .unwrap();
    assert_eq!(exchange.trade_queue_len(), 1);

    let seq = settler.settle_next(&mut exchange).unwrap();
    assert_eq!(seq, Some(0));
    assert_eq!(exchange.trade_queue_len(), 0);

    let ledger = settler.ledger();
    assert_eq!(ledger.balance(&user("alice"), "ETH"), Decimal::ZERO);
    assert_eq!(ledger.balance(&user("alice"), "USDT"), dec(500));
    assert_eq!(ledger.balance(&user("bob"), "ETH"), dec(10));
    assert_eq!(ledger.balance(&user("bob"), "USDT"), Decimal::ZERO);

    // Each party sees their own side of the trade in history.
    let alice_entries = exchange.trade_history_for(&user("alice"));
    assert_eq!(alice_entries.len(), 1);
    assert_eq!(alice_entries[0].side, Side::Sell);
    let bob_entries = exchange.trade_history_for(&user("bob"));
    assert_eq!(bob_entries.len(), 1);
    assert_eq!(bob_entries[0].side, Side::Buy);

    // Nothing left to settle.
    assert_eq!(settler.settle_next(&mut exchange).unwrap(), None);
}

#[test]
fn settle_all_drains_the_queue_in_match_order() {
    let mut exchange = make_exchange();
    let mut settler = make_settler();
    settler
        .ledger_mut()
        .deposit(&user("alice"), "ETH", dec(4))
        .unwrap();
    settler
        .ledger_mut()
        .deposit(&user("carol"), "ETH", dec(3))
        .unwrap();
    settler
        .ledger_mut()
        .deposit(&user("bob"), "USDT", dec(380))
        .unwrap();

    exchange
        .add_order(&OrderRequest::sell(dec(4), dec(50), "alice"))
        .unwrap();
    exchange
        .add_order(&OrderRequest::sell(dec(3), dec(60), "carol"))
        .unwrap();
    exchange
        .add_order(&OrderRequest::buy(dec(7), dec(60), "bob"))
        .unwrap();
    assert_eq!(exchange.trade_queue_len(), 2);

    let settled = settler.settle_all(&mut exchange).unwrap();
    assert_eq!(settled, 2);
    assert_eq!(exchange.trade_queue_len(), 0);

    // 4 * 50 + 3 * 60 = 380, exactly bob's quote deposit.
    let ledger = settler.ledger();
    assert_eq!(ledger.balance(&user("bob"), "ETH"), dec(7));
    assert_eq!(ledger.balance(&user("bob"), "USDT"), Decimal::ZERO);
    assert_eq!(ledger.balance(&user("alice"), "USDT"), dec(200));
    assert_eq!(ledger.balance(&user("carol"), "USDT"), dec(180));

    // History is newest first: the 60-level trade settled last.
    let bob_entries = exchange.trade_history_for(&user("bob"));
    assert_eq!(bob_entries.len(), 2);
    assert_eq!(bob_entries[0].price, 60);
    assert_eq!(bob_entries[1].price, 50);
}

#[test]
fn underfunded_trade_stays_queued_and_unrecorded() {
    let mut exchange = make_exchange();
    let mut settler = make_settler();
    settler
        .ledger_mut()
        .deposit(&user("alice"), "ETH", dec(10))
        .unwrap();
    // Bob holds no USDT yet.

    exchange
        .add_order(&OrderRequest::sell(dec(10), dec(50), "alice"))
        .unwrap();
    exchange
        .add_order(&OrderRequest::buy(dec(10), dec(50), "bob"))
        .unwrap();

    let err = settler.settle_next(&mut exchange).unwrap_err();
    assert!(matches!(err, MatchbookError::InsufficientBalance { .. }));

    // The trade stays queued, no history is written, no funds move.
    assert_eq!(exchange.trade_queue_len(), 1);
    assert!(exchange.trade_history_for(&user("alice")).is_empty());
    assert!(exchange.trade_history_for(&user("bob")).is_empty());
    assert_eq!(settler.ledger().balance(&user("alice"), "ETH"), dec(10));

    // Fund the buyer and retry.
    settler
        .ledger_mut()
        .deposit(&user("bob"), "USDT", dec(500))
        .unwrap();
    assert_eq!(settler.settle_next(&mut exchange).unwrap(), Some(0));
    assert_eq!(exchange.trade_queue_len(), 0);
    assert_eq!(settler.ledger().balance(&user("bob"), "ETH"), dec(10));
}

#[test]
fn replayed_trade_is_rejected() {
    let mut exchange = make_exchange();
    let mut settler = make_settler();
    settler
        .ledger_mut()
        .deposit(&user("alice"), "ETH", dec(1))
        .unwrap();
    settler
        .ledger_mut()
        .deposit(&user("bob"), "USDT", dec(100))
        .unwrap();

    exchange
        .add_order(&OrderRequest::sell(dec(1), dec(50), "alice"))
        .unwrap();
    exchange
        .add_order(&OrderRequest::buy(dec(1), dec(50), "bob"))
        .unwrap();

    let trade = exchange.peek_next_trade().unwrap().clone();
    settler.settle_next(&mut exchange).unwrap();

    // Re-presenting the settled trade out of band is blocked.
    let err = settler.settle_trade(&trade, exchange.scale()).unwrap_err();
    assert!(matches!(err, MatchbookError::TradeAlreadySettled(0)));
    // Balances moved exactly once.
    assert_eq!(settler.ledger().balance(&user("bob"), "ETH"), dec(1));
    assert_eq!(settler.ledger().balance(&user("alice"), "USDT"), dec(50));
}

#[test]
fn settlement_preserves_total_supply() {
    let mut exchange = make_exchange();
    let mut settler = make_settler();
    for name in ["alice", "bob", "carol"] {
        settler
            .ledger_mut()
            .deposit(&user(name), "ETH", dec(20))
            .unwrap();
        settler
            .ledger_mut()
            .deposit(&user(name), "USDT", dec(1_000))
            .unwrap();
    }
    assert_eq!(settler.ledger().total_supply("ETH"), dec(60));
    assert_eq!(settler.ledger().total_supply("USDT"), dec(3_000));

    exchange
        .add_order(&OrderRequest::sell(dec(5), dec(50), "alice"))
        .unwrap();
    exchange
        .add_order(&OrderRequest::sell(dec(5), dec(55), "bob"))
        .unwrap();
    exchange
        .add_order(&OrderRequest::buy(dec(8), dec(55), "carol"))
        .unwrap();
    exchange
        .add_order(&OrderRequest::buy(dec(2), dec(55), "alice"))
        .unwrap();

    let settled = settler.settle_all(&mut exchange).unwrap();
    assert_eq!(settled, 3);

    // Value moved between users; none was created or destroyed.
    assert_eq!(settler.ledger().total_supply("ETH"), dec(60));
    assert_eq!(settler.ledger().total_supply("USDT"), dec(3_000));
}

#[test]
fn history_entries_record_the_execution_price() {
    let mut exchange = make_exchange();
    let mut settler = make_settler();
    settler
        .ledger_mut()
        .deposit(&user("alice"), "ETH", dec(3))
        .unwrap();
    settler
        .ledger_mut()
        .deposit(&user("bob"), "USDT", dec(300))
        .unwrap();

    exchange
        .add_order(&OrderRequest::sell(dec(3), dec(50), "alice"))
        .unwrap();
    // Bob bids 60 but executes at the resting 50.
    exchange
        .add_order(&OrderRequest::buy(dec(3), dec(60), "bob"))
        .unwrap();

    settler.settle_all(&mut exchange).unwrap();

    let bob_entries = exchange.trade_history_for(&user("bob"));
    assert_eq!(bob_entries[0].price, 50);
    assert_eq!(bob_entries[0].amount, 3);
    // The quote leg moved at 50, not at bob's limit.
    assert_eq!(settler.ledger().balance(&user("bob"), "USDT"), dec(150));
    assert_eq!(settler.ledger().balance(&user("alice"), "USDT"), dec(150));
}

#[test]
fn decimal_pair_settles_in_exact_decimals() {
    // Two price digits, three amount digits, one-cent tick.
    let config = PairConfig::new("ETH/USDT", Decimal::new(1, 2)).with_shifts(2, 3);
    let mut exchange = TradingPairExchange::init(&config, MemoryStore::new()).unwrap();
    let mut settler = make_settler();
    settler
        .ledger_mut()
        .deposit(&user("alice"), "ETH", dec(2))
        .unwrap();
    settler
        .ledger_mut()
        .deposit(&user("bob"), "USDT", dec(200))
        .unwrap();

    exchange
        .add_order(&OrderRequest::sell(
            Decimal::new(1500, 3),   // 1.500
            Decimal::new(10_199, 2), // 101.99
            "alice",
        ))
        .unwrap();
    exchange
        .add_order(&OrderRequest::buy(
            Decimal::new(1500, 3),
            Decimal::new(10_199, 2),
            "bob",
        ))
        .unwrap();

    settler.settle_all(&mut exchange).unwrap();

    // 1.5 ETH at 101.99 is 152.985 USDT.
    let ledger = settler.ledger();
    assert_eq!(ledger.balance(&user("bob"), "ETH"), Decimal::new(15, 1));
    assert_eq!(ledger.balance(&user("bob"), "USDT"), Decimal::new(47_015, 3));
    assert_eq!(ledger.balance(&user("alice"), "ETH"), Decimal::new(5, 1));
    assert_eq!(ledger.balance(&user("alice"), "USDT"), Decimal::new(152_985, 3));
}
