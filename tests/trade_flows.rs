//! End-to-end trade flows through the public engine surface.

use fracpools::application::services::MarketService;
use fracpools::shared::errors::{AdminError, PoolError, TradeError};
use fracpools::shared::types::AccountId;
use fracpools::{
    FractionLedger, MarketEngine, MarketEvent, MemoryFractionLedger, MemorySettlementLedger,
    SettlementLedger, StaticAccessControl, WAD,
};

const CUSTODIAN: AccountId = AccountId(0);
const ADMIN: AccountId = AccountId(1);
const ALICE: AccountId = AccountId(100);
const BOB: AccountId = AccountId(101);

const ASSET: u64 = 1;

type Engine = MarketEngine<MemorySettlementLedger, MemoryFractionLedger, StaticAccessControl>;

fn market(total: u64, base_tokens: u64, exponent: u32) -> Engine {
    let mut settlement = MemorySettlementLedger::new();
    for account in [ALICE, BOB] {
        settlement.mint(account, 1_000_000 * WAD).unwrap();
        settlement.approve(account, CUSTODIAN, 1_000_000 * WAD);
    }
    let mut fractions = MemoryFractionLedger::new();
    fractions.mint(ASSET, ADMIN, total).unwrap();
    let access = StaticAccessControl::with_privileged([ADMIN]);
    let mut engine = MarketEngine::new(settlement, fractions, access, CUSTODIAN);
    engine
        .create_pool(ADMIN, ASSET, total, base_tokens as u128 * WAD, exponent)
        .unwrap();
    engine
}

#[test]
fn worked_pricing_scenario() {
    // 1000 fractions, base price 1, exponent 2
    let mut engine = market(1_000, 1, 2);

    // fully stocked: price is exactly the base price
    assert_eq!(engine.current_price(ASSET).unwrap(), WAD);

    // buying 500 prices at the pre-trade ratio of 1
    let cost = engine.buy(ALICE, ASSET, 500).unwrap();
    assert_eq!(cost, 500 * WAD);

    // the next query sees ratio 2, squared to 4
    assert_eq!(engine.current_price(ASSET).unwrap(), 4 * WAD);
}

#[test]
fn double_creation_is_rejected_and_harmless() {
    let mut engine = market(1_000, 1, 2);
    let err = engine.create_pool(ADMIN, ASSET, 1_000, WAD, 2).unwrap_err();
    assert!(matches!(
        err,
        AdminError::Pool(PoolError::AlreadyExists(ASSET))
    ));
    let pool = engine.get_pool(ASSET).unwrap();
    assert_eq!(pool.available_fractions, 1_000);
    assert_eq!(engine.fraction_ledger().balance_of(ASSET, CUSTODIAN), 1_000);
}

#[test]
fn overbuying_fails_without_any_transfer() {
    let mut engine = market(100, 1, 2);
    let alice_funds = engine.settlement().balance_of(ALICE);
    let err = engine.buy(ALICE, ASSET, 101).unwrap_err();
    assert!(matches!(err, TradeError::InsufficientInventory { .. }));
    assert_eq!(engine.settlement().balance_of(ALICE), alice_funds);
    assert_eq!(engine.settlement().balance_of(CUSTODIAN), 0);
    assert_eq!(engine.get_pool(ASSET).unwrap().available_fractions, 100);
}

#[test]
fn spread_favors_the_later_leg() {
    let mut engine = market(1_000, 1, 2);
    // give custody a float so the payout can be honored
    engine.buy(BOB, ASSET, 400).unwrap();

    let cost = engine.buy(ALICE, ASSET, 50).unwrap();
    let earnings = engine.sell(ALICE, ASSET, 50).unwrap();
    // no round trip: the sell leg prices the depleted pool
    assert!(earnings > cost);
    assert_ne!(earnings, cost);
}

#[test]
fn withdraw_beyond_custody_leaves_balance_unchanged() {
    let mut engine = market(1_000, 1, 2);
    engine.buy(ALICE, ASSET, 100).unwrap();
    let custody = engine.settlement().balance_of(CUSTODIAN);
    assert_eq!(
        engine.withdraw(ADMIN, custody + 1).unwrap_err(),
        AdminError::InsufficientFunds
    );
    assert_eq!(engine.settlement().balance_of(CUSTODIAN), custody);
}

#[test]
fn event_log_tracks_the_session() {
    let mut engine = market(1_000, 2, 1);
    engine.buy(ALICE, ASSET, 100).unwrap();
    engine.buy(BOB, ASSET, 50).unwrap();
    engine.sell(ALICE, ASSET, 30).unwrap();

    let events = engine.events();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0].event, MarketEvent::PoolCreated { .. }));
    assert!(matches!(
        events[1].event,
        MarketEvent::Traded {
            buyer: ALICE,
            fractions: 100,
            ..
        }
    ));
    assert!(matches!(
        events[2].event,
        MarketEvent::Traded {
            buyer: BOB,
            fractions: 50,
            ..
        }
    ));
    assert!(matches!(
        events[3].event,
        MarketEvent::Sold {
            seller: ALICE,
            fractions: 30,
            ..
        }
    ));
}

#[test]
fn emptied_pool_stays_queryable_but_unpriceable() {
    let mut engine = market(10, 1, 1);
    engine.buy(ALICE, ASSET, 10).unwrap();
    let pool = engine.get_pool(ASSET).unwrap();
    assert_eq!(pool.available_fractions, 0);
    assert!(engine.current_price(ASSET).is_err());
}

#[tokio::test]
async fn service_serializes_concurrent_traders() {
    let mut settlement = MemorySettlementLedger::new();
    for account in [ALICE, BOB] {
        settlement.mint(account, 1_000_000 * WAD).unwrap();
        settlement.approve(account, CUSTODIAN, 1_000_000 * WAD);
    }
    let mut fractions = MemoryFractionLedger::new();
    fractions.mint(ASSET, ADMIN, 1_000).unwrap();
    let access = StaticAccessControl::with_privileged([ADMIN]);
    let engine = MarketEngine::new(settlement, fractions, access, CUSTODIAN);

    let service = std::sync::Arc::new(MarketService::new(engine));
    service.create_pool(ADMIN, ASSET, 1_000, WAD, 2).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let svc = std::sync::Arc::clone(&service);
        handles.push(tokio::spawn(async move { svc.buy(ALICE, ASSET, 10).await }));
        let svc = std::sync::Arc::clone(&service);
        handles.push(tokio::spawn(async move { svc.buy(BOB, ASSET, 5).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let pool = service.get_pool(ASSET).await.unwrap();
    assert_eq!(pool.available_fractions, 1_000 - 10 * 10 - 10 * 5);
    assert_eq!(service.holder_fractions(ASSET, ALICE).await, 100);
    assert_eq!(service.holder_fractions(ASSET, BOB).await, 50);
    // escrow matches inventory after interleaved traffic
    assert_eq!(service.custodian_fractions(ASSET).await, pool.available_fractions);
}
