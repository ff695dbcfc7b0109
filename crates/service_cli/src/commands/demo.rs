//! Demo command implementation
//!
//! Walks trades through the full lifecycle against the in-memory store:
//! book two trades, amend one, terminate the other, then show the
//! ownership-scoped views.

use engine_authz::{AuthorizationContext, Role};
use engine_core::{Date, EntityRef, LegSpec, PayReceive, TradeSpec};
use engine_lifecycle::{EngineConfig, TradeLifecycleManager};
use infra_store::InMemoryStore;
use rust_decimal::Decimal;
use tracing::info;

use crate::seed::demo_store;
use crate::Result;

/// Books a small demo book: one amended trade for jsmith, one trade for
/// jdoe. Shared with the query command.
pub(crate) fn demo_book(
    config: EngineConfig,
) -> Result<TradeLifecycleManager<InMemoryStore>> {
    let mut manager = TradeLifecycleManager::new(demo_store(), config);

    let jsmith = AuthorizationContext::new("jsmith").with_role(Role::Trader);
    let jdoe = AuthorizationContext::new("jdoe").with_role(Role::Trader);

    let first = manager.create(demo_spec("jsmith", "BigBank", "RATES-1"), &jsmith)?;
    manager.amend(
        first.trade_id,
        demo_spec("jsmith", "BigBank", "RATES-1"),
        &jsmith,
    )?;
    manager.create(
        demo_spec("jdoe", "Countermark Capital", "RATES-2"),
        &jdoe,
    )?;

    Ok(manager)
}

fn demo_spec(owner: &str, counterparty: &str, book: &str) -> TradeSpec {
    let today = Date::today();
    let maturity = today.add_months(12).expect("twelve months ahead");

    let mut fixed = LegSpec::fixed(Decimal::from(10_000_000), "3.5".parse().expect("rate"));
    fixed.pay_receive = Some(PayReceive::Pay);
    fixed.maturity_date = Some(maturity);
    fixed.schedule = Some("Quarterly".into());
    let mut floating = LegSpec::floating(Decimal::from(10_000_000), "SONIA");
    floating.pay_receive = Some(PayReceive::Receive);
    floating.maturity_date = Some(maturity);
    floating.schedule = Some("Quarterly".into());

    TradeSpec {
        trade_date: Some(today),
        start_date: Some(today),
        maturity_date: Some(maturity),
        book: EntityRef::by_name(book),
        counterparty: EntityRef::by_name(counterparty),
        trader: EntityRef::by_name(owner),
        settlement_instructions: Some("Pay agent: Citi London, ref 42".into()),
        legs: vec![fixed, floating],
        ..Default::default()
    }
}

/// Run the demo command
pub fn run(config: EngineConfig) -> Result<()> {
    info!("Running lifecycle demo");

    let mut manager = demo_book(config)?;

    let jsmith = AuthorizationContext::new("jsmith").with_role(Role::Trader);
    let jdoe = AuthorizationContext::new("jdoe").with_role(Role::Trader);
    let support = AuthorizationContext::new("ops").with_role(Role::Support);

    println!("Active trades by caller:");
    for (label, ctx) in [("jsmith", &jsmith), ("jdoe", &jdoe), ("support", &support)] {
        let trades = manager.list_trades(ctx);
        println!("  {} sees {} trade(s)", label, trades.len());
        for trade in trades {
            println!(
                "    {}  v{}  {}  {} / {}",
                trade.trade_id,
                trade.version,
                trade.status,
                trade.counterparty.name,
                trade.book.name
            );
        }
    }

    // Terminate jdoe's trade and show the status change.
    let jdoe_trades = manager.list_trades(&jdoe);
    if let Some(trade) = jdoe_trades.first() {
        let terminated = manager.terminate(trade.trade_id, &jdoe)?;
        println!(
            "Terminated trade {} (still version {}, status {})",
            terminated.trade_id, terminated.version, terminated.status
        );
    }

    info!("Demo complete");
    Ok(())
}
