//! Query command implementation
//!
//! Parses an RSQL expression, translates it to a predicate, and runs it
//! over a small demo book.

use engine_lifecycle::TradeStore;
use engine_query::{parse_query, translate};
use tracing::info;

use crate::commands::demo::demo_book;
use crate::Result;

/// Run the query command
pub fn run(expression: &str, config: engine_lifecycle::EngineConfig) -> Result<()> {
    info!("Translating filter: {}", expression);

    let ast = parse_query(expression)?;
    let predicate = translate(&ast)?;

    let manager = demo_book(config)?;
    let mut hits = 0;
    for trade in manager.store().all_active() {
        if predicate.test(&trade) {
            hits += 1;
            println!(
                "{}  v{}  {}  {}  {}",
                trade.trade_id,
                trade.version,
                trade.status,
                trade.counterparty.name,
                trade.book.name
            );
        }
    }
    println!("{} matching trade(s)", hits);

    Ok(())
}
