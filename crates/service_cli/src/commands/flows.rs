//! Flows command implementation
//!
//! Generates the cashflow schedule for a single fixed leg.

use engine_core::{Date, LegId, LegSpec, TradeLeg};
use engine_lifecycle::{EngineConfig, TradeLifecycleManager};
use rust_decimal::Decimal;
use tracing::info;

use crate::seed::demo_store;
use crate::{CliError, Result};

/// Run the flows command
pub fn run(
    notional: &str,
    rate: &str,
    schedule: &str,
    start: &str,
    maturity: &str,
    config: EngineConfig,
) -> Result<()> {
    let notional: Decimal = notional
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("Invalid notional: {}", notional)))?;
    let rate: Decimal = rate
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("Invalid rate: {}", rate)))?;
    let start =
        Date::parse(start).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let maturity =
        Date::parse(maturity).map_err(|e| CliError::InvalidArgument(e.to_string()))?;

    info!("Generating cashflows: {} at {} {}", notional, rate, schedule);

    let mut spec = LegSpec::fixed(notional, rate);
    spec.schedule = Some(schedule.to_string());
    let leg = TradeLeg::from_spec(LegId::new(1), &spec);

    let manager = TradeLifecycleManager::new(demo_store(), config);
    let flows = manager.generate_cashflows(&leg, start, maturity)?;

    println!("{} cashflows from {} to {}:", flows.len(), start, maturity);
    for flow in &flows {
        println!("  {}  {}", flow.value_date, flow.payment_value);
    }

    Ok(())
}
