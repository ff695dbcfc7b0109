//! Book command implementation
//!
//! Loads a trade request from a TOML file, validates and books it, and
//! prints the resulting version row and generated cashflows.

use std::path::Path;
use std::str::FromStr;

use engine_authz::{AuthorizationContext, Role};
use engine_core::TradeSpec;
use engine_lifecycle::{EngineConfig, TradeLifecycleManager, TradeStore};
use tracing::info;

use crate::seed::demo_store;
use crate::{CliError, Result};

/// Run the book command
pub fn run(trade_file: &str, as_user: &str, role: &str, config: EngineConfig) -> Result<()> {
    info!("Booking trade from {}", trade_file);

    if !Path::new(trade_file).exists() {
        return Err(CliError::FileNotFound(trade_file.to_string()));
    }
    let spec: TradeSpec = toml::from_str(&std::fs::read_to_string(trade_file)?)?;

    let role = Role::from_str(role)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let ctx = AuthorizationContext::new(as_user).with_role(role);

    let mut manager = TradeLifecycleManager::new(demo_store(), config);
    let trade = manager.create(spec, &ctx)?;

    println!(
        "Booked trade {} (version {}, status {})",
        trade.trade_id, trade.version, trade.status
    );
    for leg in &trade.legs {
        let flows = manager.store().cashflows_for_leg(leg.leg_id);
        println!(
            "  Leg {} ({}): {} cashflows",
            leg.leg_id,
            leg.kind.map(|k| k.name()).unwrap_or("?"),
            flows.len()
        );
        for flow in flows {
            println!("    {}  {}", flow.value_date, flow.payment_value);
        }
    }

    info!("Booking complete");
    Ok(())
}
