//! Validate command implementation
//!
//! Runs the validation pipeline over a trade file without booking it.

use std::path::Path;

use engine_core::TradeSpec;
use engine_lifecycle::{EngineConfig, TradeLifecycleManager};
use tracing::info;

use crate::seed::demo_store;
use crate::{CliError, Result};

/// Run the validate command
pub fn run(trade_file: &str, config: EngineConfig) -> Result<()> {
    info!("Validating trade file {}", trade_file);

    if !Path::new(trade_file).exists() {
        return Err(CliError::FileNotFound(trade_file.to_string()));
    }
    let spec: TradeSpec = toml::from_str(&std::fs::read_to_string(trade_file)?)?;

    let manager = TradeLifecycleManager::new(demo_store(), config);
    let result = manager.validate(&spec);

    if result.valid() {
        println!("Trade request is valid");
    } else {
        println!("Trade request is invalid:");
        for message in result.errors() {
            println!("  - {}", message);
        }
    }

    Ok(())
}
