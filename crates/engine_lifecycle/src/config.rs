//! Engine configuration management.
//!
//! Policy flags are loaded from a TOML file with environment variable
//! overrides. Every flag defaults to the historically observed behaviour,
//! so an absent file changes nothing.

use std::path::Path;

use engine_authz::AuthzConfig;
use engine_cashflow::CashflowConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine-wide policy flags.
///
/// ```toml
/// [cashflow]
/// force_final_stub_to_maturity = false
/// percentage_rate_heuristic = true
///
/// [authz]
/// ownerless_trade_trader_fallback = true
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cashflow generation flags.
    pub cashflow: CashflowConfig,
    /// Authorization flags.
    pub authz: AuthzConfig,
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads from the given path when it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Applies environment variable overrides
    /// (`ENGINE_FORCE_FINAL_STUB`, `ENGINE_RATE_HEURISTIC`,
    /// `ENGINE_OWNERLESS_FALLBACK`; values `true`/`false`).
    pub fn with_env_override(mut self) -> Self {
        if let Some(v) = env_flag("ENGINE_FORCE_FINAL_STUB") {
            self.cashflow.force_final_stub_to_maturity = v;
        }
        if let Some(v) = env_flag("ENGINE_RATE_HEURISTIC") {
            self.cashflow.percentage_rate_heuristic = v;
        }
        if let Some(v) = env_flag("ENGINE_OWNERLESS_FALLBACK") {
            self.authz.ownerless_trade_trader_fallback = v;
        }
        self
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok()?.trim().parse().ok()
}

/// Configuration error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in the config file.
    #[error("Parse error: {0}")]
    Parse(String),
}
