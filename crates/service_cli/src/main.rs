//! Tradebook CLI - Command Line Operations for the Trade Lifecycle Engine
//!
//! # Commands
//!
//! - `tradebook book --trade <file>` - Validate and book a trade from a TOML file
//! - `tradebook validate --trade <file>` - Run the validation pipeline only
//! - `tradebook flows --notional <n> --rate <r>` - Generate cashflows for one leg
//! - `tradebook query --expression <rsql>` - Filter the demo book with an RSQL expression
//! - `tradebook demo` - Walk a trade through its full lifecycle
//!
//! # Architecture
//!
//! As part of the **S**ervice layer in the E-I-S architecture, this crate
//! orchestrates the engine crates over the in-memory store to provide a
//! unified command-line interface.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod seed;

pub use error::{CliError, Result};

/// Trade lifecycle engine CLI
#[derive(Parser)]
#[command(name = "tradebook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Engine configuration file path
    #[arg(short, long, global = true, default_value = "engine.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and book a trade from a TOML file
    Book {
        /// Path to the trade request file (TOML)
        #[arg(short, long)]
        trade: String,

        /// Caller login
        #[arg(short = 'u', long, default_value = "jsmith")]
        as_user: String,

        /// Caller role (TRADER, SALES, MIDDLE_OFFICE, SUPPORT, SUPERUSER)
        #[arg(short, long, default_value = "TRADER")]
        role: String,
    },

    /// Run the validation pipeline over a trade file without booking it
    Validate {
        /// Path to the trade request file (TOML)
        #[arg(short, long)]
        trade: String,
    },

    /// Generate cashflows for a single leg
    Flows {
        /// Leg notional
        #[arg(short, long)]
        notional: String,

        /// Leg rate (percentage points or decimal fraction)
        #[arg(short, long)]
        rate: String,

        /// Payment schedule (Monthly, Quarterly, ..., or e.g. 12M)
        #[arg(short, long, default_value = "Quarterly")]
        schedule: String,

        /// Accrual start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Maturity date (YYYY-MM-DD)
        #[arg(long)]
        maturity: String,
    },

    /// Filter the demo book with an RSQL expression
    Query {
        /// Filter expression, e.g. counterparty.name==BigBank;version=ge=2
        #[arg(short, long)]
        expression: String,
    },

    /// Walk a trade through book, amend, terminate
    Demo,
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config =
        engine_lifecycle::EngineConfig::load_or_default(std::path::Path::new(&cli.config))
            .with_env_override();

    match cli.command {
        Commands::Book {
            trade,
            as_user,
            role,
        } => commands::book::run(&trade, &as_user, &role, config),
        Commands::Validate { trade } => commands::validate::run(&trade, config),
        Commands::Flows {
            notional,
            rate,
            schedule,
            start,
            maturity,
        } => commands::flows::run(&notional, &rate, &schedule, &start, &maturity, config),
        Commands::Query { expression } => commands::query::run(&expression, config),
        Commands::Demo => commands::demo::run(config),
    }
}
