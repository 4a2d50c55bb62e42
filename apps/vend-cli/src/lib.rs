//! # Vend CLI Library
//!
//! Argument parsing, logging setup and command dispatch for the `vend`
//! binary.
//!
//! ## Module Organization
//! ```text
//! vend_cli/
//! ├── lib.rs          ◄─── You are here (CLI definition & run)
//! ├── config.rs       ◄─── vend.toml + VEND_* environment
//! ├── console.rs      ◄─── Interactive purchase loop
//! ├── report.rs       ◄─── Human-readable till / stock / change lines
//! └── commands/
//!     ├── mod.rs      ◄─── Shared store helpers
//!     ├── session.rs  ◄─── run
//!     ├── change.rs   ◄─── change
//!     └── inventory.rs◄─── till, stock, deposit
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vend_core::Denomination;

use config::VendConfig;

/// Log filter when neither `RUST_LOG` nor `-v` is given.
const DEFAULT_LOG_FILTER: &str = "warn,vend=info";

#[derive(Debug, Parser)]
#[command(
    name = "vend",
    about = "Vending machine with exact-change payout",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: platform config dir / vend.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding Currency.txt and Stock.txt
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an interactive purchase session (default)
    Run,

    /// Compute change for an amount against the stored till
    Change {
        /// Amount to pay out
        #[arg(allow_negative_numbers = true)]
        amount: i64,

        /// Take the coins out of the stored till
        #[arg(long)]
        commit: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the coins and notes in the till
    Till {
        #[arg(long)]
        json: bool,
    },

    /// Show the products and their stock
    Stock {
        #[arg(long)]
        json: bool,
    },

    /// Load coins or notes into the till
    Deposit {
        /// Face value, e.g. 5
        denomination: Denomination,

        /// Number of pieces
        #[arg(default_value_t = 1)]
        count: u32,
    },
}

/// Parses the command line and runs the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = VendConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }
    debug!(?config, "Configuration loaded");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::session::run(&config),
        Commands::Change {
            amount,
            commit,
            json,
        } => commands::change::run(&config, amount, commit, json),
        Commands::Till { json } => commands::inventory::till(&config, json),
        Commands::Stock { json } => commands::inventory::stock(&config, json),
        Commands::Deposit {
            denomination,
            count,
        } => commands::inventory::deposit(&config, denomination, count),
    }
}

/// Initializes the tracing subscriber on stderr, leaving stdout to the
/// console session.
///
/// ## Log Levels
/// - `RUST_LOG=vend_core=debug` - Solver and till details
/// - `-v` - Debug for everything
/// - Default: warnings, plus info from the vend crates
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_run() {
        let cli = Cli::try_parse_from(["vend"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_change_arguments() {
        let cli =
            Cli::try_parse_from(["vend", "--data-dir", "/tmp/m", "change", "28", "--json"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/m")));
        match cli.command {
            Some(Commands::Change {
                amount,
                commit,
                json,
            }) => {
                assert_eq!(amount, 28);
                assert!(!commit);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_negative_amount_reaches_solver() {
        let cli = Cli::try_parse_from(["vend", "change", "-5"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Change { amount: -5, .. })));
    }

    #[test]
    fn test_deposit_rejects_zero_denomination() {
        assert!(Cli::try_parse_from(["vend", "deposit", "0"]).is_err());

        let cli = Cli::try_parse_from(["vend", "deposit", "10", "4"]).unwrap();
        match cli.command {
            Some(Commands::Deposit {
                denomination,
                count,
            }) => {
                assert_eq!(denomination.value(), 10);
                assert_eq!(count, 4);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
