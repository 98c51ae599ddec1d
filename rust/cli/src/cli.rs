//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "solobid",
    version,
    about = "Simulator for the unique-highest-wager betting game"
)]
pub struct SolobidCli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run bot-only games to completion and print per-turn results
    Sim {
        /// Number of games to simulate
        #[arg(long, default_value_t = 1)]
        games: u64,
        /// Base RNG seed (game i uses seed + i)
        #[arg(long)]
        seed: Option<u64>,
        /// Comma-separated bot tiers seated at the table
        #[arg(long, value_delimiter = ',', default_value = "rookie,analyst,trickster,shark")]
        bots: Vec<String>,
        /// TOML file overriding the default game options
        #[arg(long)]
        config: Option<String>,
        /// Print the final snapshot and summaries as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run a single turn and print the resolved result
    Deal {
        /// RNG seed for a reproducible turn
        #[arg(long)]
        seed: Option<u64>,
        /// TOML file overriding the default game options
        #[arg(long)]
        config: Option<String>,
    },
    /// Show the effective configuration
    Cfg {
        /// TOML file overriding the default game options
        #[arg(long)]
        config: Option<String>,
    },
}
