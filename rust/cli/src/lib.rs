//! # Solobid CLI Library
//!
//! Command-line front-end for the solobid game engine: runs bot-only
//! simulations against the virtual clock and inspects configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["solobid", "sim", "--seed", "42"];
//! let code = solobid_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Run bot-only games to completion and print results
//! - `deal`: Run a single turn for inspection
//! - `cfg`: Display the effective configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod ui;

use cli::{Commands, SolobidCli};
pub use error::CliError;

/// Parse arguments and dispatch to the matching subcommand handler.
///
/// Returns the process exit code: `0` for success (including `--help`
/// and `--version`), `2` for any error.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = match SolobidCli::try_parse_from(&argv) {
        Err(e) => {
            use clap::error::ErrorKind;
            // Help and version print to stdout and exit 0.
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = write!(out, "{}", e);
                    0
                }
                _ => {
                    let _ = write!(err, "{}", e);
                    2
                }
            };
        }
        Ok(cli) => cli,
    };

    let result = match parsed.command {
        Commands::Sim {
            games,
            seed,
            bots,
            config,
            json,
        } => commands::handle_sim_command(games, seed, &bots, config.as_deref(), json, out),
        Commands::Deal { seed, config } => {
            commands::handle_deal_command(seed, config.as_deref(), out)
        }
        Commands::Cfg { config } => commands::handle_cfg_command(config.as_deref(), out),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            2
        }
    }
}
