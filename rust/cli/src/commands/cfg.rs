//! Cfg command handler: display the effective configuration.

use std::io::Write;

use crate::config::load_options;
use crate::error::CliError;

pub fn handle_cfg_command(config: Option<&str>, out: &mut dyn Write) -> Result<(), CliError> {
    let options = load_options(config)?;
    let text =
        toml::to_string_pretty(&options).map_err(|e| CliError::Config(e.to_string()))?;
    write!(out, "{}", text)?;
    Ok(())
}
