//! Configuration file handling: the CLI consumes the engine's
//! `GameOptions` directly, optionally overridden from a TOML file.

use solobid_engine::config::GameOptions;

use crate::error::CliError;

/// Load game options, applying a TOML override file when given. Missing
/// keys fall back to the defaults, so partial files are fine.
pub fn load_options(path: Option<&str>) -> Result<GameOptions, CliError> {
    let Some(path) = path else {
        return Ok(GameOptions::default());
    };
    let text = std::fs::read_to_string(path)?;
    let options: GameOptions =
        toml::from_str(&text).map_err(|e| CliError::Config(e.to_string()))?;
    options
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_yields_defaults() {
        let options = load_options(None).unwrap();
        assert_eq!(options, GameOptions::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_bet = 50\npoints_to_win = 5").unwrap();
        let options = load_options(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(options.max_bet, 50);
        assert_eq!(options.points_to_win, 5);
        assert_eq!(options.min_bet, GameOptions::default().min_bet);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_bet = 30\nmax_bet = 10").unwrap();
        let err = load_options(Some(file.path().to_str().unwrap())).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
