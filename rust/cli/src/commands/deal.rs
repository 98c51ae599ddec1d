//! Deal command handler: run a single turn for inspection and print the
//! resolved result as JSON.

use std::io::Write;

use solobid_ai::StrategyFactory;
use solobid_engine::clock::VirtualClock;
use solobid_engine::config::GameOptions;
use solobid_engine::player::BotDifficulty;
use solobid_engine::registry::GameRegistry;

use crate::commands::seats_for;
use crate::config::load_options;
use crate::error::CliError;

pub fn handle_deal_command(
    seed: Option<u64>,
    config: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let options = GameOptions {
        seed,
        ..load_options(config)?
    };
    let tiers = [
        BotDifficulty::Rookie,
        BotDifficulty::Analyst,
        BotDifficulty::Trickster,
        BotDifficulty::Shark,
    ];
    let mut registry = GameRegistry::new(Box::new(StrategyFactory));
    let mut clock = VirtualClock::new();
    let id = registry
        .create_game(seats_for(&tiers), options, clock.now())
        .map_err(|e| CliError::Engine(e.to_string()))?;

    // One turn is at most seven phases.
    for _ in 0..10 {
        clock.advance(20_000);
        for (gid, token) in registry.due_games(clock.now()) {
            registry.advance_phase(gid, token, clock.now());
        }
        let game = registry
            .get_game(id)
            .ok_or_else(|| CliError::Engine("game vanished from the registry".to_string()))?;
        if !game.history.is_empty() {
            let text = serde_json::to_string_pretty(&game.history[0])
                .map_err(|e| CliError::Engine(e.to_string()))?;
            writeln!(out, "{}", text)?;
            return Ok(());
        }
    }
    Err(CliError::Engine(
        "turn did not resolve within the tick limit".to_string(),
    ))
}
