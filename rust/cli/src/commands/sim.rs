//! Simulation command handler: run bot-only games to completion against
//! the virtual clock and report per-turn results and final standings.

use std::io::Write;

use solobid_ai::StrategyFactory;
use solobid_engine::clock::VirtualClock;
use solobid_engine::config::GameOptions;
use solobid_engine::game::Game;
use solobid_engine::registry::GameRegistry;
use solobid_engine::snapshot::{self, TurnResult};
use tracing::info;

use crate::commands::{parse_tiers, seats_for};
use crate::config::load_options;
use crate::error::CliError;

/// Handle the sim command.
///
/// Each game gets its own registry and virtual clock; game `i` of a
/// seeded batch runs with `seed + i` so batches are reproducible.
pub fn handle_sim_command(
    games: u64,
    seed: Option<u64>,
    bots: &[String],
    config: Option<&str>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    let base = load_options(config)?;
    let tiers = parse_tiers(bots)?;
    if tiers.len() < 2 {
        return Err(CliError::InvalidInput(
            "at least two bots are required".to_string(),
        ));
    }
    if tiers.len() > base.max_players {
        return Err(CliError::InvalidInput(format!(
            "at most {} bots fit this table",
            base.max_players
        )));
    }

    for index in 0..games {
        let options = GameOptions {
            seed: seed.map(|s| s.wrapping_add(index)),
            ..base.clone()
        };
        writeln!(out, "=== game {} ===", index + 1)?;
        run_one(options, &tiers, json, out)?;
    }
    Ok(())
}

fn run_one(
    options: GameOptions,
    tiers: &[solobid_engine::player::BotDifficulty],
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut registry = GameRegistry::new(Box::new(StrategyFactory));
    let mut clock = VirtualClock::new();
    // Every phase is shorter than this tick, so each tick fires one phase.
    let tick_ms = 20_000;
    let max_ticks = (u64::from(options.max_turns) + 2) * 10;

    let id = registry
        .create_game(seats_for(tiers), options, clock.now())
        .map_err(|e| CliError::Engine(e.to_string()))?;

    let mut reported = 0usize;
    for _ in 0..max_ticks {
        clock.advance(tick_ms);
        for (gid, token) in registry.due_games(clock.now()) {
            registry.advance_phase(gid, token, clock.now());
        }
        let game = registry
            .get_game(id)
            .ok_or_else(|| CliError::Engine("game vanished from the registry".to_string()))?;
        while reported < game.history.len() {
            print_turn(out, game, &game.history[reported])?;
            reported += 1;
        }
        if game.is_finished() {
            break;
        }
    }

    let game = registry
        .get_game(id)
        .ok_or_else(|| CliError::Engine("game vanished from the registry".to_string()))?;
    if !game.is_finished() {
        return Err(CliError::Engine(
            "game did not finish within the tick limit".to_string(),
        ));
    }
    info!(game = id, turns = game.history.len(), "simulation finished");

    writeln!(out, "Final ranking:")?;
    for standing in snapshot::final_ranking(game) {
        writeln!(
            out,
            "  {}. {} - {} pts, {} coins, {} unique wins",
            standing.rank, standing.name, standing.points, standing.coins, standing.unique_wins
        )?;
    }
    if json {
        let snap = registry
            .snapshot(id)
            .ok_or_else(|| CliError::Engine("game vanished from the registry".to_string()))?;
        let game = registry.get_game(id).expect("snapshot existed");
        let report = serde_json::json!({
            "snapshot": snap,
            "summaries": snapshot::summaries(game),
        });
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::Engine(e.to_string()))?;
        writeln!(out, "{}", text)?;
    }
    Ok(())
}

fn print_turn(out: &mut dyn Write, game: &Game, result: &TurnResult) -> Result<(), CliError> {
    let name = |id: u64| {
        game.player(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("#{id}"))
    };
    let bets: Vec<String> = result
        .bets
        .iter()
        .map(|b| {
            if b.raw == b.effective {
                format!("{}={}", name(b.player), b.raw)
            } else {
                format!("{}={}({})", name(b.player), b.raw, b.effective)
            }
        })
        .collect();
    let winner = match &result.winners[..] {
        [] => "no winner".to_string(),
        [single] => name(*single),
        many => many.iter().map(|&w| name(w)).collect::<Vec<_>>().join("+"),
    };
    let event = result
        .event
        .map(|e| format!(" [{}]", e.kind.spec().name))
        .unwrap_or_default();
    writeln!(
        out,
        "turn {:>2}{}: {} -> {}",
        result.turn,
        event,
        bets.join(" "),
        winner
    )?;
    Ok(())
}
