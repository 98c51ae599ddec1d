//! # solobid-ai: Bot Opponents for the Unique-Wager Game
//!
//! Concrete bot strategies implementing the engine's decision contract
//! ([`solobid_engine::bot::BotDecider`]). One strategy type per
//! difficulty tier, each seeded with a generated personality and (for the
//! higher tiers) a rolling per-opponent history:
//!
//! - [`rookie::RookieBot`] - bounded noise around the wager midpoint
//! - [`analyst::AnalystBot`] - EV search over the full wager range
//! - [`trickster::TricksterBot`] - bluff mixture with rare surprises
//! - [`shark::SharkBot`] - phase-aware play under a hard bankroll cap
//!
//! ## Quick Start
//!
//! ```rust
//! use solobid_ai::create_bot;
//! use solobid_engine::bot::BetContext;
//! use solobid_engine::player::BotDifficulty;
//!
//! let mut bot = create_bot(7, BotDifficulty::Shark, 42);
//! let ctx = BetContext {
//!     turn: 1,
//!     max_turns: 20,
//!     min_bet: 1,
//!     max_bet: 25,
//!     coins: 100,
//!     points: 0,
//!     points_to_win: 10,
//!     event: None,
//!     opponents: &[],
//! };
//! let wager = bot.decide_wager(&ctx);
//! assert!((1..=25).contains(&wager));
//! ```
//!
//! The [`StrategyFactory`] plugs into
//! [`solobid_engine::registry::GameRegistry`], which owns the per-player
//! bot pool and releases it when a game ends.

use solobid_engine::bot::{BotDecider, BotFactory};
use solobid_engine::player::{BotDifficulty, PlayerId};

pub mod analyst;
pub mod cardplay;
pub mod profile;
pub mod rookie;
pub mod shark;
pub mod trickster;

pub use analyst::AnalystBot;
pub use rookie::RookieBot;
pub use shark::SharkBot;
pub use trickster::TricksterBot;

/// Create a bot instance for one seat.
///
/// The seed fixes the personality draw and every subsequent random
/// decision, so a seeded game with seeded bots replays identically.
pub fn create_bot(player: PlayerId, difficulty: BotDifficulty, seed: u64) -> Box<dyn BotDecider> {
    match difficulty {
        BotDifficulty::Rookie => Box::new(RookieBot::new(seed)),
        BotDifficulty::Analyst => Box::new(AnalystBot::new(player, seed)),
        BotDifficulty::Trickster => Box::new(TricksterBot::new(player, seed)),
        BotDifficulty::Shark => Box::new(SharkBot::new(player, seed)),
    }
}

/// [`BotFactory`] implementation handing [`create_bot`] to the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyFactory;

impl BotFactory for StrategyFactory {
    fn create(
        &self,
        player: PlayerId,
        difficulty: BotDifficulty,
        seed: u64,
    ) -> Box<dyn BotDecider> {
        create_bot(player, difficulty, seed)
    }
}
