//! The bot decision contract. The orchestrator calls bots through
//! [`BotDecider`] at fixed phase-entry points; concrete strategies live in
//! the `solobid-ai` crate and are injected via [`BotFactory`], so tiers
//! are swappable without touching the orchestrator.

use std::collections::HashMap;

use crate::cards::{Card, CardId};
use crate::events::ActiveEvent;
use crate::player::{BotDifficulty, PlayerId};
use crate::snapshot::TurnResult;

/// Public information about one opponent, as a bot sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentView {
    pub id: PlayerId,
    pub points: u64,
    pub coins: u64,
    pub on_break: bool,
}

/// Everything a bot may consult when sizing a wager. Secret state of
/// other players (their current wagers, hands, roles) is deliberately
/// absent.
#[derive(Debug, Clone)]
pub struct BetContext<'a> {
    pub turn: u32,
    pub max_turns: u32,
    pub min_bet: u64,
    pub max_bet: u64,
    pub coins: u64,
    pub points: u64,
    pub points_to_win: u64,
    pub event: Option<ActiveEvent>,
    pub opponents: &'a [OpponentView],
}

impl BetContext<'_> {
    /// Largest wager this player can actually place.
    pub fn affordable_max(&self) -> u64 {
        self.max_bet.min(self.coins)
    }

    /// Midpoint of the currently affordable wager range.
    pub fn midpoint(&self) -> u64 {
        (self.min_bet + self.affordable_max()) / 2
    }

    /// Clamp a raw suggestion to `[min_bet, min(max_bet, coins)]`. When
    /// the player cannot even afford the minimum, the remaining coins are
    /// wagered instead.
    pub fn clamp(&self, suggestion: u64) -> u64 {
        let upper = self.affordable_max();
        if upper <= self.min_bet {
            upper
        } else {
            suggestion.clamp(self.min_bet, upper)
        }
    }
}

/// Context for one card-play decision. `playable` already reflects the
/// current phase's timing window.
#[derive(Debug, Clone)]
pub struct CardContext<'a> {
    pub playable: &'a [Card],
    pub wager: Option<u64>,
    pub coins: u64,
    pub points: u64,
    /// Whether this bot currently leads on points.
    pub leading: bool,
    /// The current points leader, used to target attack-style cards.
    pub leader: Option<PlayerId>,
    pub event: Option<ActiveEvent>,
    pub opponents: &'a [OpponentView],
}

/// A card the bot wants to play, with its target when required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardChoice {
    pub card: CardId,
    pub target: Option<PlayerId>,
}

/// Decision interface every bot tier implements.
pub trait BotDecider: Send {
    /// Suggest a raw wager; the orchestrator clamps it to the legal range.
    fn decide_wager(&mut self, ctx: &BetContext<'_>) -> u64;

    /// Pick at most one card to play this window, or `None` to hold.
    fn decide_card(&mut self, ctx: &CardContext<'_>) -> Option<CardChoice>;

    /// Observe a resolved turn; higher tiers feed opponent models here.
    fn observe_turn(&mut self, _result: &TurnResult) {}

    /// Strategy name, for logs and summaries.
    fn name(&self) -> &str;
}

/// Creates bot instances for the registry's per-player pool.
pub trait BotFactory {
    fn create(
        &self,
        player: PlayerId,
        difficulty: BotDifficulty,
        seed: u64,
    ) -> Box<dyn BotDecider>;
}

/// The registry's bot-instance pool, keyed by player identity.
pub type BotPool = HashMap<PlayerId, Box<dyn BotDecider>>;
