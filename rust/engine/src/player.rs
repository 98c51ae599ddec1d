use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::roles::RoleAssignment;

/// Player identifier, assigned by the lobby collaborator.
pub type PlayerId = u64;

/// Difficulty tier of a bot opponent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    /// Bounded random noise around the wager midpoint.
    Rookie,
    /// Expected-value search over the full wager range.
    Analyst,
    /// Bluff mixture of very-low, mid and surprise wagers.
    Trickster,
    /// Phase-aware strategy with a hard bankroll cap.
    Shark,
}

/// Cumulative per-player statistics. Never reset during a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub unique_wins: u32,
    pub total_wagered: u64,
    pub cards_played: u32,
    pub times_recovered: u32,
}

/// Seat description handed to `create_game` by the lobby collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
    pub bot: Option<BotDifficulty>,
}

impl Seat {
    pub fn human(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bot: None,
        }
    }

    pub fn bot(id: PlayerId, name: impl Into<String>, difficulty: BotDifficulty) -> Self {
        Self {
            id,
            name: name.into(),
            bot: Some(difficulty),
        }
    }
}

/// One player's in-game state. Coins are only ever touched through the
/// clamping helpers, so the `[0, coin_cap]` invariant holds by construction.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    coins: u64,
    pub points: u64,
    wager: Option<u64>,
    pub hand: Vec<Card>,
    pub role: Option<RoleAssignment>,
    pub stats: PlayerStats,
    on_break: bool,
    pub bot: Option<BotDifficulty>,
}

impl Player {
    pub fn new(seat: Seat, starting_coins: u64) -> Self {
        Self {
            id: seat.id,
            name: seat.name,
            coins: starting_coins,
            points: 0,
            wager: None,
            hand: Vec::new(),
            role: None,
            stats: PlayerStats::default(),
            on_break: false,
            bot: seat.bot,
        }
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn is_bot(&self) -> bool {
        self.bot.is_some()
    }

    /// Add coins, clamped to the cap.
    pub fn add_coins(&mut self, amount: u64, coin_cap: u64) {
        self.coins = self.coins.saturating_add(amount).min(coin_cap);
    }

    /// Remove coins, clamped at zero.
    pub fn remove_coins(&mut self, amount: u64) {
        self.coins = self.coins.saturating_sub(amount);
    }

    pub fn wager(&self) -> Option<u64> {
        self.wager
    }

    pub fn set_wager(&mut self, amount: u64) {
        self.wager = Some(amount);
    }

    pub fn clear_wager(&mut self) {
        self.wager = None;
    }

    pub fn on_break(&self) -> bool {
        self.on_break
    }

    /// Enter break mode; the player sits out the next betting window.
    pub fn enter_break(&mut self) {
        self.on_break = true;
    }

    /// Leave break mode, collecting the one-time recovery stipend.
    pub fn finish_break(&mut self, stipend: u64, coin_cap: u64) {
        self.on_break = false;
        self.add_coins(stipend, coin_cap);
        self.stats.times_recovered += 1;
    }

    /// A player participates in a turn when not on break and able to
    /// place at least some wager.
    pub fn is_active(&self) -> bool {
        !self.on_break && self.coins > 0
    }
}
