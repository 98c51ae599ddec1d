//! Bot personality generation and the rolling per-opponent history that
//! higher tiers build their models from.

use std::collections::{HashMap, VecDeque};

use rand::Rng;
use solobid_engine::cards::CardCategory;
use solobid_engine::events::{ActiveEvent, EventKind};
use solobid_engine::player::{BotDifficulty, PlayerId};
use solobid_engine::snapshot::TurnResult;

/// How many recent wagers per opponent the memory keeps.
pub const HISTORY_WINDOW: usize = 10;

/// A bot's fixed temperament, drawn once from its seeded RNG. Ranges are
/// tiered by difficulty so a shark is never as jumpy as a rookie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Personality {
    /// Pull toward larger wagers and flashier plays (0..1).
    pub aggression: f64,
    /// Reluctance to stake a large share of the bankroll (0..1).
    pub risk_aversion: f64,
    /// Card category this bot favors when scores are close.
    pub preferred: CardCategory,
    /// How strongly consecutive losses widen its randomness (0..1).
    pub tilt: f64,
    /// Chance-like tendency to echo the last winning wager (0..1).
    pub copycat: f64,
}

impl Personality {
    pub fn seeded<R: Rng>(difficulty: BotDifficulty, rng: &mut R) -> Self {
        let (aggression, risk_aversion, tilt, copycat) = match difficulty {
            BotDifficulty::Rookie => (
                rng.random_range(0.2..0.8),
                rng.random_range(0.2..0.8),
                rng.random_range(0.4..0.9),
                rng.random_range(0.2..0.6),
            ),
            BotDifficulty::Analyst => (
                rng.random_range(0.3..0.6),
                rng.random_range(0.4..0.8),
                rng.random_range(0.2..0.5),
                rng.random_range(0.1..0.3),
            ),
            BotDifficulty::Trickster => (
                rng.random_range(0.5..0.9),
                rng.random_range(0.1..0.4),
                rng.random_range(0.3..0.7),
                rng.random_range(0.1..0.4),
            ),
            BotDifficulty::Shark => (
                rng.random_range(0.4..0.8),
                rng.random_range(0.5..0.9),
                rng.random_range(0.0..0.3),
                rng.random_range(0.0..0.2),
            ),
        };
        let preferred = match rng.random_range(0..4u8) {
            0 => CardCategory::Boost,
            1 => CardCategory::Defense,
            2 => CardCategory::Deception,
            _ => CardCategory::Attack,
        };
        Self {
            aggression,
            risk_aversion,
            preferred,
            tilt,
            copycat,
        }
    }
}

/// Rolling memory about one opponent.
#[derive(Debug, Clone, Default)]
pub struct OpponentMemory {
    recent: VecDeque<u64>,
    pub wins: u32,
    pub losses: u32,
}

impl OpponentMemory {
    fn record(&mut self, wager: u64, won: bool) {
        if self.recent.len() == HISTORY_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(wager);
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    pub fn recent(&self) -> impl Iterator<Item = u64> + '_ {
        self.recent.iter().copied()
    }

    /// Running average of the remembered wagers.
    pub fn average(&self) -> Option<f64> {
        if self.recent.is_empty() {
            None
        } else {
            Some(self.recent.iter().sum::<u64>() as f64 / self.recent.len() as f64)
        }
    }
}

/// Everything a bot remembers across turns: per-opponent wager history
/// plus its own loss streak and the last wager that won a turn.
#[derive(Debug, Clone)]
pub struct History {
    me: PlayerId,
    opponents: HashMap<PlayerId, OpponentMemory>,
    pub consecutive_losses: u32,
    pub last_winning_wager: Option<u64>,
}

impl History {
    pub fn new(me: PlayerId) -> Self {
        Self {
            me,
            opponents: HashMap::new(),
            consecutive_losses: 0,
            last_winning_wager: None,
        }
    }

    pub fn observe(&mut self, result: &TurnResult) {
        for bet in &result.bets {
            let won = result.winners.contains(&bet.player);
            if bet.player == self.me {
                if won {
                    self.consecutive_losses = 0;
                } else {
                    self.consecutive_losses += 1;
                }
            } else {
                self.opponents
                    .entry(bet.player)
                    .or_default()
                    .record(bet.raw, won);
            }
        }
        if let Some(primary) = result.primary_winner {
            self.last_winning_wager = result
                .bets
                .iter()
                .find(|b| b.player == primary)
                .map(|b| b.raw);
        }
    }

    pub fn opponent(&self, id: PlayerId) -> Option<&OpponentMemory> {
        self.opponents.get(&id)
    }

    /// Fraction of all remembered opponent wagers equal to `value`.
    pub fn frequency_of(&self, value: u64) -> f64 {
        let mut total = 0usize;
        let mut hits = 0usize;
        for memory in self.opponents.values() {
            for w in memory.recent() {
                total += 1;
                if w == value {
                    hits += 1;
                }
            }
        }
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Empirical probability that `value` stays unique against the
    /// remembered opponents: a blend of the uninformed pick chance over
    /// the wager range and the observed frequency, raised to the number
    /// of modeled opponents.
    pub fn uniqueness_probability(&self, value: u64, range_width: u64) -> f64 {
        let opponents = self.opponents.len().max(1) as f64;
        let uninformed = 1.0 / range_width.max(1) as f64;
        let pick_chance = (uninformed + self.frequency_of(value)) / 2.0;
        (1.0 - pick_chance.min(1.0)).powf(opponents)
    }

    /// Center of the opponents' recent wagers, if any are remembered.
    pub fn cluster_center(&self) -> Option<u64> {
        let averages: Vec<f64> = self
            .opponents
            .values()
            .filter_map(|m| m.average())
            .collect();
        if averages.is_empty() {
            None
        } else {
            Some((averages.iter().sum::<f64>() / averages.len() as f64).round() as u64)
        }
    }
}

/// Event-specific wager bias shared by every tier: pull toward the lucky
/// number, halve under a smallest-wins event. Applied before the final
/// clamp.
pub fn apply_event_bias(suggestion: u64, min_bet: u64, event: Option<&ActiveEvent>) -> u64 {
    let Some(event) = event else {
        return suggestion;
    };
    match event.kind {
        EventKind::LuckyNumber => event
            .lucky_number
            .map(|n| (suggestion + n) / 2)
            .unwrap_or(suggestion),
        EventKind::SmallestWins => (suggestion / 2).max(min_bet),
        _ => suggestion,
    }
}
