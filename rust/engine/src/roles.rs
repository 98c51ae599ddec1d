use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::player::PlayerId;

/// Secret long-term objectives. One per player, assigned before turn 1 and
/// never reassigned.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// End a resolution holding at least [`HOARDER_THRESHOLD`] coins.
    Hoarder,
    /// Win two turns in a row.
    Streaker,
    /// Win a turn with a raw wager equal to the maximum bet.
    Daredevil,
    /// Return from break mode.
    Phoenix,
    /// Finish the game having played the fewest cards.
    Minimalist,
    /// Finish the game holding the most coins.
    Moneybags,
}

/// Coins a Hoarder must hold at resolution time to score.
pub const HOARDER_THRESHOLD: u64 = 200;

/// How often a role can pay out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleClass {
    /// May award its bonus every qualifying turn, uncapped.
    Recurring,
    /// Awards exactly once per game; a per-player latch enforces it.
    OneTime,
    /// Evaluated exactly once, at game finalization.
    EndGame,
}

/// Static description of one role kind.
#[derive(Debug, Copy, Clone)]
pub struct RoleSpec {
    pub kind: RoleKind,
    pub name: &'static str,
    pub class: RoleClass,
    /// Points awarded when the condition holds.
    pub points: u64,
}

pub const LIBRARY: &[RoleSpec] = &[
    RoleSpec { kind: RoleKind::Hoarder, name: "Hoarder", class: RoleClass::Recurring, points: 1 },
    RoleSpec { kind: RoleKind::Streaker, name: "Streaker", class: RoleClass::Recurring, points: 2 },
    RoleSpec { kind: RoleKind::Daredevil, name: "Daredevil", class: RoleClass::OneTime, points: 3 },
    RoleSpec { kind: RoleKind::Phoenix, name: "Phoenix", class: RoleClass::OneTime, points: 2 },
    RoleSpec { kind: RoleKind::Minimalist, name: "Minimalist", class: RoleClass::EndGame, points: 2 },
    RoleSpec { kind: RoleKind::Moneybags, name: "Moneybags", class: RoleClass::EndGame, points: 2 },
];

impl RoleKind {
    pub fn spec(self) -> &'static RoleSpec {
        LIBRARY
            .iter()
            .find(|s| s.kind == self)
            .expect("every RoleKind has a library entry")
    }
}

/// A role held by one player. The latch makes a double award of a
/// one-time role structurally unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub kind: RoleKind,
    awarded: bool,
}

impl RoleAssignment {
    pub fn new(kind: RoleKind) -> Self {
        Self {
            kind,
            awarded: false,
        }
    }

    pub fn awarded(&self) -> bool {
        self.awarded
    }

    /// Claim a one-time award. Returns the points exactly once.
    fn claim_once(&mut self, points: u64) -> Option<u64> {
        if self.awarded {
            None
        } else {
            self.awarded = true;
            Some(points)
        }
    }
}

/// A role bonus granted during a turn or at finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAward {
    pub player: PlayerId,
    pub kind: RoleKind,
    pub points: u64,
}

/// Assign one secret role per player, drawing without repetition while
/// distinct kinds remain. With more players than kinds, a fresh shuffled
/// set is appended.
pub fn assign_roles(game: &mut Game) {
    let seats = game.players.len();
    let mut pool: Vec<RoleKind> = Vec::with_capacity(seats);
    while pool.len() < seats {
        let mut set: Vec<RoleKind> = LIBRARY.iter().map(|s| s.kind).collect();
        set.shuffle(game.rng());
        pool.extend(set);
    }
    for (p, kind) in game.players.iter_mut().zip(pool) {
        p.role = Some(RoleAssignment::new(kind));
    }
}

/// Evaluate recurring and one-time roles at resolution time, after reward
/// settlement. `winners` is this turn's co-winner set; the previous turn's
/// winners are read from history (not yet including this turn).
pub fn check_turn_roles(game: &mut Game, winners: &[PlayerId]) -> Vec<RoleAward> {
    let previous_winners: Vec<PlayerId> = game
        .history
        .last()
        .map(|r| r.winners.clone())
        .unwrap_or_default();

    let max_bet = game.options.max_bet;
    let mut awards = Vec::new();
    for p in &mut game.players {
        let won = winners.contains(&p.id);
        let won_before = previous_winners.contains(&p.id);
        let coins = p.coins();
        let wager = p.wager();
        let recovered = p.stats.times_recovered;

        let Some(role) = p.role.as_mut() else {
            continue;
        };
        let kind = role.kind;
        let spec = kind.spec();
        let points = match (kind, spec.class) {
            (RoleKind::Hoarder, RoleClass::Recurring) => {
                (coins >= HOARDER_THRESHOLD).then_some(spec.points)
            }
            (RoleKind::Streaker, RoleClass::Recurring) => {
                (won && won_before).then_some(spec.points)
            }
            (RoleKind::Daredevil, RoleClass::OneTime) => {
                if won && wager == Some(max_bet) {
                    role.claim_once(spec.points)
                } else {
                    None
                }
            }
            (RoleKind::Phoenix, RoleClass::OneTime) => {
                if recovered >= 1 {
                    role.claim_once(spec.points)
                } else {
                    None
                }
            }
            // End-game roles are evaluated at finalization only.
            _ => None,
        };
        if let Some(points) = points {
            p.points += points;
            awards.push(RoleAward {
                player: p.id,
                kind,
                points,
            });
        }
    }
    awards
}

/// Evaluate end-game roles exactly once, at game finalization.
pub fn check_endgame_roles(game: &mut Game) -> Vec<RoleAward> {
    let fewest_cards = game
        .players
        .iter()
        .map(|p| p.stats.cards_played)
        .min()
        .unwrap_or(0);
    let most_coins = game.players.iter().map(|p| p.coins()).max().unwrap_or(0);

    let mut awards = Vec::new();
    for p in &mut game.players {
        let cards_played = p.stats.cards_played;
        let coins = p.coins();
        let Some(role) = p.role.as_mut() else {
            continue;
        };
        let kind = role.kind;
        let spec = kind.spec();
        if spec.class != RoleClass::EndGame {
            continue;
        }
        let qualifies = match kind {
            RoleKind::Minimalist => cards_played == fewest_cards,
            RoleKind::Moneybags => coins == most_coins && most_coins > 0,
            _ => false,
        };
        if !qualifies {
            continue;
        }
        if let Some(points) = role.claim_once(spec.points) {
            p.points += points;
            awards.push(RoleAward {
                player: p.id,
                kind,
                points,
            });
        }
    }
    awards
}
