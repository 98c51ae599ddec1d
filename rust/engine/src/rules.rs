//! Winner resolution and wager validation. Everything here is a pure
//! function of its inputs; uniqueness is computed fresh at every call and
//! never cached across turns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::PlayerId;

/// One player's bet entering resolution, in seat order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetLine {
    pub player: PlayerId,
    /// The wager the player actually placed (and stakes).
    pub raw: u64,
    /// Whether a doubling modifier applies to this player. Card and event
    /// doubling never compound; either source yields a single doubling.
    pub doubled: bool,
}

impl BetLine {
    /// The wager resolution sees.
    pub fn effective(&self) -> u64 {
        if self.doubled {
            self.raw * 2
        } else {
            self.raw
        }
    }
}

/// How the winner is selected this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinMode {
    /// Highest unique effective wager (the default rule).
    HighestUnique,
    /// Lowest unique effective wager (reverse mode / smallest-wins).
    LowestUnique,
    /// All players tied at the single highest effective wager co-win.
    SharedHighest,
}

/// Outcome of winner resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Co-winners in seat order; empty when no winner exists.
    pub winners: Vec<PlayerId>,
    /// First co-winner in seat order, kept for display and sabotage
    /// targeting. Equal to the sole winner outside shared modes.
    pub primary: Option<PlayerId>,
    /// Effective wager per player, in seat order.
    pub effective: Vec<(PlayerId, u64)>,
}

/// Resolve the turn's winner(s) from the bet lines and the win mode.
///
/// A value is unique iff exactly one player holds it. Under
/// [`WinMode::LowestUnique`] the chosen value must still be unique, not
/// merely minimal. [`WinMode::SharedHighest`] ignores uniqueness and
/// selects every player tied at the top value.
///
/// ```
/// use solobid_engine::rules::{resolve, BetLine, WinMode};
///
/// let bets = [
///     BetLine { player: 1, raw: 12, doubled: false },
///     BetLine { player: 2, raw: 7, doubled: false },
///     BetLine { player: 3, raw: 7, doubled: false },
/// ];
/// let resolution = resolve(&bets, WinMode::HighestUnique);
/// assert_eq!(resolution.winners, vec![1]);
/// ```
pub fn resolve(bets: &[BetLine], mode: WinMode) -> Resolution {
    let effective: Vec<(PlayerId, u64)> =
        bets.iter().map(|b| (b.player, b.effective())).collect();
    if effective.is_empty() {
        return Resolution::default();
    }

    let mut counts: HashMap<u64, usize> = HashMap::new();
    for &(_, value) in &effective {
        *counts.entry(value).or_insert(0) += 1;
    }

    let winners: Vec<PlayerId> = match mode {
        WinMode::SharedHighest => {
            let top = effective.iter().map(|&(_, v)| v).max().unwrap_or(0);
            effective
                .iter()
                .filter(|&&(_, v)| v == top)
                .map(|&(p, _)| p)
                .collect()
        }
        WinMode::HighestUnique | WinMode::LowestUnique => {
            let unique = effective.iter().filter(|&&(_, v)| counts[&v] == 1);
            let pick = match mode {
                WinMode::HighestUnique => unique.max_by_key(|&&(_, v)| v),
                _ => unique.min_by_key(|&&(_, v)| v),
            };
            pick.map(|&(p, _)| vec![p]).unwrap_or_default()
        }
    };

    Resolution {
        primary: winners.first().copied(),
        winners,
        effective,
    }
}

/// Validate a wager against the configured range and the player's coins.
/// The allowed range is `[min_bet, max_bet] ∩ [0, coins]`; anything outside
/// is rejected with no state change.
pub fn validate_wager(
    amount: u64,
    min_bet: u64,
    max_bet: u64,
    coins: u64,
) -> Result<u64, GameError> {
    let max_allowed = max_bet.min(coins);
    if amount < min_bet || amount > max_allowed {
        return Err(GameError::InvalidWager {
            amount,
            min: min_bet,
            max: max_allowed,
        });
    }
    Ok(amount)
}
