use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::Phase;

/// Immutable per-game configuration: economy knobs, module toggles and
/// phase timing. Built once at game creation and never mutated afterwards.
///
/// All fields have sensible defaults, so callers typically start from
/// [`GameOptions::default`] and override what they need:
///
/// ```
/// use solobid_engine::config::GameOptions;
///
/// let options = GameOptions {
///     points_to_win: 5,
///     random_events: false,
///     ..GameOptions::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Smallest wager a player may place.
    pub min_bet: u64,
    /// Largest wager a player may place.
    pub max_bet: u64,
    /// Coins each player starts the game with.
    pub starting_coins: u64,
    /// Hard upper bound on any player's coins.
    pub coin_cap: u64,
    /// First player to reach this many points ends the game.
    pub points_to_win: u64,
    /// Hard turn limit; the game finishes after this many turns regardless.
    pub max_turns: u32,
    /// Maximum number of seats in a room.
    pub max_players: usize,

    /// Module toggle: anti-snowball penalty and comeback bonus.
    pub dynamic_economy: bool,
    /// Module toggle: special cards (hands, card phases, card effects).
    pub special_cards: bool,
    /// Module toggle: per-turn random events.
    pub random_events: bool,
    /// Module toggle: secret per-player roles.
    pub hidden_roles: bool,

    /// Probability that a turn draws an event at all (0.0..=1.0).
    pub event_probability: f64,
    /// RNG seed; a seeded game is fully reproducible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Per-phase timer durations.
    pub phase_durations: PhaseDurations,
    /// Economy tuning constants.
    pub economy: EconomyTuning,
    /// Hand size limits and replenishment cadence.
    pub hands: HandTuning,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            min_bet: 1,
            max_bet: 25,
            starting_coins: 100,
            coin_cap: 500,
            points_to_win: 10,
            max_turns: 20,
            max_players: 6,
            dynamic_economy: true,
            special_cards: true,
            random_events: true,
            hidden_roles: true,
            event_probability: 0.5,
            seed: None,
            phase_durations: PhaseDurations::default(),
            economy: EconomyTuning::default(),
            hands: HandTuning::default(),
        }
    }
}

impl GameOptions {
    /// Check the option set for internal consistency.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.min_bet == 0 {
            return Err(GameError::InvalidOptions("min_bet must be >= 1".into()));
        }
        if self.min_bet > self.max_bet {
            return Err(GameError::InvalidOptions(
                "min_bet must not exceed max_bet".into(),
            ));
        }
        if self.starting_coins > self.coin_cap {
            return Err(GameError::InvalidOptions(
                "starting_coins must not exceed coin_cap".into(),
            ));
        }
        if self.max_players < 2 {
            return Err(GameError::InvalidOptions("max_players must be >= 2".into()));
        }
        if !(0.0..=1.0).contains(&self.event_probability) {
            return Err(GameError::InvalidOptions(
                "event_probability must be within 0.0..=1.0".into(),
            ));
        }
        if self.points_to_win == 0 || self.max_turns == 0 {
            return Err(GameError::InvalidOptions(
                "points_to_win and max_turns must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Duration of each phase in milliseconds of driver-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    pub event_ms: u64,
    pub planning_ms: u64,
    pub betting_ms: u64,
    pub instant_cards_ms: u64,
    pub reveal_ms: u64,
    pub resolution_ms: u64,
    pub end_turn_ms: u64,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            event_ms: 3_000,
            planning_ms: 10_000,
            betting_ms: 15_000,
            instant_cards_ms: 8_000,
            reveal_ms: 4_000,
            resolution_ms: 6_000,
            end_turn_ms: 3_000,
        }
    }
}

impl PhaseDurations {
    /// Timer duration for a phase. `Finished` has no timer.
    pub fn for_phase(&self, phase: Phase) -> Option<u64> {
        match phase {
            Phase::Event => Some(self.event_ms),
            Phase::Planning => Some(self.planning_ms),
            Phase::Betting => Some(self.betting_ms),
            Phase::InstantCards => Some(self.instant_cards_ms),
            Phase::Reveal => Some(self.reveal_ms),
            Phase::Resolution => Some(self.resolution_ms),
            Phase::EndTurn => Some(self.end_turn_ms),
            Phase::Finished => None,
        }
    }
}

/// Reward-settlement constants. Kept together so a room can tune its whole
/// economy in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyTuning {
    /// Points a (co-)winner receives.
    pub base_win_points: u64,
    /// Coins a (co-)winner receives before adjustments.
    pub base_win_coins: u64,
    /// Flat refund to every active participant of a no-winner turn.
    pub no_winner_compensation: u64,
    /// One-time stipend paid when a player returns from break mode.
    pub recovery_stipend: u64,
    /// Extra coins for a winner currently last in points.
    pub comeback_bonus: u64,
    /// Coins the snowball threshold: gains are halved above this fraction
    /// of the coin cap, expressed in percent.
    pub snowball_threshold_pct: u64,
    /// Coins removed from the primary winner per resolved sabotage card.
    pub sabotage_penalty: u64,
    /// Coins paid to each player whose raw wager hits the lucky number.
    pub lucky_number_bonus: u64,
    /// Coins paid to each non-winner under a charity event.
    pub charity_payout: u64,
    /// Flat coin tax collected by a coin-tax event.
    pub coin_tax: u64,
    /// Extra winner coins under a bounty event.
    pub bounty_bonus: u64,
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            base_win_points: 3,
            base_win_coins: 15,
            no_winner_compensation: 2,
            recovery_stipend: 10,
            comeback_bonus: 5,
            snowball_threshold_pct: 80,
            sabotage_penalty: 10,
            lucky_number_bonus: 5,
            charity_payout: 3,
            coin_tax: 5,
            bounty_bonus: 10,
        }
    }
}

impl EconomyTuning {
    /// Coin amount above which the anti-snowball penalty kicks in.
    pub fn snowball_threshold(&self, coin_cap: u64) -> u64 {
        coin_cap.saturating_mul(self.snowball_threshold_pct) / 100
    }
}

/// Hand size limits and replenishment cadence for the cards module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandTuning {
    /// Cards dealt to each player at game start.
    pub starting_hand: usize,
    /// Upper bound on hand size; replenishment never exceeds it.
    pub max_hand: usize,
    /// A replenishment card is drawn every this-many turns.
    pub replenish_every: u32,
}

impl Default for HandTuning {
    fn default() -> Self {
        Self {
            starting_hand: 2,
            max_hand: 4,
            replenish_every: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert!(GameOptions::default().validate().is_ok());
    }

    #[test]
    fn min_above_max_is_rejected() {
        let options = GameOptions {
            min_bet: 30,
            max_bet: 25,
            ..GameOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(GameError::InvalidOptions(_))
        ));
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let options = GameOptions {
            event_probability: 1.5,
            ..GameOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn finished_phase_has_no_timer() {
        let durations = PhaseDurations::default();
        assert_eq!(durations.for_phase(Phase::Finished), None);
        assert_eq!(durations.for_phase(Phase::Betting), Some(15_000));
    }

    #[test]
    fn snowball_threshold_scales_with_cap() {
        let tuning = EconomyTuning::default();
        assert_eq!(tuning.snowball_threshold(500), 400);
        assert_eq!(tuning.snowball_threshold(100), 80);
    }
}
