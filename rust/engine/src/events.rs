use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameOptions;
use crate::game::Game;

/// Every per-turn rule modifier in the game. At most one is active per
/// turn; the active event is cleared at turn reset.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Every effective wager is doubled this turn.
    DoubleStakes,
    /// The lowest unique wager wins instead of the highest.
    SmallestWins,
    /// All players tied at the highest effective wager share the win.
    SharedVictory,
    /// Players with matching bets share the win.
    Twins,
    /// Immediate flat coin tax on every active player.
    CoinTax,
    /// The winner collects an extra coin bounty.
    Bounty,
    /// Players whose raw wager hits the drawn number collect a bonus.
    LuckyNumber,
    /// Non-winners receive a small payout at settlement.
    Charity,
    /// No cards may be played this turn.
    CardFreeze,
}

/// Static description of one event kind.
#[derive(Debug, Copy, Clone)]
pub struct EventSpec {
    pub kind: EventKind,
    pub name: &'static str,
    /// Relative draw weight among events, once a turn draws one at all.
    pub weight: u32,
}

pub const LIBRARY: &[EventSpec] = &[
    EventSpec { kind: EventKind::DoubleStakes, name: "Double Stakes", weight: 14 },
    EventSpec { kind: EventKind::SmallestWins, name: "Smallest Wins", weight: 12 },
    EventSpec { kind: EventKind::SharedVictory, name: "Shared Victory", weight: 10 },
    EventSpec { kind: EventKind::Twins, name: "Twins", weight: 10 },
    EventSpec { kind: EventKind::CoinTax, name: "Coin Tax", weight: 12 },
    EventSpec { kind: EventKind::Bounty, name: "Bounty", weight: 12 },
    EventSpec { kind: EventKind::LuckyNumber, name: "Lucky Number", weight: 12 },
    EventSpec { kind: EventKind::Charity, name: "Charity", weight: 10 },
    EventSpec { kind: EventKind::CardFreeze, name: "Card Freeze", weight: 8 },
];

impl EventKind {
    pub fn spec(self) -> &'static EventSpec {
        LIBRARY
            .iter()
            .find(|s| s.kind == self)
            .expect("every EventKind has a library entry")
    }

    /// Whether this event doubles every effective wager.
    pub fn doubles_bets(self) -> bool {
        self == EventKind::DoubleStakes
    }

    /// Whether this event flips resolution to lowest-unique.
    pub fn reverses(self) -> bool {
        self == EventKind::SmallestWins
    }

    /// Whether ties at the top share the win under this event.
    pub fn shares_win(self) -> bool {
        matches!(self, EventKind::SharedVictory | EventKind::Twins)
    }

    /// Whether this event blocks card play for the turn.
    pub fn blocks_cards(self) -> bool {
        self == EventKind::CardFreeze
    }
}

/// The event drawn for the current turn, with any per-draw payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub kind: EventKind,
    /// Drawn for `LuckyNumber`, `None` otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lucky_number: Option<u64>,
}

/// Probabilistic per-turn draw: with `event_probability` an event occurs,
/// otherwise the turn runs plain. The choice among events is weighted.
pub fn draw<R: Rng>(rng: &mut R, options: &GameOptions) -> Option<ActiveEvent> {
    if !rng.random_bool(options.event_probability) {
        return None;
    }
    let total: u32 = LIBRARY.iter().map(|s| s.weight).sum();
    let mut roll = rng.random_range(0..total);
    let mut kind = LIBRARY[0].kind;
    for spec in LIBRARY {
        if roll < spec.weight {
            kind = spec.kind;
            break;
        }
        roll -= spec.weight;
    }
    let lucky_number = match kind {
        EventKind::LuckyNumber => Some(rng.random_range(options.min_bet..=options.max_bet)),
        _ => None,
    };
    Some(ActiveEvent { kind, lucky_number })
}

/// Run the drawn event's entry effect once. Immediate effects mutate state
/// here; everything else installs a marker consumed by resolution or
/// settlement.
pub fn apply_on_entry(game: &mut Game) {
    let Some(event) = game.active_event else {
        return;
    };
    match event.kind {
        EventKind::CoinTax => {
            let tax = game.options.economy.coin_tax;
            for p in &mut game.players {
                if p.is_active() {
                    p.remove_coins(tax);
                }
            }
        }
        EventKind::SmallestWins => game.modifiers.reverse = true,
        EventKind::CardFreeze => game.modifiers.cards_blocked = true,
        // Consumed later by resolution or settlement.
        EventKind::DoubleStakes
        | EventKind::SharedVictory
        | EventKind::Twins
        | EventKind::Bounty
        | EventKind::LuckyNumber
        | EventKind::Charity => {}
    }
}
