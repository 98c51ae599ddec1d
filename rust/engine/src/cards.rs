use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::Phase;
use crate::player::PlayerId;

/// Per-instance card identifier, unique within one game.
pub type CardId = u32;

/// Every card effect in the game, as data. Effects are dispatched through
/// a single resolver (`hand::apply_effect`), never through stored closures,
/// so a played card can be replayed from a `TurnResult` verbatim.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Doubles the player's effective wager at resolution. The raw stake
    /// is unchanged.
    Double,
    /// Protects the player's stake from forfeiture this turn.
    Shield,
    /// Shows observers a fabricated wager, guaranteed different from the
    /// real one.
    Mirage,
    /// Reveals the parity of a target's current wager to the player.
    Peek,
    /// Recorded now, resolved after the winner is known: the primary
    /// winner loses coins.
    Sabotage,
    /// Played after the reveal; halves the player's forfeited stake.
    Insurance,
}

/// Card rarity, driving the weighted draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
}

impl Rarity {
    /// Draw weight out of 100: 60% common, 30% rare, 10% epic.
    pub fn weight(self) -> u32 {
        match self {
            Rarity::Common => 60,
            Rarity::Rare => 30,
            Rarity::Epic => 10,
        }
    }
}

/// When during a turn a card may be played.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingWindow {
    /// Before wagers lock: the `Planning` and `Betting` phases.
    BeforeBet,
    /// The dedicated `InstantCards` phase.
    Instant,
    /// The `Reveal` phase, once bets are public.
    AfterReveal,
}

impl TimingWindow {
    /// Whether a card with this window is playable in `phase`.
    pub fn matches(self, phase: Phase) -> bool {
        match self {
            TimingWindow::BeforeBet => matches!(phase, Phase::Planning | Phase::Betting),
            TimingWindow::Instant => phase == Phase::InstantCards,
            TimingWindow::AfterReveal => phase == Phase::Reveal,
        }
    }
}

/// Broad behavioral category, used by bot card-play heuristics.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    Boost,
    Defense,
    Deception,
    Attack,
}

/// Static description of one card kind.
#[derive(Debug, Copy, Clone)]
pub struct CardSpec {
    pub kind: CardKind,
    pub name: &'static str,
    pub rarity: Rarity,
    pub window: TimingWindow,
    pub needs_target: bool,
}

/// The card library. Static data; per-instance cards are minted from it.
pub const LIBRARY: &[CardSpec] = &[
    CardSpec {
        kind: CardKind::Double,
        name: "Double Down",
        rarity: Rarity::Common,
        window: TimingWindow::BeforeBet,
        needs_target: false,
    },
    CardSpec {
        kind: CardKind::Shield,
        name: "Shield",
        rarity: Rarity::Common,
        window: TimingWindow::BeforeBet,
        needs_target: false,
    },
    CardSpec {
        kind: CardKind::Mirage,
        name: "Mirage",
        rarity: Rarity::Rare,
        window: TimingWindow::Instant,
        needs_target: false,
    },
    CardSpec {
        kind: CardKind::Peek,
        name: "Peek",
        rarity: Rarity::Rare,
        window: TimingWindow::Instant,
        needs_target: true,
    },
    CardSpec {
        kind: CardKind::Insurance,
        name: "Insurance",
        rarity: Rarity::Rare,
        window: TimingWindow::AfterReveal,
        needs_target: false,
    },
    CardSpec {
        kind: CardKind::Sabotage,
        name: "Sabotage",
        rarity: Rarity::Epic,
        window: TimingWindow::Instant,
        needs_target: false,
    },
];

impl CardKind {
    pub fn spec(self) -> &'static CardSpec {
        LIBRARY
            .iter()
            .find(|s| s.kind == self)
            .expect("every CardKind has a library entry")
    }

    pub fn category(self) -> CardCategory {
        match self {
            CardKind::Double => CardCategory::Boost,
            CardKind::Shield | CardKind::Insurance => CardCategory::Defense,
            CardKind::Mirage | CardKind::Peek => CardCategory::Deception,
            CardKind::Sabotage => CardCategory::Attack,
        }
    }
}

/// One minted card instance in a player's hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
}

/// Ledger entry for a successfully played card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub player: PlayerId,
    pub card: Card,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PlayerId>,
    /// Effect output recorded for the player (e.g. a peeked parity).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Draw a card kind with the 60/30/10 rarity weighting: first a rarity
/// bucket, then a uniform pick within that bucket.
pub fn draw_kind<R: Rng>(rng: &mut R) -> CardKind {
    let roll = rng.random_range(0..100u32);
    let rarity = if roll < Rarity::Common.weight() {
        Rarity::Common
    } else if roll < Rarity::Common.weight() + Rarity::Rare.weight() {
        Rarity::Rare
    } else {
        Rarity::Epic
    };
    let bucket: Vec<&CardSpec> = LIBRARY.iter().filter(|s| s.rarity == rarity).collect();
    let idx = rng.random_range(0..bucket.len());
    bucket[idx].kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn every_kind_has_a_spec() {
        for spec in LIBRARY {
            assert_eq!(spec.kind.spec().name, spec.name);
        }
    }

    #[test]
    fn rarity_weights_sum_to_one_hundred() {
        let total =
            Rarity::Common.weight() + Rarity::Rare.weight() + Rarity::Epic.weight();
        assert_eq!(total, 100);
    }

    #[test]
    fn windows_map_to_their_phases() {
        assert!(TimingWindow::BeforeBet.matches(Phase::Planning));
        assert!(TimingWindow::BeforeBet.matches(Phase::Betting));
        assert!(!TimingWindow::BeforeBet.matches(Phase::Reveal));
        assert!(TimingWindow::Instant.matches(Phase::InstantCards));
        assert!(TimingWindow::AfterReveal.matches(Phase::Reveal));
        assert!(!TimingWindow::AfterReveal.matches(Phase::Resolution));
    }

    #[test]
    fn weighted_draw_roughly_honors_rarity() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut common = 0usize;
        let mut epic = 0usize;
        for _ in 0..10_000 {
            match draw_kind(&mut rng).spec().rarity {
                Rarity::Common => common += 1,
                Rarity::Epic => epic += 1,
                Rarity::Rare => {}
            }
        }
        // 60% and 10% nominal; generous tolerance keeps the test stable.
        assert!((5_000..7_000).contains(&common), "common draws: {common}");
        assert!((500..1_600).contains(&epic), "epic draws: {epic}");
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let a: Vec<CardKind> = {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            (0..20).map(|_| draw_kind(&mut rng)).collect()
        };
        let b: Vec<CardKind> = {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            (0..20).map(|_| draw_kind(&mut rng)).collect()
        };
        assert_eq!(a, b);
    }
}
