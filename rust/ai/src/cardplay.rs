//! Shared card-play heuristics: every tier scores its legal cards the
//! same way, differing only through the personality bonus and RNG.

use rand::seq::IndexedRandom;
use rand::Rng;
use solobid_engine::bot::{CardChoice, CardContext};
use solobid_engine::cards::{CardCategory, CardKind};
use solobid_engine::player::PlayerId;

use crate::profile::Personality;

/// Minimum score a card must reach to be worth playing at all.
const PLAY_THRESHOLD: f64 = 0.5;

/// Bonus for cards in the bot's preferred category.
const PREFERRED_BONUS: f64 = 0.25;

/// Score every legal card, play the best one if it clears the threshold.
pub fn choose<R: Rng>(
    personality: &Personality,
    rng: &mut R,
    ctx: &CardContext<'_>,
) -> Option<CardChoice> {
    let mut best: Option<(f64, CardKind, u32)> = None;
    for card in ctx.playable {
        let mut score = base_score(card.kind, ctx, personality);
        if card.kind.category() == personality.preferred {
            score += PREFERRED_BONUS;
        }
        // Small jitter so identical hands do not always play identically.
        score += rng.random_range(0.0..0.1);
        if best.map(|(s, _, _)| score > s).unwrap_or(true) {
            best = Some((score, card.kind, card.id));
        }
    }
    let (score, kind, card) = best?;
    if score < PLAY_THRESHOLD {
        return None;
    }
    Some(CardChoice {
        card,
        target: pick_target(kind, ctx, rng),
    })
}

/// Type-specific heuristics. Scales are rough; only the ordering between
/// a bot's simultaneously playable cards matters.
fn base_score(kind: CardKind, ctx: &CardContext<'_>, personality: &Personality) -> f64 {
    let coins = ctx.coins.max(1) as f64;
    let stake_share = ctx.wager.unwrap_or(0) as f64 / coins;
    match kind {
        // Protecting the stake pays off the more of the bankroll it is.
        CardKind::Shield => 0.25 + stake_share.min(1.0) * 0.6,
        CardKind::Insurance => 0.2 + stake_share.min(1.0) * 0.5,
        // Doubling is an aggression play on an already sizable wager.
        CardKind::Double => 0.2 + personality.aggression * 0.3 + stake_share.min(1.0) * 0.3,
        CardKind::Mirage => 0.45 + personality.aggression * 0.2,
        CardKind::Peek => {
            if ctx.opponents.is_empty() {
                0.0
            } else {
                0.5
            }
        }
        // Attacking the leader is pointless while leading.
        CardKind::Sabotage => {
            if ctx.leading {
                0.15
            } else {
                0.55 + personality.aggression * 0.25
            }
        }
    }
}

/// Attack-style cards aim at the points leader; anything else targets a
/// random eligible opponent.
fn pick_target<R: Rng>(
    kind: CardKind,
    ctx: &CardContext<'_>,
    rng: &mut R,
) -> Option<PlayerId> {
    if !kind.spec().needs_target {
        return None;
    }
    let eligible: Vec<PlayerId> = ctx
        .opponents
        .iter()
        .filter(|o| !o.on_break)
        .map(|o| o.id)
        .collect();
    if eligible.is_empty() {
        return None;
    }
    if kind.category() == CardCategory::Attack {
        if let Some(leader) = ctx.leader {
            if eligible.contains(&leader) {
                return Some(leader);
            }
        }
    }
    eligible.choose(rng).copied()
}
