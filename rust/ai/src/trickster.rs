//! Trickster tier: a bluff mixture. Mostly very-low wagers, sometimes
//! mid-range, rarely a near-maximum surprise.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use solobid_engine::bot::{BetContext, BotDecider, CardChoice, CardContext};
use solobid_engine::player::PlayerId;
use solobid_engine::snapshot::TurnResult;

use crate::cardplay;
use crate::profile::{apply_event_bias, History, Personality};

pub struct TricksterBot {
    personality: Personality,
    rng: ChaCha20Rng,
    history: History,
}

impl TricksterBot {
    pub fn new(player: PlayerId, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let personality =
            Personality::seeded(solobid_engine::player::BotDifficulty::Trickster, &mut rng);
        Self {
            personality,
            rng,
            history: History::new(player),
        }
    }
}

impl BotDecider for TricksterBot {
    fn decide_wager(&mut self, ctx: &BetContext<'_>) -> u64 {
        let min = ctx.min_bet;
        let max = ctx.affordable_max();
        if max <= min {
            return ctx.clamp(max);
        }
        let span = max - min;
        // A tilted trickster surprises more often after a losing streak.
        let surprise = 0.05
            + f64::from(self.history.consecutive_losses.min(3)) * self.personality.tilt * 0.05;
        let roll: f64 = self.rng.random_range(0.0..1.0);
        let raw = if roll < 0.65 {
            // Bluff low: the bottom fifth of the range.
            min + self.rng.random_range(0..=span / 5)
        } else if roll < 1.0 - surprise {
            // Mid-range feint.
            let lo = min + span * 2 / 5;
            let hi = min + span * 3 / 5;
            self.rng.random_range(lo..=hi)
        } else {
            // Near-maximum surprise.
            self.rng.random_range(max - span / 10..=max)
        };
        let biased = apply_event_bias(raw, min, ctx.event.as_ref());
        ctx.clamp(biased)
    }

    fn decide_card(&mut self, ctx: &CardContext<'_>) -> Option<CardChoice> {
        cardplay::choose(&self.personality, &mut self.rng, ctx)
    }

    fn observe_turn(&mut self, result: &TurnResult) {
        self.history.observe(result);
    }

    fn name(&self) -> &str {
        "TricksterBot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>() -> BetContext<'a> {
        BetContext {
            turn: 2,
            max_turns: 20,
            min_bet: 1,
            max_bet: 25,
            coins: 100,
            points: 0,
            points_to_win: 10,
            event: None,
            opponents: &[],
        }
    }

    #[test]
    fn mixture_is_mostly_low_with_rare_surprises() {
        let mut bot = TricksterBot::new(1, 21);
        let context = ctx();
        let mut low = 0usize;
        let mut high = 0usize;
        const ROUNDS: usize = 2_000;
        for _ in 0..ROUNDS {
            let w = bot.decide_wager(&context);
            assert!((1..=25).contains(&w));
            if w <= 5 {
                low += 1;
            }
            if w >= 23 {
                high += 1;
            }
        }
        assert!(low > ROUNDS / 2, "low wagers: {low}");
        assert!(high > 0, "surprises never happened");
        assert!(high < ROUNDS / 5, "surprises too frequent: {high}");
    }
}
