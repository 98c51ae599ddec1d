//! Rookie tier: bounded random noise around the wager midpoint.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use solobid_engine::bot::{BetContext, BotDecider, CardChoice, CardContext};

use crate::cardplay;
use crate::profile::{apply_event_bias, Personality};

pub struct RookieBot {
    personality: Personality,
    rng: ChaCha20Rng,
}

impl RookieBot {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let personality = Personality::seeded(solobid_engine::player::BotDifficulty::Rookie, &mut rng);
        Self { personality, rng }
    }
}

impl BotDecider for RookieBot {
    fn decide_wager(&mut self, ctx: &BetContext<'_>) -> u64 {
        let mid = ctx.midpoint() as i64;
        let span = ctx.affordable_max().saturating_sub(ctx.min_bet).max(1) as f64;
        let spread = (span * (0.2 + self.personality.tilt * 0.2)).ceil() as i64;
        let noise = self.rng.random_range(-spread..=spread);
        let lean = ((self.personality.aggression - 0.5) * span * 0.4) as i64;
        let raw = (mid + noise + lean).max(0) as u64;
        let biased = apply_event_bias(raw, ctx.min_bet, ctx.event.as_ref());
        ctx.clamp(biased)
    }

    fn decide_card(&mut self, ctx: &CardContext<'_>) -> Option<CardChoice> {
        cardplay::choose(&self.personality, &mut self.rng, ctx)
    }

    fn name(&self) -> &str {
        "RookieBot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wagers_stay_within_the_legal_range() {
        let mut bot = RookieBot::new(11);
        let opponents = [];
        let ctx = BetContext {
            turn: 1,
            max_turns: 20,
            min_bet: 1,
            max_bet: 25,
            coins: 100,
            points: 0,
            points_to_win: 10,
            event: None,
            opponents: &opponents,
        };
        for _ in 0..200 {
            let w = bot.decide_wager(&ctx);
            assert!((1..=25).contains(&w));
        }
    }

    #[test]
    fn short_stack_caps_the_wager_at_the_coins() {
        let mut bot = RookieBot::new(11);
        let opponents = [];
        let ctx = BetContext {
            turn: 1,
            max_turns: 20,
            min_bet: 5,
            max_bet: 25,
            coins: 3,
            points: 0,
            points_to_win: 10,
            event: None,
            opponents: &opponents,
        };
        // Cannot afford the minimum: the remaining coins are wagered.
        assert_eq!(bot.decide_wager(&ctx), 3);
    }
}
