//! Analyst tier: searches the full wager range for the value maximizing
//! an expected-value estimate built from the empirically observed
//! uniqueness probability per value.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use solobid_engine::bot::{BetContext, BotDecider, CardChoice, CardContext};
use solobid_engine::player::PlayerId;
use solobid_engine::snapshot::TurnResult;

use crate::cardplay;
use crate::profile::{apply_event_bias, History, Personality};

/// Abstract payoff of winning a turn, in coin-equivalents. Only the
/// ordering of EV across wager values matters, not the absolute scale.
const WIN_PAYOFF: f64 = 18.0;

pub struct AnalystBot {
    personality: Personality,
    rng: ChaCha20Rng,
    history: History,
}

impl AnalystBot {
    pub fn new(player: PlayerId, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let personality =
            Personality::seeded(solobid_engine::player::BotDifficulty::Analyst, &mut rng);
        Self {
            personality,
            rng,
            history: History::new(player),
        }
    }

    /// Expected value of wagering `w`: the chance of being the highest
    /// unique value times the payoff, minus the stake risked otherwise.
    fn expected_value(&self, w: u64, max: u64, range_width: u64) -> f64 {
        let p_unique = self.history.uniqueness_probability(w, range_width);
        let top_weight = w as f64 / max as f64;
        let p_win = p_unique * top_weight;
        let risked = w as f64 * (0.5 + self.personality.risk_aversion * 0.5);
        p_win * WIN_PAYOFF - (1.0 - p_win) * risked
    }
}

impl BotDecider for AnalystBot {
    fn decide_wager(&mut self, ctx: &BetContext<'_>) -> u64 {
        let max = ctx.affordable_max();
        if max <= ctx.min_bet {
            return ctx.clamp(max);
        }
        let range_width = max - ctx.min_bet + 1;
        let mut best = (f64::NEG_INFINITY, ctx.min_bet);
        for w in ctx.min_bet..=max {
            let ev = self.expected_value(w, max, range_width);
            if ev > best.0 {
                best = (ev, w);
            }
        }
        let biased = apply_event_bias(best.1, ctx.min_bet, ctx.event.as_ref());
        ctx.clamp(biased)
    }

    fn decide_card(&mut self, ctx: &CardContext<'_>) -> Option<CardChoice> {
        cardplay::choose(&self.personality, &mut self.rng, ctx)
    }

    fn observe_turn(&mut self, result: &TurnResult) {
        self.history.observe(result);
    }

    fn name(&self) -> &str {
        "AnalystBot"
    }
}
