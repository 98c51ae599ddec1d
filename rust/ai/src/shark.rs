//! Shark tier: phase-aware strategy. Conservative early, exploits
//! detected opponent clusters mid-game, leverages aggression late when
//! behind, and never stakes more than a small fraction of the bankroll.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use solobid_engine::bot::{BetContext, BotDecider, CardChoice, CardContext};
use solobid_engine::player::PlayerId;
use solobid_engine::snapshot::TurnResult;

use crate::cardplay;
use crate::profile::{apply_event_bias, History, Personality};

pub struct SharkBot {
    personality: Personality,
    rng: ChaCha20Rng,
    history: History,
}

impl SharkBot {
    pub fn new(player: PlayerId, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let personality =
            Personality::seeded(solobid_engine::player::BotDifficulty::Shark, &mut rng);
        Self {
            personality,
            rng,
            history: History::new(player),
        }
    }

    /// Hard bankroll cap: a single wager never exceeds roughly a fifth of
    /// the current coins, tightening with risk aversion.
    fn bankroll_cap(&self, ctx: &BetContext<'_>) -> u64 {
        let denominator = 4 + (self.personality.risk_aversion * 4.0) as u64;
        (ctx.coins / denominator).max(ctx.min_bet)
    }
}

impl BotDecider for SharkBot {
    fn decide_wager(&mut self, ctx: &BetContext<'_>) -> u64 {
        let min = ctx.min_bet;
        let max = ctx.affordable_max();
        if max <= min {
            return ctx.clamp(max);
        }
        let span = max - min;

        // Occasionally echo the wager that just won.
        let copied = self
            .history
            .last_winning_wager
            .filter(|_| self.rng.random_bool(self.personality.copycat));

        let raw = if let Some(w) = copied {
            w
        } else if ctx.turn * 3 <= ctx.max_turns {
            // Early game: stay conservative, read the table.
            min + self.rng.random_range(span / 6..=span / 3)
        } else if ctx.turn * 3 <= ctx.max_turns * 2 {
            // Mid game: sit just above a detected cluster.
            match self.history.cluster_center() {
                Some(center) => center
                    .saturating_add(1 + self.rng.random_range(0..=2))
                    .min(max),
                None => min + self.rng.random_range(span / 4..=span / 2),
            }
        } else {
            // Late game: leverage-aware aggression when behind.
            let best_opponent = ctx.opponents.iter().map(|o| o.points).max().unwrap_or(0);
            if best_opponent > ctx.points {
                let lo = min + span * 7 / 10;
                let boost = (self.personality.aggression * span as f64 * 0.2) as u64;
                self.rng.random_range(lo..=max).saturating_add(boost)
            } else {
                min + self.rng.random_range(span / 6..=span / 2)
            }
        };

        let capped = raw.min(self.bankroll_cap(ctx));
        let biased = apply_event_bias(capped, min, ctx.event.as_ref());
        ctx.clamp(biased)
    }

    fn decide_card(&mut self, ctx: &CardContext<'_>) -> Option<CardChoice> {
        cardplay::choose(&self.personality, &mut self.rng, ctx)
    }

    fn observe_turn(&mut self, result: &TurnResult) {
        self.history.observe(result);
    }

    fn name(&self) -> &str {
        "SharkBot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solobid_engine::bot::OpponentView;

    fn ctx<'a>(turn: u32, coins: u64, opponents: &'a [OpponentView]) -> BetContext<'a> {
        BetContext {
            turn,
            max_turns: 20,
            min_bet: 1,
            max_bet: 25,
            coins,
            points: 0,
            points_to_win: 10,
            event: None,
            opponents,
        }
    }

    #[test]
    fn bankroll_cap_limits_single_wagers() {
        let mut bot = SharkBot::new(1, 5);
        // Late game and far behind: aggression wants a big wager.
        let opponents = [OpponentView {
            id: 2,
            points: 9,
            coins: 200,
            on_break: false,
        }];
        for _ in 0..200 {
            let w = bot.decide_wager(&ctx(18, 40, &opponents));
            // At most coins/4 even at minimum risk aversion.
            assert!(w <= 10, "wager {w} exceeds the bankroll cap");
        }
    }

    #[test]
    fn early_game_stays_conservative() {
        let mut bot = SharkBot::new(1, 6);
        for _ in 0..200 {
            let w = bot.decide_wager(&ctx(1, 1_000, &[]));
            assert!(w <= 9, "early wager {w} is not conservative");
        }
    }
}
