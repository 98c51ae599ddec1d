//! Reward settlement. `settle` is a pure calculator producing one
//! [`RewardBreakdown`] per participant; `apply` folds the breakdowns into
//! player state with clamped arithmetic and handles break-mode
//! transitions. Splitting the two keeps every settlement decision
//! replayable from a `TurnResult`.

use serde::{Deserialize, Serialize};

use crate::events::EventKind;
use crate::game::Game;
use crate::player::{PlayerId, PlayerStats};
use crate::rules::{BetLine, Resolution};

/// Per-player settlement outcome for one turn. Recorded verbatim in the
/// turn's `TurnResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub player: PlayerId,
    /// Points gained from winning this turn (role bonuses are tracked
    /// separately).
    pub points_gained: u64,
    /// Coin rewards: base win coins plus event bonuses, after
    /// anti-snowball and comeback adjustments.
    pub coins_gained: u64,
    /// Stake lost this turn, after shield and insurance effects.
    pub stake_forfeited: u64,
    /// Coins removed by sabotage cards (primary winner only).
    pub sabotage_loss: u64,
    /// Flat refund on a no-winner turn.
    pub compensation: u64,
}

impl RewardBreakdown {
    fn new(player: PlayerId) -> Self {
        Self {
            player,
            points_gained: 0,
            coins_gained: 0,
            stake_forfeited: 0,
            sabotage_loss: 0,
            compensation: 0,
        }
    }
}

/// Compute the turn's settlement. Pure: reads the game, mutates nothing.
///
/// Per participant: co-winners receive the base point and coin reward,
/// adjusted by the anti-snowball penalty (halved coin gain once their
/// coins exceed the snowball threshold) and the comeback bonus (extra
/// coins for the player currently last in points); both adjustments are
/// part of the dynamic-economy module. Everyone forfeits their raw stake,
/// except shielded non-winners (zeroed) and insured non-winners (halved).
/// A no-winner turn refunds every participant the flat compensation.
pub fn settle(game: &Game, bets: &[BetLine], resolution: &Resolution) -> Vec<RewardBreakdown> {
    let options = &game.options;
    let tuning = &options.economy;
    let event = game.active_event.map(|e| e.kind);
    let lucky = game.active_event.and_then(|e| e.lucky_number);
    let no_winner = resolution.winners.is_empty();
    let points_last = game.points_last();
    let snowball_threshold = tuning.snowball_threshold(options.coin_cap);

    let mut breakdowns = Vec::with_capacity(bets.len());
    for bet in bets {
        let mut b = RewardBreakdown::new(bet.player);
        let won = resolution.winners.contains(&bet.player);
        let coins_now = game.player(bet.player).map(|p| p.coins()).unwrap_or(0);

        // Stake. Winners always pay theirs; shield zeroes and insurance
        // halves a loser's forfeit.
        b.stake_forfeited = if won {
            bet.raw
        } else if game.modifiers.shielded.contains(&bet.player) {
            0
        } else if game.modifiers.insured.contains(&bet.player) {
            bet.raw / 2
        } else {
            bet.raw
        };

        if won {
            b.points_gained = tuning.base_win_points;
            let mut gain = tuning.base_win_coins;
            if options.dynamic_economy && coins_now > snowball_threshold {
                gain /= 2;
            }
            if options.dynamic_economy && points_last == Some(bet.player) {
                gain += tuning.comeback_bonus;
            }
            if event == Some(EventKind::Bounty) {
                gain += tuning.bounty_bonus;
            }
            b.coins_gained = gain;
        } else if event == Some(EventKind::Charity) {
            b.coins_gained = tuning.charity_payout;
        }

        if lucky == Some(bet.raw) {
            b.coins_gained += tuning.lucky_number_bonus;
        }

        if no_winner {
            b.compensation = tuning.no_winner_compensation;
        }

        if resolution.primary == Some(bet.player) {
            let hits = game.modifiers.sabotages.len() as u64;
            b.sabotage_loss = hits * tuning.sabotage_penalty;
        }

        breakdowns.push(b);
    }
    breakdowns
}

/// Apply settled breakdowns to player state. Coins are clamped to
/// `[0, coin_cap]` after every adjustment; a player landing exactly on
/// zero enters break mode. Players who sat out this turn's betting window
/// on break leave it here, collecting the one-time recovery stipend.
pub fn apply(game: &mut Game, breakdowns: &[RewardBreakdown]) {
    let coin_cap = game.options.coin_cap;
    let stipend = game.options.economy.recovery_stipend;

    // Players on break sat out this turn; their break ends now.
    for p in &mut game.players {
        if p.on_break() {
            p.finish_break(stipend, coin_cap);
        }
    }

    for b in breakdowns {
        let Some(p) = game.player_mut(b.player) else {
            continue;
        };
        p.remove_coins(b.stake_forfeited);
        p.remove_coins(b.sabotage_loss);
        p.add_coins(b.coins_gained, coin_cap);
        p.add_coins(b.compensation, coin_cap);
        p.points += b.points_gained;
    }

    for p in &mut game.players {
        if p.coins() == 0 && !p.on_break() {
            p.enter_break();
        }
    }
}

/// Experience awarded to a player for one finished game.
pub fn experience(stats: &PlayerStats, rank: usize) -> u64 {
    let placement = match rank {
        1 => 20,
        2 => 10,
        3 => 5,
        _ => 0,
    };
    10 + u64::from(stats.wins) * 5 + u64::from(stats.unique_wins) * 2 + placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameOptions;
    use crate::events::{ActiveEvent, EventKind};
    use crate::player::{Player, Seat};
    use crate::rules::{resolve, WinMode};

    fn game_with_bets(bets: &[(PlayerId, u64)]) -> (Game, Vec<BetLine>) {
        let options = GameOptions::default();
        let players = bets
            .iter()
            .map(|&(id, _)| Player::new(Seat::human(id, format!("p{id}")), options.starting_coins))
            .collect();
        let mut game = Game::new(1, "ROOM01".into(), options, players);
        game.begin_turn();
        let lines: Vec<BetLine> = bets
            .iter()
            .map(|&(player, raw)| {
                game.player_mut(player).unwrap().set_wager(raw);
                BetLine {
                    player,
                    raw,
                    doubled: false,
                }
            })
            .collect();
        (game, lines)
    }

    #[test]
    fn winner_gets_base_reward_minus_stake() {
        // {A:12, B:7, C:7}: A wins, forfeits 12, gains 3 points + 15 coins.
        let (mut game, bets) = game_with_bets(&[(1, 12), (2, 7), (3, 7)]);
        // Keep A off the bottom of the points table so no comeback bonus
        // muddies the base-reward arithmetic.
        game.player_mut(1).unwrap().points = 1;
        let resolution = resolve(&bets, WinMode::HighestUnique);
        let breakdowns = settle(&game, &bets, &resolution);
        apply(&mut game, &breakdowns);

        assert_eq!(game.player(1).unwrap().coins(), 100 - 12 + 15);
        assert_eq!(game.player(1).unwrap().points, 1 + 3);
        assert_eq!(game.player(2).unwrap().coins(), 100 - 7);
        assert_eq!(game.player(3).unwrap().coins(), 100 - 7);
    }

    #[test]
    fn no_winner_turn_forfeits_stakes_and_compensates() {
        let (mut game, bets) = game_with_bets(&[(1, 9), (2, 9)]);
        let resolution = resolve(&bets, WinMode::HighestUnique);
        assert!(resolution.winners.is_empty());
        let breakdowns = settle(&game, &bets, &resolution);
        apply(&mut game, &breakdowns);

        let comp = game.options.economy.no_winner_compensation;
        assert_eq!(game.player(1).unwrap().coins(), 100 - 9 + comp);
        assert_eq!(game.player(2).unwrap().coins(), 100 - 9 + comp);
    }

    #[test]
    fn shield_zeroes_a_losers_forfeit() {
        let (mut game, bets) = game_with_bets(&[(1, 12), (2, 7)]);
        game.modifiers.shielded.insert(2);
        let resolution = resolve(&bets, WinMode::HighestUnique);
        let breakdowns = settle(&game, &bets, &resolution);
        let loser = breakdowns.iter().find(|b| b.player == 2).unwrap();
        assert_eq!(loser.stake_forfeited, 0);
        apply(&mut game, &breakdowns);
        assert_eq!(game.player(2).unwrap().coins(), 100);
    }

    #[test]
    fn insurance_halves_a_losers_forfeit() {
        let (mut game, bets) = game_with_bets(&[(1, 12), (2, 9)]);
        game.modifiers.insured.insert(2);
        let resolution = resolve(&bets, WinMode::HighestUnique);
        let breakdowns = settle(&game, &bets, &resolution);
        let loser = breakdowns.iter().find(|b| b.player == 2).unwrap();
        assert_eq!(loser.stake_forfeited, 4);
    }

    #[test]
    fn doubled_card_stakes_raw_amount_on_loss() {
        // Raw 5 doubled to 10 for resolution; stake forfeited is still 5.
        let (mut game, mut bets) = game_with_bets(&[(1, 5), (2, 10), (3, 2)]);
        bets[0].doubled = true;
        let resolution = resolve(&bets, WinMode::HighestUnique);
        // 10 collides with the doubled 10 -> 2 is the only unique value.
        assert_eq!(resolution.winners, vec![3]);
        let breakdowns = settle(&game, &bets, &resolution);
        let doubled_loser = breakdowns.iter().find(|b| b.player == 1).unwrap();
        assert_eq!(doubled_loser.stake_forfeited, 5);
        apply(&mut game, &breakdowns);
        assert_eq!(game.player(1).unwrap().coins(), 95);
    }

    #[test]
    fn anti_snowball_halves_gain_above_threshold() {
        let (mut game, bets) = game_with_bets(&[(1, 12), (2, 7)]);
        // Push player 1 above the 80% threshold (400 of 500).
        game.player_mut(1).unwrap().add_coins(350, 500);
        // Avoid the comeback bonus landing on player 1.
        game.player_mut(2).unwrap().points = 0;
        game.player_mut(1).unwrap().points = 1;
        let resolution = resolve(&bets, WinMode::HighestUnique);
        let breakdowns = settle(&game, &bets, &resolution);
        let winner = breakdowns.iter().find(|b| b.player == 1).unwrap();
        assert_eq!(winner.coins_gained, game.options.economy.base_win_coins / 2);
    }

    #[test]
    fn comeback_bonus_reaches_the_points_last_winner() {
        let (mut game, bets) = game_with_bets(&[(1, 12), (2, 7)]);
        game.player_mut(1).unwrap().points = 0;
        game.player_mut(2).unwrap().points = 5;
        let resolution = resolve(&bets, WinMode::HighestUnique);
        let breakdowns = settle(&game, &bets, &resolution);
        let winner = breakdowns.iter().find(|b| b.player == 1).unwrap();
        let tuning = game.options.economy;
        assert_eq!(
            winner.coins_gained,
            tuning.base_win_coins + tuning.comeback_bonus
        );
    }

    #[test]
    fn dynamic_economy_off_disables_adjustments() {
        let (mut game, bets) = game_with_bets(&[(1, 12), (2, 7)]);
        game.options.dynamic_economy = false;
        game.player_mut(1).unwrap().add_coins(350, 500);
        game.player_mut(1).unwrap().points = 0;
        game.player_mut(2).unwrap().points = 5;
        let resolution = resolve(&bets, WinMode::HighestUnique);
        let breakdowns = settle(&game, &bets, &resolution);
        let winner = breakdowns.iter().find(|b| b.player == 1).unwrap();
        assert_eq!(winner.coins_gained, game.options.economy.base_win_coins);
    }

    #[test]
    fn zero_coins_after_settlement_enters_break_and_stipend_on_return() {
        let (mut game, bets) = game_with_bets(&[(1, 12), (2, 7)]);
        // Player 2 stakes their entire remaining coins.
        game.player_mut(2).unwrap().remove_coins(93);
        let resolution = resolve(&bets, WinMode::HighestUnique);
        let breakdowns = settle(&game, &bets, &resolution);
        apply(&mut game, &breakdowns);
        assert_eq!(game.player(2).unwrap().coins(), 0);
        assert!(game.player(2).unwrap().on_break());

        // Next settlement: the break ends with the one-time stipend.
        apply(&mut game, &[]);
        let p2 = game.player(2).unwrap();
        assert!(!p2.on_break());
        assert_eq!(p2.coins(), game.options.economy.recovery_stipend);
        assert_eq!(p2.stats.times_recovered, 1);
    }

    #[test]
    fn sabotage_hits_the_primary_winner() {
        let (mut game, bets) = game_with_bets(&[(1, 12), (2, 7), (3, 5)]);
        game.modifiers.sabotages.push(3);
        let resolution = resolve(&bets, WinMode::HighestUnique);
        let breakdowns = settle(&game, &bets, &resolution);
        let winner = breakdowns.iter().find(|b| b.player == 1).unwrap();
        assert_eq!(winner.sabotage_loss, game.options.economy.sabotage_penalty);
    }

    #[test]
    fn bounty_and_lucky_number_pay_out() {
        let (mut game, bets) = game_with_bets(&[(1, 12), (2, 7)]);
        game.active_event = Some(ActiveEvent {
            kind: EventKind::LuckyNumber,
            lucky_number: Some(7),
        });
        let resolution = resolve(&bets, WinMode::HighestUnique);
        let breakdowns = settle(&game, &bets, &resolution);
        let lucky = breakdowns.iter().find(|b| b.player == 2).unwrap();
        assert_eq!(lucky.coins_gained, game.options.economy.lucky_number_bonus);
    }

    #[test]
    fn experience_rewards_placement_and_wins() {
        let stats = PlayerStats {
            wins: 3,
            unique_wins: 2,
            ..PlayerStats::default()
        };
        assert_eq!(experience(&stats, 1), 10 + 15 + 4 + 20);
        assert_eq!(experience(&stats, 4), 10 + 15 + 4);
    }
}

