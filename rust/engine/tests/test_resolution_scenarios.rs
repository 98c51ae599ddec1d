//! End-to-end resolution scenarios driven through the public engine API.

use solobid_engine::bot::BotPool;
use solobid_engine::config::GameOptions;
use solobid_engine::engine::Engine;
use solobid_engine::errors::GameError;
use solobid_engine::events::{ActiveEvent, EventKind};
use solobid_engine::game::Phase;
use solobid_engine::player::Seat;

fn quiet_options() -> GameOptions {
    GameOptions {
        random_events: false,
        special_cards: false,
        hidden_roles: false,
        dynamic_economy: false,
        ..GameOptions::default()
    }
}

fn start_three(options: GameOptions) -> (Engine, BotPool) {
    let seats = vec![
        Seat::human(1, "a"),
        Seat::human(2, "b"),
        Seat::human(3, "c"),
    ];
    let mut engine = Engine::new(1, "ROOM01".into(), seats, options).unwrap();
    let mut bots = BotPool::new();
    engine.start(&mut bots);
    (engine, bots)
}

fn bet_all(engine: &mut Engine, bets: &[(u64, u64)]) {
    for &(player, amount) in bets {
        engine.place_bet(player, amount).unwrap();
    }
}

#[test]
fn tied_highest_yields_no_winner_with_compensation() {
    // {A:9, B:9, C:5} -> 9 is not unique, 5 is -> C wins. Force the true
    // no-winner case with all three tied.
    let (mut engine, mut bots) = start_three(quiet_options());
    engine.advance(&mut bots); // -> Betting
    bet_all(&mut engine, &[(1, 9), (2, 9), (3, 9)]);
    engine.advance(&mut bots); // -> Reveal
    engine.advance(&mut bots); // -> Resolution

    let result = &engine.game.history[0];
    assert!(result.winners.is_empty());
    assert_eq!(result.primary_winner, None);
    let comp = engine.game.options.economy.no_winner_compensation;
    for id in [1, 2, 3] {
        // Stake forfeited, flat compensation received.
        assert_eq!(engine.game.player(id).unwrap().coins(), 100 - 9 + comp);
    }
}

#[test]
fn nine_nine_five_lets_the_five_win() {
    let (mut engine, mut bots) = start_three(quiet_options());
    engine.advance(&mut bots);
    bet_all(&mut engine, &[(1, 9), (2, 9), (3, 5)]);
    engine.advance(&mut bots);
    engine.advance(&mut bots);

    assert_eq!(engine.game.history[0].winners, vec![3]);
}

#[test]
fn unique_highest_wins_and_stakes_raw_amount() {
    // {A:12, B:7, C:7}: A wins with 12, receives the base reward and
    // forfeits 12 coins as stake.
    let (mut engine, mut bots) = start_three(quiet_options());
    engine.advance(&mut bots);
    bet_all(&mut engine, &[(1, 12), (2, 7), (3, 7)]);
    engine.advance(&mut bots);
    engine.advance(&mut bots);

    let result = &engine.game.history[0];
    assert_eq!(result.winners, vec![1]);
    let base = engine.game.options.economy.base_win_coins;
    assert_eq!(engine.game.player(1).unwrap().coins(), 100 - 12 + base);
    assert_eq!(
        engine.game.player(1).unwrap().points,
        engine.game.options.economy.base_win_points
    );
    assert_eq!(engine.game.player(2).unwrap().coins(), 100 - 7);
}

#[test]
fn smallest_wins_event_still_requires_uniqueness() {
    // Smallest-wins active, {A:1, B:1, C:4}: 1 is not unique -> C wins.
    let (mut engine, mut bots) = start_three(quiet_options());
    engine.advance(&mut bots); // -> Betting
    engine.game.active_event = Some(ActiveEvent {
        kind: EventKind::SmallestWins,
        lucky_number: None,
    });
    engine.game.modifiers.reverse = true;
    bet_all(&mut engine, &[(1, 1), (2, 1), (3, 4)]);
    engine.advance(&mut bots);
    engine.advance(&mut bots);

    assert_eq!(engine.game.history[0].winners, vec![3]);
}

#[test]
fn shared_victory_selects_all_top_ties_with_seat_order_primary() {
    let (mut engine, mut bots) = start_three(quiet_options());
    engine.advance(&mut bots);
    engine.game.active_event = Some(ActiveEvent {
        kind: EventKind::SharedVictory,
        lucky_number: None,
    });
    bet_all(&mut engine, &[(1, 5), (2, 9), (3, 9)]);
    engine.advance(&mut bots);
    engine.advance(&mut bots);

    let result = &engine.game.history[0];
    assert_eq!(result.winners, vec![2, 3]);
    assert_eq!(result.primary_winner, Some(2));
    // Co-winners each take the full base reward; neither counts a unique win.
    assert_eq!(engine.game.player(2).unwrap().stats.wins, 1);
    assert_eq!(engine.game.player(2).unwrap().stats.unique_wins, 0);
}

#[test]
fn double_stakes_event_doubles_every_effective_wager() {
    // All doubled: relative order unchanged, winner as without the event,
    // but recorded effective wagers are doubled.
    let (mut engine, mut bots) = start_three(quiet_options());
    engine.advance(&mut bots);
    engine.game.active_event = Some(ActiveEvent {
        kind: EventKind::DoubleStakes,
        lucky_number: None,
    });
    bet_all(&mut engine, &[(1, 12), (2, 7), (3, 7)]);
    engine.advance(&mut bots);
    engine.advance(&mut bots);

    let result = &engine.game.history[0];
    assert_eq!(result.winners, vec![1]);
    let a = result.bets.iter().find(|b| b.player == 1).unwrap();
    assert_eq!(a.raw, 12);
    assert_eq!(a.effective, 24);
    // Stake stays the raw wager.
    let base = engine.game.options.economy.base_win_coins;
    assert_eq!(engine.game.player(1).unwrap().coins(), 100 - 12 + base);
}

#[test]
fn wager_validation_rejects_out_of_range_and_unaffordable() {
    let (mut engine, mut bots) = start_three(quiet_options());
    engine.advance(&mut bots); // -> Betting
    assert!(matches!(
        engine.place_bet(1, 26),
        Err(GameError::InvalidWager { .. })
    ));
    // Drain player 1 to 5 coins: the affordable maximum shrinks.
    engine.game.player_mut(1).unwrap().remove_coins(95);
    assert!(matches!(
        engine.place_bet(1, 6),
        Err(GameError::InvalidWager { .. })
    ));
    engine.place_bet(1, 5).unwrap();
    assert_eq!(engine.game.phase, Phase::Betting);
}

#[test]
fn uniqueness_is_computed_fresh_each_turn() {
    // Turn 1 resolves a unique 12; turn 2 the same value ties and loses.
    let (mut engine, mut bots) = start_three(quiet_options());
    engine.advance(&mut bots);
    bet_all(&mut engine, &[(1, 12), (2, 7), (3, 7)]);
    engine.advance(&mut bots);
    engine.advance(&mut bots);
    assert_eq!(engine.game.history[0].winners, vec![1]);

    engine.advance(&mut bots); // -> EndTurn
    engine.advance(&mut bots); // -> Planning (turn 2)
    engine.advance(&mut bots); // -> Betting
    bet_all(&mut engine, &[(1, 12), (2, 12), (3, 7)]);
    engine.advance(&mut bots);
    engine.advance(&mut bots);
    assert_eq!(engine.game.history[1].winners, vec![3]);
}
