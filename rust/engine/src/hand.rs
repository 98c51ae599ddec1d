//! The card manager: play validation, hand mutation and the per-turn
//! played-card ledger. Effects only ever touch transient `TurnModifiers`
//! state; the card library itself is never mutated.

use rand::Rng;

use crate::cards::{draw_kind, CardId, CardKind, PlayedCard};
use crate::errors::GameError;
use crate::game::Game;
use crate::player::PlayerId;

/// Play one card from a player's hand.
///
/// Succeeds only if the card is in the player's hand, its timing window
/// matches the current phase, no active event blocks card play, and a
/// valid target is supplied when the kind requires one. On success exactly
/// one card instance leaves the hand and exactly one ledger entry is
/// appended; on failure nothing changes.
pub fn play_card(
    game: &mut Game,
    player_id: PlayerId,
    card_id: CardId,
    target: Option<PlayerId>,
) -> Result<(), GameError> {
    let phase = game.phase;
    let player = game
        .player(player_id)
        .ok_or(GameError::UnknownPlayer(player_id))?;
    let card = player
        .hand
        .iter()
        .copied()
        .find(|c| c.id == card_id)
        .ok_or(GameError::CardNotInHand(card_id))?;
    let spec = card.kind.spec();

    if !spec.window.matches(phase) {
        return Err(GameError::CardNotPlayable);
    }
    if game.modifiers.cards_blocked {
        return Err(GameError::CardsBlocked);
    }
    if spec.needs_target {
        let target_id = target.ok_or(GameError::MissingTarget)?;
        if target_id == player_id || game.player(target_id).is_none() {
            return Err(GameError::InvalidTarget);
        }
    }

    let note = apply_effect(game, player_id, card.kind, target);

    let player = game
        .player_mut(player_id)
        .expect("player existed above");
    let idx = player
        .hand
        .iter()
        .position(|c| c.id == card_id)
        .expect("card existed above");
    player.hand.remove(idx);
    player.stats.cards_played += 1;

    game.played_this_turn.push(PlayedCard {
        player: player_id,
        card,
        target,
        note,
    });
    Ok(())
}

/// The single effect resolver: one arm per card kind, all writing into
/// transient modifier state only.
fn apply_effect(
    game: &mut Game,
    player_id: PlayerId,
    kind: CardKind,
    target: Option<PlayerId>,
) -> Option<String> {
    match kind {
        CardKind::Double => {
            game.modifiers.doubled.insert(player_id);
            None
        }
        CardKind::Shield => {
            game.modifiers.shielded.insert(player_id);
            None
        }
        CardKind::Insurance => {
            game.modifiers.insured.insert(player_id);
            None
        }
        CardKind::Sabotage => {
            // Recorded now; the real target (the primary winner) is only
            // known at resolution.
            game.modifiers.sabotages.push(player_id);
            None
        }
        CardKind::Mirage => {
            let fake = fabricate_wager(game, player_id);
            game.modifiers.fake_bets.insert(player_id, fake);
            None
        }
        CardKind::Peek => {
            let target_id = target.expect("validated above");
            let note = match game.player(target_id).and_then(|p| p.wager()) {
                Some(w) if w % 2 == 0 => "target wagered an even amount".to_string(),
                Some(_) => "target wagered an odd amount".to_string(),
                None => "target has not wagered".to_string(),
            };
            Some(note)
        }
    }
}

/// Pick a fabricated wager for a mirage card, guaranteed different from
/// the player's real wager whenever the range allows it.
fn fabricate_wager(game: &mut Game, player_id: PlayerId) -> u64 {
    let min = game.options.min_bet;
    let max = game.options.max_bet;
    let real = game.player(player_id).and_then(|p| p.wager());
    let fake = game.rng().random_range(min..=max);
    match real {
        Some(real) if fake == real => {
            if real == min {
                max
            } else {
                min
            }
        }
        _ => fake,
    }
}

/// Deal each player their starting hand with the weighted rarity draw.
pub fn deal_initial_hands(game: &mut Game) {
    let count = game.options.hands.starting_hand;
    for seat in 0..game.players.len() {
        for _ in 0..count {
            let kind = draw_kind(game.rng());
            let card = game.mint_card(kind);
            game.players[seat].hand.push(card);
        }
    }
}

/// Replenish hands on the fixed cadence: one card per player on every
/// `replenish_every`-th turn, bounded by the maximum hand size.
pub fn replenish(game: &mut Game) {
    let cadence = game.options.hands.replenish_every.max(1);
    if game.turn % cadence != 0 {
        return;
    }
    let max_hand = game.options.hands.max_hand;
    for seat in 0..game.players.len() {
        if game.players[seat].hand.len() >= max_hand {
            continue;
        }
        let kind = draw_kind(game.rng());
        let card = game.mint_card(kind);
        game.players[seat].hand.push(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameOptions;
    use crate::game::Phase;
    use crate::player::{Player, Seat};

    fn game() -> Game {
        let options = GameOptions::default();
        let players = vec![
            Player::new(Seat::human(1, "a"), options.starting_coins),
            Player::new(Seat::human(2, "b"), options.starting_coins),
        ];
        let mut game = Game::new(1, "ROOM01".into(), options, players);
        game.begin_turn();
        game
    }

    fn give(game: &mut Game, player: PlayerId, kind: CardKind) -> CardId {
        let card = game.mint_card(kind);
        game.player_mut(player).unwrap().hand.push(card);
        card.id
    }

    #[test]
    fn playing_a_card_removes_one_instance_and_appends_one_entry() {
        let mut game = game();
        game.phase = Phase::Betting;
        let first = give(&mut game, 1, CardKind::Double);
        let second = give(&mut game, 1, CardKind::Double);

        play_card(&mut game, 1, first, None).unwrap();
        let p = game.player(1).unwrap();
        assert_eq!(p.hand.len(), 1);
        assert_eq!(p.hand[0].id, second);
        assert_eq!(p.stats.cards_played, 1);
        assert_eq!(game.played_this_turn.len(), 1);
        assert!(game.modifiers.doubled.contains(&1));
    }

    #[test]
    fn absent_card_id_causes_no_side_effects() {
        let mut game = game();
        game.phase = Phase::Betting;
        give(&mut game, 1, CardKind::Double);

        let err = play_card(&mut game, 1, 999, None).unwrap_err();
        assert_eq!(err, GameError::CardNotInHand(999));
        assert_eq!(game.player(1).unwrap().hand.len(), 1);
        assert!(game.played_this_turn.is_empty());
        assert!(game.modifiers.doubled.is_empty());
    }

    #[test]
    fn window_mismatch_is_rejected() {
        let mut game = game();
        game.phase = Phase::Reveal;
        let id = give(&mut game, 1, CardKind::Double);
        assert_eq!(
            play_card(&mut game, 1, id, None),
            Err(GameError::CardNotPlayable)
        );
    }

    #[test]
    fn card_freeze_blocks_play() {
        let mut game = game();
        game.phase = Phase::Betting;
        game.modifiers.cards_blocked = true;
        let id = give(&mut game, 1, CardKind::Shield);
        assert_eq!(
            play_card(&mut game, 1, id, None),
            Err(GameError::CardsBlocked)
        );
    }

    #[test]
    fn peek_requires_a_valid_other_target() {
        let mut game = game();
        game.phase = Phase::InstantCards;
        let id = give(&mut game, 1, CardKind::Peek);
        assert_eq!(
            play_card(&mut game, 1, id, None),
            Err(GameError::MissingTarget)
        );
        assert_eq!(
            play_card(&mut game, 1, id, Some(1)),
            Err(GameError::InvalidTarget)
        );
        assert_eq!(
            play_card(&mut game, 1, id, Some(42)),
            Err(GameError::InvalidTarget)
        );

        game.player_mut(2).unwrap().set_wager(8);
        play_card(&mut game, 1, id, Some(2)).unwrap();
        let entry = &game.played_this_turn[0];
        assert_eq!(
            entry.note.as_deref(),
            Some("target wagered an even amount")
        );
    }

    #[test]
    fn mirage_fake_differs_from_real_wager() {
        let mut game = game();
        game.phase = Phase::InstantCards;
        // Walk the rng through many draws; the fake must never match.
        for real in game.options.min_bet..=game.options.max_bet {
            game.player_mut(1).unwrap().set_wager(real);
            let id = give(&mut game, 1, CardKind::Mirage);
            play_card(&mut game, 1, id, None).unwrap();
            let fake = game.modifiers.fake_bets[&1];
            assert_ne!(fake, real);
            assert!((game.options.min_bet..=game.options.max_bet).contains(&fake));
        }
    }

    #[test]
    fn sabotage_is_deferred_to_resolution() {
        let mut game = game();
        game.phase = Phase::InstantCards;
        let id = give(&mut game, 1, CardKind::Sabotage);
        play_card(&mut game, 1, id, None).unwrap();
        assert_eq!(game.modifiers.sabotages, vec![1]);
        // No coins moved yet.
        assert_eq!(game.player(1).unwrap().coins(), 100);
        assert_eq!(game.player(2).unwrap().coins(), 100);
    }

    #[test]
    fn initial_hands_match_configured_size() {
        let mut game = game();
        deal_initial_hands(&mut game);
        for p in &game.players {
            assert_eq!(p.hand.len(), game.options.hands.starting_hand);
        }
    }

    #[test]
    fn replenish_respects_cadence_and_hand_cap() {
        let mut game = game();
        // Turn 1: off-cadence with the default every-2-turns setting.
        replenish(&mut game);
        assert!(game.player(1).unwrap().hand.is_empty());

        game.begin_turn(); // turn 2
        replenish(&mut game);
        assert_eq!(game.player(1).unwrap().hand.len(), 1);

        // Fill a hand to the cap; it must not grow further.
        for _ in 0..10 {
            let card = game.mint_card(CardKind::Double);
            let max = game.options.hands.max_hand;
            let hand = &mut game.player_mut(1).unwrap().hand;
            if hand.len() < max {
                hand.push(card);
            }
        }
        game.begin_turn(); // turn 3
        game.begin_turn(); // turn 4
        replenish(&mut game);
        assert_eq!(
            game.player(1).unwrap().hand.len(),
            game.options.hands.max_hand
        );
    }
}
