//! Plain-data views of a game: the per-turn [`TurnResult`] appended to
//! history for client replay, the [`GameSnapshot`] broadcast after every
//! mutation, and the end-of-game ranking and per-player summaries.
//! Serialization of these records is the core's entire outbound surface;
//! transport and persistence belong to external collaborators.

use serde::{Deserialize, Serialize};

use crate::cards::PlayedCard;
use crate::economy::{self, RewardBreakdown};
use crate::events::ActiveEvent;
use crate::game::{Game, GameId, Phase};
use crate::player::{BotDifficulty, PlayerId};
use crate::roles::RoleAward;

/// One player's bet as it entered resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRecord {
    pub player: PlayerId,
    pub raw: u64,
    pub effective: u64,
    /// Fabricated wager observers were shown, if a mirage was in play.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake: Option<u64>,
}

/// Immutable record of one resolved turn. Appended to history, never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub turn: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<ActiveEvent>,
    pub bets: Vec<BetRecord>,
    pub cards_played: Vec<PlayedCard>,
    pub winners: Vec<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_winner: Option<PlayerId>,
    pub rewards: Vec<RewardBreakdown>,
    pub role_awards: Vec<RoleAward>,
    pub ts: String,
}

/// Public view of one player inside a snapshot. Wagers stay hidden until
/// the reveal; a mirage overlays its fabricated value while they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub coins: u64,
    pub points: u64,
    pub hand_size: usize,
    pub on_break: bool,
    pub is_bot: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<BotDifficulty>,
    pub has_wagered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shown_wager: Option<u64>,
}

/// Full game snapshot suitable for external broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub id: GameId,
    pub room_code: String,
    pub phase: Phase,
    pub turn: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_event: Option<ActiveEvent>,
    pub players: Vec<PlayerView>,
    pub turns_played: usize,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
}

/// Build the broadcast snapshot for the game's current state.
pub fn snapshot(game: &Game) -> GameSnapshot {
    let wagers_public = matches!(
        game.phase,
        Phase::Reveal | Phase::Resolution | Phase::EndTurn | Phase::Finished
    );
    let players = game
        .players
        .iter()
        .map(|p| {
            let shown_wager = if wagers_public {
                p.wager()
            } else {
                game.modifiers.fake_bets.get(&p.id).copied()
            };
            PlayerView {
                id: p.id,
                name: p.name.clone(),
                coins: p.coins(),
                points: p.points,
                hand_size: p.hand.len(),
                on_break: p.on_break(),
                is_bot: p.is_bot(),
                difficulty: p.bot,
                has_wagered: p.wager().is_some(),
                shown_wager,
            }
        })
        .collect();
    GameSnapshot {
        id: game.id,
        room_code: game.room_code.clone(),
        phase: game.phase,
        turn: game.turn,
        active_event: game.active_event,
        players,
        turns_played: game.history.len(),
        created_at: game.created_at.clone(),
        started_at: game.started_at.clone(),
        ended_at: game.ended_at.clone(),
    }
}

/// One row of the final ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStanding {
    pub rank: usize,
    pub player: PlayerId,
    pub name: String,
    pub points: u64,
    pub coins: u64,
    pub unique_wins: u32,
}

/// Final ranking: points, then coins, then unique wins; remaining ties
/// keep seat order.
pub fn final_ranking(game: &Game) -> Vec<FinalStanding> {
    let mut order: Vec<&crate::player::Player> = game.players.iter().collect();
    order.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.coins().cmp(&a.coins()))
            .then(b.stats.unique_wins.cmp(&a.stats.unique_wins))
    });
    order
        .into_iter()
        .enumerate()
        .map(|(i, p)| FinalStanding {
            rank: i + 1,
            player: p.id,
            name: p.name.clone(),
            points: p.points,
            coins: p.coins(),
            unique_wins: p.stats.unique_wins,
        })
        .collect()
}

/// Per-player end-of-game summary handed to the progression collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: PlayerId,
    pub name: String,
    pub rank: usize,
    pub points: u64,
    pub coins_gained: i64,
    pub cards_played: u32,
    pub total_wagered: u64,
    pub experience: u64,
}

/// Build the per-player summaries, in final-ranking order.
pub fn summaries(game: &Game) -> Vec<PlayerSummary> {
    final_ranking(game)
        .into_iter()
        .map(|standing| {
            let p = game
                .player(standing.player)
                .expect("ranking is built from the player list");
            PlayerSummary {
                player: p.id,
                name: p.name.clone(),
                rank: standing.rank,
                points: p.points,
                coins_gained: p.coins() as i64 - game.options.starting_coins as i64,
                cards_played: p.stats.cards_played,
                total_wagered: p.stats.total_wagered,
                experience: economy::experience(&p.stats, standing.rank),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameOptions;
    use crate::player::{Player, Seat};

    fn game() -> Game {
        let options = GameOptions::default();
        let players = vec![
            Player::new(Seat::human(1, "a"), options.starting_coins),
            Player::new(Seat::human(2, "b"), options.starting_coins),
            Player::new(Seat::human(3, "c"), options.starting_coins),
        ];
        let mut game = Game::new(1, "ROOM01".into(), options, players);
        game.begin_turn();
        game
    }

    #[test]
    fn wagers_stay_hidden_until_reveal() {
        let mut g = game();
        g.phase = Phase::Betting;
        g.player_mut(1).unwrap().set_wager(12);
        let snap = snapshot(&g);
        let p1 = &snap.players[0];
        assert!(p1.has_wagered);
        assert_eq!(p1.shown_wager, None);

        g.phase = Phase::Reveal;
        let snap = snapshot(&g);
        assert_eq!(snap.players[0].shown_wager, Some(12));
    }

    #[test]
    fn mirage_overlay_is_shown_while_wagers_are_secret() {
        let mut g = game();
        g.phase = Phase::InstantCards;
        g.player_mut(1).unwrap().set_wager(12);
        g.modifiers.fake_bets.insert(1, 3);
        let snap = snapshot(&g);
        assert_eq!(snap.players[0].shown_wager, Some(3));
    }

    #[test]
    fn ranking_sorts_points_then_coins_then_unique_wins() {
        let mut g = game();
        g.player_mut(1).unwrap().points = 5;
        g.player_mut(2).unwrap().points = 5;
        g.player_mut(3).unwrap().points = 9;
        g.player_mut(1).unwrap().remove_coins(50);
        g.player_mut(2).unwrap().stats.unique_wins = 2;

        let ranking = final_ranking(&g);
        assert_eq!(
            ranking.iter().map(|s| s.player).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
        assert_eq!(ranking[0].rank, 1);
    }

    #[test]
    fn turn_results_serialize_for_broadcast() {
        let result = TurnResult {
            turn: 1,
            event: None,
            bets: vec![BetRecord {
                player: 1,
                raw: 5,
                effective: 10,
                fake: None,
            }],
            cards_played: Vec::new(),
            winners: vec![1],
            primary_winner: Some(1),
            rewards: Vec::new(),
            role_awards: Vec::new(),
            ts: "2026-01-01T00:00:00Z".into(),
        };
        let text = serde_json::to_string(&result).unwrap();
        // Absent options stay off the wire entirely.
        assert!(!text.contains("\"fake\""));
        assert!(!text.contains("\"event\""));
        let back: TurnResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn summaries_track_coin_deltas_and_experience() {
        let mut g = game();
        g.player_mut(1).unwrap().add_coins(40, 500);
        g.player_mut(2).unwrap().remove_coins(30);
        let summaries = summaries(&g);
        let p1 = summaries.iter().find(|s| s.player == 1).unwrap();
        let p2 = summaries.iter().find(|s| s.player == 2).unwrap();
        assert_eq!(p1.coins_gained, 40);
        assert_eq!(p2.coins_gained, -30);
        assert!(p1.experience >= 10);
    }
}
