//! The game registry: an explicit id- and room-code-indexed store that
//! owns every live game, its phase timer and the bot-instance pool.
//! Creation and teardown responsibilities live here so that timer
//! cancellation on removal and exactly-once bot release are enforced by
//! construction rather than by caller discipline.

use std::collections::HashMap;

use tracing::debug;

use crate::bot::{BotFactory, BotPool};
use crate::clock::{ClockMs, PhaseTimer, TimerToken};
use crate::config::GameOptions;
use crate::engine::Engine;
use crate::errors::GameError;
use crate::game::{Game, GameId};
use crate::player::{PlayerId, Seat};
use crate::snapshot::{self, GameSnapshot};

struct ManagedGame {
    engine: Engine,
    timer: PhaseTimer,
    /// Bot seats of this game; drained exactly once when the game ends.
    bot_ids: Vec<PlayerId>,
}

/// Registry of all live games. All mutation of a given game flows through
/// one timer's thread of control; independent games share nothing but the
/// bot pool.
pub struct GameRegistry {
    games: HashMap<GameId, ManagedGame>,
    rooms: HashMap<String, GameId>,
    bots: BotPool,
    factory: Box<dyn BotFactory>,
    next_id: GameId,
}

impl GameRegistry {
    pub fn new(factory: Box<dyn BotFactory>) -> Self {
        Self {
            games: HashMap::new(),
            rooms: HashMap::new(),
            bots: BotPool::new(),
            factory,
            next_id: 1,
        }
    }

    /// Create a game, spawn its bot instances, start turn 1 and arm the
    /// first phase timer against `now`.
    pub fn create_game(
        &mut self,
        seats: Vec<Seat>,
        options: GameOptions,
        now: ClockMs,
    ) -> Result<GameId, GameError> {
        let id = self.next_id;
        let room_code = self.unused_room_code(id);
        let bot_seats: Vec<(PlayerId, crate::player::BotDifficulty)> = seats
            .iter()
            .filter_map(|s| s.bot.map(|d| (s.id, d)))
            .collect();
        let base_seed = options.seed.unwrap_or(id);

        let mut engine = Engine::new(id, room_code.clone(), seats, options)?;
        self.next_id += 1;

        let mut bot_ids = Vec::with_capacity(bot_seats.len());
        for (player, difficulty) in bot_seats {
            let bot = self
                .factory
                .create(player, difficulty, base_seed.wrapping_add(player));
            self.bots.insert(player, bot);
            bot_ids.push(player);
        }

        engine.start(&mut self.bots);
        let mut managed = ManagedGame {
            engine,
            timer: PhaseTimer::new(),
            bot_ids,
        };
        Self::arm_for_phase(&mut managed, now);
        self.rooms.insert(room_code, id);
        self.games.insert(id, managed);
        debug!(game = id, "game created");
        Ok(id)
    }

    /// Games whose phase deadline has passed, with the token their fire
    /// must present.
    pub fn due_games(&self, now: ClockMs) -> Vec<(GameId, TimerToken)> {
        let mut due: Vec<(GameId, TimerToken)> = self
            .games
            .iter()
            .filter(|(_, mg)| mg.timer.is_due(now))
            .filter_map(|(&id, mg)| mg.timer.current_token().map(|t| (id, t)))
            .collect();
        due.sort_by_key(|&(id, _)| id);
        due
    }

    /// Timer-fired phase advance. A fire against a removed game, or one
    /// carrying a stale token, is treated as successful cancellation and
    /// does nothing. Returns whether the game advanced.
    pub fn advance_phase(&mut self, id: GameId, token: TimerToken, now: ClockMs) -> bool {
        let Some(mg) = self.games.get_mut(&id) else {
            debug!(game = id, "timer fired for removed game; ignoring");
            return false;
        };
        if !mg.timer.accepts(token) {
            debug!(game = id, "stale timer fire; ignoring");
            return false;
        }
        mg.timer.cancel();
        mg.engine.advance(&mut self.bots);

        if mg.engine.game.is_finished() {
            for player in mg.bot_ids.drain(..) {
                self.bots.remove(&player);
            }
        } else {
            Self::arm_for_phase(mg, now);
        }
        true
    }

    /// Place a wager. Unknown game ids are a benign no-op.
    pub fn place_bet(
        &mut self,
        id: GameId,
        player: PlayerId,
        amount: u64,
    ) -> Result<(), GameError> {
        match self.games.get_mut(&id) {
            Some(mg) => mg.engine.place_bet(player, amount),
            None => {
                debug!(game = id, "place_bet on unknown game; ignoring");
                Ok(())
            }
        }
    }

    /// Play a card. Unknown game ids are a benign no-op.
    pub fn play_card(
        &mut self,
        id: GameId,
        player: PlayerId,
        card: u32,
        target: Option<PlayerId>,
    ) -> Result<(), GameError> {
        match self.games.get_mut(&id) {
            Some(mg) => mg.engine.play_card(player, card, target),
            None => {
                debug!(game = id, "play_card on unknown game; ignoring");
                Ok(())
            }
        }
    }

    pub fn get_game(&self, id: GameId) -> Option<&Game> {
        self.games.get(&id).map(|mg| &mg.engine.game)
    }

    pub fn get_game_by_room_code(&self, code: &str) -> Option<&Game> {
        self.rooms.get(code).and_then(|&id| self.get_game(id))
    }

    /// Broadcast snapshot of one game.
    pub fn snapshot(&self, id: GameId) -> Option<GameSnapshot> {
        self.get_game(id).map(snapshot::snapshot)
    }

    /// Remove a game, cancelling its timer and releasing its bots. A
    /// pending fire after removal hits the unknown-game path and is
    /// ignored.
    pub fn remove_game(&mut self, id: GameId) -> bool {
        let Some(mut mg) = self.games.remove(&id) else {
            return false;
        };
        mg.timer.cancel();
        for player in mg.bot_ids.drain(..) {
            self.bots.remove(&player);
        }
        self.rooms.retain(|_, gid| *gid != id);
        debug!(game = id, "game removed");
        true
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Live bot instances; exposed for resource-accounting checks.
    pub fn bot_count(&self) -> usize {
        self.bots.len()
    }

    fn arm_for_phase(mg: &mut ManagedGame, now: ClockMs) {
        let phase = mg.engine.game.phase;
        if let Some(duration) = mg.engine.game.options.phase_durations.for_phase(phase) {
            mg.timer.arm(now, duration);
        }
    }

    fn unused_room_code(&self, id: GameId) -> String {
        let mut salt = 0u64;
        loop {
            let code = room_code(id, salt);
            if !self.rooms.contains_key(&code) {
                return code;
            }
            salt += 1;
        }
    }
}

/// Six-character room code, deterministic per (id, salt).
fn room_code(id: GameId, salt: u64) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut x = (id ^ salt.wrapping_mul(0xA5A5_A5A5))
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(0xD1B5_4A32_D192_ED03);
    (0..6)
        .map(|_| {
            let c = ALPHABET[(x % 36) as usize];
            x /= 36;
            c as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_codes_are_six_chars_and_deterministic() {
        let a = room_code(1, 0);
        let b = room_code(1, 0);
        let c = room_code(2, 0);
        assert_eq!(a.len(), 6);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
