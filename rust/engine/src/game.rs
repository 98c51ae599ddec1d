use std::collections::{HashMap, HashSet};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardKind};
use crate::config::GameOptions;
use crate::events::ActiveEvent;
use crate::player::{Player, PlayerId};
use crate::snapshot::TurnResult;

/// Game identifier, assigned by the registry.
pub type GameId = u64;

/// Phase cycle of one turn. The orchestrator advances phases strictly in
/// this order (with module skips); `Finished` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Event,
    Planning,
    Betting,
    InstantCards,
    Reveal,
    Resolution,
    EndTurn,
    Finished,
}

impl Phase {
    /// Raw successor in the cycle, before module skips are applied.
    pub fn next(self) -> Phase {
        match self {
            Phase::Event => Phase::Planning,
            Phase::Planning => Phase::Betting,
            Phase::Betting => Phase::InstantCards,
            Phase::InstantCards => Phase::Reveal,
            Phase::Reveal => Phase::Resolution,
            Phase::Resolution => Phase::EndTurn,
            Phase::EndTurn => Phase::Event,
            Phase::Finished => Phase::Finished,
        }
    }
}

/// Transient per-turn modifier state. Card and event effects write here;
/// resolution and settlement consume it; `Game::begin_turn` clears it.
#[derive(Debug, Clone, Default)]
pub struct TurnModifiers {
    /// Players whose effective wager is doubled by a card.
    pub doubled: HashSet<PlayerId>,
    /// Players whose stake is protected from forfeiture.
    pub shielded: HashSet<PlayerId>,
    /// Players whose forfeited stake is halved by an insurance card.
    pub insured: HashSet<PlayerId>,
    /// Fabricated wagers shown to observers instead of the real ones.
    pub fake_bets: HashMap<PlayerId, u64>,
    /// Players who played a sabotage card this turn; resolved against the
    /// primary winner at settlement.
    pub sabotages: Vec<PlayerId>,
    /// Lowest-unique-wins mode, installed by an event.
    pub reverse: bool,
    /// Card play blocked for the whole turn, installed by an event.
    pub cards_blocked: bool,
}

impl TurnModifiers {
    pub fn clear(&mut self) {
        self.doubled.clear();
        self.shielded.clear();
        self.insured.clear();
        self.fake_bets.clear();
        self.sabotages.clear();
        self.reverse = false;
        self.cards_blocked = false;
    }
}

/// All state of one room's game. Exclusively owned by the registry and
/// mutated only on its timer's thread of control.
#[derive(Debug)]
pub struct Game {
    pub id: GameId,
    pub room_code: String,
    pub options: GameOptions,
    pub players: Vec<Player>,
    pub phase: Phase,
    /// 1-based turn counter.
    pub turn: u32,
    pub active_event: Option<ActiveEvent>,
    pub modifiers: TurnModifiers,
    /// Append-only; one entry per resolved turn.
    pub history: Vec<TurnResult>,
    /// Ledger of cards played during the current turn.
    pub played_this_turn: Vec<crate::cards::PlayedCard>,
    /// End-game role bonuses granted at finalization, for reporting.
    pub endgame_awards: Vec<crate::roles::RoleAward>,
    pub created_at: String,
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    rng: ChaCha20Rng,
    next_card_id: CardId,
}

impl Game {
    pub fn new(id: GameId, room_code: String, options: GameOptions, players: Vec<Player>) -> Self {
        let seed = options.seed.unwrap_or(id ^ 0x50_1B1D);
        Self {
            id,
            room_code,
            options,
            players,
            phase: Phase::Event,
            turn: 0,
            active_event: None,
            modifiers: TurnModifiers::default(),
            history: Vec::new(),
            played_this_turn: Vec::new(),
            endgame_awards: Vec::new(),
            created_at: now_rfc3339(),
            started_at: None,
            ended_at: None,
            rng: ChaCha20Rng::seed_from_u64(seed),
            next_card_id: 0,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Players participating in the current turn, in seat order.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }

    /// The player currently last in points, used by the comeback bonus.
    /// Ties go to the earliest seat, matching the display order.
    pub fn points_last(&self) -> Option<PlayerId> {
        self.players
            .iter()
            .min_by_key(|p| p.points)
            .map(|p| p.id)
    }

    /// The player currently first in points (ties to the earliest seat).
    pub fn points_leader(&self) -> Option<PlayerId> {
        self.players
            .iter()
            .fold(None::<&Player>, |best, p| match best {
                Some(b) if b.points >= p.points => Some(b),
                _ => Some(p),
            })
            .map(|p| p.id)
    }

    /// Reset transient state and open the next turn.
    pub fn begin_turn(&mut self) {
        self.turn += 1;
        self.active_event = None;
        self.modifiers.clear();
        self.played_this_turn.clear();
        for p in &mut self.players {
            p.clear_wager();
        }
    }

    /// Mint one card instance of the given kind.
    pub fn mint_card(&mut self, kind: CardKind) -> Card {
        let id = self.next_card_id;
        self.next_card_id += 1;
        Card { id, kind }
    }

    /// Seeded RNG for every random decision in this game.
    pub fn rng(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}

pub(crate) fn now_rfc3339() -> String {
    use chrono::{SecondsFormat, Utc};
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
