//! Per-game orchestrator: owns the phase state machine and sequences the
//! event, card, resolution, economy and role engines across one turn.
//!
//! Phases advance on timer fires only (`advance`); there is no
//! early-advance when everyone has acted. Bot decisions are injected at
//! fixed phase-entry points, always before the human-facing deadline.

use tracing::{debug, warn};

use crate::bot::{BetContext, BotPool, CardContext, OpponentView};
use crate::cards::{Card, TimingWindow};
use crate::config::GameOptions;
use crate::economy;
use crate::errors::GameError;
use crate::events;
use crate::game::{now_rfc3339, Game, GameId, Phase};
use crate::hand;
use crate::player::{Player, PlayerId, Seat};
use crate::roles;
use crate::rules::{self, BetLine, WinMode};
use crate::snapshot::{BetRecord, TurnResult};

/// Orchestrator for a single room's game.
#[derive(Debug)]
pub struct Engine {
    pub game: Game,
}

impl Engine {
    /// Build a game from its seats and options. Seeds per-player economy
    /// fields, deals starting hands and assigns secret roles according to
    /// the module toggles. The game has not started yet; call [`start`].
    ///
    /// [`start`]: Engine::start
    pub fn new(
        id: GameId,
        room_code: String,
        seats: Vec<Seat>,
        options: GameOptions,
    ) -> Result<Self, GameError> {
        options.validate()?;
        if seats.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        if seats.len() > options.max_players {
            return Err(GameError::TooManyPlayers {
                max: options.max_players,
            });
        }
        let starting_coins = options.starting_coins;
        let players: Vec<Player> = seats
            .into_iter()
            .map(|s| Player::new(s, starting_coins))
            .collect();
        let mut game = Game::new(id, room_code, options, players);
        if game.options.special_cards {
            hand::deal_initial_hands(&mut game);
        }
        if game.options.hidden_roles {
            roles::assign_roles(&mut game);
        }
        Ok(Self { game })
    }

    /// Start turn 1. Enters the first phase of the cycle (`Event`, or
    /// `Planning` when the random-events module is disabled).
    pub fn start(&mut self, bots: &mut BotPool) {
        self.game.started_at = Some(now_rfc3339());
        self.game.begin_turn();
        let first = if self.game.options.random_events {
            Phase::Event
        } else {
            Phase::Planning
        };
        self.enter(first, bots);
    }

    /// Timer-fired phase advance. Runs the leaving phase's deadline
    /// effects (auto-wagers when leaving `Betting`), applies module skip
    /// rules, then enters the next phase.
    pub fn advance(&mut self, bots: &mut BotPool) {
        let next = match self.game.phase {
            Phase::Event => Phase::Planning,
            Phase::Planning => Phase::Betting,
            Phase::Betting => {
                self.auto_wagers();
                if self.game.options.special_cards {
                    Phase::InstantCards
                } else {
                    Phase::Reveal
                }
            }
            Phase::InstantCards => Phase::Reveal,
            Phase::Reveal => Phase::Resolution,
            Phase::Resolution => Phase::EndTurn,
            Phase::EndTurn => {
                self.game.begin_turn();
                if self.game.options.random_events {
                    Phase::Event
                } else {
                    Phase::Planning
                }
            }
            Phase::Finished => return,
        };
        self.enter(next, bots);
    }

    /// Place a wager. Valid only during `Betting`, for a known player not
    /// on break, with an amount in `[min_bet, max_bet] ∩ [0, coins]`.
    /// Re-placing within the window overwrites the previous wager.
    pub fn place_bet(&mut self, player_id: PlayerId, amount: u64) -> Result<(), GameError> {
        if self.game.is_finished() {
            return Err(GameError::GameFinished);
        }
        if self.game.phase != Phase::Betting {
            return Err(GameError::WrongPhase {
                phase: self.game.phase,
            });
        }
        let (min_bet, max_bet) = (self.game.options.min_bet, self.game.options.max_bet);
        let player = self
            .game
            .player(player_id)
            .ok_or(GameError::UnknownPlayer(player_id))?;
        if player.on_break() {
            return Err(GameError::PlayerOnBreak);
        }
        let amount = rules::validate_wager(amount, min_bet, max_bet, player.coins())?;
        self.game
            .player_mut(player_id)
            .expect("player existed above")
            .set_wager(amount);
        Ok(())
    }

    /// Play a card; delegated to the card manager.
    pub fn play_card(
        &mut self,
        player_id: PlayerId,
        card_id: u32,
        target: Option<PlayerId>,
    ) -> Result<(), GameError> {
        if self.game.is_finished() {
            return Err(GameError::GameFinished);
        }
        hand::play_card(&mut self.game, player_id, card_id, target)
    }

    fn enter(&mut self, phase: Phase, bots: &mut BotPool) {
        self.game.phase = phase;
        debug!(game = self.game.id, ?phase, turn = self.game.turn, "phase entered");
        match phase {
            Phase::Event => {
                let options = self.game.options.clone();
                self.game.active_event = events::draw(self.game.rng(), &options);
                events::apply_on_entry(&mut self.game);
                if let Some(event) = self.game.active_event {
                    debug!(game = self.game.id, event = event.kind.spec().name, "event drawn");
                }
            }
            Phase::Planning | Phase::Reveal => {
                // Read-only thinking time; no entry effects.
            }
            Phase::Betting => {
                self.bot_wagers(bots);
                self.bot_cards(bots, TimingWindow::BeforeBet);
            }
            Phase::InstantCards => {
                self.bot_cards(bots, TimingWindow::Instant);
            }
            Phase::Resolution => {
                self.run_resolution(bots);
            }
            Phase::EndTurn => {
                if self.game_over() {
                    self.finalize();
                }
            }
            Phase::Finished => {}
        }
    }

    /// Deadline auto-resolution: anyone who has not wagered when the
    /// betting window closes wagers the minimum affordable amount.
    fn auto_wagers(&mut self) {
        let min_bet = self.game.options.min_bet;
        let game_id = self.game.id;
        for p in &mut self.game.players {
            if p.is_active() && p.wager().is_none() {
                let amount = min_bet.min(p.coins());
                p.set_wager(amount);
                debug!(game = game_id, player = p.id, amount, "auto-wager at deadline");
            }
        }
    }

    fn opponent_views(&self, of: PlayerId) -> Vec<OpponentView> {
        self.game
            .players
            .iter()
            .filter(|p| p.id != of)
            .map(|p| OpponentView {
                id: p.id,
                points: p.points,
                coins: p.coins(),
                on_break: p.on_break(),
            })
            .collect()
    }

    fn bot_wagers(&mut self, bots: &mut BotPool) {
        let ids: Vec<PlayerId> = self
            .game
            .players
            .iter()
            .filter(|p| p.is_bot() && p.is_active())
            .map(|p| p.id)
            .collect();
        for id in ids {
            let Some(bot) = bots.get_mut(&id) else {
                warn!(game = self.game.id, player = id, "bot missing from pool");
                continue;
            };
            let opponents = self.opponent_views(id);
            let player = self.game.player(id).expect("bot id from player list");
            let ctx = BetContext {
                turn: self.game.turn,
                max_turns: self.game.options.max_turns,
                min_bet: self.game.options.min_bet,
                max_bet: self.game.options.max_bet,
                coins: player.coins(),
                points: player.points,
                points_to_win: self.game.options.points_to_win,
                event: self.game.active_event,
                opponents: &opponents,
            };
            let amount = ctx.clamp(bot.decide_wager(&ctx));
            if amount > 0 {
                self.game
                    .player_mut(id)
                    .expect("bot id from player list")
                    .set_wager(amount);
            }
        }
    }

    fn bot_cards(&mut self, bots: &mut BotPool, window: TimingWindow) {
        if self.game.modifiers.cards_blocked {
            return;
        }
        let leader = self.game.points_leader();
        let ids: Vec<PlayerId> = self
            .game
            .players
            .iter()
            .filter(|p| p.is_bot() && p.is_active() && !p.hand.is_empty())
            .map(|p| p.id)
            .collect();
        for id in ids {
            let Some(bot) = bots.get_mut(&id) else {
                continue;
            };
            let player = self.game.player(id).expect("bot id from player list");
            let playable: Vec<Card> = player
                .hand
                .iter()
                .copied()
                .filter(|c| c.kind.spec().window == window)
                .collect();
            if playable.is_empty() {
                continue;
            }
            let opponents = self.opponent_views(id);
            let ctx = CardContext {
                playable: &playable,
                wager: player.wager(),
                coins: player.coins(),
                points: player.points,
                leading: leader == Some(id),
                leader: leader.filter(|l| *l != id),
                event: self.game.active_event,
                opponents: &opponents,
            };
            if let Some(choice) = bot.decide_card(&ctx) {
                if let Err(err) = hand::play_card(&mut self.game, id, choice.card, choice.target) {
                    debug!(game = self.game.id, player = id, %err, "bot card play rejected");
                }
            }
        }
    }

    fn run_resolution(&mut self, bots: &mut BotPool) {
        let game = &mut self.game;
        let event_kind = game.active_event.map(|e| e.kind);
        let event_doubles = event_kind.is_some_and(|k| k.doubles_bets());

        let bets: Vec<BetLine> = game
            .players
            .iter()
            .filter_map(|p| {
                p.wager().map(|raw| BetLine {
                    player: p.id,
                    raw,
                    doubled: event_doubles || game.modifiers.doubled.contains(&p.id),
                })
            })
            .collect();

        let mode = if event_kind.is_some_and(|k| k.shares_win()) {
            WinMode::SharedHighest
        } else if game.modifiers.reverse {
            WinMode::LowestUnique
        } else {
            WinMode::HighestUnique
        };

        let resolution = rules::resolve(&bets, mode);
        let rewards = economy::settle(game, &bets, &resolution);
        economy::apply(game, &rewards);

        for bet in &bets {
            if let Some(p) = game.player_mut(bet.player) {
                p.stats.total_wagered += bet.raw;
            }
        }
        for &winner in &resolution.winners {
            if let Some(p) = game.player_mut(winner) {
                p.stats.wins += 1;
                if mode != WinMode::SharedHighest {
                    p.stats.unique_wins += 1;
                }
            }
        }

        let role_awards = roles::check_turn_roles(game, &resolution.winners);
        if game.options.special_cards {
            hand::replenish(game);
        }

        let bet_records: Vec<BetRecord> = resolution
            .effective
            .iter()
            .map(|&(pid, effective)| BetRecord {
                player: pid,
                raw: bets
                    .iter()
                    .find(|b| b.player == pid)
                    .map(|b| b.raw)
                    .unwrap_or(effective),
                effective,
                fake: game.modifiers.fake_bets.get(&pid).copied(),
            })
            .collect();

        let result = TurnResult {
            turn: game.turn,
            event: game.active_event,
            bets: bet_records,
            cards_played: game.played_this_turn.clone(),
            winners: resolution.winners.clone(),
            primary_winner: resolution.primary,
            rewards,
            role_awards,
            ts: now_rfc3339(),
        };
        debug!(
            game = game.id,
            turn = game.turn,
            winners = ?result.winners,
            "turn resolved"
        );
        for bot in bots.values_mut() {
            bot.observe_turn(&result);
        }
        game.history.push(result);
    }

    fn game_over(&self) -> bool {
        let target = self.game.options.points_to_win;
        self.game.players.iter().any(|p| p.points >= target)
            || self.game.turn >= self.game.options.max_turns
    }

    /// Finalize the game: stamp the end time, apply end-game-only role
    /// bonuses and reach the terminal phase. Timer cancellation and bot
    /// release are the registry's side of the teardown.
    fn finalize(&mut self) {
        self.game.endgame_awards = roles::check_endgame_roles(&mut self.game);
        self.game.ended_at = Some(now_rfc3339());
        self.game.phase = Phase::Finished;
        debug!(game = self.game.id, turns = self.game.history.len(), "game finished");
    }
}
