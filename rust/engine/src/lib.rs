//! # solobid-engine: Unique-Wager Game Simulation Core
//!
//! A deterministic simulation engine for the "unique highest secret wager
//! wins" betting game: per-room phase state machines, winner resolution,
//! the coin/point economy, special cards, random events, secret roles and
//! the decision contract for bot opponents. The core performs no I/O and
//! holds no storage handle; it emits plain-data snapshots and turn
//! results for external transport and persistence.
//!
//! ## Core Modules
//!
//! - [`config`] - Per-game options: economy knobs, module toggles, timing
//! - [`game`] - The `Game` aggregate, phases and transient turn modifiers
//! - [`engine`] - Per-game orchestrator driving the phase state machine
//! - [`registry`] - Indexed store of live games, timers and the bot pool
//! - [`clock`] - Virtual clock and phase-timer bookkeeping
//! - [`rules`] - Winner resolution and wager validation (pure functions)
//! - [`economy`] - Reward settlement, break mode and experience
//! - [`cards`] / [`hand`] - Card library and the hand/play manager
//! - [`events`] - Per-turn random rule modifiers
//! - [`roles`] - Secret long-term objectives with latch semantics
//! - [`bot`] - Decision contract implemented by the `solobid-ai` crate
//! - [`snapshot`] - Broadcast snapshots, turn results, final summaries
//! - [`player`] / [`errors`] - Player state and error types
//!
//! ## Quick Start
//!
//! ```rust
//! use solobid_engine::bot::BotPool;
//! use solobid_engine::config::GameOptions;
//! use solobid_engine::engine::Engine;
//! use solobid_engine::game::Phase;
//! use solobid_engine::player::Seat;
//!
//! let options = GameOptions {
//!     random_events: false,
//!     ..GameOptions::default()
//! };
//! let seats = vec![Seat::human(1, "alice"), Seat::human(2, "bob")];
//! let mut engine = Engine::new(1, "LOBBY1".into(), seats, options).unwrap();
//!
//! // No bots at the table; the pool stays empty.
//! let mut bots = BotPool::new();
//! engine.start(&mut bots);
//! assert_eq!(engine.game.phase, Phase::Planning);
//!
//! engine.advance(&mut bots); // planning deadline -> betting
//! engine.place_bet(1, 10).unwrap();
//! ```
//!
//! ## Deterministic Simulation
//!
//! All randomness (card draws, event draws, role assignment) flows
//! through a ChaCha RNG seeded from `GameOptions::seed`, so a seeded
//! game replays identically. Phase timers run against a virtual clock
//! supplied by the driver; see [`clock`] and [`registry`].

pub mod bot;
pub mod cards;
pub mod clock;
pub mod config;
pub mod economy;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod player;
pub mod registry;
pub mod roles;
pub mod rules;
pub mod snapshot;
