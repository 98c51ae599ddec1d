use crate::game::Phase;
use crate::player::PlayerId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("action not allowed during the {phase:?} phase")]
    WrongPhase { phase: Phase },
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("invalid wager {amount}: allowed range is {min}..={max}")]
    InvalidWager { amount: u64, min: u64, max: u64 },
    #[error("player is sitting out this betting window")]
    PlayerOnBreak,
    #[error("card {0} is not in the player's hand")]
    CardNotInHand(u32),
    #[error("card cannot be played in the current phase")]
    CardNotPlayable,
    #[error("the active event blocks card play this turn")]
    CardsBlocked,
    #[error("card requires a target player")]
    MissingTarget,
    #[error("invalid target player")]
    InvalidTarget,
    #[error("too many players: maximum is {max}")]
    TooManyPlayers { max: usize },
    #[error("at least two players are required")]
    NotEnoughPlayers,
    #[error("game has already finished")]
    GameFinished,
    #[error("invalid game options: {0}")]
    InvalidOptions(String),
}
