use thiserror::Error;

use crate::card::Card;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnoError {
    #[error("Not enough players")]
    NotEnoughPlayers,
    #[error("Too many players")]
    TooManyPlayers,
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("{0} can't be played right now")]
    IllegalPlay(Card),
    #[error("Both the draw pile and the discard pile are empty")]
    DeckExhausted,
    #[error("The game is already over")]
    GameOver,
    #[error("No player with id {0}")]
    PlayerNotFound(u64),
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
