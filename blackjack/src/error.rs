//! Error types for the blackjack table.

use thiserror::Error;

use crate::{simulation::GamePhase, Money};

/// A reply the player gave that cannot be used. The messages are what the
/// player is shown before being asked again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("You must input a number greater ≥ {}", .minimum.compact())]
    BankrollTooSmall { minimum: Money },

    #[error("You must bet at least ${}", .minimum.compact())]
    BetBelowMinimum { minimum: Money },

    #[error("You only have {bankroll}. You can't bet more than you've got")]
    BetAboveBankroll { bankroll: Money },

    #[error("You must type either \"hit\" or \"stay\"")]
    UnknownAction(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Recovered by asking again; never changes the table.
    #[error("{0}")]
    InvalidInput(#[from] InputError),

    /// Fatal for the whole session. A bet already taken this round is kept.
    #[error("We're out of cards. Come again later!")]
    ShoeExhausted,

    #[error("{0}")]
    InvalidConfiguration(String),

    #[error("{operation} is only allowed in {expected:?} phase, not in {actual:?} phase")]
    WrongPhase {
        operation: &'static str,
        expected: GamePhase,
        actual: GamePhase,
    },

    #[error("A bankroll of {bankroll} cannot cover the minimum bet of {minimum}")]
    InsufficientFunds { bankroll: Money, minimum: Money },

    /// The source of replies has nothing more to give.
    #[error("No more input available")]
    InputClosed,
}

pub type GameResult<T> = Result<T, GameError>;
