use thiserror::Error;

use crate::world::ValidationError;

/// The engine cannot take an action right now, regardless of its arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("no players in game")]
    NoPlayers,

    #[error("game is over")]
    GameOver,

    #[error("current player and target are not in the same room")]
    TargetNotPresent,
}

/// The action was understood but its arguments do not fit the current
/// state. Nothing was changed; the caller may retry with other input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("room '{0}' does not exist")]
    UnknownRoom(String),

    #[error("player '{0}' does not exist")]
    UnknownPlayer(String),

    #[error("item '{0}' is not in this room")]
    UnknownItem(String),

    #[error("cannot move to '{0}': not a visible neighbor")]
    NotVisibleNeighbor(String),

    #[error("{player} cannot carry any more items")]
    CapacityReached { player: String },

    #[error("{player} does not hold '{item}'")]
    ItemNotHeld { player: String, item: String },

    #[error("{player} already holds '{item}'")]
    ItemAlreadyHeld { player: String, item: String },

    #[error("player '{0}' already exists")]
    DuplicatePlayer(String),

    #[error("maximum number of players ({0}) reached")]
    RosterFull(usize),

    #[error("capacity must be -1 (unlimited) or at least 1, got {0}")]
    InvalidCapacity(i64),

    #[error("{0} may not be empty")]
    EmptyName(&'static str),

    #[error("'{0}' does no damage")]
    HarmlessItem(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

impl GameError {
    pub fn is_state(&self) -> bool {
        matches!(self, GameError::State(_))
    }

    pub fn is_argument(&self) -> bool {
        matches!(self, GameError::Argument(_))
    }
}
