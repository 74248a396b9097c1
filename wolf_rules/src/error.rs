//! Error type shared by every layer of the game core.

use thiserror::Error;

/// Errors raised by rules, story and engine operations.
///
/// Every variant is recoverable. Illegal-move errors leave the session unchanged
/// so the caller can surface them as a message and keep playing.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("inventory is full ({capacity} items)")]
    CapacityExceeded { capacity: usize },

    #[error("no item named '{0}' in the inventory")]
    ItemNotFound(String),

    #[error("'{0}' cannot be consumed")]
    ItemNotConsumable(String),

    #[error("there is no path that way")]
    DeadEnd,

    #[error("the story has already ended")]
    AlreadyAtEnding,

    #[error("story node {0} does not exist")]
    NodeNotFound(u32),

    #[error("the story has not been initialized")]
    NotInitialized,

    #[error("no pending events")]
    QueueEmpty,

    #[error("nothing to undo")]
    NoHistory,

    #[error("corrupt save: {0}")]
    CorruptSave(String),

    #[error("invalid story tree: {0}")]
    InvalidTree(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// True for errors that mean "that move is not legal right now".
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            GameError::DeadEnd
                | GameError::AlreadyAtEnding
                | GameError::QueueEmpty
                | GameError::NoHistory
        )
    }
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GameError>;
