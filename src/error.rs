//! Error types for the search engine and the bundled games.

use thiserror::Error;

/// Errors raised by the search engine.
///
/// Apart from `InvalidConfiguration`, every variant is an invariant breach: either the
/// engine was driven in an order it never uses itself, or a `GameState` implementation
/// broke its contract (for example by enumerating successors non-deterministically).
#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    #[error("cannot expand a node that is terminal or already fully expanded")]
    NothingToExpand,

    #[error("node is not marked fully expanded but every legal successor already has a child")]
    ExhaustedSuccessors,

    #[error("UCT value requested for a child with zero visits")]
    UnvisitedChild,

    #[error("node id does not belong to the search tree")]
    MissingNode,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Errors raised when applying moves to the bundled games or parsing their boards.
#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum GameError {
    #[error("illegal move: {reason}")]
    IllegalMove { reason: String },

    #[error("game already over")]
    GameOver,

    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },
}
