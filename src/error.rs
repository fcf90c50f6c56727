use thiserror::Error;

/// Errors surfaced to whoever drives a [`GameSession`](crate::game::GameSession).
///
/// The board and search engines never return these; they only guard the
/// boundary where outside input enters the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("current player has no legal move and must pass")]
    MustPass,

    #[error("nothing to pass: current player has a legal move")]
    NothingToPass,

    #[error("it is not a human player's turn")]
    NotHumanTurn,

    #[error("it is not the computer's turn")]
    NotAiTurn,

    #[error("position ({x}, {y}) is out of range")]
    OutOfRange { x: u8, y: u8 },

    #[error("illegal move at ({x}, {y})")]
    IllegalMove { x: u8, y: u8 },

    #[error("computer could not select a move")]
    NoAiMove,

    #[error("computer selected an illegal move at index {0}")]
    IllegalAiMove(usize),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
