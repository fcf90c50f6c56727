use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// One of the two sides. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// The piece this player puts on the board.
    pub fn piece(self) -> Cell {
        match self {
            Self::Black => Cell::Black,
            Self::White => Cell::White,
        }
    }

    /// Wire value: 1=black, 2=white.
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Black => 1,
            Self::White => 2,
        }
    }

    pub fn from_u8(value: u8) -> Result<Self, GameError> {
        match value {
            1 => Ok(Self::Black),
            2 => Ok(Self::White),
            _ => Err(GameError::InvalidSnapshot(format!(
                "player must be 1 or 2, got {value}"
            ))),
        }
    }
}

/// State of a single board square.
///
/// `Selectable` is not part of the position itself: it marks an empty square
/// that was a legal move for whichever player the board was last recomputed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
    Selectable,
}

impl Cell {
    pub fn is_piece(self) -> bool {
        matches!(self, Self::Black | Self::White)
    }

    /// Wire value: 0=empty, 1=black, 2=white, 3=selectable.
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Black => 1,
            Self::White => 2,
            Self::Selectable => 3,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Empty),
            1 => Some(Self::Black),
            2 => Some(Self::White),
            3 => Some(Self::Selectable),
            _ => None,
        }
    }
}

/// Result of a full-board refresh for one acting player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub legal_moves: u8,
    pub black: u8,
    pub white: u8,
}

/// A board coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

/// Where a session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The acting player has at least one legal move.
    Selecting,
    /// The acting player has no legal move but the opponent does.
    MustPass,
    /// Neither player can move.
    GameOver,
}

/// Who sits at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerMode {
    AiVsAi,
    /// Human plays Black, the computer plays White.
    #[default]
    OnePlayer,
    TwoPlayers,
}

impl PlayerMode {
    pub fn from_u8(value: u8) -> Result<Self, GameError> {
        match value {
            0 => Ok(Self::AiVsAi),
            1 => Ok(Self::OnePlayer),
            2 => Ok(Self::TwoPlayers),
            _ => Err(GameError::InvalidConfig(format!(
                "player mode must be 0..=2, got {value}"
            ))),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::AiVsAi => 0,
            Self::OnePlayer => 1,
            Self::TwoPlayers => 2,
        }
    }

    pub fn is_computer(self, player: Player) -> bool {
        match self {
            Self::AiVsAi => true,
            Self::OnePlayer => player == Player::White,
            Self::TwoPlayers => false,
        }
    }
}

/// Public game state returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub legal_move_count: u8,
    pub phase: Phase,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: list of flipped indices (0..=63).
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// 0 for a tie, otherwise the winner's wire value.
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}
