use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use ai::{MinimaxSelector, select_move_for_strength};
pub use board::Board;
pub use config::{SearchOptions, SessionConfig};
pub use error::GameError;
pub use game::{GameSession, MoveSelector, SessionSnapshot};
pub use types::{Cell, Phase, Player, PlayerMode, Position};

/// Canonical starting position: two black and two white pieces in the centre.
pub fn new_game_board() -> Board {
    Board::new()
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
