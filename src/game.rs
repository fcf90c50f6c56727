use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ai::MinimaxSelector;
use crate::board::{Board, HEIGHT, NUM_SQUARES, WIDTH, flipped_cells, index, unindex};
use crate::config::{MAX_STRENGTH, SessionConfig};
use crate::error::GameError;
use crate::types::{Cell, GameResult, GameState, Phase, Player, PlayerMode, Position, Tally};

/// Chooses the computer's move. Returns a board index.
pub trait MoveSelector: Send {
    fn select_move(&mut self, board: &Board, player: Player, strength: u8) -> Option<usize>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &Board, player: Player, _strength: u8) -> Option<usize> {
        let mut probe = *board;
        probe.recompute(player);
        probe.selectable_indices().next()
    }
}

/// Everything the outer application needs to persist to resume a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// 64 cells, 0=empty, 1=black, 2=white, 3=selectable.
    pub board: Vec<u8>,
    /// 1=black, 2=white.
    pub current_player: u8,
    pub player_mode: PlayerMode,
    pub strength: u8,
}

/// One game in progress: the board, whose turn it is, and who plays which side.
///
/// The board is always recomputed for `current_player`, so its `Selectable`
/// cells are exactly the moves available right now.
pub struct GameSession {
    board: Board,
    current_player: Player,
    phase: Phase,
    player_mode: PlayerMode,
    strength: u8,
    tally: Tally,
    is_pass: bool,
    flipped: Vec<u8>,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    pub fn new(config: &SessionConfig) -> Result<Self, GameError> {
        let selector = match config.seed {
            Some(seed) => MinimaxSelector::with_seed(config.search, seed),
            None => MinimaxSelector::new(config.search),
        };
        Self::with_selector(config, Box::new(selector))
    }

    pub fn with_selector(
        config: &SessionConfig,
        selector: Box<dyn MoveSelector>,
    ) -> Result<Self, GameError> {
        config.validate()?;

        let mut session = Self {
            board: Board::new(),
            current_player: Player::Black,
            phase: Phase::Selecting,
            player_mode: config.player_mode,
            strength: config.strength,
            tally: Tally {
                legal_moves: 0,
                black: 0,
                white: 0,
            },
            is_pass: false,
            flipped: Vec::new(),
            selector,
        };
        session.settle_turn();
        Ok(session)
    }

    /// Rebuilds a session from a snapshot. Search options and seed come from `config`.
    pub fn restore(snapshot: &SessionSnapshot, config: &SessionConfig) -> Result<Self, GameError> {
        let restored = Self::validate_snapshot(snapshot);
        if let Err(err) = &restored {
            warn!(%err, "rejected session snapshot");
        }
        let (board, current_player) = restored?;

        let config = SessionConfig {
            player_mode: snapshot.player_mode,
            strength: snapshot.strength,
            ..config.clone()
        };
        let mut session = Self::new(&config)?;
        session.board = board;
        session.current_player = current_player;
        session.settle_turn();
        Ok(session)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.to_u8(),
            player_mode: self.player_mode,
            strength: self.strength,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_mode(&self) -> PlayerMode {
        self.player_mode
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }

    pub fn set_strength(&mut self, strength: u8) -> Result<(), GameError> {
        if strength > MAX_STRENGTH {
            return Err(GameError::InvalidConfig(format!(
                "strength must be 0..={MAX_STRENGTH}, got {strength}"
            )));
        }
        self.strength = strength;
        Ok(())
    }

    /// Switching modes mid-game hands the current turn to whoever now owns it.
    pub fn set_player_mode(&mut self, player_mode: PlayerMode) {
        self.player_mode = player_mode;
    }

    pub fn is_ai_turn(&self) -> bool {
        self.phase == Phase::Selecting && self.player_mode.is_computer(self.current_player)
    }

    /// Number of empty squares left.
    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.tally.black - self.tally.white
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.board
            .selectable_indices()
            .map(|pos| {
                let (x, y) = unindex(pos);
                Position {
                    x: x as u8,
                    y: y as u8,
                }
            })
            .collect()
    }

    /// Commits a human move at `(x, y)` for the current player.
    pub fn place(&mut self, x: u8, y: u8) -> Result<(), GameError> {
        self.ensure_selecting()?;
        if self.player_mode.is_computer(self.current_player) {
            return Err(GameError::NotHumanTurn);
        }
        if x as usize >= WIDTH || y as usize >= HEIGHT {
            return Err(GameError::OutOfRange { x, y });
        }

        let pos = index(x as usize, y as usize);
        if self.board.cell_at(pos) != Cell::Selectable {
            return Err(GameError::IllegalMove { x, y });
        }

        self.commit_move(pos);
        Ok(())
    }

    /// Asks the selector for the computer's move and commits it.
    pub fn ai_move(&mut self) -> Result<(), GameError> {
        self.ensure_selecting()?;
        if !self.player_mode.is_computer(self.current_player) {
            return Err(GameError::NotAiTurn);
        }

        let selected = self
            .selector
            .select_move(&self.board, self.current_player, self.strength)
            .ok_or(GameError::NoAiMove)?;

        if selected >= NUM_SQUARES || self.board.cell_at(selected) != Cell::Selectable {
            return Err(GameError::IllegalAiMove(selected));
        }

        self.commit_move(selected);
        Ok(())
    }

    /// Acknowledges a forced pass and hands the turn to the opponent.
    pub fn pass(&mut self) -> Result<(), GameError> {
        match self.phase {
            Phase::MustPass => {}
            Phase::GameOver => return Err(GameError::GameOver),
            Phase::Selecting => return Err(GameError::NothingToPass),
        }

        debug!(player = ?self.current_player, "pass");
        self.is_pass = true;
        self.flipped.clear();
        self.current_player = self.current_player.opponent();
        self.settle_turn();
        Ok(())
    }

    pub fn state(&self) -> GameState {
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.to_u8(),
            black_count: self.tally.black,
            white_count: self.tally.white,
            legal_move_count: self.tally.legal_moves,
            phase: self.phase,
            is_game_over: self.phase == Phase::GameOver,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn result(&self) -> GameResult {
        let Tally { black, white, .. } = self.tally;
        GameResult {
            winner: if black > white {
                Player::Black.to_u8()
            } else if white > black {
                Player::White.to_u8()
            } else {
                0
            },
            black_count: black,
            white_count: white,
        }
    }

    fn ensure_selecting(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Selecting => Ok(()),
            Phase::MustPass => Err(GameError::MustPass),
            Phase::GameOver => Err(GameError::GameOver),
        }
    }

    fn commit_move(&mut self, pos: usize) {
        let before = self.board;
        let (x, y) = unindex(pos);
        self.board.place(x, y, self.current_player);

        self.is_pass = false;
        self.flipped = flipped_cells(&before, &self.board);
        self.current_player = self.current_player.opponent();
        self.settle_turn();
    }

    /// Recomputes the board for the current player and derives the phase.
    fn settle_turn(&mut self) {
        self.tally = self.board.recompute(self.current_player);
        if self.tally.legal_moves > 0 {
            self.phase = Phase::Selecting;
            return;
        }

        let opponent = self.board.recompute(self.current_player.opponent());
        if opponent.legal_moves == 0 {
            self.phase = Phase::GameOver;
            info!(
                black = self.tally.black,
                white = self.tally.white,
                "game over"
            );
        } else {
            self.board.recompute(self.current_player);
            self.phase = Phase::MustPass;
            debug!(player = ?self.current_player, "no legal move, must pass");
        }
    }

    fn validate_snapshot(snapshot: &SessionSnapshot) -> Result<(Board, Player), GameError> {
        let board = Board::from_array(&snapshot.board)?;
        let current_player = Player::from_u8(snapshot.current_player)?;
        if snapshot.strength > MAX_STRENGTH {
            return Err(GameError::InvalidSnapshot(format!(
                "strength must be 0..={MAX_STRENGTH}, got {}",
                snapshot.strength
            )));
        }
        Ok((board, current_player))
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.is_pass = false;
        self.flipped.clear();
        self.settle_turn();
    }
}
