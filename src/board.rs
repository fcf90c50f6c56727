use crate::error::GameError;
use crate::types::{Cell, Player, Tally};

pub const WIDTH: usize = 8;
pub const HEIGHT: usize = 8;
pub const NUM_SQUARES: usize = WIDTH * HEIGHT;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Linear index of `(x, y)`.
pub fn index(x: usize, y: usize) -> usize {
    debug_assert!(x < WIDTH && y < HEIGHT, "({x}, {y}) is off the board");
    x + y * WIDTH
}

/// Inverse of [`index`]: returns `(x, y)`.
pub fn unindex(index: usize) -> (usize, usize) {
    debug_assert!(index < NUM_SQUARES, "index {index} is off the board");
    let x = index % WIDTH;
    (x, (index - x) / HEIGHT)
}

/// Reversi board state: one [`Cell`] per square, addressed by `x + y * WIDTH`.
///
/// The board is `Copy`, so every search branch works on its own snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=white, (4,3)=black, (3,4)=black, (4,4)=white.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.set_cell(3, 3, Cell::White);
        board.set_cell(4, 3, Cell::Black);
        board.set_cell(3, 4, Cell::Black);
        board.set_cell(4, 4, Cell::White);
        board
    }

    /// A board with every square empty.
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
        }
    }

    pub fn from_cells(cells: [Cell; NUM_SQUARES]) -> Self {
        Self { cells }
    }

    /// Parses the wire form produced by [`Board::to_array`].
    pub fn from_array(values: &[u8]) -> Result<Self, GameError> {
        if values.len() != NUM_SQUARES {
            return Err(GameError::InvalidSnapshot(format!(
                "board must have {NUM_SQUARES} cells, got {}",
                values.len()
            )));
        }

        let mut cells = [Cell::Empty; NUM_SQUARES];
        for (pos, (cell, &value)) in cells.iter_mut().zip(values).enumerate() {
            *cell = Cell::from_u8(value).ok_or_else(|| {
                GameError::InvalidSnapshot(format!("cell {pos} has invalid value {value}"))
            })?;
        }
        Ok(Self { cells })
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[index(x, y)]
    }

    pub fn cell_at(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[index(x, y)] = cell;
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        self.cells
            .iter()
            .fold((0, 0), |(black, white), cell| match cell {
                Cell::Black => (black + 1, white),
                Cell::White => (black, white + 1),
                _ => (black, white),
            })
    }

    /// Returns the number of squares without a piece.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// Indices currently marked `Selectable`, in increasing order.
    pub fn selectable_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Selectable)
            .map(|(pos, _)| pos)
    }

    /// Walks from `(x, y)` along `direction` looking for a capture line for `player`.
    ///
    /// Returns `true` when a run of opponent pieces is closed by one of the
    /// player's own pieces. With `apply` set, that run is repainted to the
    /// player's colour, starting at the anchor and working back to the origin.
    pub fn capture_scan(
        &mut self,
        x: usize,
        y: usize,
        direction: (i32, i32),
        player: Player,
        apply: bool,
    ) -> bool {
        let run = self.capture_run(x, y, direction, player);
        if run == 0 {
            return false;
        }

        if apply {
            let (dx, dy) = direction;
            for step in (1..=run as i32).rev() {
                let pos = index((x as i32 + dx * step) as usize, (y as i32 + dy * step) as usize);
                self.cells[pos] = player.piece();
            }
        }
        true
    }

    /// True when `(x, y)` has no piece and placing there captures in some direction.
    pub fn is_selectable(&self, x: usize, y: usize, player: Player) -> bool {
        !self.cell(x, y).is_piece()
            && DIRECTIONS
                .iter()
                .any(|&direction| self.capture_run(x, y, direction, player) > 0)
    }

    /// Places one piece for `player` and flips every captured line.
    /// Returns the number of flipped pieces.
    ///
    /// Caller contract: `(x, y)` must be selectable for `player` on this board.
    pub fn place(&mut self, x: usize, y: usize, player: Player) -> u8 {
        debug_assert!(
            !self.cell(x, y).is_piece(),
            "place() on occupied square ({x}, {y})"
        );

        self.set_cell(x, y, player.piece());
        let mut flipped = 0u8;
        for direction in DIRECTIONS {
            let run = self.capture_run(x, y, direction, player);
            if run > 0 {
                self.capture_scan(x, y, direction, player, true);
                flipped += run;
            }
        }

        debug_assert!(flipped > 0, "place() at ({x}, {y}) captured nothing");
        flipped
    }

    /// Marks every legal square for `player` as `Selectable`, resets all other
    /// empty squares, and counts pieces in the same pass.
    pub fn recompute(&mut self, player: Player) -> Tally {
        let mut tally = Tally {
            legal_moves: 0,
            black: 0,
            white: 0,
        };

        for pos in 0..NUM_SQUARES {
            match self.cells[pos] {
                Cell::Black => tally.black += 1,
                Cell::White => tally.white += 1,
                Cell::Empty | Cell::Selectable => {
                    let (x, y) = unindex(pos);
                    if self.is_selectable(x, y, player) {
                        self.cells[pos] = Cell::Selectable;
                        tally.legal_moves += 1;
                    } else {
                        self.cells[pos] = Cell::Empty;
                    }
                }
            }
        }

        tally
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white, 3=selectable.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (value, cell) in board.iter_mut().zip(self.cells.iter()) {
            *value = cell.to_u8();
        }
        board
    }

    /// Number of opponent pieces between `(x, y)` and the closing anchor,
    /// or 0 when the direction captures nothing.
    fn capture_run(&self, x: usize, y: usize, (dx, dy): (i32, i32), player: Player) -> u8 {
        let opponent = player.opponent().piece();
        let mut c = x as i32 + dx;
        let mut r = y as i32 + dy;
        let mut run = 0u8;

        while in_bounds(c, r) {
            let cell = self.cells[index(c as usize, r as usize)];
            if cell == opponent {
                run += 1;
            } else if cell == player.piece() {
                return run;
            } else {
                return 0;
            }

            c += dx;
            r += dy;
        }

        0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Indices whose piece changed colour between `before` and `after`.
pub fn flipped_cells(before: &Board, after: &Board) -> Vec<u8> {
    before
        .cells
        .iter()
        .zip(after.cells.iter())
        .enumerate()
        .filter(|(_, (old, new))| old.is_piece() && new.is_piece() && old != new)
        .map(|(pos, _)| pos as u8)
        .collect()
}

fn in_bounds(x: i32, y: i32) -> bool {
    (0..WIDTH as i32).contains(&x) && (0..HEIGHT as i32).contains(&y)
}
