use crate::board::Board;
use crate::types::Cell;

/// Bonus for holding a corner square.
pub const CORNER_BONUS: i32 = 100;

const CORNERS: [usize; 4] = [0, 7, 56, 63];

/// Static leaf evaluation. Positive favours Black, negative favours White.
///
/// Piece difference plus [`CORNER_BONUS`] for every corner a colour occupies.
pub fn evaluate(board: &Board) -> i32 {
    let (black, white) = board.count();
    let corners: i32 = CORNERS
        .iter()
        .map(|&pos| match board.cell_at(pos) {
            Cell::Black => CORNER_BONUS,
            Cell::White => -CORNER_BONUS,
            _ => 0,
        })
        .sum();

    i32::from(black) - i32::from(white) + corners
}
