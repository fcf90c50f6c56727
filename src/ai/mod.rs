pub mod eval;
pub mod search;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use web_time::Instant;

use crate::board::Board;
use crate::config::SearchOptions;
use crate::game::MoveSelector;
use crate::types::Player;

pub use eval::evaluate;
pub use search::{ALPHA_MIN, BETA_MAX, SearchOutcome, Searcher, WIN_SCORE};

/// Depth used for strength values outside 0..=3.
const DEFAULT_DEPTH: u8 = 2;

/// Maps a 0..=3 strength to a search depth, switching to the endgame depth
/// once `empty_cells` is at or below `options.endgame_depth`.
pub fn depth_for_strength(strength: u8, empty_cells: u8, options: &SearchOptions) -> u8 {
    if empty_cells <= options.endgame_depth {
        return options.endgame_depth;
    }

    match strength {
        0 => 1,
        1 => 2,
        2 => 3,
        3 => 4,
        _ => DEFAULT_DEPTH,
    }
}

/// Picks a move for `player` and returns its board index.
///
/// Caller contract: `player` has at least one legal move on `board`.
/// Returns `None` only when that contract is broken.
pub fn select_move_for_strength<R: Rng>(
    strength: u8,
    board: &Board,
    player: Player,
    empty_cells: u8,
    options: &SearchOptions,
    rng: &mut R,
) -> Option<usize> {
    let depth = depth_for_strength(strength, empty_cells, options);
    let started = Instant::now();

    let mut searcher = Searcher::new(rng).with_alpha_beta(options.alpha_beta);
    let outcome = searcher.search(board, depth, player, ALPHA_MIN, BETA_MAX);

    debug!(
        ?player,
        strength,
        depth,
        empty_cells,
        alpha_beta = options.alpha_beta,
        nodes = searcher.nodes(),
        score = outcome.score,
        best_move = ?outcome.best_move,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "computer move searched"
    );

    debug_assert!(
        outcome.best_move.is_some(),
        "select_move_for_strength() requires a legal move"
    );
    outcome.best_move
}

/// [`MoveSelector`] backed by the minimax search.
pub struct MinimaxSelector {
    options: SearchOptions,
    rng: ChaCha8Rng,
}

impl MinimaxSelector {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(options: SearchOptions, seed: u64) -> Self {
        Self {
            options,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl MoveSelector for MinimaxSelector {
    fn select_move(&mut self, board: &Board, player: Player, strength: u8) -> Option<usize> {
        let mut probe = *board;
        if probe.recompute(player).legal_moves == 0 {
            return None;
        }

        select_move_for_strength(
            strength,
            board,
            player,
            board.empty_count(),
            &self.options,
            &mut self.rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::board::index;
    use crate::types::Cell;

    const OPENING_MOVES: [usize; 4] = [19, 26, 37, 44];

    #[test]
    fn strength_maps_to_depth() {
        let options = SearchOptions::default();

        assert_eq!(depth_for_strength(0, 60, &options), 1);
        assert_eq!(depth_for_strength(1, 60, &options), 2);
        assert_eq!(depth_for_strength(2, 60, &options), 3);
        assert_eq!(depth_for_strength(3, 60, &options), 4);
        assert_eq!(depth_for_strength(9, 60, &options), DEFAULT_DEPTH);
    }

    #[test]
    fn endgame_overrides_strength_depth() {
        let options = SearchOptions::default();

        assert_eq!(depth_for_strength(0, 5, &options), 7);
        assert_eq!(depth_for_strength(3, 7, &options), 7);
        assert_eq!(depth_for_strength(3, 8, &options), 4);
        assert_eq!(depth_for_strength(0, 8, &options), 1);

        let shallow = SearchOptions {
            endgame_depth: 3,
            ..SearchOptions::default()
        };
        assert_eq!(depth_for_strength(0, 5, &shallow), 1);
        assert_eq!(depth_for_strength(0, 3, &shallow), 3);
    }

    #[test]
    fn opening_move_is_one_of_the_four_legal_squares() {
        assert_eq!(
            OPENING_MOVES,
            [index(3, 2), index(2, 3), index(5, 4), index(4, 5)]
        );

        let options = SearchOptions {
            alpha_beta: false,
            ..SearchOptions::default()
        };
        let board = Board::new();
        let mut seen = [0u32; 4];

        for seed in 0..256u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mv = select_move_for_strength(0, &board, Player::Black, 60, &options, &mut rng)
                .expect("opening has legal moves");
            let slot = OPENING_MOVES
                .iter()
                .position(|&m| m == mv)
                .expect("move must be an opening square");
            seen[slot] += 1;
        }

        // Every tied opening gets picked at some point.
        assert!(seen.iter().all(|&count| count > 0), "{seen:?}");
    }

    #[test]
    fn endgame_depth_finds_the_win_that_a_shallow_search_misses() {
        // Black to move with six empties. One ply deep, (2,6) looks best but
        // loses; only the full solve sees that (2,0) wins.
        let rows = [
            "BW.BBBB.", "WBBBBBBW", ".WBBWBB.", "BBWWWBBB", "BBWWBWBB", "BBWWWWWB", "BB.WBWWB",
            ".BBBBBWB",
        ];
        let mut board = Board::empty();
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    'B' => Cell::Black,
                    'W' => Cell::White,
                    _ => Cell::Empty,
                };
                board.set_cell(x, y, cell);
            }
        }
        assert_eq!(board.empty_count(), 6);

        let no_override = SearchOptions {
            endgame_depth: 3,
            ..SearchOptions::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let shallow =
            select_move_for_strength(0, &board, Player::Black, 6, &no_override, &mut rng);
        assert_eq!(shallow, Some(index(2, 6)));

        let mut selector = MinimaxSelector::with_seed(SearchOptions::default(), 7);
        assert_eq!(
            selector.select_move(&board, Player::Black, 0),
            Some(index(2, 0))
        );
    }

    #[test]
    fn selector_returns_none_without_legal_moves() {
        let mut selector = MinimaxSelector::with_seed(SearchOptions::default(), 1);
        let board = Board::from_cells([Cell::Black; 64]);

        assert_eq!(selector.select_move(&board, Player::White, 2), None);
    }
}
