use rand::Rng;

use crate::ai::eval::evaluate;
use crate::board::{Board, unindex};
use crate::types::Player;

/// Score of a finished game that Black wins. A White win is the negation, a tie is 0.
pub const WIN_SCORE: i32 = 1000;
/// Root window: one unit wider than a decided game on either side.
pub const ALPHA_MIN: i32 = -(WIN_SCORE + 1);
pub const BETA_MAX: i32 = WIN_SCORE + 1;
/// Starting best score at a node; worse than anything a node can return.
const UNSEEN: i32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Positive favours Black.
    pub score: i32,
    /// Index of the chosen move. `None` at pass and terminal nodes.
    pub best_move: Option<usize>,
}

/// Depth-bounded minimax with optional alpha-beta pruning.
///
/// Black maximizes and White minimizes. Moves that tie the best score replace
/// it on an independent fair coin flip drawn from `rng`.
pub struct Searcher<'a, R: Rng> {
    rng: &'a mut R,
    alpha_beta: bool,
    nodes: u64,
}

impl<'a, R: Rng> Searcher<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self {
            rng,
            alpha_beta: true,
            nodes: 0,
        }
    }

    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.alpha_beta = enabled;
        self
    }

    /// Number of nodes visited since this searcher was created.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches `depth` plies below the moves of `player`.
    ///
    /// At depth 0 each legal move is scored statically. The board is copied,
    /// so selectable markers on the caller's board are left alone.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u8,
        player: Player,
        alpha: i32,
        beta: i32,
    ) -> SearchOutcome {
        self.minimax(*board, depth, player, alpha, beta)
    }

    fn minimax(
        &mut self,
        mut board: Board,
        depth: u8,
        player: Player,
        alpha: i32,
        beta: i32,
    ) -> SearchOutcome {
        self.nodes += 1;

        let tally = board.recompute(player);
        if tally.legal_moves == 0 {
            let opponent = board.recompute(player.opponent());
            if opponent.legal_moves == 0 {
                return SearchOutcome {
                    score: final_score(tally.black, tally.white),
                    best_move: None,
                };
            }

            // Forced pass: the opponent moves on the same board.
            let score = if depth == 0 {
                evaluate(&board)
            } else {
                self.minimax(board, depth - 1, player.opponent(), alpha, beta)
                    .score
            };
            return SearchOutcome {
                score,
                best_move: None,
            };
        }

        let maximizing = player == Player::Black;
        let mut best_score = if maximizing { -UNSEEN } else { UNSEEN };
        let mut best_move = None;

        for pos in board.selectable_indices() {
            let (x, y) = unindex(pos);
            let mut next = board;
            next.place(x, y, player);

            let score = if depth == 0 {
                evaluate(&next)
            } else if maximizing {
                self.minimax(next, depth - 1, player.opponent(), best_score, beta)
                    .score
            } else {
                self.minimax(next, depth - 1, player.opponent(), alpha, best_score)
                    .score
            };

            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves || (score == best_score && self.rng.gen_bool(0.5)) {
                best_score = score;
                best_move = Some(pos);
            }

            // Strict comparisons: a cut-off bound must never tie an exact score above.
            if self.alpha_beta
                && ((maximizing && best_score > beta) || (!maximizing && best_score < alpha))
            {
                break;
            }
        }

        SearchOutcome {
            score: best_score,
            best_move,
        }
    }
}

fn final_score(black: u8, white: u8) -> i32 {
    match black.cmp(&white) {
        std::cmp::Ordering::Greater => WIN_SCORE,
        std::cmp::Ordering::Less => -WIN_SCORE,
        std::cmp::Ordering::Equal => 0,
    }
}
