//! Heuristic evaluation function for Connect-K board positions
//!
//! Every window of K consecutive cells (vertical, horizontal and both
//! diagonals) contributes according to how many pieces each side has in it:
//!
//! - Base value `mine - theirs`
//! - Only own pieces: multiplied by `2^mine`
//! - Only opponent pieces: multiplied by `2^theirs`
//! - Both sides present: the window is dead and keeps only the base value
//!
//! Finished games short-circuit to a terminal score offset by search depth,
//! so nearer wins and farther losses are preferred.

use crate::board::{Board, CellState, GameState, Pos};

use super::{Direction, Evaluator, Score, WIN_SCORE};

/// Value of a single window holding `mine` own and `theirs` opponent pieces.
///
/// # Examples
///
/// ```
/// use connectk::eval::heuristic::segment_value;
///
/// assert_eq!(segment_value(3, 0), 24);
/// assert_eq!(segment_value(0, 2), -8);
/// assert_eq!(segment_value(2, 1), 1);
/// assert_eq!(segment_value(0, 0), 0);
/// ```
#[inline]
#[must_use]
pub fn segment_value(mine: u32, theirs: u32) -> Score {
    let mut score = Score::from(mine) - Score::from(theirs);
    if theirs == 0 {
        score *= 1 << mine;
    }
    if mine == 0 {
        score *= 1 << theirs;
    }
    score
}

impl Evaluator {
    /// Evaluate `board` as seen by this evaluator's player, `depth` plies
    /// below the search root.
    ///
    /// Returns a terminal score for finished games and the sum of all window
    /// values otherwise. Cost is O(M·N·K).
    #[must_use]
    pub fn evaluate<B: Board + ?Sized>(&self, board: &B, depth: u32) -> Score {
        if let Some(score) = self.terminal_score(board.game_state(), depth) {
            return score;
        }

        let (rows, cols, k) = (self.rows, self.cols, self.k);
        let mut score = 0;

        // Vertical: a free bottom cell means the whole window (and column) is empty
        if rows >= k {
            for col in 0..cols {
                if board.cell(rows - 1, col) == CellState::Free {
                    continue;
                }
                for row in 0..=rows - k {
                    if board.cell(row + k - 1, col) == CellState::Free {
                        continue;
                    }
                    score += self.segment_score(board, Pos::new(row, col), Direction::Vertical);
                }
            }
        }

        // Horizontal, bottom-up: nothing sits above the first empty row
        if cols >= k {
            for row in (0..rows).rev() {
                if (0..cols).all(|col| board.cell(row, col) == CellState::Free) {
                    break;
                }
                for col in 0..=cols - k {
                    score += self.segment_score(board, Pos::new(row, col), Direction::Horizontal);
                }
            }
        }

        // Diagonals
        if rows >= k && cols >= k {
            for row in 0..=rows - k {
                for col in 0..=cols - k {
                    score += self.segment_score(board, Pos::new(row, col), Direction::Descending);
                    score += self.segment_score(
                        board,
                        Pos::new(row + k - 1, col),
                        Direction::Ascending,
                    );
                }
            }
        }

        score
    }

    /// Score of a finished game, `None` while the game is open
    #[inline]
    #[must_use]
    pub fn terminal_score(&self, state: GameState, depth: u32) -> Option<Score> {
        match state {
            GameState::Open => None,
            s if s == self.my_win => Some(WIN_SCORE - Score::from(depth)),
            s if s == self.their_win => Some(-WIN_SCORE + Score::from(depth)),
            _ => Some(0),
        }
    }

    /// Value of the K-cell window starting at `anchor` and running along `dir`.
    ///
    /// The whole window must lie on the board.
    #[inline]
    pub(crate) fn segment_score<B: Board + ?Sized>(
        &self,
        board: &B,
        anchor: Pos,
        dir: Direction,
    ) -> Score {
        let (dr, dc) = dir.delta();
        let (mut mine, mut theirs) = (0u32, 0u32);

        for i in 0..self.k as isize {
            let row = anchor.row.wrapping_add_signed(dr * i);
            let col = anchor.col.wrapping_add_signed(dc * i);
            match board.cell(row, col) {
                c if c == self.mine => mine += 1,
                c if c == self.theirs => theirs += 1,
                _ => {}
            }
        }

        segment_value(mine, theirs)
    }
}
