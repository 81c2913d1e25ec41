//! Position evaluation for Connect-K
//!
//! Contains:
//! - Full evaluation: terminal detection plus the sum of every K-cell line
//! - Delta evaluation: rescoring only the lines through a new piece

pub mod delta;
pub mod heuristic;

use crate::board::{CellState, GameState};

/// Signed evaluation score, from the engine's point of view
pub type Score = i64;

/// Magnitude of a terminal score before the depth offset.
///
/// Wins score `WIN_SCORE - depth`, losses `-WIN_SCORE + depth`.
pub const WIN_SCORE: Score = Score::MAX - 1;

/// Lower search bound; every real score is strictly above it
pub const NEG_INF: Score = Score::MIN + 1;

/// Upper search bound; every real score is strictly below it
pub const POS_INF: Score = Score::MAX - 1;

/// Line directions as (row step, col step); row 0 is the top row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Vertical,
    Horizontal,
    /// Towards the bottom-right
    Descending,
    /// Towards the top-right
    Ascending,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Vertical,
        Direction::Horizontal,
        Direction::Descending,
        Direction::Ascending,
    ];

    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Vertical => (1, 0),
            Direction::Horizontal => (0, 1),
            Direction::Descending => (1, 1),
            Direction::Ascending => (-1, 1),
        }
    }
}

/// Scores boards from one player's side.
///
/// The board geometry and K are fixed at construction; the same evaluator
/// is reused for every node of every search in a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluator {
    rows: usize,
    cols: usize,
    k: usize,
    mine: CellState,
    theirs: CellState,
    my_win: GameState,
    their_win: GameState,
}

impl Evaluator {
    /// Evaluator for the first (`first == true`) or second player
    ///
    /// `k` must not exceed [`MAX_K`](crate::config::MAX_K); window values
    /// grow as `2^k`.
    pub fn new(rows: usize, cols: usize, k: usize, first: bool) -> Self {
        debug_assert!(
            k <= crate::config::MAX_K,
            "k = {k} exceeds the supported maximum of {}",
            crate::config::MAX_K
        );
        let mine = CellState::for_player(first);
        Self {
            rows,
            cols,
            k,
            mine,
            theirs: mine.opponent(),
            my_win: GameState::win_for(mine),
            their_win: GameState::win_for(mine.opponent()),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// The engine's own piece
    #[inline]
    pub fn piece(&self) -> CellState {
        self.mine
    }

    /// True if `score` lies in the terminal band (a win or loss found by search)
    #[inline]
    pub fn is_terminal_score(score: Score) -> bool {
        score.unsigned_abs() >= (WIN_SCORE as u64) - (u16::MAX as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_K;

    #[test]
    fn test_new_accepts_largest_k() {
        let eval = Evaluator::new(64, 64, MAX_K, true);
        assert_eq!(eval.k(), MAX_K);
        assert_eq!(eval.piece(), CellState::P1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "exceeds the supported maximum")]
    fn test_new_rejects_oversized_k() {
        let _ = Evaluator::new(6, 7, MAX_K + 1, true);
    }
}
