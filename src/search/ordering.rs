//! Move ordering by one-ply lookahead
//!
//! Each legal column is scored with the incremental evaluator and the list is
//! sorted so alpha-beta tries the most promising move first: best-first for
//! the maximizing side, worst-first for the minimizing side. Ordering only
//! affects how much gets pruned, never the minimax value.

use crate::board::Board;
use crate::eval::{Evaluator, Score};

/// A legal column and the score of the position after playing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub col: usize,
    pub score: Score,
}

/// Legal columns of `board` ranked for the side to move.
///
/// `score` must be the evaluation of `board` at `depth`. Ties keep column
/// order (the sort is stable).
pub fn order_moves<B: Board + ?Sized>(
    eval: &Evaluator,
    board: &mut B,
    depth: u32,
    score: Score,
    maximizing: bool,
) -> Vec<ScoredMove> {
    let mut moves: Vec<ScoredMove> = board
        .available_columns()
        .into_iter()
        .map(|col| ScoredMove {
            col,
            score: eval.update(board, depth, score, col),
        })
        .collect();

    if maximizing {
        moves.sort_by(|a, b| b.score.cmp(&a.score));
    } else {
        moves.sort_by(|a, b| a.score.cmp(&b.score));
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;
    use crate::eval::WIN_SCORE;

    fn grid_after(moves: &[usize]) -> Grid {
        let mut grid = Grid::new(6, 7, 4);
        for &c in moves {
            grid.try_mark(c).unwrap();
        }
        grid
    }

    #[test]
    fn test_maximizer_sees_win_first() {
        // P1 has three stacked in column 0
        let mut grid = grid_after(&[0, 1, 0, 1, 0, 2]);
        let eval = Evaluator::new(6, 7, 4, true);
        let score = eval.evaluate(&grid, 0);

        let moves = order_moves(&eval, &mut grid, 0, score, true);
        assert_eq!(moves[0].col, 0);
        assert_eq!(moves[0].score, WIN_SCORE - 1);
        assert!(moves.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_minimizer_sorted_ascending() {
        let mut grid = grid_after(&[3, 2, 4]);
        let eval = Evaluator::new(6, 7, 4, false);
        let score = eval.evaluate(&grid, 0);

        let moves = order_moves(&eval, &mut grid, 0, score, false);
        assert_eq!(moves.len(), 7);
        assert!(moves.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_ties_keep_column_order() {
        // On an empty board the outer columns mirror each other
        let mut grid = Grid::new(6, 7, 4);
        let eval = Evaluator::new(6, 7, 4, true);

        let moves = order_moves(&eval, &mut grid, 0, 0, true);
        let cols: Vec<usize> = moves.iter().map(|m| m.col).collect();
        assert_eq!(cols[0], 3);
        let pos_0 = cols.iter().position(|&c| c == 0).unwrap();
        let pos_6 = cols.iter().position(|&c| c == 6).unwrap();
        assert!(pos_0 < pos_6);
    }

    #[test]
    fn test_ordering_leaves_board_untouched() {
        let mut grid = grid_after(&[3, 3, 2]);
        let before = grid.clone();
        let eval = Evaluator::new(6, 7, 4, false);
        let score = eval.evaluate(&grid, 0);

        let _ = order_moves(&eval, &mut grid, 0, score, false);
        assert_eq!(grid, before);
    }
}
