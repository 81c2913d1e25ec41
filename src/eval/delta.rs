//! Incremental evaluation
//!
//! A new piece can only change the windows that contain its cell: at most K
//! per direction, anchored up to K-1 cells away. Rescoring just those turns
//! the O(M·N·K) full evaluation into O(K²) per move while giving exactly
//! the same number.

use crate::board::{Board, Marked, Pos};

use super::{Direction, Evaluator, Score};

impl Evaluator {
    /// Score of `board` after dropping a piece in `col`, given that `prior`
    /// is the score of `board` as it stands.
    ///
    /// `depth` is the depth of the current node; the resulting position sits
    /// at `depth + 1`. The board is left unchanged on return. The result is
    /// always equal to `self.evaluate(board_after_col, depth + 1)`.
    #[must_use]
    pub fn update<B: Board + ?Sized>(
        &self,
        board: &mut B,
        depth: u32,
        prior: Score,
        col: usize,
    ) -> Score {
        let row = {
            let child = Marked::new(board, col);
            if child.is_leaf() {
                return self.evaluate(&*child, depth + 1);
            }
            let Some(last) = child.last_move() else {
                return self.evaluate(&*child, depth + 1);
            };
            last.row
        };
        let cell = Pos::new(row, col);

        let stale = self.windows_through(&*board, cell);
        let fresh = {
            let child = Marked::new(board, col);
            self.windows_through(&*child, cell)
        };

        prior - stale + fresh
    }

    /// Sum of every window, in all four directions, that contains `cell`
    fn windows_through<B: Board + ?Sized>(&self, board: &B, cell: Pos) -> Score {
        Direction::ALL
            .iter()
            .flat_map(|&dir| self.anchors_through(cell, dir).map(move |a| (a, dir)))
            .map(|(anchor, dir)| self.segment_score(board, anchor, dir))
            .sum()
    }

    /// Anchors of the in-bounds windows along `dir` that contain `cell`
    fn anchors_through(&self, cell: Pos, dir: Direction) -> impl Iterator<Item = Pos> + '_ {
        let (dr, dc) = dir.delta();
        let k = self.k as isize;
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        let (row, col) = (cell.row as isize, cell.col as isize);

        (0..k).filter_map(move |offset| {
            let (start_row, start_col) = (row - dr * offset, col - dc * offset);
            let (end_row, end_col) = (start_row + dr * (k - 1), start_col + dc * (k - 1));
            let in_bounds = |r: isize, c: isize| (0..rows).contains(&r) && (0..cols).contains(&c);
            (in_bounds(start_row, start_col) && in_bounds(end_row, end_col))
                .then(|| Pos::new(start_row as usize, start_col as usize))
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use crate::board::{Board, Grid};
    use crate::eval::Evaluator;

    /// Full evaluation of `grid` after playing `col`, computed the slow way
    fn reference(eval: &Evaluator, grid: &Grid, depth: u32, col: usize) -> i64 {
        let mut after = grid.clone();
        after.try_mark(col).unwrap();
        eval.evaluate(&after, depth + 1)
    }

    fn assert_all_columns_match(eval: &Evaluator, grid: &mut Grid, depth: u32) {
        let prior = eval.evaluate(&*grid, depth);
        for col in grid.available_columns() {
            let before = grid.clone();
            let delta = eval.update(grid, depth, prior, col);
            assert_eq!(*grid, before, "update must leave the board unchanged");
            assert_eq!(
                delta,
                reference(eval, grid, depth, col),
                "column {col} after {:?}",
                grid.history()
            );
        }
    }

    #[test]
    fn test_update_first_move() {
        let eval = Evaluator::new(6, 7, 4, true);
        let mut grid = Grid::new(6, 7, 4);
        assert_all_columns_match(&eval, &mut grid, 0);
    }

    #[test]
    fn test_update_matches_full_eval_on_random_games() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        for (rows, cols, k) in [(6, 7, 4), (4, 4, 3), (5, 9, 5), (3, 8, 3), (7, 5, 4)] {
            for first in [true, false] {
                let eval = Evaluator::new(rows, cols, k, first);
                for _ in 0..8 {
                    let mut grid = Grid::new(rows, cols, k);
                    let mut depth = 0;
                    while !grid.is_leaf() {
                        assert_all_columns_match(&eval, &mut grid, depth);
                        let moves = grid.available_columns();
                        let col = *moves.choose(&mut rng).unwrap();
                        grid.try_mark(col).unwrap();
                        depth += 1;
                    }
                }
            }
        }
    }

    #[test]
    fn test_update_winning_move_is_terminal() {
        let eval = Evaluator::new(6, 7, 4, true);
        let mut grid = Grid::new(6, 7, 4);
        for c in [0, 1, 0, 1, 0, 1] {
            grid.try_mark(c).unwrap();
        }
        let prior = eval.evaluate(&grid, 2);
        assert_eq!(eval.update(&mut grid, 2, prior, 0), crate::eval::WIN_SCORE - 3);
    }

    #[test]
    fn test_update_filling_last_cell() {
        // 2x2 board with K=3 ends in a draw on the fourth move
        let eval = Evaluator::new(2, 2, 3, false);
        let mut grid = Grid::new(2, 2, 3);
        for c in [0, 0, 1] {
            grid.try_mark(c).unwrap();
        }
        let prior = eval.evaluate(&grid, 3);
        assert_eq!(eval.update(&mut grid, 3, prior, 1), 0);
    }

    #[test]
    fn test_update_with_k_of_one() {
        // Every move wins immediately
        let eval = Evaluator::new(3, 3, 1, false);
        let mut grid = Grid::new(3, 3, 1);
        let prior = eval.evaluate(&grid, 0);
        assert_eq!(eval.update(&mut grid, 0, prior, 1), -crate::eval::WIN_SCORE + 1);
    }
}
