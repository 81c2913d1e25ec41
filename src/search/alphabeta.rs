//! Alpha-Beta search with iterative deepening
//!
//! This module implements the core search algorithm of the engine: two-sided
//! minimax (separate maximizing and minimizing branches) with alpha-beta
//! pruning, driven by one-ply move ordering and the incremental evaluator.
//!
//! # Features
//!
//! - Iterative deepening under a cooperative deadline
//! - Results of a depth that ran out of time are thrown away
//! - Trial moves are made through [`Marked`], so every push is popped on
//!   every exit path
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use connectk::board::{Board, Grid};
//! use connectk::eval::Evaluator;
//! use connectk::search::{Deadline, Searcher};
//!
//! let mut grid = Grid::new(6, 7, 4);
//! for col in [3, 3] {
//!     grid.try_mark(col).unwrap();
//! }
//!
//! let eval = Evaluator::new(6, 7, 4, true);
//! let clock = Deadline::start(Duration::from_secs(5), 0.95);
//! let mut searcher = Searcher::new(&eval, clock);
//!
//! let result = searcher.iterative_deepening(&mut grid, 3).unwrap();
//! assert!(result.best_move < 7);
//! assert_eq!(grid.marked_cells(), 2);
//! ```

use crate::board::{Board, Marked};
use crate::eval::{Evaluator, Score, NEG_INF, POS_INF};

use super::clock::Clock;
use super::ordering::order_moves;

/// Outcome of the deepest fully completed iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Column chosen at the root
    pub best_move: usize,
    /// Minimax value of the root at `depth`
    pub score: Score,
    /// Deepest depth limit that finished inside the budget
    pub depth: u32,
    /// Nodes visited across all iterations, including abandoned ones
    pub nodes: u64,
}

/// Per-request search session.
///
/// Holds the deadline, the best root move found so far and the timeout flag.
/// Create a fresh one for every move request.
pub struct Searcher<'a, C: Clock> {
    eval: &'a Evaluator,
    clock: C,
    best_move: Option<usize>,
    timed_out: bool,
    nodes: u64,
}

impl<'a, C: Clock> Searcher<'a, C> {
    pub fn new(eval: &'a Evaluator, clock: C) -> Self {
        Self {
            eval,
            clock,
            best_move: None,
            timed_out: false,
            nodes: 0,
        }
    }

    /// True once any search in this session ran out of time
    #[inline]
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Give back the clock, e.g. to read elapsed time
    pub fn into_clock(self) -> C {
        self.clock
    }

    /// Search with depth limits 1, 2, ... up to `max_depth`.
    ///
    /// The best move of a depth that timed out is discarded in favour of the
    /// previous depth's. Returns `None` if not even depth 1 completed.
    ///
    /// The board must be an open game with at least one legal column; it is
    /// restored to its original state on return.
    pub fn iterative_deepening<B: Board + ?Sized>(
        &mut self,
        board: &mut B,
        max_depth: u32,
    ) -> Option<SearchResult> {
        self.best_move = None;
        self.timed_out = false;

        let root_score = self.eval.evaluate(&*board, 0);
        let mut completed: Option<SearchResult> = None;

        for depth in 1..=max_depth {
            if self.timed_out {
                break;
            }

            let previous = self.best_move;
            let score = self.alpha_beta(board, root_score, 0, depth, NEG_INF, POS_INF, true);

            if self.timed_out {
                log::debug!("depth {depth} ran out of time after {} nodes", self.nodes);
                self.best_move = previous;
                break;
            }

            let Some(best_move) = self.best_move else {
                break;
            };
            log::debug!(
                "depth {depth} complete: column {best_move}, score {score}, {} nodes",
                self.nodes
            );
            completed = Some(SearchResult {
                best_move,
                score,
                depth,
                nodes: self.nodes,
            });

            // Deeper limits cannot see past the end of the game
            if depth as usize >= board.free_cells() {
                break;
            }
        }

        completed.map(|result| SearchResult {
            nodes: self.nodes,
            ..result
        })
    }

    /// Depth-limited minimax with alpha-beta pruning.
    ///
    /// `score` is the evaluation of `board` at `depth`. At the root
    /// (`depth == 0`) the column producing the best value is recorded as the
    /// session's best move. If the clock runs out, the session is marked as
    /// timed out and the value returned is only a bound.
    #[allow(clippy::too_many_arguments)]
    pub fn alpha_beta<B: Board + ?Sized>(
        &mut self,
        board: &mut B,
        score: Score,
        depth: u32,
        max_depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Score {
        self.nodes += 1;

        // Incremental scores equal full evaluations, so a leaf's score is
        // already known from its parent's move ordering
        if depth == max_depth || board.is_leaf() {
            return score;
        }

        let moves = order_moves(self.eval, board, depth, score, maximizing);

        if maximizing {
            let mut value = NEG_INF;
            for mv in moves {
                if self.timed_out || self.clock.is_running_out() {
                    self.timed_out = true;
                    return value;
                }

                let child_value = {
                    let mut child = Marked::new(board, mv.col);
                    self.alpha_beta(&mut *child, mv.score, depth + 1, max_depth, alpha, beta, false)
                };
                if self.timed_out {
                    return value;
                }

                if child_value > value {
                    value = child_value;
                    if depth == 0 {
                        self.best_move = Some(mv.col);
                    }
                }
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        } else {
            let mut value = POS_INF;
            for mv in moves {
                if self.timed_out || self.clock.is_running_out() {
                    self.timed_out = true;
                    return value;
                }

                let child_value = {
                    let mut child = Marked::new(board, mv.col);
                    self.alpha_beta(&mut *child, mv.score, depth + 1, max_depth, alpha, beta, true)
                };
                if self.timed_out {
                    return value;
                }

                value = value.min(child_value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        }
    }
}
