//! Main engine integrating evaluation and search
//!
//! This module provides the engine-facing surface used by a game driver:
//! one-time configuration, then one [`Engine::select_column`] call per turn.
//! A move request goes through these steps:
//!
//! 1. **Checks**: the engine is configured, the board matches its geometry,
//!    and the game is still open
//! 2. **Opening**: with at most one piece on the board, play the center column
//! 3. **Alpha-Beta**: iterative deepening under a deadline at 95% of the budget
//!
//! # Example
//!
//! ```
//! use connectk::board::{Board, Grid};
//! use connectk::Engine;
//!
//! let mut engine = Engine::default();
//! engine.initialize(6, 7, 4, false, 2).unwrap();
//!
//! let mut board = Grid::new(6, 7, 4);
//! board.try_mark(3).unwrap();
//!
//! let col = engine.select_column(&mut board).unwrap();
//! assert_eq!(col, 3);
//! assert_eq!(board.marked_cells(), 1);
//! ```

use std::time::Instant;

use crate::board::Board;
use crate::config::{EngineConfig, GameConfig};
use crate::error::{ConfigError, EngineError};
use crate::eval::{Evaluator, Score};
use crate::search::{Clock, Deadline, Searcher};

/// Identifier reported by [`Engine::name`]
pub const ENGINE_NAME: &str = "connectk";

/// Which step of the move request produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Center column played without searching
    Opening,
    /// Iterative deepening alpha-beta result
    AlphaBeta,
}

/// Result of a move request with search statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Column to play
    pub column: usize,
    /// Evaluation of the position after the move, or the minimax value at `depth`
    pub score: Score,
    /// Step that produced the move
    pub search_type: SearchType,
    /// Deepest completed iteration (0 for the opening shortcut)
    pub depth: u32,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

/// Geometry, limits and evaluator fixed by [`Engine::initialize`]
#[derive(Debug, Clone)]
struct Setup {
    game: GameConfig,
    limits: EngineConfig,
    eval: Evaluator,
}

/// Connect-K engine.
///
/// Starts unconfigured; [`Engine::initialize`] or [`Engine::with_config`]
/// fixes the board geometry, K, the engine's side and the time budget.
/// Every move request then runs in its own search session, so nothing but
/// the configuration carries over between turns.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    setup: Option<Setup>,
}

impl Engine {
    /// Create a configured engine.
    ///
    /// # Example
    ///
    /// ```
    /// use connectk::config::{EngineConfig, GameConfig};
    /// use connectk::Engine;
    ///
    /// let game = GameConfig { rows: 6, cols: 9, k: 5 };
    /// let engine = Engine::with_config(&game, &EngineConfig::default(), true).unwrap();
    /// assert!(engine.is_initialized());
    /// ```
    pub fn with_config(
        game: &GameConfig,
        limits: &EngineConfig,
        first: bool,
    ) -> Result<Self, ConfigError> {
        let mut engine = Self::default();
        engine.configure(*game, *limits, first)?;
        Ok(engine)
    }

    /// One-time configuration for a game.
    ///
    /// `first` tells whether the engine plays the first piece. Depth cap and
    /// deadline fraction keep their defaults.
    pub fn initialize(
        &mut self,
        rows: usize,
        cols: usize,
        k: usize,
        first: bool,
        timeout_secs: u64,
    ) -> Result<(), ConfigError> {
        let limits = EngineConfig {
            time_limit_ms: timeout_secs.saturating_mul(1000),
            ..EngineConfig::default()
        };
        self.configure(GameConfig { rows, cols, k }, limits, first)
    }

    fn configure(
        &mut self,
        game: GameConfig,
        limits: EngineConfig,
        first: bool,
    ) -> Result<(), ConfigError> {
        game.validate()?;
        limits.validate()?;

        log::debug!(
            "engine configured for {}x{} K={} as {} player, {}ms per move",
            game.rows,
            game.cols,
            game.k,
            if first { "first" } else { "second" },
            limits.time_limit_ms
        );
        self.setup = Some(Setup {
            game,
            limits,
            eval: Evaluator::new(game.rows, game.cols, game.k, first),
        });
        Ok(())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.setup.is_some()
    }

    /// Search limits in use, if configured
    #[must_use]
    pub fn limits(&self) -> Option<&EngineConfig> {
        self.setup.as_ref().map(|s| &s.limits)
    }

    pub fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    /// Column to play on `board`.
    ///
    /// The engine must be the side to move. The board is borrowed for trial
    /// moves and is back in its original state on return.
    pub fn select_column<B: Board + ?Sized>(&mut self, board: &mut B) -> Result<usize, EngineError> {
        self.select_column_with_stats(board).map(|r| r.column)
    }

    /// Column to play on `board` together with search statistics.
    pub fn select_column_with_stats<B: Board + ?Sized>(
        &mut self,
        board: &mut B,
    ) -> Result<MoveResult, EngineError> {
        let setup = self.setup.as_ref().ok_or(EngineError::NotInitialized)?;
        let clock = Deadline::start(setup.limits.time_limit(), setup.limits.deadline_fraction);
        self.select_column_with_clock(board, clock)
    }

    pub(crate) fn select_column_with_clock<B: Board + ?Sized, C: Clock>(
        &self,
        board: &mut B,
        clock: C,
    ) -> Result<MoveResult, EngineError> {
        let start = Instant::now();
        let setup = self.setup.as_ref().ok_or(EngineError::NotInitialized)?;
        setup.check_board(board)?;

        let elapsed_ms = || start.elapsed().as_millis() as u64;

        // 1. Opening shortcut
        let center = setup.game.cols / 2;
        if board.marked_cells() <= 1 && board.available_columns().contains(&center) {
            let root = setup.eval.evaluate(&*board, 0);
            let result = MoveResult {
                column: center,
                score: setup.eval.update(board, 0, root, center),
                search_type: SearchType::Opening,
                depth: 0,
                time_ms: elapsed_ms(),
                nodes: 0,
            };
            log::info!("opening move: column {center}");
            return Ok(result);
        }

        // 2. Iterative deepening alpha-beta
        let mut searcher = Searcher::new(&setup.eval, clock);
        let found = searcher
            .iterative_deepening(board, setup.limits.max_depth)
            .ok_or(EngineError::SearchIncomplete(setup.limits.time_limit()))?;

        let result = MoveResult {
            column: found.best_move,
            score: found.score,
            search_type: SearchType::AlphaBeta,
            depth: found.depth,
            time_ms: elapsed_ms(),
            nodes: found.nodes,
        };
        log::info!(
            "column {} (score {}{}, depth {}, {} nodes, {}ms{})",
            result.column,
            result.score,
            if Evaluator::is_terminal_score(result.score) { " forced" } else { "" },
            result.depth,
            result.nodes,
            result.time_ms,
            if searcher.timed_out() { ", out of time" } else { "" }
        );
        Ok(result)
    }
}

impl Setup {
    /// Preconditions of a move request
    fn check_board<B: Board + ?Sized>(&self, board: &B) -> Result<(), EngineError> {
        if board.rows() != self.game.rows || board.cols() != self.game.cols {
            return Err(EngineError::DimensionMismatch {
                rows: self.game.rows,
                cols: self.game.cols,
                found_rows: board.rows(),
                found_cols: board.cols(),
            });
        }
        if board.is_leaf() || board.available_columns().is_empty() {
            return Err(EngineError::NoLegalMoves);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::board::Grid;
    use crate::eval::WIN_SCORE;
    use crate::search::clock::testing::PollBudget;

    fn grid_after(rows: usize, cols: usize, k: usize, moves: &[usize]) -> Grid {
        let mut grid = Grid::new(rows, cols, k);
        for &c in moves {
            grid.try_mark(c).unwrap();
        }
        grid
    }

    fn quick_engine(first: bool) -> Engine {
        let limits = EngineConfig {
            time_limit_ms: 5_000,
            max_depth: 5,
            ..EngineConfig::default()
        };
        Engine::with_config(&GameConfig::default(), &limits, first).unwrap()
    }

    #[test]
    fn test_engine_default_is_uninitialized() {
        let mut engine = Engine::default();
        let mut grid = Grid::new(6, 7, 4);
        assert!(!engine.is_initialized());
        assert_eq!(engine.select_column(&mut grid), Err(EngineError::NotInitialized));
    }

    #[test]
    fn test_engine_initialize() {
        let mut engine = Engine::default();
        engine.initialize(6, 7, 4, true, 3).unwrap();
        assert!(engine.is_initialized());
        assert_eq!(engine.limits().unwrap().time_limit_ms, 3_000);
        assert_eq!(engine.limits().unwrap().max_depth, 8);
        assert_eq!(engine.name(), "connectk");
    }

    #[test]
    fn test_engine_initialize_rejects_bad_config() {
        let mut engine = Engine::default();
        assert!(engine.initialize(6, 7, 0, true, 3).is_err());
        assert!(engine.initialize(65, 7, 4, true, 3).is_err());
        assert!(engine.initialize(6, 7, 4, true, 0).is_err());
        assert!(!engine.is_initialized());
    }

    #[test]
    fn test_engine_empty_board_plays_center() {
        let mut engine = quick_engine(true);
        let mut grid = Grid::new(6, 7, 4);

        let result = engine.select_column_with_stats(&mut grid).unwrap();
        assert_eq!(result.column, 3);
        assert_eq!(result.search_type, SearchType::Opening);
        assert_eq!(result.nodes, 0);
        assert_eq!(grid, Grid::new(6, 7, 4));
    }

    #[test]
    fn test_engine_second_move_plays_center() {
        let mut engine = quick_engine(false);
        let mut grid = grid_after(6, 7, 4, &[0]);
        let result = engine.select_column_with_stats(&mut grid).unwrap();
        assert_eq!(result.column, 3);
        assert_eq!(result.search_type, SearchType::Opening);
    }

    #[test]
    fn test_engine_opening_center_full() {
        // Single row: the center is taken by the first move
        let game = GameConfig { rows: 1, cols: 3, k: 2 };
        let mut engine = Engine::with_config(&game, &EngineConfig::default(), false).unwrap();
        let mut grid = grid_after(1, 3, 2, &[1]);

        let result = engine.select_column_with_stats(&mut grid).unwrap();
        assert!(result.column == 0 || result.column == 2);
        assert_eq!(result.search_type, SearchType::AlphaBeta);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut engine = quick_engine(true);
        let mut grid = grid_after(6, 7, 4, &[4, 0, 4, 1, 4, 6]);

        let result = engine.select_column_with_stats(&mut grid).unwrap();
        assert_eq!(result.column, 4);
        assert_eq!(result.score, WIN_SCORE - 1);
        assert_eq!(result.search_type, SearchType::AlphaBeta);
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        let mut engine = quick_engine(false);
        let mut grid = grid_after(6, 7, 4, &[0, 6, 1, 6, 2]);
        assert_eq!(engine.select_column(&mut grid), Ok(3));
    }

    #[test]
    fn test_engine_restores_board() {
        let mut engine = quick_engine(true);
        let mut grid = grid_after(6, 7, 4, &[3, 3, 4, 2, 2, 4]);
        let before = grid.clone();

        let result = engine.select_column_with_stats(&mut grid).unwrap();
        assert_eq!(grid, before);
        assert_eq!(grid.free_cells(), before.free_cells());
        assert!(result.nodes > 0);
        assert!(result.depth >= 1);
    }

    #[test]
    fn test_engine_dimension_mismatch() {
        let mut engine = quick_engine(true);
        let mut grid = Grid::new(4, 4, 4);
        assert_eq!(
            engine.select_column(&mut grid),
            Err(EngineError::DimensionMismatch {
                rows: 6,
                cols: 7,
                found_rows: 4,
                found_cols: 4,
            })
        );
    }

    #[test]
    fn test_engine_game_over() {
        let mut engine = quick_engine(false);
        let mut grid = grid_after(6, 7, 4, &[0, 1, 0, 1, 0, 1, 0]);
        assert_eq!(engine.select_column(&mut grid), Err(EngineError::NoLegalMoves));
    }

    #[test]
    fn test_engine_no_time_for_depth_one() {
        let engine = quick_engine(true);
        let mut grid = grid_after(6, 7, 4, &[3, 3]);
        let before = grid.clone();

        let err = engine
            .select_column_with_clock(&mut grid, PollBudget::limited(0))
            .unwrap_err();
        assert_eq!(err, EngineError::SearchIncomplete(Duration::from_secs(5)));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_engine_multiple_searches() {
        // Engine and a second engine alternate until the game ends
        let mut p1 = quick_engine(true);
        let mut p2 = quick_engine(false);
        let mut grid = Grid::new(6, 7, 4);

        while !grid.is_leaf() {
            let engine = if grid.marked_cells() % 2 == 0 { &mut p1 } else { &mut p2 };
            let col = engine.select_column(&mut grid).unwrap();
            grid.try_mark(col).unwrap();
        }
        assert!(!grid.game_state().is_open());
    }
}
