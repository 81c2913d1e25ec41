//! Connect-K decision engine
//!
//! An engine for two-player "K in a row" games on an M×N grid where pieces
//! drop to the lowest free cell of a column (Connect Four is 6×7 with K=4).
//! Given a board and a time budget it picks the column to play.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: The board contract the search borrows, plus the [`Grid`] board
//! - [`eval`]: Window heuristic, full and incremental evaluation
//! - [`search`]: Move ordering, alpha-beta, iterative deepening, deadline
//! - [`engine`]: Engine-facing surface integrating all components
//! - [`player`]: Harness-facing player interface and a random baseline
//! - [`config`], [`error`]: Configuration and error types
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use connectk::{Board, Engine, Grid};
//!
//! let mut engine = Engine::default();
//! engine.initialize(6, 7, 4, true, 1).unwrap();
//!
//! let mut board = Grid::new(6, 7, 4);
//! for col in [3, 2, 3, 2] {
//!     board.try_mark(col).unwrap();
//! }
//!
//! let col = engine.select_column(&mut board).unwrap();
//! board.try_mark(col).unwrap();
//! println!("engine plays column {col}");
//! ```
//!
//! # Move Selection
//!
//! 1. With at most one piece on the board, play the center column
//! 2. Otherwise deepen alpha-beta one ply at a time until the depth cap or
//!    95% of the time budget, keeping the answer of the deepest finished depth

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod player;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, CellState, GameState, Grid, Pos};
pub use config::AppConfig;
pub use engine::{Engine, MoveResult, SearchType};
pub use error::{BoardError, ConfigError, EngineError};
pub use player::{Player, RandomPlayer};
