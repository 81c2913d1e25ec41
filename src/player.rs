//! Players a game driver can ask for a column
//!
//! [`Player`] is the harness-facing interface: configure once per game, then
//! pick a column each turn. [`Engine`] implements it with the search;
//! [`RandomPlayer`] is a baseline that picks any legal column.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Board, GameState, Grid};
use crate::config::GameConfig;
use crate::engine::Engine;
use crate::error::{ConfigError, EngineError};

/// Something that picks a column to play.
pub trait Player: Send {
    /// One-time configuration before the first move of a game
    fn initialize(
        &mut self,
        rows: usize,
        cols: usize,
        k: usize,
        first: bool,
        timeout_secs: u64,
    ) -> Result<(), ConfigError>;

    /// Column to play; the board is unchanged on return
    fn select_column(&mut self, board: &mut dyn Board) -> Result<usize, EngineError>;

    /// Returns the player's display name
    fn name(&self) -> &str;
}

impl Player for Engine {
    fn initialize(
        &mut self,
        rows: usize,
        cols: usize,
        k: usize,
        first: bool,
        timeout_secs: u64,
    ) -> Result<(), ConfigError> {
        Engine::initialize(self, rows, cols, k, first, timeout_secs)
    }

    fn select_column(&mut self, board: &mut dyn Board) -> Result<usize, EngineError> {
        Engine::select_column(self, board)
    }

    fn name(&self) -> &str {
        Engine::name(self)
    }
}

/// A player that picks uniformly among the legal columns.
///
/// Useful as a baseline: the engine should never lose to it.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of choices
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn initialize(
        &mut self,
        rows: usize,
        cols: usize,
        k: usize,
        _first: bool,
        _timeout_secs: u64,
    ) -> Result<(), ConfigError> {
        GameConfig { rows, cols, k }.validate()
    }

    fn select_column(&mut self, board: &mut dyn Board) -> Result<usize, EngineError> {
        board
            .available_columns()
            .choose(&mut self.rng)
            .copied()
            .ok_or(EngineError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Play one game between two configured players on `grid`.
///
/// `first` moves whenever an even number of cells is marked. Returns the
/// final state of the game.
pub fn play_game(
    first: &mut dyn Player,
    second: &mut dyn Player,
    grid: &mut Grid,
) -> Result<GameState, EngineError> {
    while !grid.is_leaf() {
        let player: &mut dyn Player = if grid.marked_cells() % 2 == 0 {
            &mut *first
        } else {
            &mut *second
        };
        let col = player.select_column(grid)?;
        log::debug!("{} plays column {col}", player.name());
        if grid.try_mark(col).is_err() {
            return Err(EngineError::NoLegalMoves);
        }
    }
    Ok(grid.game_state())
}
