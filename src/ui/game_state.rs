//! Game state management for the Connect-K GUI

use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crate::board::{Board, CellState, GameState, Grid, Pos};
use crate::config::{EngineConfig, GameConfig};
use crate::engine::{Engine, MoveResult};
use crate::error::EngineError;

/// Budget cap for hints in hotseat mode
const HINT_TIME_LIMIT_MS: u64 = 1_000;

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs engine
    PvE { human_first: bool },
    /// Player vs Player (hotseat)
    PvP { show_suggestions: bool },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human_first: true }
    }
}

/// What a running search will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPurpose {
    /// Play the result as the engine's move
    Move,
    /// Show the result as a hint for the human to move
    Hint,
}

/// Engine computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<Result<MoveResult, EngineError>>,
        start_time: Instant,
        purpose: SearchPurpose,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// One game as seen by the front end
pub struct GameSession {
    pub grid: Grid,
    pub mode: GameMode,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_column: Option<usize>,
    pub message: Option<String>,

    game: GameConfig,
    limits: EngineConfig,
}

impl GameSession {
    pub fn new(mode: GameMode, game: GameConfig, limits: EngineConfig) -> Self {
        Self {
            grid: Grid::new(game.rows, game.cols, game.k),
            mode,
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_column: None,
            message: None,
            game,
            limits,
        }
    }

    pub fn reset(&mut self) {
        self.grid = Grid::new(self.game.rows, self.game.cols, self.game.k);
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.suggested_column = None;
        self.message = None;
    }

    pub fn game(&self) -> &GameConfig {
        &self.game
    }

    /// Piece of the side to move
    pub fn current_turn(&self) -> CellState {
        self.grid.current_player()
    }

    pub fn is_game_over(&self) -> bool {
        !self.grid.game_state().is_open()
    }

    /// Winner and the cells of the winning run, if the game was won
    pub fn winner(&self) -> Option<(CellState, Vec<Pos>)> {
        let piece = match self.grid.game_state() {
            GameState::WinP1 => CellState::P1,
            GameState::WinP2 => CellState::P2,
            GameState::Open | GameState::Draw => return None,
        };
        Some((piece, self.grid.winning_line().unwrap_or_default()))
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_first } => (self.current_turn() == CellState::P1) == human_first,
            GameMode::PvP { .. } => true,
        }
    }

    /// Check if it's the engine's turn
    pub fn is_ai_turn(&self) -> bool {
        matches!(self.mode, GameMode::PvE { .. }) && !self.is_human_turn()
    }

    /// Check if the engine is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to drop a piece into `col` for the human player
    pub fn try_drop(&mut self, col: usize) -> Result<(), String> {
        if self.is_game_over() {
            return Err("Game is over".to_string());
        }

        if self.is_ai_thinking() {
            return Err("Engine is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.execute_move(col).map_err(|e| e.to_string())
    }

    /// Execute a move (for both human and engine)
    fn execute_move(&mut self, col: usize) -> Result<(), crate::error::BoardError> {
        let state = self.grid.try_mark(col)?;

        self.suggested_column = None;
        self.message = None;
        self.move_timer.stop();

        if state.is_open() {
            self.move_timer.start();
        } else {
            log::info!("game over: {state:?} after {} moves", self.grid.marked_cells());
        }
        Ok(())
    }

    /// Start the engine on a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.is_game_over() {
            return;
        }
        self.spawn_search(self.limits, SearchPurpose::Move);
    }

    /// Search the current position on a worker thread with a copy of the grid
    fn spawn_search(&mut self, limits: EngineConfig, purpose: SearchPurpose) {
        let first = self.current_turn() == CellState::P1;
        let mut engine = match Engine::with_config(&self.game, &limits, first) {
            Ok(engine) => engine,
            Err(e) => {
                self.message = Some(e.to_string());
                return;
            }
        };
        let mut grid = self.grid.clone();

        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.select_column_with_stats(&mut grid);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            purpose,
        };
    }

    /// Check if the engine has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
                purpose,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed(), *purpose)),
                Err(std::sync::mpsc::TryRecvError::Empty) => None,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("Engine stopped unexpectedly".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some((move_result, elapsed, purpose)) = result else {
            return;
        };
        self.ai_state = AiState::Idle;

        match (move_result, purpose) {
            (Ok(move_result), SearchPurpose::Move) => {
                self.move_timer.set_ai_time(elapsed);
                self.last_ai_result = Some(move_result);
                if let Err(e) = self.execute_move(move_result.column) {
                    self.message = Some(format!("Engine move rejected: {e}"));
                }
            }
            (Ok(move_result), SearchPurpose::Hint) => {
                self.suggested_column = Some(move_result.column);
                self.last_ai_result = Some(move_result);
            }
            (Err(e), _) => {
                log::warn!("engine failed: {e}");
                self.message = Some(format!("Engine error: {e}"));
            }
        }
    }

    /// Get engine thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Whether hints may be requested in the current mode
    pub fn hints_enabled(&self) -> bool {
        matches!(self.mode, GameMode::PvP { show_suggestions: true })
    }

    /// Turn hotseat hints on or off, clearing any hint on display
    pub fn set_hints(&mut self, enabled: bool) {
        if let GameMode::PvP { show_suggestions } = &mut self.mode {
            *show_suggestions = enabled;
            if !enabled {
                self.suggested_column = None;
            }
        }
    }

    /// Request a hint for the side to move; the answer arrives through
    /// [`check_ai_result`](Self::check_ai_result)
    pub fn request_suggestion(&mut self) {
        if !self.hints_enabled() {
            self.message = Some("Hints are turned off".to_string());
            return;
        }
        if self.is_game_over() || self.is_ai_thinking() {
            return;
        }

        let limits = EngineConfig {
            time_limit_ms: self.limits.time_limit_ms.min(HINT_TIME_LIMIT_MS),
            ..self.limits
        };
        self.spawn_search(limits, SearchPurpose::Hint);
    }

    /// Undo last move (two in PvE so the human is to move again)
    pub fn undo(&mut self) {
        if self.grid.history().is_empty() || self.is_ai_thinking() {
            return;
        }

        let undo_count = match self.mode {
            GameMode::PvE { .. } if self.grid.history().len() >= 2 => 2,
            _ => 1,
        };

        for _ in 0..undo_count {
            if self.grid.try_unmark().is_err() {
                break;
            }
        }

        self.suggested_column = None;
        self.message = None;
        self.move_timer.start();
    }
}
