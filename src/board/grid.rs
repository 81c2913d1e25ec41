//! Gravity-drop grid with a move stack

use super::{Board, CellState, GameState, Pos};
use crate::error::BoardError;

/// Direction vectors for line checking (4 directions)
const DIRECTIONS: [(isize, isize); 4] = [
    (1, 0),  // Vertical
    (0, 1),  // Horizontal
    (1, 1),  // Diagonal SE
    (-1, 1), // Diagonal NE
];

/// M x N board where K aligned pieces win
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    k: usize,
    /// Row-major cells, row 0 on top
    cells: Vec<CellState>,
    /// Number of pieces in each column
    heights: Vec<usize>,
    /// Move stack for undo
    history: Vec<Pos>,
    state: GameState,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, k: usize) -> Self {
        Self {
            rows,
            cols,
            k,
            cells: vec![CellState::Free; rows * cols],
            heights: vec![0; cols],
            history: Vec::with_capacity(rows * cols),
            state: GameState::Open,
        }
    }

    /// Number of aligned pieces needed to win
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Piece of the side to move (player 1 moves first)
    #[inline]
    pub fn current_player(&self) -> CellState {
        if self.history.len() % 2 == 0 {
            CellState::P1
        } else {
            CellState::P2
        }
    }

    /// Move stack, oldest first
    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    /// True when `col` can take another piece
    #[inline]
    pub fn is_column_free(&self, col: usize) -> bool {
        col < self.cols && self.heights[col] < self.rows
    }

    /// Checked version of [`Board::mark_column`]
    pub fn try_mark(&mut self, col: usize) -> Result<GameState, BoardError> {
        if !self.state.is_open() {
            return Err(BoardError::GameOver);
        }
        if col >= self.cols {
            return Err(BoardError::ColumnOutOfRange {
                col,
                cols: self.cols,
            });
        }
        if self.heights[col] >= self.rows {
            return Err(BoardError::ColumnFull(col));
        }
        self.mark_column(col);
        Ok(self.state)
    }

    /// Checked version of [`Board::unmark_column`]
    pub fn try_unmark(&mut self) -> Result<Pos, BoardError> {
        let last = self.last_move().ok_or(BoardError::NothingToUndo)?;
        self.unmark_column();
        Ok(last)
    }

    /// Cells of the winning run through the last move, if the game was won
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        if !matches!(self.state, GameState::WinP1 | GameState::WinP2) {
            return None;
        }
        let last = self.last_move()?;
        let piece = self.cell(last.row, last.col);

        DIRECTIONS.iter().find_map(|&(dr, dc)| {
            let mut line = Vec::new();
            let mut cursor = Some(last);
            while let Some(pos) = cursor.filter(|p| self.cell(p.row, p.col) == piece) {
                line.insert(0, pos);
                cursor = self.step(pos, -dr, -dc);
            }
            cursor = self.step(last, dr, dc);
            while let Some(pos) = cursor.filter(|p| self.cell(p.row, p.col) == piece) {
                line.push(pos);
                cursor = self.step(pos, dr, dc);
            }
            (line.len() >= self.k).then(|| line[..self.k].to_vec())
        })
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Neighbour of `pos` along `(dr, dc)`, if on the board
    #[inline]
    fn step(&self, pos: Pos, dr: isize, dc: isize) -> Option<Pos> {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then(|| Pos::new(row, col))
    }

    /// Count same-colored pieces from `pos` along `(dr, dc)`, excluding `pos`
    fn run_length(&self, pos: Pos, dr: isize, dc: isize, piece: CellState) -> usize {
        let mut count = 0;
        let mut cursor = self.step(pos, dr, dc);
        while let Some(p) = cursor {
            if self.cell(p.row, p.col) != piece {
                break;
            }
            count += 1;
            cursor = self.step(p, dr, dc);
        }
        count
    }

    fn classify(&self, last: Pos, piece: CellState) -> GameState {
        let wins = DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(last, dr, dc, piece) + self.run_length(last, -dr, -dc, piece)
                >= self.k
        });
        if wins {
            GameState::win_for(piece)
        } else if self.free_cells() == 0 {
            GameState::Draw
        } else {
            GameState::Open
        }
    }
}

impl Board for Grid {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn cell(&self, row: usize, col: usize) -> CellState {
        self.cells[self.index(row, col)]
    }

    fn available_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|&c| self.is_column_free(c)).collect()
    }

    fn mark_column(&mut self, col: usize) {
        debug_assert!(self.state.is_open(), "mark on a finished game");
        debug_assert!(self.is_column_free(col), "mark on full column {col}");

        let piece = self.current_player();
        let row = self.rows - 1 - self.heights[col];
        let idx = self.index(row, col);
        self.cells[idx] = piece;
        self.heights[col] += 1;

        let pos = Pos::new(row, col);
        self.history.push(pos);
        self.state = self.classify(pos, piece);
    }

    fn unmark_column(&mut self) {
        let Some(pos) = self.history.pop() else {
            debug_assert!(false, "unmark on an empty board");
            return;
        };
        let idx = self.index(pos.row, pos.col);
        self.cells[idx] = CellState::Free;
        self.heights[pos.col] -= 1;
        // Marks are only legal on open games, so popping always reopens it
        self.state = GameState::Open;
    }

    #[inline]
    fn game_state(&self) -> GameState {
        self.state
    }

    #[inline]
    fn free_cells(&self) -> usize {
        self.rows * self.cols - self.history.len()
    }

    #[inline]
    fn marked_cells(&self) -> usize {
        self.history.len()
    }

    #[inline]
    fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }
}
