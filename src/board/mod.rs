//! Board collaborator for the Connect-K engine
//!
//! The search never owns a board. It borrows one through the [`Board`] trait,
//! pushes trial moves with [`Board::mark_column`] and pops them again with
//! [`Board::unmark_column`]. [`Marked`] ties the pop to scope exit so every
//! early return still restores the position.
//!
//! [`Grid`] is the reference implementation used by the GUI and the tests.

pub mod grid;
pub mod guard;

#[cfg(test)]
mod tests;

// Re-exports
pub use grid::Grid;
pub use guard::Marked;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Free,
    P1,
    P2,
}

impl CellState {
    /// Get the other player's piece
    #[inline]
    pub fn opponent(self) -> CellState {
        match self {
            CellState::P1 => CellState::P2,
            CellState::P2 => CellState::P1,
            CellState::Free => CellState::Free,
        }
    }

    /// Piece of the first or second player
    #[inline]
    pub fn for_player(first: bool) -> CellState {
        if first {
            CellState::P1
        } else {
            CellState::P2
        }
    }
}

/// Terminal classification of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Open,
    WinP1,
    WinP2,
    Draw,
}

impl GameState {
    /// Winning state for the owner of `piece`
    #[inline]
    pub fn win_for(piece: CellState) -> GameState {
        match piece {
            CellState::P1 => GameState::WinP1,
            CellState::P2 => GameState::WinP2,
            CellState::Free => GameState::Open,
        }
    }

    #[inline]
    pub fn is_open(self) -> bool {
        self == GameState::Open
    }
}

/// Cell coordinates, row 0 is the top row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// What the engine needs from a board.
///
/// Implementations are gravity-drop grids: a piece marked in a column lands
/// on the lowest free row, and a column's occupied cells are always a
/// contiguous run ending at the bottom row.
pub trait Board {
    /// Number of rows (M)
    fn rows(&self) -> usize;

    /// Number of columns (N)
    fn cols(&self) -> usize;

    /// Cell at `(row, col)`; both must be in range
    fn cell(&self, row: usize, col: usize) -> CellState;

    /// Columns that still have a free cell, in ascending order
    fn available_columns(&self) -> Vec<usize>;

    /// Drop the side-to-move's piece into `col`.
    ///
    /// `col` must be one of [`Board::available_columns`] and the game must be
    /// open. Every call must be paired with exactly one
    /// [`Board::unmark_column`].
    fn mark_column(&mut self, col: usize);

    /// Undo the most recent [`Board::mark_column`]
    fn unmark_column(&mut self);

    /// Terminal classification after the last move
    fn game_state(&self) -> GameState;

    fn free_cells(&self) -> usize;

    fn marked_cells(&self) -> usize;

    /// Coordinates of the most recent mark, if any
    fn last_move(&self) -> Option<Pos>;

    /// True when the game is over or no cell is left
    #[inline]
    fn is_leaf(&self) -> bool {
        !self.game_state().is_open() || self.free_cells() == 0
    }
}
