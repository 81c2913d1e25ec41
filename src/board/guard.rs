//! Scoped trial move

use std::ops::{Deref, DerefMut};

use super::Board;

/// A column mark that is undone when the guard goes out of scope.
///
/// The guard derefs to the board, so the marked position can be searched
/// through it and the pop happens on every exit path, early returns included.
///
/// ```
/// use connectk::board::{Board, Grid, Marked};
///
/// let mut grid = Grid::new(6, 7, 4);
/// {
///     let child = Marked::new(&mut grid, 3);
///     assert_eq!(child.marked_cells(), 1);
/// }
/// assert_eq!(grid.marked_cells(), 0);
/// ```
pub struct Marked<'a, B: Board + ?Sized> {
    board: &'a mut B,
}

impl<'a, B: Board + ?Sized> Marked<'a, B> {
    /// Mark `col` on `board`; same preconditions as [`Board::mark_column`]
    #[inline]
    pub fn new(board: &'a mut B, col: usize) -> Self {
        board.mark_column(col);
        Self { board }
    }
}

impl<B: Board + ?Sized> Deref for Marked<'_, B> {
    type Target = B;

    #[inline]
    fn deref(&self) -> &B {
        self.board
    }
}

impl<B: Board + ?Sized> DerefMut for Marked<'_, B> {
    #[inline]
    fn deref_mut(&mut self) -> &mut B {
        self.board
    }
}

impl<B: Board + ?Sized> Drop for Marked<'_, B> {
    #[inline]
    fn drop(&mut self) {
        self.board.unmark_column();
    }
}
