use super::*;
use crate::error::BoardError;

fn play(grid: &mut Grid, cols: &[usize]) {
    for &c in cols {
        grid.try_mark(c).unwrap();
    }
}

#[test]
fn test_cell_opponent() {
    assert_eq!(CellState::P1.opponent(), CellState::P2);
    assert_eq!(CellState::P2.opponent(), CellState::P1);
    assert_eq!(CellState::Free.opponent(), CellState::Free);
}

#[test]
fn test_win_for() {
    assert_eq!(GameState::win_for(CellState::P1), GameState::WinP1);
    assert_eq!(GameState::win_for(CellState::P2), GameState::WinP2);
    assert_eq!(GameState::win_for(CellState::Free), GameState::Open);
}

#[test]
fn test_new_grid_is_empty() {
    let grid = Grid::new(6, 7, 4);
    assert_eq!(grid.rows(), 6);
    assert_eq!(grid.cols(), 7);
    assert_eq!(grid.free_cells(), 42);
    assert_eq!(grid.marked_cells(), 0);
    assert_eq!(grid.game_state(), GameState::Open);
    assert_eq!(grid.available_columns(), vec![0, 1, 2, 3, 4, 5, 6]);
    assert!(grid.last_move().is_none());
}

#[test]
fn test_pieces_fall_to_bottom() {
    let mut grid = Grid::new(6, 7, 4);
    play(&mut grid, &[3, 3]);

    assert_eq!(grid.cell(5, 3), CellState::P1);
    assert_eq!(grid.cell(4, 3), CellState::P2);
    assert_eq!(grid.cell(3, 3), CellState::Free);
    assert_eq!(grid.last_move(), Some(Pos::new(4, 3)));
    assert_eq!(grid.current_player(), CellState::P1);
}

#[test]
fn test_full_column_unavailable() {
    let mut grid = Grid::new(3, 3, 3);
    play(&mut grid, &[0, 0, 0]);

    assert_eq!(grid.available_columns(), vec![1, 2]);
    assert_eq!(grid.try_mark(0), Err(BoardError::ColumnFull(0)));
}

#[test]
fn test_out_of_range_column() {
    let mut grid = Grid::new(6, 7, 4);
    assert_eq!(
        grid.try_mark(7),
        Err(BoardError::ColumnOutOfRange { col: 7, cols: 7 })
    );
}

#[test]
fn test_vertical_win() {
    let mut grid = Grid::new(6, 7, 4);
    play(&mut grid, &[0, 1, 0, 1, 0, 1]);
    assert_eq!(grid.try_mark(0), Ok(GameState::WinP1));
    assert_eq!(grid.try_mark(2), Err(BoardError::GameOver));
}

#[test]
fn test_horizontal_win() {
    let mut grid = Grid::new(6, 7, 4);
    play(&mut grid, &[0, 0, 1, 1, 2, 2]);
    assert_eq!(grid.try_mark(3), Ok(GameState::WinP1));
}

#[test]
fn test_diagonal_wins() {
    // Rising to the right: P1 on (5,0) (4,1) (3,2) (2,3)
    let mut grid = Grid::new(6, 7, 4);
    play(&mut grid, &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6]);
    assert_eq!(grid.try_mark(3), Ok(GameState::WinP1));

    // Falling to the right for P2: (2,0) (3,1) (4,2) (5,3)
    let mut grid = Grid::new(6, 7, 4);
    play(&mut grid, &[2, 3, 1, 2, 1, 1, 0, 0, 0]);
    assert_eq!(grid.game_state(), GameState::Open);
    assert_eq!(grid.try_mark(0), Ok(GameState::WinP2));
}

#[test]
fn test_draw_on_full_board() {
    // 2x2 board with K=3 can never be won
    let mut grid = Grid::new(2, 2, 3);
    play(&mut grid, &[0, 0, 1]);
    assert_eq!(grid.game_state(), GameState::Open);
    assert_eq!(grid.try_mark(1), Ok(GameState::Draw));
    assert!(grid.is_leaf());
}

#[test]
fn test_unmark_restores_everything() {
    let mut grid = Grid::new(6, 7, 4);
    play(&mut grid, &[3, 2]);
    let before = grid.clone();

    play(&mut grid, &[3, 2, 3, 2]);
    for _ in 0..4 {
        grid.try_unmark().unwrap();
    }
    assert_eq!(grid, before);
}

#[test]
fn test_unmark_reopens_won_game() {
    let mut grid = Grid::new(6, 7, 4);
    play(&mut grid, &[0, 1, 0, 1, 0, 1, 0]);
    assert_eq!(grid.game_state(), GameState::WinP1);

    assert_eq!(grid.try_unmark(), Ok(Pos::new(2, 0)));
    assert_eq!(grid.game_state(), GameState::Open);
}

#[test]
fn test_unmark_empty_board() {
    let mut grid = Grid::new(6, 7, 4);
    assert_eq!(grid.try_unmark(), Err(BoardError::NothingToUndo));
}

#[test]
fn test_winning_line() {
    let mut grid = Grid::new(6, 7, 4);
    play(&mut grid, &[0, 0, 1, 1, 2, 2]);
    assert!(grid.winning_line().is_none());

    play(&mut grid, &[3]);
    let line = grid.winning_line().unwrap();
    assert_eq!(
        line,
        vec![Pos::new(5, 0), Pos::new(5, 1), Pos::new(5, 2), Pos::new(5, 3)]
    );
}

#[test]
fn test_marked_guard_pops_on_drop() {
    let mut grid = Grid::new(6, 7, 4);
    let before = grid.clone();
    {
        let mut child = Marked::new(&mut grid, 2);
        assert_eq!(child.marked_cells(), 1);
        {
            let grandchild = Marked::new(&mut *child, 2);
            assert_eq!(grandchild.cell(4, 2), CellState::P2);
        }
        assert_eq!(child.marked_cells(), 1);
    }
    assert_eq!(grid, before);
}
