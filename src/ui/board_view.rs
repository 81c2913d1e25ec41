//! Board rendering for the Connect-K GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, CellState, Grid, Pos};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    rows: usize,
    cols: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            board_rect: Rect::NOTHING,
            rows: 0,
            cols: 0,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked column if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        grid: &Grid,
        current_turn: CellState,
        suggested_column: Option<usize>,
        winning_line: Option<&[Pos]>,
        game_over: bool,
    ) -> Option<usize> {
        self.rows = grid.rows();
        self.cols = grid.cols();

        // Fit the cells into the available space
        let available = ui.available_size() - Vec2::splat(2.0 * BOARD_MARGIN);
        self.cell_size = (available.x / self.cols as f32)
            .min(available.y / self.rows as f32)
            .max(8.0);
        let board_size = Vec2::new(self.cols as f32, self.rows as f32) * self.cell_size
            + Vec2::splat(2.0 * BOARD_MARGIN);

        let (response, painter) = ui.allocate_painter(board_size, Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(8), BOARD_BG);
        painter.rect_stroke(
            self.board_rect,
            CornerRadius::same(8),
            Stroke::new(2.0, BOARD_BORDER),
            egui::StrokeKind::Inside,
        );

        if let Some(col) = suggested_column {
            self.draw_column_highlight(&painter, col, suggestion_column());
        }

        // Hover preview and click
        let mut clicked = None;
        if !game_over {
            if let Some(col) = response.hover_pos().and_then(|p| self.screen_to_column(p)) {
                let free = grid.is_column_free(col);
                let color = if free { hover_column() } else { hover_full_column() };
                self.draw_column_highlight(&painter, col, color);

                if response.clicked() && free {
                    clicked = Some(col);
                }
            }
        }

        self.draw_pieces(&painter, grid);

        if let Some(pos) = grid.last_move() {
            painter.circle_filled(self.cell_center(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }

        if let Some(line) = winning_line {
            self.draw_winning_line(&painter, line);
        }

        if !game_over {
            self.draw_turn_marker(&painter, current_turn);
        }

        clicked
    }

    /// Draw all holes and pieces
    fn draw_pieces(&self, painter: &Painter, grid: &Grid) {
        let radius = self.cell_size * PIECE_RADIUS_RATIO;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let center = self.cell_center(Pos::new(row, col));
                match grid.cell(row, col) {
                    CellState::Free => {
                        painter.circle_filled(center, radius, HOLE);
                    }
                    CellState::P1 => Self::draw_piece(painter, center, radius, P1_PIECE, P1_PIECE_HIGHLIGHT),
                    CellState::P2 => Self::draw_piece(painter, center, radius, P2_PIECE, P2_PIECE_HIGHLIGHT),
                }
            }
        }
    }

    fn draw_piece(painter: &Painter, center: Pos2, radius: f32, fill: Color32, highlight: Color32) {
        painter.circle_filled(
            center + Vec2::new(2.0, 2.0),
            radius,
            Color32::from_rgba_unmultiplied(0, 0, 0, 60),
        );
        painter.circle_filled(center, radius, fill);
        painter.circle_stroke(center, radius * 0.7, Stroke::new(radius * 0.08, highlight));
    }

    fn draw_column_highlight(&self, painter: &Painter, col: usize, color: Color32) {
        let min = self.board_rect.min + Vec2::new(BOARD_MARGIN + col as f32 * self.cell_size, BOARD_MARGIN);
        let size = Vec2::new(self.cell_size, self.rows as f32 * self.cell_size);
        painter.rect_filled(Rect::from_min_size(min, size), CornerRadius::same(4), color);
    }

    /// Draw winning line highlight
    fn draw_winning_line(&self, painter: &Painter, line: &[Pos]) {
        let stroke = Stroke::new(WIN_STROKE_WIDTH, WIN_HIGHLIGHT);

        for pair in line.windows(2) {
            painter.line_segment([self.cell_center(pair[0]), self.cell_center(pair[1])], stroke);
        }

        let radius = self.cell_size * PIECE_RADIUS_RATIO + 2.0;
        for &pos in line {
            painter.circle_stroke(self.cell_center(pos), radius, stroke);
        }
    }

    /// Small piece above the board showing who moves next
    fn draw_turn_marker(&self, painter: &Painter, turn: CellState) {
        let color = match turn {
            CellState::P1 => P1_PIECE,
            CellState::P2 => P2_PIECE,
            CellState::Free => return,
        };
        let center = Pos2::new(self.board_rect.min.x + BOARD_MARGIN / 2.0, self.board_rect.min.y + BOARD_MARGIN / 2.0);
        painter.circle_filled(center, BOARD_MARGIN / 3.0, color);
    }

    /// Convert screen coordinates to a column index
    pub fn screen_to_column(&self, screen_pos: Pos2) -> Option<usize> {
        let relative = screen_pos - self.board_rect.min;
        let x = (relative.x - BOARD_MARGIN) / self.cell_size;
        let y = (relative.y - BOARD_MARGIN) / self.cell_size;

        if x < 0.0 || y < 0.0 || y >= self.rows as f32 {
            return None;
        }
        let col = x.floor() as usize;
        (col < self.cols).then_some(col)
    }

    /// Convert board position to screen coordinates
    pub fn cell_center(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + (pos.col as f32 + 0.5) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + (pos.row as f32 + 0.5) * self.cell_size;
        Pos2::new(x, y)
    }
}
