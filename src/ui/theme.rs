//! Theme constants for the Connect-K GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(30, 70, 160);
pub const BOARD_BORDER: Color32 = Color32::from_rgb(20, 45, 110);
pub const HOLE: Color32 = Color32::from_rgb(25, 27, 31);

// Piece colors
pub const P1_PIECE: Color32 = Color32::from_rgb(230, 60, 60);
pub const P1_PIECE_HIGHLIGHT: Color32 = Color32::from_rgb(250, 120, 120);
pub const P2_PIECE: Color32 = Color32::from_rgb(245, 205, 50);
pub const P2_PIECE_HIGHLIGHT: Color32 = Color32::from_rgb(255, 235, 130);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(250, 250, 252);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

// Functions for colors that can't be const
pub fn hover_column() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 30)
}

pub fn hover_full_column() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 40)
}

pub fn suggestion_column() -> Color32 {
    Color32::from_rgba_unmultiplied(50, 220, 50, 50)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 16.0;
pub const PIECE_RADIUS_RATIO: f32 = 0.42;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
pub const WIN_STROKE_WIDTH: f32 = 4.0;
