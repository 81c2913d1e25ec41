//! Main application for the Connect-K GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::game_state::{GameMode, GameSession};
use super::theme::*;
use crate::board::{Board, CellState};
use crate::config::AppConfig;

fn piece_name(piece: CellState) -> &'static str {
    match piece {
        CellState::P1 => "RED",
        CellState::P2 => "YELLOW",
        CellState::Free => "-",
    }
}

fn piece_color(piece: CellState) -> egui::Color32 {
    match piece {
        CellState::P1 => P1_PIECE,
        CellState::P2 => P2_PIECE,
        CellState::Free => TEXT_MUTED,
    }
}

/// Main Connect-K application
pub struct ConnectApp {
    config: AppConfig,
    state: GameSession,
    board_view: BoardView,
    show_debug: bool,
}

impl ConnectApp {
    /// Create the app with a loaded configuration
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self::with_config(config)
    }

    fn with_config(config: AppConfig) -> Self {
        let mode = GameMode::PvE {
            human_first: config.ui.human_first,
        };
        Self {
            state: GameSession::new(mode, config.game, config.engine),
            config,
            board_view: BoardView::default(),
            show_debug: true,
        }
    }

    fn new_game(&mut self, mode: GameMode) {
        log::info!("new game: {mode:?}");
        self.state = GameSession::new(mode, self.config.game, self.config.engine);
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (PvE - you first)").clicked() {
                        self.new_game(GameMode::PvE { human_first: true });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvE - engine first)").clicked() {
                        self.new_game(GameMode::PvE { human_first: false });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.new_game(GameMode::PvP { show_suggestions: true });
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Engine Panel (D)");
                    if let GameMode::PvP { show_suggestions } = self.state.mode {
                        let mut hints = show_suggestions;
                        if ui.checkbox(&mut hints, "Hints").changed() {
                            self.state.set_hints(hints);
                        }
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let game = self.state.game();
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human_first } => {
                            format!("PvE - You: {}", if human_first { "Red" } else { "Yellow" })
                        }
                        GameMode::PvP { .. } => "PvP - Hotseat".to_string(),
                    };
                    ui.label(format!("{mode_text}  |  {}x{}, K={}", game.rows, game.cols, game.k));
                });
            });
        });
    }

    /// Render the side panel with game info and engine stats
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);

                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if self.state.is_game_over() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●").size(20.0).color(P1_PIECE));
            ui.label(RichText::new("●").size(20.0).color(P2_PIECE));
            ui.add_space(4.0);
            ui.label(RichText::new("CONNECT-K").size(22.0).strong().color(TEXT_PRIMARY));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn();

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, piece_color(turn));

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(piece_name(turn)).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_ai_thinking() {
                        ("Engine thinking...", TIMER_WARNING)
                    } else if self.state.is_game_over() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let budget = self.config.engine.time_limit().as_secs_f32();
                let secs = elapsed.as_secs_f32();
                let color = if secs < budget * 0.5 {
                    TIMER_NORMAL
                } else if secs < budget * 0.9 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last engine move: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Undo (U)").clicked() {
                    self.state.undo();
                }
                if ui.button("New (N)").clicked() {
                    self.state.reset();
                }
                if self.state.hints_enabled() && ui.button("Hint (H)").clicked() {
                    self.state.request_suggestion();
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.grid.marked_cells()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ENGINE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(result) = &self.state.last_ai_result else {
                ui.label(RichText::new("No engine move yet").size(10.0).color(TEXT_MUTED));
                return;
            };

            ui.label(
                RichText::new(format!("Column {}", result.column))
                    .size(14.0)
                    .strong()
                    .color(WIN_HIGHLIGHT),
            );
            ui.label(RichText::new(format!("{:?}", result.search_type)).size(11.0).color(TIMER_NORMAL));
            for line in [
                format!("Score: {}", result.score),
                format!("Depth: {}", result.depth),
                format!("Nodes: {}", result.nodes),
                format!("Time: {}ms", result.time_ms),
            ] {
                ui.label(RichText::new(line).size(10.0).color(TEXT_SECONDARY));
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui) {
        let headline = match self.state.winner() {
            Some((piece, _)) => format!("{} WINS!", piece_name(piece)),
            None => "DRAW".to_string(),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(12.0);

                    if ui.button("New Game").clicked() {
                        self.state.reset();
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let winning_line = self.state.winner().map(|(_, line)| line);

            let clicked = self.board_view.show(
                ui,
                &self.state.grid,
                self.state.current_turn(),
                self.state.suggested_column,
                winning_line.as_deref(),
                self.state.is_game_over(),
            );

            if let Some(col) = clicked {
                if let Err(msg) = self.state.try_drop(col) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            // D - Toggle engine panel
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }

            // H - Get hint (PvP mode with hints on)
            if i.key_pressed(egui::Key::H) && self.state.hints_enabled() {
                self.state.request_suggestion();
            }

            // U - Undo
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }

            // N - New game
            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for ConnectApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() && !self.state.is_game_over() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_starts_in_configured_mode() {
        let mut config = AppConfig::default();
        config.ui.human_first = false;
        config.game.cols = 9;

        let app = ConnectApp::with_config(config);
        assert_eq!(app.state.mode, GameMode::PvE { human_first: false });
        assert_eq!(app.state.grid.cols(), 9);
        assert!(app.state.is_ai_turn());
    }
}
