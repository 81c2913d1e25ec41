//! Connect-K GUI
//!
//! Play against the engine or against another player.
//!
//! Usage: `connectk [config.toml]`

use std::path::PathBuf;

use connectk::config::AppConfig;
use connectk::ui::ConnectApp;

const DEFAULT_CONFIG: &str = "connectk.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let config = AppConfig::load_or_default(&path)?;
    log::info!(
        "starting {}x{} K={} game, {}ms per engine move",
        config.game.rows,
        config.game.cols,
        config.game.k,
        config.engine.time_limit_ms
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Connect-K"),
        ..Default::default()
    };

    eframe::run_native(
        "Connect-K",
        options,
        Box::new(|cc| Ok(Box::new(ConnectApp::new(cc, config)))),
    )?;
    Ok(())
}
