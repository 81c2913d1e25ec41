use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::search::DEFAULT_DEADLINE_FRACTION;

/// Largest supported board side
pub const MAX_SIDE: usize = 64;

/// Largest supported K; keeps every heuristic sum far below the win score
pub const MAX_K: usize = 32;

/// Board geometry and winning run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub k: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 6,
            cols: 7,
            k: 4,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SIDE).contains(&self.rows) {
            return Err(ConfigError::Validation(format!(
                "game.rows must be in 1..={MAX_SIDE}"
            )));
        }
        if !(1..=MAX_SIDE).contains(&self.cols) {
            return Err(ConfigError::Validation(format!(
                "game.cols must be in 1..={MAX_SIDE}"
            )));
        }
        if !(1..=MAX_K).contains(&self.k) {
            return Err(ConfigError::Validation(format!(
                "game.k must be in 1..={MAX_K}"
            )));
        }
        Ok(())
    }
}

/// Search limits for a single move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock budget per move
    pub time_limit_ms: u64,
    /// Deepest iteration the driver will start
    pub max_depth: u32,
    /// Share of the budget after which the search stops
    pub deadline_fraction: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            time_limit_ms: 10_000,
            max_depth: 8,
            deadline_fraction: DEFAULT_DEADLINE_FRACTION,
        }
    }
}

impl EngineConfig {
    #[inline]
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_limit_ms == 0 {
            return Err(ConfigError::Validation(
                "engine.time_limit_ms must be > 0".into(),
            ));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Validation(
                "engine.max_depth must be >= 1".into(),
            ));
        }
        if !(self.deadline_fraction > 0.0 && self.deadline_fraction <= 1.0) {
            return Err(ConfigError::Validation(
                "engine.deadline_fraction must be in (0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// Front end preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Human moves first in a game against the engine
    pub human_first: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { human_first: true }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub engine: EngineConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        self.engine.validate()
    }
}
