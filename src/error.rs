use std::path::PathBuf;
use std::time::Duration;

/// Errors raised by the checked board operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {col} is out of range (board has {cols} columns)")]
    ColumnOutOfRange { col: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game is already over")]
    GameOver,

    #[error("no move to undo")]
    NothingToUndo,
}

/// Errors that can occur when the engine is asked for a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("engine has not been initialized")]
    NotInitialized,

    #[error("board is {found_rows}x{found_cols} but engine was initialized for {rows}x{cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("no legal moves: the game is already over")]
    NoLegalMoves,

    #[error("search did not complete depth 1 within {0:?}")]
    SearchIncomplete(Duration),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::ColumnOutOfRange { col: 9, cols: 7 };
        assert_eq!(
            err.to_string(),
            "column 9 is out of range (board has 7 columns)"
        );
        assert_eq!(BoardError::ColumnFull(3).to_string(), "column 3 is full");
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::DimensionMismatch {
            rows: 6,
            cols: 7,
            found_rows: 4,
            found_cols: 4,
        };
        assert_eq!(
            err.to_string(),
            "board is 4x4 but engine was initialized for 6x7"
        );
        assert_eq!(
            EngineError::SearchIncomplete(Duration::from_millis(5)).to_string(),
            "search did not complete depth 1 within 5ms"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.k must be in 1..=32".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.k must be in 1..=32"
        );
    }
}
