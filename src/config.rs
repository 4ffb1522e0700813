//! Application configuration.

use crate::puzzles::{PuzzleError, PuzzleTable};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Configuration for the Matrixle application.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatrixleConfig {
    /// SQLite database file holding saved sessions.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Optional TOML puzzle table replacing the built-in rotation.
    #[serde(default)]
    puzzle_file: Option<PathBuf>,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_db_path() -> String {
    "matrixle.db".to_string()
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for MatrixleConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            puzzle_file: None,
            log_filter: default_log_filter(),
        }
    }
}

impl MatrixleConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Replaces the database path.
    pub fn with_db_path(mut self, db_path: impl Into<String>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Builds the puzzle table: the configured file, or the built-in rotation.
    #[instrument(skip(self), fields(puzzle_file = ?self.puzzle_file))]
    pub fn puzzle_table(&self) -> Result<PuzzleTable, PuzzleError> {
        match &self.puzzle_file {
            Some(path) => PuzzleTable::from_file(path),
            None => {
                debug!("Using built-in puzzle table");
                PuzzleTable::builtin()
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
