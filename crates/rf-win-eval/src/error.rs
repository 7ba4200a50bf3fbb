//! Error types for spin evaluation and configuration loading

use thiserror::Error;

/// Input rejected before any evaluation happened.
///
/// A spin that fails validation produces no partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Grid is not 5 reels × 3 rows
    #[error("Invalid grid shape: expected 5 reels x 3 rows, got {reels} reels x {rows} rows")]
    GridShape { reels: usize, rows: usize },

    /// Symbol id not present in the wire translation table
    #[error("Unknown symbol id: {0:?}")]
    UnknownSymbol(String),

    /// Bet multiplier is not a positive, minor-unit representable amount
    #[error("Invalid bet multiplier: {0}")]
    InvalidBet(String),
}

/// Configuration document failed to load or failed its consistency check.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Any failure surfaced by the engine
#[derive(Error, Debug)]
pub enum EvalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for engine operations
pub type EvalResult<T> = Result<T, EvalError>;
