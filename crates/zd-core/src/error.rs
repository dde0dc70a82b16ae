//! Configuration errors.

use thiserror::Error;

/// Why a configuration object from the settings store was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid color {0:?}: expected #RGB, #RRGGBB, or \"transparent\" for backgrounds")]
    InvalidColor(String),

    #[error("invalid brush size {0}: must be a positive number")]
    InvalidSize(f32),

    #[error("invalid opacity {0}: must be between 0 and 1")]
    InvalidOpacity(f32),

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}
