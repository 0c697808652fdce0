//! Error types for Kino Touch

use thiserror::Error;

/// Result type alias for gesture operations
pub type Result<T> = std::result::Result<T, Error>;

/// Gesture engine error types
///
/// None of these are fatal: the engine degrades to ignoring gestures.
/// They are returned so the host can log what went wrong.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Geometry errors
    #[error("Invalid screen metrics: {width}x{height}")]
    InvalidMetrics { width: f32, height: f32 },

    // Input errors
    #[error("Invalid pointer sample: ({x}, {y})")]
    InvalidSample { x: f32, y: f32 },

    // Configuration errors
    #[error("Invalid value for setting {key}: {value:?}")]
    InvalidSetting { key: String, value: String },
}

impl Error {
    /// Create a setting error
    pub fn setting(key: impl Into<String>, value: impl Into<String>) -> Self {
        Error::InvalidSetting {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the error code for diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidMetrics { .. } => "INVALID_METRICS",
            Error::InvalidSample { .. } => "INVALID_SAMPLE",
            Error::InvalidSetting { .. } => "INVALID_SETTING",
        }
    }
}
