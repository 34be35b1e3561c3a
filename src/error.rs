//! Error types for fx_crossrates

use thiserror::Error;

/// Main error type for fx_crossrates
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    #[error("Cross rate {base}/{target} failed: {source}")]
    TaskFailed {
        base: String,
        target: String,
        #[source]
        source: Box<FxError>,
    },

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FxError {
    /// True for failures caused by cancellation or an expired deadline
    pub fn is_cancelled(&self) -> bool {
        match self {
            FxError::Cancelled(_) => true,
            FxError::TaskFailed { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }
}

/// Result type alias for fx_crossrates operations
pub type Result<T> = std::result::Result<T, FxError>;
