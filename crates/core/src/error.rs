//! Error types for the weather preparation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the weather preparation pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not exist.
    #[error("missing file: {}", path.display())]
    NotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// The input exists but its content is unusable.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Feature construction (or day streaming) could not proceed.
    #[error("feature build failed: {0}")]
    FeatureBuild(String),

    /// Summary or statistics requested on a series with no rows.
    #[error("no data loaded")]
    EmptySeries,

    /// Configuration error (bad lags/windows, unreadable config file).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML configuration parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a not-found error for the given path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Error::NotFound { path: path.into() }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a feature build error.
    pub fn feature_build(msg: impl Into<String>) -> Self {
        Error::FeatureBuild(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Whether this error means the input path was wrong rather than its content.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
