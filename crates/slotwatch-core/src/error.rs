//! Error types shared across slotwatch crates.

use thiserror::Error;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid duration {0:?}: expected values like 20s, 1m, 2m30s")]
    Duration(String),
}

/// Errors reported by a browsing collaborator.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The surrounding context was cancelled while the fetch was running.
    #[error("fetch cancelled")]
    Cancelled,

    #[error("invalid url {0}")]
    Url(String),

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
}

impl BrowseError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BrowseError::Cancelled)
    }
}
