//! Error types for tssc-config

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("empty configuration")]
    EmptyConfig,

    #[error("failed to unmarshal configuration: {message}")]
    Unmarshal { message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("product '{name}' not found")]
    ProductNotFound { name: String },

    #[error("failed to read configuration at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to marshal configuration: {0}")]
    Marshal(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
