//! Error types for tssc-chartfs

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("chart directory not found at {path}")]
    NotFound { path: PathBuf },

    #[error("chart '{name}' not found")]
    ChartNotFound { name: String },

    #[error("invalid chart at {path}: {message}")]
    InvalidChart { path: PathBuf, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
