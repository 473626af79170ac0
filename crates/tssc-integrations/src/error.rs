//! Error types for tssc-integrations

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid integration registry: {message}")]
    InvalidRegistry { message: String },

    #[error("unknown integration: {name}")]
    UnknownIntegration { name: String },
}
