//! Error types for tssc-cli

use tssc_resolver::Error as ResolverError;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from tssc-resolver
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Error from tssc-config
    #[error(transparent)]
    Config(#[from] tssc_config::Error),

    /// Error from tssc-integrations
    #[error(transparent)]
    Integrations(#[from] tssc_integrations::Error),

    /// JSON rendering error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// What the user can do about it, when there is something to say.
    pub fn hint(&self) -> Option<&'static str> {
        let CliError::Resolver(err) = self else {
            return None;
        };
        if err.is_dependency_error() {
            return Some("check the depends-on and product annotations of the installer charts");
        }
        if err.is_expression_error() {
            return Some(
                "fix the integrations-required expression; only registered integration names are valid",
            );
        }
        if err.is_integration_error() {
            return Some(
                "configure the missing integrations, or enable the products that provide them",
            );
        }
        match err {
            ResolverError::ConfiguredIntegration { .. } => {
                Some("rerun with --auto-disable to skip products whose integration already exists")
            }
            ResolverError::MissingProductNamespace { .. } => {
                Some("set the product namespace in the installer configuration")
            }
            _ => None,
        }
    }
}
