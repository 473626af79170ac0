//! Error types for tssc-resolver
//!
//! Every variant is terminal for a planning pass. Callers usually group them
//! with [`Error::is_dependency_error`], [`Error::is_expression_error`] and
//! [`Error::is_integration_error`] to pick a remediation hint.

/// Result type for resolver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building or validating a topology
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A chart's identity or annotations could not be parsed
    #[error("invalid collection: chart '{chart}': {reason}")]
    InvalidCollection { chart: String, reason: String },

    /// An edge or lookup names a chart outside the plan
    #[error("dependency not found: '{name}' {reason}")]
    DependencyNotFound { name: String, reason: String },

    /// The depends-on graph has a cycle
    #[error("circular dependency: {}", .cycle.join(" -> "))]
    CircularDependency { cycle: Vec<String> },

    /// A required-integrations expression does not parse
    #[error(
        "invalid expression: {reason}: in {} using expression {expression:?}",
        unit(.dependency, .product)
    )]
    InvalidExpression {
        dependency: String,
        product: Option<String>,
        expression: String,
        reason: String,
    },

    /// An expression or provided list names an unregistered integration
    #[error("unknown integration: {integration:?} in {}", unit(.dependency, .product))]
    UnknownIntegration {
        integration: String,
        dependency: String,
        product: Option<String>,
    },

    /// Required integrations are neither configured nor provided by the plan
    #[error(
        "missing integrations: {} requires {expression:?}, {}",
        unit(.dependency, .product),
        format_unmet(.missing, .conflicting)
    )]
    MissingIntegrations {
        dependency: String,
        product: Option<String>,
        expression: String,
        /// Names no one configures or provides
        missing: Vec<String>,
        /// Configured names that a negated term rejects
        conflicting: Vec<String>,
    },

    /// Required integrations are provided, but only later in the plan
    #[error(
        "prerequisite integration: {} requires {expression:?}, provided later by: {}",
        unit(.dependency, .product),
        format_providers(.providers)
    )]
    PrerequisiteIntegration {
        dependency: String,
        product: Option<String>,
        expression: String,
        /// `(integration, provider chart)` pairs
        providers: Vec<(String, String)>,
    },

    /// A chart would provide an integration that is already configured
    #[error(
        "integration is already configured: {integration:?} can't be overwritten by {}",
        unit(.dependency, .product)
    )]
    ConfiguredIntegration {
        integration: String,
        dependency: String,
        product: Option<String>,
    },

    /// A chart uses its product namespace but the product has none
    #[error(
        "{dependency:?} dependency uses the product namespace, but product {product:?} has no namespace"
    )]
    MissingProductNamespace { dependency: String, product: String },

    /// Product lookup in the configuration failed for a chart
    #[error("product lookup failed for '{dependency}' dependency: {source}")]
    ProductLookup {
        dependency: String,
        #[source]
        source: tssc_config::Error,
    },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] tssc_config::Error),

    /// Chart source error
    #[error(transparent)]
    Chart(#[from] tssc_chartfs::Error),

    /// Integration source error
    #[error(transparent)]
    Integrations(#[from] tssc_integrations::Error),
}

impl Error {
    /// The chart collection or its depends-on graph is broken.
    pub fn is_dependency_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidCollection { .. }
                | Error::DependencyNotFound { .. }
                | Error::CircularDependency { .. }
        )
    }

    /// A chart references integrations in a way that can never be valid.
    pub fn is_expression_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidExpression { .. } | Error::UnknownIntegration { .. }
        )
    }

    /// Integrations must be configured, or the plan reordered.
    pub fn is_integration_error(&self) -> bool {
        matches!(
            self,
            Error::MissingIntegrations { .. } | Error::PrerequisiteIntegration { .. }
        )
    }
}

fn unit(dependency: &str, product: &Option<String>) -> String {
    match product {
        Some(product) => format!("{dependency:?} dependency ({product:?} product)"),
        None => format!("{dependency:?} dependency"),
    }
}

fn format_unmet(missing: &[String], conflicting: &[String]) -> String {
    match (missing.is_empty(), conflicting.is_empty()) {
        (_, true) => format!("not configured: {}", missing.join(", ")),
        (true, false) => format!("already configured: {}", conflicting.join(", ")),
        (false, false) => format!(
            "not configured: {}; already configured: {}",
            missing.join(", "),
            conflicting.join(", ")
        ),
    }
}

fn format_providers(providers: &[(String, String)]) -> String {
    providers
        .iter()
        .map(|(integration, chart)| format!("{integration:?} ({chart:?})"))
        .collect::<Vec<_>>()
        .join(", ")
}
