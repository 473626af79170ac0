//! Dependency and integration resolver for the TSSC installer.
//!
//! Turns the installer's charts into a validated installation plan:
//!
//! - **Collection**: parses chart annotations into [`Dependency`] values
//! - **Resolver**: orders the enabled dependencies (depends-on edges first,
//!   then weight, then name) and assigns namespaces
//! - **Integrations**: checks each chart's required-integrations expression
//!   against what the environment and earlier charts provide
//! - **TopologyBuilder**: ties configuration, charts and integrations together
//!
//! ```text
//! ChartSource -> Collection -> (enabled products) -> Resolver -> Topology
//!                                                                   |
//!                    IntegrationSource -> IntegrationState -> Integrations
//! ```
//!
//! Planning is pure and synchronous: nothing here touches the cluster.

pub mod annotations;
pub mod builder;
pub mod collection;
pub mod dependency;
pub mod error;
pub mod expression;
pub mod integrations;
pub mod resolver;
pub mod superseded;
pub mod topology;

pub use annotations::AnnotationKeys;
pub use builder::TopologyBuilder;
pub use collection::Collection;
pub use dependency::{Dependencies, Dependency};
pub use error::{Error, Result};
pub use expression::{Evaluator, Expr, ExpressionEngine, ExpressionError};
pub use integrations::{IntegrationState, Integrations};
pub use resolver::Resolver;
pub use superseded::disable_superseded_products;
pub use topology::Topology;
