//! Integration catalog and configured-integration snapshots.
//!
//! Integrations are external services (ACS, Quay, GitHub, ...) the installed
//! products talk to. The catalog of valid names is an explicit
//! [`IntegrationRegistry`] value, so different installers can ship different
//! catalogs. Whether an integration already exists in the environment is
//! answered by an [`IntegrationSource`].

pub mod error;
pub mod registry;
pub mod source;

pub use error::{Error, Result};
pub use registry::IntegrationRegistry;
pub use source::{IntegrationSource, StaticIntegrations};
