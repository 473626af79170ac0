//! Snapshots of integrations already present in the environment

use tssc_config::Config;

use crate::error::{Error, Result};
use crate::registry::IntegrationRegistry;

/// Reports which integrations already exist, e.g. as cluster secrets.
pub trait IntegrationSource {
    /// Catalog of valid integration names.
    fn registry(&self) -> &IntegrationRegistry;

    /// Names of the integrations configured right now.
    fn configured_integrations(&self, config: &Config) -> Result<Vec<String>>;
}

/// In-memory [`IntegrationSource`] with a fixed set of configured names.
#[derive(Debug, Clone, Default)]
pub struct StaticIntegrations {
    registry: IntegrationRegistry,
    configured: Vec<String>,
}

impl StaticIntegrations {
    /// Every configured name must be registered.
    pub fn new<I, S>(registry: IntegrationRegistry, configured: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in configured {
            let name = name.into();
            if !registry.contains(&name) {
                return Err(Error::UnknownIntegration { name });
            }
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(Self {
            registry,
            configured: names,
        })
    }
}

impl IntegrationSource for StaticIntegrations {
    fn registry(&self) -> &IntegrationRegistry {
        &self.registry
    }

    fn configured_integrations(&self, _config: &Config) -> Result<Vec<String>> {
        tracing::debug!(configured = ?self.configured, "Reporting configured integrations");
        Ok(self.configured.clone())
    }
}

impl<S: IntegrationSource + ?Sized> IntegrationSource for &S {
    fn registry(&self) -> &IntegrationRegistry {
        (**self).registry()
    }

    fn configured_integrations(&self, config: &Config) -> Result<Vec<String>> {
        (**self).configured_integrations(config)
    }
}
