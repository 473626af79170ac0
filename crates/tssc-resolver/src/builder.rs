//! Entry point producing validated topologies
//!
//! Status reporting, deployment and automation all go through
//! [`TopologyBuilder::build`], so they observe the same validated order.

use std::sync::OnceLock;

use tssc_chartfs::ChartSource;
use tssc_config::Config;
use tssc_integrations::IntegrationSource;

use crate::annotations::AnnotationKeys;
use crate::collection::Collection;
use crate::error::Result;
use crate::expression::ExpressionEngine;
use crate::integrations::{IntegrationState, Integrations};
use crate::resolver::Resolver;
use crate::topology::Topology;

/// Builds topologies from a chart source and an integration source.
///
/// The chart collection is loaded on first use and cached; everything else is
/// computed per call, so a builder can be shared between threads as long as
/// its sources can.
///
/// # Example
///
/// ```
/// use tssc_chartfs::Chart;
/// use tssc_config::Config;
/// use tssc_integrations::{IntegrationRegistry, StaticIntegrations};
/// use tssc_resolver::{AnnotationKeys, TopologyBuilder};
///
/// let keys = AnnotationKeys::default();
/// let charts = vec![
///     Chart::new("tssc-openshift"),
///     Chart::new("tssc-acs")
///         .with_annotation(keys.depends_on(), "tssc-openshift")
///         .with_annotation(keys.integrations_provided(), "acs"),
/// ];
/// let integrations =
///     StaticIntegrations::new(IntegrationRegistry::with_builtins(), Vec::<String>::new()).unwrap();
///
/// let builder = TopologyBuilder::new(charts, integrations);
/// let topology = builder.build(&Config::new("tssc", vec![])).unwrap();
/// assert_eq!(topology.names(), vec!["tssc-openshift", "tssc-acs"]);
/// ```
pub struct TopologyBuilder<C, I> {
    charts: C,
    integrations: I,
    keys: AnnotationKeys,
    collection: OnceLock<Collection>,
}

impl<C: ChartSource, I: IntegrationSource> TopologyBuilder<C, I> {
    pub fn new(charts: C, integrations: I) -> Self {
        Self {
            charts,
            integrations,
            keys: AnnotationKeys::default(),
            collection: OnceLock::new(),
        }
    }

    /// Read annotations under a different prefix.
    pub fn with_annotation_keys(mut self, keys: AnnotationKeys) -> Self {
        self.keys = keys;
        self.collection = OnceLock::new();
        self
    }

    /// The full chart collection, loaded once.
    pub fn collection(&self) -> Result<&Collection> {
        if let Some(collection) = self.collection.get() {
            return Ok(collection);
        }
        let charts = self.charts.charts()?;
        let collection = Collection::new(&self.keys, &charts)?;
        Ok(self.collection.get_or_init(|| collection))
    }

    /// Resolve and validate the installation plan for `config`.
    ///
    /// Returns the first error met; no topology is returned on failure.
    pub fn build(&self, config: &Config) -> Result<Topology> {
        let collection = self.collection()?;

        tracing::debug!(
            enabled = ?config.enabled_product_names(),
            "Resolving dependency topology"
        );
        let topology = Resolver::new(config, collection).resolve()?;

        let registry = self.integrations.registry();
        let configured = self.integrations.configured_integrations(config)?;
        let state = IntegrationState::new(registry, &configured);

        tracing::debug!(configured = ?state.configured(), "Inspecting integrations");
        let state = Integrations::new(ExpressionEngine::new(registry.clone()))
            .inspect(&topology, state)?;

        tracing::info!(
            dependencies = topology.len(),
            integrations = ?state.configured(),
            "Topology resolved"
        );
        Ok(topology)
    }
}
