//! Inspection of the integrations required and provided along a topology
//!
//! The configured state starts from what exists in the environment and is
//! folded over the topology in installation order: each chart's requirement is
//! checked against the state so far, then the integrations it provides are
//! marked as configured.

use std::collections::{BTreeMap, BTreeSet};

use tssc_integrations::IntegrationRegistry;

use crate::dependency::Dependency;
use crate::error::{Error, Result};
use crate::expression::{Evaluator, ExpressionError};
use crate::topology::Topology;

/// Which registered integrations are configured at a point of the plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationState {
    configured: BTreeMap<String, bool>,
}

impl IntegrationState {
    /// Every registered name starts unconfigured, except those in `configured`.
    pub fn new<S: AsRef<str>>(registry: &IntegrationRegistry, configured: &[S]) -> Self {
        let mut state: BTreeMap<String, bool> =
            registry.iter().map(|name| (name.to_string(), false)).collect();
        for name in configured {
            let name = name.as_ref();
            match state.get_mut(name) {
                Some(value) => *value = true,
                None => tracing::warn!(
                    integration = name,
                    "Ignoring configured integration missing from the registry"
                ),
            }
        }
        Self { configured: state }
    }

    /// `None` when the name is not registered.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.configured.get(name).copied()
    }

    pub fn is_configured(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    /// Names currently configured, sorted.
    pub fn configured(&self) -> Vec<&str> {
        self.configured
            .iter()
            .filter(|(_, configured)| **configured)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn as_map(&self) -> &BTreeMap<String, bool> {
        &self.configured
    }
}

/// Walks a topology enforcing the integrations contract.
pub struct Integrations<E> {
    evaluator: E,
}

impl<E: Evaluator> Integrations<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    /// Check every chart's requirements and provided integrations, returning
    /// the state after the whole topology is installed.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidExpression`/`Error::UnknownIntegration` for broken
    ///   expressions or unregistered names
    /// - `Error::MissingIntegrations` when a requirement can't be met by the
    ///   environment or any chart in the plan
    /// - `Error::PrerequisiteIntegration` when later charts would meet it
    /// - `Error::ConfiguredIntegration` when a chart provides an integration
    ///   that is already configured
    pub fn inspect(&self, topology: &Topology, state: IntegrationState) -> Result<IntegrationState> {
        topology
            .dependencies()
            .iter()
            .enumerate()
            .try_fold(state, |state, (position, dependency)| {
                self.step(topology, position, state, dependency)
            })
    }

    fn step(
        &self,
        topology: &Topology,
        position: usize,
        mut state: IntegrationState,
        dependency: &Dependency,
    ) -> Result<IntegrationState> {
        let required = dependency.integrations_required();
        if !required.is_empty() {
            let satisfied = self
                .evaluator
                .evaluate(required, state.as_map())
                .map_err(|e| expression_error(e, dependency))?;
            if !satisfied {
                return Err(self.unmet(topology, position, &state, dependency)?);
            }
        }

        for provided in dependency.integrations_provided() {
            match state.configured.get_mut(provided) {
                None => {
                    return Err(Error::UnknownIntegration {
                        integration: provided.clone(),
                        dependency: dependency.name().to_string(),
                        product: dependency.product_name().map(str::to_string),
                    });
                }
                Some(true) => {
                    return Err(Error::ConfiguredIntegration {
                        integration: provided.clone(),
                        dependency: dependency.name().to_string(),
                        product: dependency.product_name().map(str::to_string),
                    });
                }
                Some(configured) => {
                    tracing::debug!(
                        integration = %provided,
                        dependency = dependency.name(),
                        "Integration provided by dependency"
                    );
                    *configured = true;
                }
            }
        }
        Ok(state)
    }

    /// Tell a requirement fixable by reordering from one that needs external
    /// configuration: if the charts after this one would satisfy it, it's a
    /// prerequisite problem, otherwise integrations are missing.
    fn unmet(
        &self,
        topology: &Topology,
        position: usize,
        state: &IntegrationState,
        dependency: &Dependency,
    ) -> Result<Error> {
        let required = dependency.integrations_required();
        let variables = self
            .evaluator
            .variables(required)
            .map_err(|e| expression_error(e, dependency))?;

        let mut later: BTreeMap<&str, &str> = BTreeMap::new();
        for provider in &topology.dependencies()[position + 1..] {
            for integration in provider.integrations_provided() {
                later.entry(integration.as_str()).or_insert(provider.name());
            }
        }

        let mut hypothetical = state.as_map().clone();
        for integration in later.keys() {
            if let Some(value) = hypothetical.get_mut(*integration) {
                *value = true;
            }
        }
        let reorderable = self
            .evaluator
            .evaluate(required, &hypothetical)
            .map_err(|e| expression_error(e, dependency))?;

        let unconfigured: BTreeSet<&str> = variables
            .iter()
            .map(String::as_str)
            .filter(|name| !state.is_configured(name))
            .collect();

        let product = dependency.product_name().map(str::to_string);
        if reorderable {
            let providers = unconfigured
                .iter()
                .filter_map(|name| {
                    later
                        .get(name)
                        .map(|provider| (name.to_string(), provider.to_string()))
                })
                .collect();
            return Ok(Error::PrerequisiteIntegration {
                dependency: dependency.name().to_string(),
                product,
                expression: required.to_string(),
                providers,
            });
        }

        let mut missing: Vec<String> = unconfigured
            .iter()
            .filter(|name| !later.contains_key(*name))
            .map(|name| name.to_string())
            .collect();

        // Nothing left to configure: a negated term must be what fails.
        let mut conflicting = Vec::new();
        if missing.is_empty() {
            for name in variables.iter().filter(|name| state.is_configured(name)) {
                let mut without = hypothetical.clone();
                without.insert(name.clone(), false);
                if self
                    .evaluator
                    .evaluate(required, &without)
                    .map_err(|e| expression_error(e, dependency))?
                {
                    conflicting.push(name.clone());
                }
            }
            if conflicting.is_empty() {
                missing = unconfigured.iter().map(|name| name.to_string()).collect();
            }
        }

        Ok(Error::MissingIntegrations {
            dependency: dependency.name().to_string(),
            product,
            expression: required.to_string(),
            missing,
            conflicting,
        })
    }
}

fn expression_error(err: ExpressionError, dependency: &Dependency) -> Error {
    let product = dependency.product_name().map(str::to_string);
    match err {
        ExpressionError::Invalid { reason } => Error::InvalidExpression {
            dependency: dependency.name().to_string(),
            product,
            expression: dependency.integrations_required().to_string(),
            reason,
        },
        ExpressionError::UnknownIntegration { name } => Error::UnknownIntegration {
            integration: name,
            dependency: dependency.name().to_string(),
            product,
        },
    }
}
