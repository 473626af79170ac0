//! Topological ordering of the enabled dependencies
//!
//! Edges point from a dependency to the charts it depends on. The sort uses
//! Kahn's algorithm: among the charts whose dependencies are all installed,
//! the lowest `(weight, name)` goes next. Weights give chart authors soft
//! control over otherwise unrelated charts, and the name keeps the order
//! stable across runs.

use std::collections::{BTreeSet, HashMap, HashSet};

use tssc_config::Config;

use crate::collection::Collection;
use crate::dependency::Dependency;
use crate::error::{Error, Result};
use crate::topology::Topology;

/// Orders the collection's enabled dependencies and assigns namespaces.
pub struct Resolver<'a> {
    config: &'a Config,
    collection: &'a Collection,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a Config, collection: &'a Collection) -> Self {
        Self { config, collection }
    }

    /// Produce the installation order for the products enabled in the config.
    ///
    /// # Errors
    ///
    /// - `Error::DependencyNotFound` when a depends-on entry names a chart that
    ///   does not exist or belongs to a disabled product
    /// - `Error::CircularDependency` when the depends-on graph has a cycle
    /// - `Error::ProductLookup`/`Error::MissingProductNamespace` when a chart
    ///   using its product namespace can't get one
    pub fn resolve(&self) -> Result<Topology> {
        let enabled = self.collection.filter(&self.config.enabled_product_names());
        self.validate_edges(&enabled)?;

        // In-degree: number of dependencies not installed yet
        let mut in_degree: HashMap<&str, usize> = HashMap::new();
        let mut dependents: HashMap<&str, Vec<&Dependency>> = HashMap::new();
        for dependency in enabled.iter() {
            in_degree.insert(dependency.name(), dependency.depends_on().len());
            for parent in dependency.depends_on() {
                dependents
                    .entry(parent.as_str())
                    .or_default()
                    .push(dependency);
            }
        }

        let mut ready: BTreeSet<(i32, &str)> = enabled
            .iter()
            .filter(|d| d.depends_on().is_empty())
            .map(|d| (d.weight(), d.name()))
            .collect();

        let mut topology = Topology::new();
        while let Some((_, name)) = ready.pop_first() {
            let Some(dependency) = enabled.get(name) else {
                continue;
            };
            let mut resolved = dependency.clone();
            resolved.set_namespace(self.namespace_for(dependency)?);
            tracing::debug!(
                position = topology.len(),
                dependency = name,
                namespace = ?resolved.namespace(),
                "Resolved dependency"
            );
            topology.append(resolved);

            for child in dependents.get(name).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(child.name()) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert((child.weight(), child.name()));
                    }
                }
            }
        }

        if topology.len() != enabled.len() {
            let remaining: BTreeSet<&str> = enabled
                .iter()
                .map(Dependency::name)
                .filter(|name| !topology.contains(name))
                .collect();
            return Err(Error::CircularDependency {
                cycle: find_cycle(&enabled, &remaining),
            });
        }

        Ok(topology)
    }

    /// Every depends-on entry must name an enabled chart.
    fn validate_edges(&self, enabled: &Collection) -> Result<()> {
        for dependency in enabled.iter() {
            for parent in dependency.depends_on() {
                if enabled.contains(parent) {
                    continue;
                }
                let reason = match self.collection.get(parent) {
                    Some(disabled) => format!(
                        "required by '{}', its product {:?} is disabled",
                        dependency.name(),
                        disabled.product_name().unwrap_or_default()
                    ),
                    None => format!("required by '{}'", dependency.name()),
                };
                return Err(Error::DependencyNotFound {
                    name: parent.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }

    fn namespace_for(&self, dependency: &Dependency) -> Result<String> {
        if !dependency.use_product_namespace() {
            return Ok(self.config.namespace().to_string());
        }
        let product_name = dependency.product_name().unwrap_or_default();
        let product = self
            .config
            .get_product(product_name)
            .map_err(|source| Error::ProductLookup {
                dependency: dependency.name().to_string(),
                source,
            })?;
        product
            .namespace()
            .map(str::to_string)
            .ok_or_else(|| Error::MissingProductNamespace {
                dependency: dependency.name().to_string(),
                product: product_name.to_string(),
            })
    }
}

/// Follow unresolved dependencies from the first leftover chart until a chart
/// repeats. Every leftover chart still waits on another leftover chart, so
/// the walk always closes a loop.
fn find_cycle(enabled: &Collection, remaining: &BTreeSet<&str>) -> Vec<String> {
    let mut path: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = remaining.first().copied();

    while let Some(name) = current {
        if !seen.insert(name) {
            let start = path.iter().position(|n| *n == name).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
            cycle.push(name.to_string());
            return cycle;
        }
        path.push(name);
        current = enabled.get(name).and_then(|d| {
            d.depends_on()
                .iter()
                .map(String::as_str)
                .find(|parent| remaining.contains(parent))
        });
    }

    // Unreachable for a real cycle; report the leftovers as they are.
    remaining.iter().map(|n| n.to_string()).collect()
}
