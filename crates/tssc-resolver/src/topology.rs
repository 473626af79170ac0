//! The resolved installation order

use std::collections::HashMap;

use crate::dependency::Dependency;
use crate::error::{Error, Result};

/// Dependencies in installation order, each with its resolved namespace.
///
/// Only the resolver appends; once handed out a topology is read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    dependencies: Vec<Dependency>,
    index: HashMap<String, usize>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, dependency: Dependency) {
        self.index
            .insert(dependency.name().to_string(), self.dependencies.len());
        self.dependencies.push(dependency);
    }

    /// All dependencies, in installation order.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Look up a dependency by name.
    pub fn get_dependency(&self, name: &str) -> Result<&Dependency> {
        self.index
            .get(name)
            .map(|&i| &self.dependencies[i])
            .ok_or_else(|| Error::DependencyNotFound {
                name: name.to_string(),
                reason: "is not part of the topology".to_string(),
            })
    }

    /// Position of a dependency in the installation order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Visit every dependency in order, stopping at the first error.
    pub fn walk<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&str, &Dependency) -> Result<()>,
    {
        for dependency in &self.dependencies {
            f(dependency.name(), dependency)?;
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.dependencies.iter().map(Dependency::name).collect()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl<'a> IntoIterator for &'a Topology {
    type Item = &'a Dependency;
    type IntoIter = std::slice::Iter<'a, Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.dependencies.iter()
    }
}
