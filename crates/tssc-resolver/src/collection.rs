//! The validated set of dependencies discovered from a chart source

use std::collections::HashMap;

use tssc_chartfs::Chart;

use crate::annotations::AnnotationKeys;
use crate::dependency::Dependency;
use crate::error::{Error, Result};

/// All dependencies known to the installer, in discovery order.
///
/// Names are unique. The collection also indexes which product provides each
/// integration, so callers can tell which product an existing integration
/// supersedes.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    dependencies: Vec<Dependency>,
    index: HashMap<String, usize>,
    integration_products: HashMap<String, String>,
}

impl Collection {
    /// Parse every chart into a dependency.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCollection` for malformed annotations or when
    /// two charts share a name.
    pub fn new(keys: &AnnotationKeys, charts: &[Chart]) -> Result<Self> {
        let dependencies = charts
            .iter()
            .map(|chart| Dependency::from_chart(chart, keys))
            .collect::<Result<Vec<_>>>()?;
        let collection = Self::from_dependencies(dependencies)?;
        tracing::debug!(count = collection.len(), "Loaded dependency collection");
        Ok(collection)
    }

    /// Build a collection from already parsed dependencies.
    pub fn from_dependencies(dependencies: Vec<Dependency>) -> Result<Self> {
        let mut collection = Self::default();
        for dependency in dependencies {
            collection.insert(dependency)?;
        }
        Ok(collection)
    }

    fn insert(&mut self, dependency: Dependency) -> Result<()> {
        if self.index.contains_key(dependency.name()) {
            return Err(Error::InvalidCollection {
                chart: dependency.name().to_string(),
                reason: "duplicated chart name".to_string(),
            });
        }
        self.push_unchecked(dependency);
        Ok(())
    }

    /// Append a dependency whose name is known to be unique.
    fn push_unchecked(&mut self, dependency: Dependency) {
        if let Some(product) = dependency.product_name() {
            for integration in dependency.integrations_provided() {
                self.integration_products
                    .entry(integration.clone())
                    .or_insert_with(|| product.to_string());
            }
        }
        self.index
            .insert(dependency.name().to_string(), self.dependencies.len());
        self.dependencies.push(dependency);
    }

    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.index.get(name).map(|&i| &self.dependencies[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Product whose charts provide `integration`, if any.
    pub fn get_product_name_for_integration(&self, integration: &str) -> Option<&str> {
        self.integration_products
            .get(integration)
            .map(String::as_str)
    }

    /// Products made redundant by integrations that already exist, deduplicated.
    pub fn products_superseded_by<S: AsRef<str>>(&self, configured: &[S]) -> Vec<&str> {
        let mut products: Vec<&str> = Vec::new();
        for integration in configured {
            if let Some(product) = self.get_product_name_for_integration(integration.as_ref()) {
                if !products.contains(&product) {
                    products.push(product);
                }
            }
        }
        products
    }

    /// Dependencies of enabled products, plus those without a product.
    pub fn filter<S: AsRef<str>>(&self, enabled_products: &[S]) -> Collection {
        let mut filtered = Collection::default();
        for dependency in &self.dependencies {
            let enabled = match dependency.product_name() {
                None => true,
                Some(product) => enabled_products.iter().any(|p| p.as_ref() == product),
            };
            if enabled {
                filtered.push_unchecked(dependency.clone());
            } else {
                tracing::debug!(
                    dependency = dependency.name(),
                    product = ?dependency.product_name(),
                    "Skipping dependency of disabled product"
                );
            }
        }
        filtered
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter()
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
