//! Canonical integration names
//!
//! Charts may only provide, and expressions may only reference, names present
//! in the registry.

use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Integrations supported out of the box.
pub const BUILTIN_INTEGRATIONS: &[&str] = &[
    "acs",
    "artifactory",
    "azure",
    "bitbucket",
    "github",
    "gitlab",
    "jenkins",
    "nexus",
    "quay",
    "trustification",
];

/// Ordered, duplicate free set of integration names.
///
/// # Example
///
/// ```
/// use tssc_integrations::IntegrationRegistry;
///
/// let registry = IntegrationRegistry::new(["quay", "acs"]).unwrap();
/// assert!(registry.contains("acs"));
/// assert_eq!(registry.names(), vec!["acs", "quay"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationRegistry {
    names: BTreeSet<String>,
}

impl IntegrationRegistry {
    /// Build a registry, rejecting empty and duplicated names.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(Error::InvalidRegistry {
                    message: "empty integration name".to_string(),
                });
            }
            if !registry.names.insert(name.clone()) {
                return Err(Error::InvalidRegistry {
                    message: format!("integration '{name}' registered twice"),
                });
            }
        }
        Ok(registry)
    }

    /// Registry holding [`BUILTIN_INTEGRATIONS`].
    pub fn with_builtins() -> Self {
        Self {
            names: BUILTIN_INTEGRATIONS.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
