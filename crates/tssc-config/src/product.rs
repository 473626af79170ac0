//! Product entries of the installer configuration

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::error::{Error, Result};

/// A product the installer may deploy.
///
/// Charts point at a product through their product-name annotation; the
/// product decides whether those charts are part of the plan and, for charts
/// opting into it, which namespace they land in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Display name, referenced verbatim by chart annotations
    pub name: String,

    /// Whether the product's charts are deployed
    #[serde(default)]
    pub enabled: bool,

    /// Namespace for charts using the product namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Product specific properties, passed through untouched
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub properties: Mapping,
}

impl Product {
    /// Create an enabled product without namespace or properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            namespace: None,
            properties: Mapping::new(),
        }
    }

    /// Set the product namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The product namespace, if one is configured.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Check the product entry is complete.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("product without name"));
        }
        if let Some(ns) = &self.namespace {
            if ns.trim().is_empty() {
                return Err(Error::invalid(format!(
                    "product '{}' has an empty namespace",
                    self.name
                )));
            }
        }
        Ok(())
    }
}
