//! Configuration loading and queries
//!
//! The document root must be a mapping with a `tssc` key; everything the
//! installer needs lives below it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::error::{Error, Result};
use crate::product::Product;

/// Free-form installer settings.
pub type Settings = Mapping;

/// Contents of the `tssc` root key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    /// Installer namespace, also the default namespace for charts
    #[serde(default)]
    pub namespace: String,

    /// Installer settings
    #[serde(default)]
    pub settings: Option<Settings>,

    /// Products known to the installer
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "tssc")]
    pub installer: Spec,
}

impl Config {
    /// Create a configuration for the given installer namespace.
    pub fn new(namespace: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            installer: Spec {
                namespace: namespace.into(),
                settings: Some(Settings::new()),
                products,
            },
        }
    }

    /// Parse and validate a YAML payload.
    pub fn from_yaml(payload: &str) -> Result<Self> {
        if payload.trim().is_empty() {
            return Err(Error::EmptyConfig);
        }
        let cfg: Config = serde_yaml::from_str(payload).map_err(|e| Error::Unmarshal {
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading installer configuration");
        let payload = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&payload)
    }

    /// Serialize back to YAML, prefixed with a document marker.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(format!("---\n{}", serde_yaml::to_string(self)?))
    }

    /// Check for missing or inconsistent fields.
    pub fn validate(&self) -> Result<()> {
        let root = &self.installer;
        if root.namespace.trim().is_empty() {
            return Err(Error::invalid("missing namespace"));
        }
        if root.settings.is_none() {
            return Err(Error::invalid("missing settings"));
        }
        for (i, product) in root.products.iter().enumerate() {
            product.validate()?;
            if root.products[..i].iter().any(|p| p.name == product.name) {
                return Err(Error::invalid(format!(
                    "duplicated product '{}'",
                    product.name
                )));
            }
        }
        Ok(())
    }

    /// The installer namespace.
    pub fn namespace(&self) -> &str {
        &self.installer.namespace
    }

    /// Look up a product by its name.
    pub fn get_product(&self, name: &str) -> Result<&Product> {
        self.installer
            .products
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::ProductNotFound {
                name: name.to_string(),
            })
    }

    /// Products flagged as enabled, in declaration order.
    pub fn enabled_products(&self) -> Vec<&Product> {
        self.installer.products.iter().filter(|p| p.enabled).collect()
    }

    /// Names of the enabled products, in declaration order.
    pub fn enabled_product_names(&self) -> Vec<&str> {
        self.enabled_products()
            .into_iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Flip a product's enabled flag. Returns whether the flag changed.
    pub fn set_product_enabled(&mut self, name: &str, enabled: bool) -> Result<bool> {
        let product = self
            .installer
            .products
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::ProductNotFound {
                name: name.to_string(),
            })?;
        if product.enabled == enabled {
            return Ok(false);
        }
        tracing::info!(product = %name, enabled, "Updating product");
        product.enabled = enabled;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
tssc:
  namespace: tssc
  settings:
    crc: false
  products:
    - name: Developer Hub
      enabled: true
      namespace: tssc-dh
    - name: Quay
      enabled: false
"#;

    #[test]
    fn test_from_yaml() {
        let cfg = Config::from_yaml(SAMPLE).unwrap();
        assert_eq!(cfg.namespace(), "tssc");
        assert_eq!(cfg.installer.products.len(), 2);
        assert_eq!(
            cfg.get_product("Developer Hub").unwrap().namespace(),
            Some("tssc-dh")
        );
    }

    #[test]
    fn test_empty_payload() {
        assert!(matches!(Config::from_yaml("  \n"), Err(Error::EmptyConfig)));
    }

    #[test]
    fn test_missing_root_key() {
        let err = Config::from_yaml("other:\n  namespace: x\n").unwrap_err();
        assert!(matches!(err, Error::Unmarshal { .. }));
    }

    #[test]
    fn test_set_product_enabled_reports_change() {
        let mut cfg = Config::from_yaml(SAMPLE).unwrap();
        assert!(cfg.set_product_enabled("Quay", true).unwrap());
        assert!(!cfg.set_product_enabled("Quay", true).unwrap());
        assert_eq!(cfg.enabled_product_names(), vec!["Developer Hub", "Quay"]);
    }
}
