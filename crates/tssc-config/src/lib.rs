//! Installer configuration for the TSSC installer.
//!
//! The configuration is a YAML document with a single `tssc` root key holding
//! the installer namespace, free-form settings and the list of products. The
//! resolver only reads from it: which products are enabled, and which
//! namespace each product is deployed into.
//!
//! ```
//! use tssc_config::Config;
//!
//! let cfg = Config::from_yaml(r#"
//! tssc:
//!   namespace: tssc
//!   settings: {}
//!   products:
//!     - name: Advanced Cluster Security
//!       enabled: true
//!       namespace: tssc-acs
//! "#).unwrap();
//!
//! assert_eq!(cfg.namespace(), "tssc");
//! assert_eq!(cfg.enabled_product_names(), vec!["Advanced Cluster Security"]);
//! ```

pub mod config;
pub mod error;
pub mod product;

/// Name of the configuration file shipped with the installer.
pub const CONFIG_FILENAME: &str = "config.yaml";

pub use config::{Config, Settings, Spec};
pub use error::{Error, Result};
pub use product::Product;
