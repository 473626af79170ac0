//! [`TestInstaller`]: an installer directory for chart source and CLI tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::chart::ChartSpec;

/// Configuration with three products, Quay disabled.
pub const SAMPLE_CONFIG: &str = r#"---
tssc:
  namespace: tssc
  settings:
    crc: false
  products:
    - name: Advanced Cluster Security
      enabled: true
      namespace: tssc-acs
    - name: Developer Hub
      enabled: true
      namespace: tssc-dh
    - name: Quay
      enabled: false
      namespace: tssc-quay
"#;

/// A temporary installer directory laid out as `config.yaml` plus
/// `charts/<name>/Chart.yaml`.
///
/// # Example
///
/// ```
/// use tssc_test_utils::{ChartSpec, TestInstaller};
///
/// let installer = TestInstaller::new()
///     .with_chart(&ChartSpec::new("tssc-openshift"));
/// installer.assert_file_exists("charts/tssc-openshift/Chart.yaml");
/// ```
pub struct TestInstaller {
    temp_dir: TempDir,
}

impl Default for TestInstaller {
    fn default() -> Self {
        Self::new()
    }
}

impl TestInstaller {
    /// Create an empty installer directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the installer root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `config.yaml`, whether written or not.
    pub fn config_path(&self) -> PathBuf {
        self.root().join("config.yaml")
    }

    /// Write a chart directory.
    pub fn with_chart(self, spec: &ChartSpec) -> Self {
        let dir = self.root().join("charts").join(spec.name());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Chart.yaml"), spec.to_chart_yaml()).unwrap();
        self
    }

    /// Write many chart directories.
    pub fn with_charts(self, specs: &[ChartSpec]) -> Self {
        specs.iter().fold(self, |installer, spec| installer.with_chart(spec))
    }

    /// Write `config.yaml`.
    pub fn with_config(self, content: &str) -> Self {
        fs::write(self.config_path(), content).unwrap();
        self
    }

    /// Assert that `path` (relative to the installer root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
