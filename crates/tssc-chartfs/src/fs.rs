//! Directory backed chart source

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;

use crate::chart::{Chart, ChartSource};
use crate::error::{Error, Result};
use crate::{CHART_FILENAME, CHARTS_DIR};

/// The subset of `Chart.yaml` the installer reads.
#[derive(Debug, Deserialize)]
struct ChartMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    annotations: BTreeMap<String, Value>,
}

/// Reads charts from `<root>/charts/<chart>/Chart.yaml`.
#[derive(Debug, Clone)]
pub struct ChartFs {
    root: PathBuf,
}

impl ChartFs {
    /// Create a chart source rooted at the installer directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The installer directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a single chart by name.
    pub fn get_chart(&self, name: &str) -> Result<Chart> {
        self.charts()?
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::ChartNotFound {
                name: name.to_string(),
            })
    }

    fn charts_dir(&self) -> PathBuf {
        self.root.join(CHARTS_DIR)
    }

    fn load_chart(dir: &Path) -> Result<Chart> {
        let path = dir.join(CHART_FILENAME);
        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let meta: ChartMetadata =
            serde_yaml::from_str(&content).map_err(|e| Error::InvalidChart {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let name = match meta.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        let mut annotations = BTreeMap::new();
        for (key, value) in meta.annotations {
            let value = scalar_to_string(&value).ok_or_else(|| Error::InvalidChart {
                path: path.clone(),
                message: format!("annotation '{key}' is not a scalar"),
            })?;
            annotations.insert(key, value);
        }

        Ok(Chart {
            name,
            namespace: None,
            annotations,
        })
    }
}

impl ChartSource for ChartFs {
    fn charts(&self) -> Result<Vec<Chart>> {
        let dir = self.charts_dir();
        if !dir.is_dir() {
            return Err(Error::NotFound { path: dir });
        }

        let mut chart_dirs = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))? {
            let path = entry.map_err(|e| Error::io(&dir, e))?.path();
            if path.join(CHART_FILENAME).is_file() {
                chart_dirs.push(path);
            } else {
                tracing::debug!(?path, "Skipping directory without Chart.yaml");
            }
        }
        chart_dirs.sort();

        let charts = chart_dirs
            .iter()
            .map(|d| Self::load_chart(d))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(root = ?self.root, count = charts.len(), "Loaded charts");
        Ok(charts)
    }
}

/// Annotations are strings in Helm, but unquoted YAML scalars are common.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}
