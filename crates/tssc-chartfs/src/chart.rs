//! Chart records and the chart source seam

use std::collections::BTreeMap;

use crate::error::Result;

/// An installable unit as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    /// Chart name, unique within a source
    pub name: String,
    /// Namespace hint carried by the source, if any
    pub namespace: Option<String>,
    /// Raw `Chart.yaml` annotations
    pub annotations: BTreeMap<String, String>,
}

impl Chart {
    /// Create a chart without annotations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            annotations: BTreeMap::new(),
        }
    }

    /// Add an annotation, replacing any previous value for the key.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Set the namespace hint.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Look up a raw annotation value.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }
}

/// Anything able to list the installer's charts.
pub trait ChartSource {
    /// All charts, in a stable order.
    fn charts(&self) -> Result<Vec<Chart>>;
}

impl ChartSource for Vec<Chart> {
    fn charts(&self) -> Result<Vec<Chart>> {
        Ok(self.clone())
    }
}

impl<S: ChartSource + ?Sized> ChartSource for &S {
    fn charts(&self) -> Result<Vec<Chart>> {
        (**self).charts()
    }
}
