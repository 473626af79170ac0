//! [`ChartSpec`] builder for annotated test charts.

use tssc_chartfs::Chart;

/// Default annotation prefix used by the installer.
pub const ANNOTATION_PREFIX: &str = "tssc.redhat-appstudio.github.com";

/// Describes a chart's annotations; renders to a [`Chart`] or a `Chart.yaml`.
///
/// # Example
///
/// ```
/// use tssc_test_utils::ChartSpec;
///
/// let chart = ChartSpec::new("tssc-dh")
///     .product("Developer Hub")
///     .depends_on(&["tssc-openshift"])
///     .requires("acs")
///     .to_chart();
/// assert_eq!(chart.name, "tssc-dh");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChartSpec {
    name: String,
    annotations: Vec<(&'static str, String)>,
}

impl ChartSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            annotations: Vec::new(),
        }
    }

    pub fn product(self, product: &str) -> Self {
        self.annotate("product-name", product)
    }

    pub fn depends_on(self, names: &[&str]) -> Self {
        self.annotate("depends-on", &names.join(","))
    }

    pub fn weight(self, weight: i32) -> Self {
        self.annotate("weight", &weight.to_string())
    }

    pub fn use_product_namespace(self) -> Self {
        self.annotate("use-product-namespace", "true")
    }

    pub fn provides(self, integrations: &[&str]) -> Self {
        self.annotate("integrations-provided", &integrations.join(","))
    }

    pub fn requires(self, expression: &str) -> Self {
        self.annotate("integrations-required", expression)
    }

    /// Set a raw annotation suffix, e.g. to inject malformed values.
    pub fn annotate(mut self, suffix: &'static str, value: &str) -> Self {
        self.annotations.retain(|(s, _)| *s != suffix);
        self.annotations.push((suffix, value.to_string()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// In-memory chart.
    pub fn to_chart(&self) -> Chart {
        self.annotations
            .iter()
            .fold(Chart::new(self.name.as_str()), |chart, (suffix, value)| {
                chart.with_annotation(format!("{ANNOTATION_PREFIX}/{suffix}"), value.as_str())
            })
    }

    /// `Chart.yaml` contents with every annotation quoted.
    pub fn to_chart_yaml(&self) -> String {
        let mut yaml = format!("apiVersion: v2\nname: {}\nversion: 0.1.0\n", self.name);
        if !self.annotations.is_empty() {
            yaml.push_str("annotations:\n");
            for (suffix, value) in &self.annotations {
                yaml.push_str(&format!(
                    "  {ANNOTATION_PREFIX}/{suffix}: \"{}\"\n",
                    value.replace('\\', "\\\\").replace('"', "\\\"")
                ));
            }
        }
        yaml
    }
}

/// Render many specs at once.
pub fn charts(specs: &[ChartSpec]) -> Vec<Chart> {
    specs.iter().map(ChartSpec::to_chart).collect()
}
