//! A chart with its parsed installation metadata

use tssc_chartfs::Chart;

use crate::annotations::AnnotationKeys;
use crate::error::{Error, Result};

/// Ordered dependencies, as handed to the deployment stage.
pub type Dependencies = Vec<Dependency>;

/// One installable unit.
///
/// Built once from a chart's annotations; afterwards only the resolver
/// assigns its namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    name: String,
    namespace: Option<String>,
    product_name: Option<String>,
    depends_on: Vec<String>,
    weight: i32,
    use_product_namespace: bool,
    integrations_provided: Vec<String>,
    integrations_required: String,
}

impl Dependency {
    /// Parse a chart's annotations.
    pub fn from_chart(chart: &Chart, keys: &AnnotationKeys) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidCollection {
            chart: chart.name.clone(),
            reason,
        };

        let name = chart.name.trim();
        if name.is_empty() {
            return Err(invalid("empty chart name".to_string()));
        }
        if name.contains(',') || name.contains(char::is_whitespace) {
            return Err(invalid("chart name must not contain commas or spaces".to_string()));
        }

        let product_name = chart
            .annotation(&keys.product_name())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let depends_on = parse_list(chart.annotation(&keys.depends_on()));
        if depends_on.iter().any(|d| d == name) {
            return Err(invalid("depends on itself".to_string()));
        }

        let weight = match chart.annotation(&keys.weight()).map(str::trim) {
            None | Some("") => 0,
            Some(value) => value
                .parse::<i32>()
                .map_err(|e| invalid(format!("invalid weight {value:?}: {e}")))?,
        };

        let use_product_namespace =
            match chart.annotation(&keys.use_product_namespace()).map(str::trim) {
                None | Some("") => false,
                Some(value) if value.eq_ignore_ascii_case("true") => true,
                Some(value) if value.eq_ignore_ascii_case("false") => false,
                Some(value) => {
                    return Err(invalid(format!(
                        "invalid use-product-namespace {value:?}, expected true or false"
                    )));
                }
            };
        if use_product_namespace && product_name.is_none() {
            return Err(invalid(
                "uses the product namespace without a product name".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            namespace: chart.namespace.clone(),
            product_name,
            depends_on,
            weight,
            use_product_namespace,
            integrations_provided: parse_list(chart.annotation(&keys.integrations_provided())),
            integrations_required: chart
                .annotation(&keys.integrations_required())
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        })
    }

    /// Parse a chart and pin it to `namespace`, bypassing resolution.
    pub fn with_namespace(
        chart: &Chart,
        keys: &AnnotationKeys,
        namespace: impl Into<String>,
    ) -> Result<Self> {
        let mut dependency = Self::from_chart(chart, keys)?;
        dependency.set_namespace(namespace);
        Ok(dependency)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target namespace; `None` until resolved or pinned.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }

    /// Charts installed strictly before this one.
    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    /// Tie-breaker among unrelated charts, lower first.
    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn use_product_namespace(&self) -> bool {
        self.use_product_namespace
    }

    pub fn integrations_provided(&self) -> &[String] {
        &self.integrations_provided
    }

    /// Boolean expression over integration names, empty when nothing is required.
    pub fn integrations_required(&self) -> &str {
        &self.integrations_required
    }

    pub(crate) fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = Some(namespace.into());
    }
}

/// Comma separated list: entries trimmed, empties dropped, first occurrence kept.
fn parse_list(value: Option<&str>) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in value.unwrap_or_default().split(',').map(str::trim) {
        if !item.is_empty() && !items.iter().any(|i| i == item) {
            items.push(item.to_string());
        }
    }
    items
}
