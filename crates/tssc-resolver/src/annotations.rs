//! Chart annotation keys
//!
//! Charts describe their place in the installation with annotations keyed by
//! a reverse-DNS prefix, e.g. `tssc.redhat-appstudio.github.com/depends-on`.

const SUFFIX_PRODUCT_NAME: &str = "product-name";
const SUFFIX_DEPENDS_ON: &str = "depends-on";
const SUFFIX_WEIGHT: &str = "weight";
const SUFFIX_USE_PRODUCT_NAMESPACE: &str = "use-product-namespace";
const SUFFIX_INTEGRATIONS_PROVIDED: &str = "integrations-provided";
const SUFFIX_INTEGRATIONS_REQUIRED: &str = "integrations-required";

/// Builds the annotation keys for an application's prefix.
///
/// # Example
///
/// ```
/// use tssc_resolver::AnnotationKeys;
///
/// let keys = AnnotationKeys::default();
/// assert_eq!(keys.weight(), "tssc.redhat-appstudio.github.com/weight");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationKeys {
    prefix: String,
}

impl AnnotationKeys {
    /// Prefix `<app>.<org>.<domain>`.
    pub fn new(app: &str, org: &str, domain: &str) -> Self {
        Self::with_prefix(format!("{app}.{org}.{domain}"))
    }

    /// Use an arbitrary prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn product_name(&self) -> String {
        self.key(SUFFIX_PRODUCT_NAME)
    }

    pub fn depends_on(&self) -> String {
        self.key(SUFFIX_DEPENDS_ON)
    }

    pub fn weight(&self) -> String {
        self.key(SUFFIX_WEIGHT)
    }

    pub fn use_product_namespace(&self) -> String {
        self.key(SUFFIX_USE_PRODUCT_NAMESPACE)
    }

    pub fn integrations_provided(&self) -> String {
        self.key(SUFFIX_INTEGRATIONS_PROVIDED)
    }

    pub fn integrations_required(&self) -> String {
        self.key(SUFFIX_INTEGRATIONS_REQUIRED)
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}/{}", self.prefix, suffix)
    }
}

impl Default for AnnotationKeys {
    fn default() -> Self {
        Self::new("tssc", "redhat-appstudio", "github.com")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_use_prefix() {
        let keys = AnnotationKeys::new("helmet", "example", "org");
        assert_eq!(keys.prefix(), "helmet.example.org");
        assert_eq!(keys.product_name(), "helmet.example.org/product-name");
        assert_eq!(keys.depends_on(), "helmet.example.org/depends-on");
        assert_eq!(
            keys.use_product_namespace(),
            "helmet.example.org/use-product-namespace"
        );
        assert_eq!(
            keys.integrations_provided(),
            "helmet.example.org/integrations-provided"
        );
        assert_eq!(
            keys.integrations_required(),
            "helmet.example.org/integrations-required"
        );
    }
}
