//! Disabling products whose integration already exists
//!
//! When an integration is configured externally (say, an existing ACS
//! instance), the product whose charts would provide it must not be
//! installed, otherwise inspection fails with a configured-integration error.

use tssc_config::Config;

use crate::collection::Collection;
use crate::error::Result;

/// Disable every enabled product superseded by a configured integration.
///
/// Returns the names of the products that were switched off.
pub fn disable_superseded_products<S: AsRef<str>>(
    collection: &Collection,
    config: &mut Config,
    configured: &[S],
) -> Result<Vec<String>> {
    let mut disabled = Vec::new();
    for product in collection.products_superseded_by(configured) {
        if config.set_product_enabled(product, false)? {
            tracing::info!(product, "Disabled product superseded by a configured integration");
            disabled.push(product.to_string());
        }
    }
    Ok(disabled)
}
