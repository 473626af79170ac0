//! Integrations command implementation

use colored::Colorize;
use tssc_integrations::IntegrationRegistry;

use crate::error::Result;

/// Run the integrations command
pub fn run_integrations(json: bool) -> Result<()> {
    let registry = IntegrationRegistry::with_builtins();
    if json {
        println!("{}", serde_json::to_string_pretty(&registry.names())?);
        return Ok(());
    }

    println!("{}", "Integrations".bold());
    for name in registry.iter() {
        println!("  {} {}", "+".green(), name.cyan());
    }
    Ok(())
}
