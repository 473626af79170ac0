//! Topology command implementation

use colored::Colorize;
use serde::Serialize;
use tssc_chartfs::ChartFs;
use tssc_config::Config;
use tssc_integrations::{IntegrationRegistry, StaticIntegrations};
use tssc_resolver::{Topology, TopologyBuilder, disable_superseded_products};

use crate::cli::TopologyArgs;
use crate::error::Result;

/// One row of the installation plan.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PlanEntry<'a> {
    pub order: usize,
    pub name: &'a str,
    pub namespace: Option<&'a str>,
    pub product: Option<&'a str>,
}

/// Run the topology command
pub fn run_topology(args: &TopologyArgs) -> Result<()> {
    let (topology, disabled) = plan(args)?;
    if args.json {
        println!("{}", render_json(&topology)?);
        return Ok(());
    }
    for product in &disabled {
        println!(
            "{} {} (integration already configured)",
            "disabled".yellow(),
            product.cyan()
        );
    }
    print!("{}", render_text(&topology));
    Ok(())
}

/// Resolve the topology, returning it with the products auto-disabled on the way.
pub fn plan(args: &TopologyArgs) -> Result<(Topology, Vec<String>)> {
    let mut config = Config::from_file(&args.config)?;
    let integrations =
        StaticIntegrations::new(IntegrationRegistry::with_builtins(), args.configured.clone())?;
    let builder = TopologyBuilder::new(ChartFs::new(&args.charts), integrations);

    let disabled = if args.auto_disable {
        disable_superseded_products(builder.collection()?, &mut config, &args.configured)?
    } else {
        Vec::new()
    };

    let topology = builder.build(&config)?;
    Ok((topology, disabled))
}

pub fn entries(topology: &Topology) -> Vec<PlanEntry<'_>> {
    topology
        .dependencies()
        .iter()
        .enumerate()
        .map(|(i, d)| PlanEntry {
            order: i + 1,
            name: d.name(),
            namespace: d.namespace(),
            product: d.product_name(),
        })
        .collect()
}

pub fn render_json(topology: &Topology) -> Result<String> {
    Ok(serde_json::to_string_pretty(&entries(topology))?)
}

pub fn render_text(topology: &Topology) -> String {
    let entries = entries(topology);
    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);

    let mut out = format!("{}\n", "Installation Topology".bold());
    if entries.is_empty() {
        out.push_str(&format!("  {}\n", "Nothing to install".dimmed()));
    }
    for entry in entries {
        out.push_str(&format!(
            "  {:>2}. {:<width$}  {} {}",
            entry.order,
            entry.name,
            "namespace:".dimmed(),
            entry.namespace.unwrap_or("-"),
        ));
        if let Some(product) = entry.product {
            out.push_str(&format!("  {} {}", "product:".dimmed(), product));
        }
        out.push('\n');
    }
    out
}
