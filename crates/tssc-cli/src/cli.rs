//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// TSSC installer - plan the installation order of the installer's charts
#[derive(Parser, Debug)]
#[command(name = "tssc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve and validate the installation topology
    ///
    /// Examples:
    ///   tssc topology --config config.yaml --charts .
    ///   tssc topology --configured github,quay --auto-disable
    ///   tssc topology --json
    Topology(TopologyArgs),

    /// List the integration names charts may reference
    Integrations {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TopologyArgs {
    /// Installer configuration file
    #[arg(short, long, env = "TSSC_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Installer directory holding the charts/ tree
    #[arg(long, env = "TSSC_CHARTS", default_value = ".")]
    pub charts: PathBuf,

    /// Integrations already configured in the cluster
    #[arg(long, value_delimiter = ',')]
    pub configured: Vec<String>,

    /// Disable products whose integration is already configured
    #[arg(long)]
    pub auto_disable: bool,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_topology_defaults() {
        let cli = Cli::try_parse_from(["tssc", "topology"]).unwrap();
        let Commands::Topology(args) = cli.command else {
            panic!("expected topology command");
        };
        assert_eq!(args.config, PathBuf::from("config.yaml"));
        assert_eq!(args.charts, PathBuf::from("."));
        assert!(args.configured.is_empty());
        assert!(!args.auto_disable);
    }

    #[test]
    fn test_configured_list() {
        let cli =
            Cli::try_parse_from(["tssc", "-v", "topology", "--configured", "github,quay"]).unwrap();
        assert!(cli.verbose);
        let Commands::Topology(args) = cli.command else {
            panic!("expected topology command");
        };
        assert_eq!(args.configured, vec!["github", "quay"]);
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["tssc"]).is_err());
    }
}
