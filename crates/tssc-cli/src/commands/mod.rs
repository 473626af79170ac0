//! Command implementations for tssc-cli

pub mod integrations;
pub mod topology;

pub use integrations::run_integrations;
pub use topology::run_topology;
