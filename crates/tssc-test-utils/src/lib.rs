//! Shared test utilities for the tssc workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`chart`]: [`ChartSpec`] builder for annotated charts
//! - [`installer`]: [`TestInstaller`], an installer directory in a temp dir

pub mod chart;
pub mod installer;

pub use chart::{ANNOTATION_PREFIX, ChartSpec, charts};
pub use installer::{SAMPLE_CONFIG, TestInstaller};
