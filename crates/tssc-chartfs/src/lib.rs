//! Chart sources for the TSSC installer.
//!
//! A chart source yields the installable units known to the installer: one
//! [`Chart`] per Helm chart, carrying its name and the raw annotations the
//! resolver parses. Two sources are provided:
//!
//! - [`ChartFs`] reads `charts/*/Chart.yaml` below an installer directory
//! - `Vec<Chart>` serves charts built in memory
//!
//! ```text
//! installer/
//!   config.yaml
//!   charts/
//!     tssc-openshift/Chart.yaml
//!     tssc-acs/Chart.yaml
//! ```

pub mod chart;
pub mod error;
pub mod fs;

/// Directory below the installer root holding one subdirectory per chart.
pub const CHARTS_DIR: &str = "charts";

/// Chart metadata file inside each chart directory.
pub const CHART_FILENAME: &str = "Chart.yaml";

pub use chart::{Chart, ChartSource};
pub use error::{Error, Result};
pub use fs::ChartFs;
