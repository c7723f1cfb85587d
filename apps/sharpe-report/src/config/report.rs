//! Report output configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where and what to write besides the console summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Render the HTML dashboard.
    #[serde(default)]
    pub plot: bool,
    /// Write the JSON summary.
    #[serde(default)]
    pub json: bool,
    /// Directory for generated artifacts.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl ReportConfig {
    /// True when any file artifact is requested.
    #[must_use]
    pub const fn writes_artifacts(&self) -> bool {
        self.plot || self.json
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            plot: false,
            json: false,
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}
