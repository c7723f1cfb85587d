//! Report Writers
//!
//! Console text for stdout plus optional file artifacts: a JSON summary and
//! an HTML dashboard with inline SVG charts.

mod console;
mod dashboard;
mod error;
mod json;
mod svg;

use std::path::{Path, PathBuf};

pub use console::render_console;
pub use dashboard::{DASHBOARD_FILE_NAME, render_dashboard, write_dashboard};
pub use error::ReportError;
pub use json::{JSON_FILE_NAME, write_json};

use crate::application::dto::SharpeReport;
use crate::config::ReportConfig;

/// Write the artifacts enabled in `config`. Returns the paths written.
///
/// # Errors
///
/// Returns `ReportError` if the output directory or a file cannot be written.
pub fn write_artifacts(
    report: &SharpeReport,
    config: &ReportConfig,
) -> Result<Vec<PathBuf>, ReportError> {
    if !config.writes_artifacts() {
        return Ok(Vec::new());
    }

    let dir: &Path = &config.output_dir;
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    if config.json {
        written.push(write_json(report, dir)?);
    }
    if config.plot {
        written.push(write_dashboard(report, dir)?);
    }

    for path in &written {
        tracing::info!(path = %path.display(), "Wrote report artifact");
    }
    Ok(written)
}
