//! JSON summary artifact.

use std::path::{Path, PathBuf};

use super::error::ReportError;
use crate::application::dto::SharpeReport;

/// File name of the JSON summary.
pub const JSON_FILE_NAME: &str = "sharpe_report.json";

/// Write the report summary to `{dir}/sharpe_report.json`.
///
/// # Errors
///
/// Returns `ReportError` if serialization or the write fails.
pub fn write_json(report: &SharpeReport, dir: &Path) -> Result<PathBuf, ReportError> {
    let path = dir.join(JSON_FILE_NAME);
    let body = report.to_json()?;
    std::fs::write(&path, body).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
