// SPDX-License-Identifier: PMPL-1.0-or-later

//! Build report output

pub mod formatter;
pub mod output;

use crate::build::BuildReport;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub use formatter::ReportFormatter;
pub use output::ReportOutputFormat;

/// Save a build report, creating parent directories
pub fn save_report(report: &BuildReport, path: &Path, format: ReportOutputFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let content = format.serialize(report).context("serializing build report")?;
    fs::write(path, content).with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}

/// Print a build report to the console
pub fn print_report(report: &BuildReport, quiet: bool) {
    ReportFormatter::new().print(report, quiet);
}
