// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report export and console output

pub mod formatter;
pub mod output;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub use formatter::{print_run_summary, print_status};
pub use output::ReportOutputFormat;

/// Save a report to `path` in the given format, creating parent folders.
pub fn save_report<T: Serialize, P: AsRef<Path>>(
    report: &T,
    path: P,
    format: ReportOutputFormat,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let content = format.serialize(report)?;
    fs::write(path, content).with_context(|| format!("writing report {}", path.display()))?;
    tracing::debug!(path = %path.display(), format = format.extension(), "report saved");
    Ok(())
}
