// SPDX-License-Identifier: PMPL-1.0-or-later

//! Archive manifest for the external archive browser
//!
//! Scans year directories (any directory whose name starts with four
//! digits, e.g. `1945` or `1939SH`) for pages named `YYYY.MM.DD.html` and
//! writes them as `window.ARCHIVE_INDEX = { year: { month: [...] } };`.

use crate::config::SiteConfig;
use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static YEAR_DIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})(.*)$").unwrap());
static DATED_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})\.(\d{2})\.(\d{2})\.html$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayEntry {
    pub day: String,
    /// `<year key>/<file name>`, relative to the manifest
    pub path: String,
}

/// year key → month → issues of that month
pub type ArchiveIndex = BTreeMap<String, BTreeMap<String, Vec<DayEntry>>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestReport {
    pub output: PathBuf,
    pub years: usize,
    pub issues: usize,
}

/// Collect every dated page under the year directories of `root`
pub fn build_index(root: &Path) -> Result<ArchiveIndex> {
    if !root.is_dir() {
        bail!("archive root is not a directory: {}", root.display());
    }

    let mut index = ArchiveIndex::new();
    let walker = WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(year_key) = entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
        else {
            continue;
        };
        if !YEAR_DIR.is_match(&year_key) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        let Some(caps) = DATED_PAGE.captures(&file_name) else {
            continue;
        };

        index
            .entry(year_key.clone())
            .or_default()
            .entry(caps[2].to_string())
            .or_default()
            .push(DayEntry {
                day: caps[3].to_string(),
                path: format!("{}/{}", year_key, file_name),
            });
    }

    for months in index.values_mut() {
        for days in months.values_mut() {
            days.sort();
        }
    }
    Ok(index)
}

/// The manifest script text: an assignment of the index to `window`
pub fn render_index(index: &ArchiveIndex, variable: &str) -> Result<String> {
    let json = serde_json::to_string_pretty(index).context("serializing archive index")?;
    Ok(format!("window.{} = {};\n", variable, json))
}

/// Build and write the manifest, to `output` or the configured file in `root`
pub fn write_index(
    root: &Path,
    config: &SiteConfig,
    output: Option<&Path>,
) -> Result<ManifestReport> {
    let index = build_index(root)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(&config.manifest_file));
    let content = render_index(&index, &config.manifest_variable)?;
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(&output, content).with_context(|| format!("writing {}", output.display()))?;

    Ok(ManifestReport {
        output,
        years: index.len(),
        issues: index
            .values()
            .flat_map(|months| months.values())
            .map(Vec::len)
            .sum(),
    })
}
