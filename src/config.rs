// SPDX-License-Identifier: PMPL-1.0-or-later

//! Site configuration, read from an optional `broadsheet.json` in the
//! collection root. Every field has a default so a missing file, or a file
//! naming only a few keys, is valid.

use crate::viewer::ViewerConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "broadsheet.json";

const NOTO_SERIF_TC: &str =
    "https://fonts.googleapis.com/css2?family=Noto+Serif+TC:wght@400;700&display=swap";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Appended to a base directory name to find its translations
    pub translation_suffix: String,
    /// Appended to a base directory name for its published pages
    pub output_suffix: String,
    /// Transcript file extension, matched case-insensitively
    pub transcript_extension: String,
    /// Trailing part of every page `<title>`
    pub site_title: String,
    pub html_lang: String,
    pub home_href: String,
    pub home_label: String,
    /// Stylesheet file written next to the pages
    pub stylesheet: String,
    pub font_links: Vec<String>,
    pub manifest_file: String,
    pub manifest_variable: String,
    pub viewer: ViewerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            translation_suffix: "_t".to_string(),
            output_suffix: "_final".to_string(),
            transcript_extension: "md".to_string(),
            site_title: "Archive".to_string(),
            html_lang: "en".to_string(),
            home_href: "../index.html".to_string(),
            home_label: "Home".to_string(),
            stylesheet: "styles.css".to_string(),
            font_links: vec![NOTO_SERIF_TC.to_string()],
            manifest_file: "archive-index.js".to_string(),
            manifest_variable: "ARCHIVE_INDEX".to_string(),
            viewer: ViewerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load `broadsheet.json` from `root`, falling back to defaults when absent
    pub fn load_from_root(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            log::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: SiteConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.translation_suffix.is_empty() {
            anyhow::bail!("translation_suffix must not be empty");
        }
        if self.output_suffix.is_empty() {
            anyhow::bail!("output_suffix must not be empty");
        }
        if self.translation_suffix == self.output_suffix {
            anyhow::bail!(
                "translation_suffix and output_suffix must differ (both {:?})",
                self.output_suffix
            );
        }
        if self.viewer.small_viewport_width == 0 {
            anyhow::bail!("viewer.small_viewport_width must be positive");
        }
        Ok(())
    }

    /// Extension without a leading dot, lowercased
    pub fn extension(&self) -> String {
        self.transcript_extension
            .trim_start_matches('.')
            .to_ascii_lowercase()
    }
}
