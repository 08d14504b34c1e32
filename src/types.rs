// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for broadsheet
//!
//! Issues, the ordered per-collection sequence, the navigation record
//! embedded into every page, and the failure taxonomy used by reports.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

static DATE_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[._-]?(\d{2})[._-]?(\d{2})$").unwrap());

/// Unreserved URL characters stay literal, so dated names link as-is
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// Display title derived from an issue identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DisplayTitle {
    /// Identifier matched the 4-2-2 digit pattern, normalized to `YYYY.MM.DD`
    Date(String),
    /// Identifier did not look like a date and is shown as-is
    Raw(String),
}

impl DisplayTitle {
    pub fn from_identifier(identifier: &str) -> Self {
        match DATE_IDENTIFIER.captures(identifier) {
            Some(caps) => DisplayTitle::Date(format!("{}.{}.{}", &caps[1], &caps[2], &caps[3])),
            None => DisplayTitle::Raw(identifier.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DisplayTitle::Date(value) | DisplayTitle::Raw(value) => value,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, DisplayTitle::Date(_))
    }
}

impl fmt::Display for DisplayTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One newspaper issue: a base transcript and its optional translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// File stem, unique within its collection
    pub identifier: String,
    pub title: DisplayTitle,
    /// Stem of the published `.html` file
    pub output_stem: String,
    pub base_path: PathBuf,
    /// `None` when the translation directory or file does not exist
    pub translation_path: Option<PathBuf>,
}

impl Issue {
    pub fn new(identifier: &str, base_path: PathBuf, translation_path: Option<PathBuf>) -> Self {
        let title = DisplayTitle::from_identifier(identifier);
        let output_stem = if title.is_date() {
            title.as_str().to_string()
        } else {
            identifier.to_string()
        };
        Self {
            identifier: identifier.to_string(),
            title,
            output_stem,
            base_path,
            translation_path,
        }
    }

    pub fn output_file_name(&self) -> String {
        format!("{}.html", self.output_stem)
    }

    /// Relative link to the page, safe for use as a URL path segment
    pub fn href(&self) -> String {
        utf8_percent_encode(&self.output_file_name(), PATH_SEGMENT).to_string()
    }
}

/// Naturally ordered, immutable list of issues of one collection
#[derive(Debug, Clone, Default)]
pub struct IssueSequence {
    issues: Vec<Issue>,
    notes: Vec<String>,
}

impl IssueSequence {
    /// Build a sequence from issues already in natural order.
    ///
    /// Two identifiers may canonicalize to the same dated output stem
    /// (`1945.08.15` and `19450815`); the later one falls back to its raw
    /// identifier, numbered `-2`, `-3`... if that is taken too, so no page
    /// overwrites another.
    pub fn new(mut issues: Vec<Issue>) -> Self {
        let mut notes = Vec::new();
        let mut used = HashSet::new();
        for issue in &mut issues {
            if used.insert(issue.output_stem.clone()) {
                continue;
            }
            let mut stem = issue.identifier.clone();
            let mut suffix = 2;
            while used.contains(&stem) {
                stem = format!("{}-{}", issue.identifier, suffix);
                suffix += 1;
            }
            notes.push(format!(
                "{} collides with an earlier issue on {}.html, publishing as {}.html",
                issue.identifier, issue.output_stem, stem
            ));
            used.insert(stem.clone());
            issue.output_stem = stem;
        }
        Self { issues, notes }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Issue> {
        self.issues.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    pub fn as_slice(&self) -> &[Issue] {
        &self.issues
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn predecessor(&self, index: usize) -> Option<&Issue> {
        index.checked_sub(1).and_then(|i| self.issues.get(i))
    }

    pub fn successor(&self, index: usize) -> Option<&Issue> {
        if index >= self.issues.len() {
            return None;
        }
        self.issues.get(index + 1)
    }

    /// Navigation record for the page at `index`
    pub fn navigation(&self, index: usize) -> NavigationData {
        NavigationData {
            prev: self.predecessor(index).map(Issue::href),
            next: self.successor(index).map(Issue::href),
        }
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.identifier.as_str()).collect()
    }
}

/// Per-page neighbour targets, `None` at the sequence boundaries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationData {
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Direction of a sequence navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

impl NavigationData {
    pub fn target(&self, direction: NavDirection) -> Option<&str> {
        match direction {
            NavDirection::Prev => self.prev.as_deref(),
            NavDirection::Next => self.next.as_deref(),
        }
    }

    /// JSON suitable for embedding inside a `<script>` element
    pub fn to_script_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

/// Failure taxonomy shared by the build pipeline and its reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Base collection directory missing, the collection is skipped
    MissingCollectionRoot,
    /// Translation absent, a placeholder pane is rendered
    MissingTranslationFile,
    /// Identifier is not a date, the raw identifier is used as title
    UnparseableIdentifier,
    /// A transcript exists but could not be read, the issue is skipped
    ReadFailure,
    /// The page could not be written, the issue is skipped
    WriteFailure,
    /// A transcript was not UTF-8 and was decoded as Windows-1252
    DecodingFallback,
    /// A layout value outside the three known modes
    InvalidViewModeValue,
}

impl FailureKind {
    /// Recovered kinds degrade to a placeholder; the others skip an item
    pub fn is_recovered(self) -> bool {
        matches!(
            self,
            FailureKind::MissingTranslationFile
                | FailureKind::UnparseableIdentifier
                | FailureKind::DecodingFallback
                | FailureKind::InvalidViewModeValue
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::MissingCollectionRoot => "missing collection root",
            FailureKind::MissingTranslationFile => "missing translation",
            FailureKind::UnparseableIdentifier => "unparseable identifier",
            FailureKind::ReadFailure => "read failure",
            FailureKind::WriteFailure => "write failure",
            FailureKind::DecodingFallback => "decoding fallback",
            FailureKind::InvalidViewModeValue => "invalid view mode",
        };
        f.write_str(label)
    }
}

/// One reported problem with an issue or a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFailure {
    pub kind: FailureKind,
    pub identifier: String,
    pub detail: String,
}

impl IssueFailure {
    pub fn new(kind: FailureKind, identifier: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            detail: detail.into(),
        }
    }
}
