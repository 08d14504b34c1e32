// SPDX-License-Identifier: PMPL-1.0-or-later

//! Build: publish every collection under a root
//!
//! Discovers collections, scans each into an ordered issue sequence, then
//! renders and writes one page per issue. The order is fixed before any
//! page work starts; pages themselves are produced in parallel. Per-item
//! problems are recorded in the report and never abort the run.

use crate::assemble::{self, IssuePage, IssuePageAssembler};
use crate::config::SiteConfig;
use crate::render::render_transcript;
use crate::scan::{self, Collection};
use crate::storage::{self, WriteOutcome};
use crate::types::{FailureKind, IssueFailure, IssueSequence};
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a build run
pub struct BuildConfig {
    /// Collection root holding `NAME`, `NAME_t` and `NAME_final` directories
    pub root: PathBuf,
    pub site: SiteConfig,
}

impl BuildConfig {
    pub fn new(root: impl Into<PathBuf>, site: SiteConfig) -> Self {
        Self {
            root: root.into(),
            site,
        }
    }
}

/// Results for one collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionResult {
    pub name: String,
    pub base_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub issues_found: usize,
    pub pages_written: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<WriteOutcome>,
    /// Recovered problems: placeholder panes, raw titles
    #[serde(default)]
    pub notices: Vec<IssueFailure>,
    /// Skipped items
    #[serde(default)]
    pub failures: Vec<IssueFailure>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl CollectionResult {
    fn new(collection: &Collection) -> Self {
        Self {
            name: collection.name.clone(),
            base_dir: collection.base_dir.clone(),
            translation_dir: collection
                .has_translations()
                .then(|| collection.translation_dir.clone()),
            output_dir: collection.output_dir.clone(),
            issues_found: 0,
            pages_written: 0,
            stylesheet: None,
            notices: Vec::new(),
            failures: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.failures
            .iter()
            .any(|f| f.kind == FailureKind::MissingCollectionRoot)
    }
}

/// Complete build report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub created_at: String,
    pub root: PathBuf,
    pub collections_scanned: usize,
    pub collections_skipped: usize,
    pub issues_found: usize,
    pub pages_written: usize,
    pub total_failures: usize,
    pub total_notices: usize,
    pub collections: Vec<CollectionResult>,
}

/// What happened to one issue
struct IssueOutcome {
    written: Option<PathBuf>,
    notices: Vec<IssueFailure>,
    failure: Option<IssueFailure>,
}

/// Run a build across all collections under the root.
///
/// Fails only when the root itself cannot be read.
pub fn run(config: &BuildConfig) -> Result<BuildReport> {
    let collections = scan::discover_collections(&config.root, &config.site)?;
    let assembler = IssuePageAssembler::new(&config.site)?;

    let results: Vec<CollectionResult> = collections
        .iter()
        .map(|collection| build_collection(collection, &config.site, &assembler))
        .collect();

    Ok(BuildReport {
        created_at: chrono::Utc::now().to_rfc3339(),
        root: config.root.clone(),
        collections_scanned: results.len(),
        collections_skipped: results.iter().filter(|r| r.is_skipped()).count(),
        issues_found: results.iter().map(|r| r.issues_found).sum(),
        pages_written: results.iter().map(|r| r.pages_written).sum(),
        total_failures: results.iter().map(|r| r.failures.len()).sum(),
        total_notices: results.iter().map(|r| r.notices.len()).sum(),
        collections: results,
    })
}

/// Publish one collection; never fails, problems land in the result
pub fn build_collection(
    collection: &Collection,
    site: &SiteConfig,
    assembler: &IssuePageAssembler<'_>,
) -> CollectionResult {
    let mut result = CollectionResult::new(collection);
    log::info!(
        "processing {} <=> {}{}",
        collection.base_dir.display(),
        collection.translation_dir.display(),
        if collection.has_translations() { "" } else { " (missing)" }
    );

    let sequence = match scan::scan_collection(collection, site) {
        Ok(sequence) => sequence,
        Err(err) => {
            result.failures.push(IssueFailure::new(
                FailureKind::MissingCollectionRoot,
                &collection.name,
                format!("{err:#}"),
            ));
            return result;
        }
    };

    result.issues_found = sequence.len();
    result.notes.extend(sequence.notes().iter().cloned());
    if sequence.is_empty() {
        result
            .notes
            .push("no transcripts found, nothing to publish".to_string());
        return result;
    }
    if !collection.has_translations() {
        result.notes.push(format!(
            "translation directory {} not found, translation panes use a placeholder",
            collection.translation_dir.display()
        ));
    }

    match write_stylesheet(&collection.output_dir, site) {
        Ok((_, outcome)) => result.stylesheet = Some(outcome),
        Err(err) => result.failures.push(IssueFailure::new(
            FailureKind::WriteFailure,
            &site.stylesheet,
            format!("{err:#}"),
        )),
    }

    let report_missing_translations = collection.has_translations();
    let outcomes: Vec<IssueOutcome> = (0..sequence.len())
        .into_par_iter()
        .map(|index| {
            build_issue(
                &sequence,
                index,
                assembler,
                &collection.output_dir,
                report_missing_translations,
            )
        })
        .collect();

    for outcome in outcomes {
        if outcome.written.is_some() {
            result.pages_written += 1;
        }
        for problem in outcome.notices.into_iter().chain(outcome.failure) {
            if problem.kind.is_recovered() {
                result.notices.push(problem);
            } else {
                result.failures.push(problem);
            }
        }
    }
    result
}

fn build_issue(
    sequence: &IssueSequence,
    index: usize,
    assembler: &IssuePageAssembler<'_>,
    output_dir: &Path,
    report_missing_translation: bool,
) -> IssueOutcome {
    let issue = &sequence.as_slice()[index];
    let mut notices = Vec::new();
    let skipped = |kind: FailureKind, detail: String, notices: Vec<IssueFailure>| IssueOutcome {
        written: None,
        notices,
        failure: Some(IssueFailure::new(kind, &issue.identifier, detail)),
    };

    if !issue.title.is_date() {
        log::warn!(
            "could not parse a date from '{}', using it as the title",
            issue.identifier
        );
        notices.push(IssueFailure::new(
            FailureKind::UnparseableIdentifier,
            &issue.identifier,
            "title shown as the raw identifier",
        ));
    }
    if issue.translation_path.is_none() && report_missing_translation {
        notices.push(IssueFailure::new(
            FailureKind::MissingTranslationFile,
            &issue.identifier,
            "translation pane shows a placeholder",
        ));
    }

    let base = match storage::read_transcript(Some(&issue.base_path)) {
        Ok(Some(transcript)) => transcript,
        Ok(None) => {
            return skipped(
                FailureKind::ReadFailure,
                format!("{} disappeared during the build", issue.base_path.display()),
                notices,
            )
        }
        Err(err) => return skipped(FailureKind::ReadFailure, format!("{err:#}"), notices),
    };
    let translation = match storage::read_transcript(issue.translation_path.as_deref()) {
        Ok(translation) => translation,
        Err(err) => return skipped(FailureKind::ReadFailure, format!("{err:#}"), notices),
    };
    let decoded = [
        ("base", Some(&base)),
        ("translation", translation.as_ref()),
    ];
    for (pane, transcript) in decoded {
        if transcript.is_some_and(|t| t.fallback_decoded) {
            notices.push(IssueFailure::new(
                FailureKind::DecodingFallback,
                &issue.identifier,
                format!("{pane} transcript is not UTF-8, decoded as Windows-1252"),
            ));
        }
    }

    let page = IssuePage {
        issue,
        base: render_transcript(Some(&base.text)),
        translation: render_transcript(translation.as_ref().map(|t| t.text.as_str())),
        nav: sequence.navigation(index),
    };
    match assembler.write(&page, output_dir) {
        Ok(path) => {
            log::info!(
                "  ({}/{}) {} -> {}",
                index + 1,
                sequence.len(),
                issue.identifier,
                path.display()
            );
            IssueOutcome {
                written: Some(path),
                notices,
                failure: None,
            }
        }
        Err(err) => skipped(FailureKind::WriteFailure, format!("{err:#}"), notices),
    }
}

/// Write the shared stylesheet into `dir`, skipping identical content
pub fn write_stylesheet(dir: &Path, site: &SiteConfig) -> Result<(PathBuf, WriteOutcome)> {
    let path = dir.join(&site.stylesheet);
    let outcome = storage::write_if_changed(&path, &assemble::stylesheet(&site.viewer))?;
    Ok((path, outcome))
}
