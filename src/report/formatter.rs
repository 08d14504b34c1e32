// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console output for build and manifest runs

use crate::build::{BuildReport, CollectionResult};
use crate::manifest::ManifestReport;
use crate::storage::WriteOutcome;
use colored::*;

/// Failures and notices listed per collection before eliding the rest
const LIST_LIMIT: usize = 20;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&self, report: &BuildReport, quiet: bool) {
        if !quiet {
            println!("\n{}", "=== BROADSHEET BUILD ===".bold().cyan());
            println!("Root: {}", report.root.display());
            println!();
            for collection in &report.collections {
                self.print_collection(collection);
            }
        }
        self.print_totals(report);
    }

    fn print_collection(&self, result: &CollectionResult) {
        let translation = match &result.translation_dir {
            Some(dir) => dir.display().to_string(),
            None => "(no translations)".dimmed().to_string(),
        };
        println!(
            "{} {} <=> {}",
            "Collection".bold().yellow(),
            result.name.bold(),
            translation
        );

        if result.is_skipped() {
            for failure in &result.failures {
                println!("  {} {}", "SKIPPED".red().bold(), failure.detail);
            }
            println!();
            return;
        }

        println!("  Output: {}", result.output_dir.display());
        println!(
            "  Issues: {}  |  Pages written: {}",
            result.issues_found,
            result.pages_written.to_string().green()
        );
        match result.stylesheet {
            Some(WriteOutcome::Written) => println!("  Stylesheet: written"),
            Some(WriteOutcome::Unchanged) => println!("  Stylesheet: up to date"),
            None => {}
        }
        for note in &result.notes {
            println!("  {} {}", "note:".blue(), note);
        }

        for failure in result.failures.iter().take(LIST_LIMIT) {
            println!(
                "  {} [{}] {}: {}",
                "ERROR".red().bold(),
                failure.kind,
                failure.identifier,
                failure.detail
            );
        }
        if result.failures.len() > LIST_LIMIT {
            println!("  ... and {} more failures", result.failures.len() - LIST_LIMIT);
        }

        for notice in result.notices.iter().take(LIST_LIMIT) {
            println!(
                "  {} [{}] {}",
                "warn".yellow(),
                notice.kind,
                notice.identifier
            );
        }
        if result.notices.len() > LIST_LIMIT {
            println!("  ... and {} more notices", result.notices.len() - LIST_LIMIT);
        }
        println!();
    }

    fn print_totals(&self, report: &BuildReport) {
        let failures = if report.total_failures == 0 {
            "0".green()
        } else {
            report.total_failures.to_string().red().bold()
        };
        println!(
            "Collections: {} ({} skipped)  |  Issues: {}  |  Pages written: {}  |  Failures: {}  |  Notices: {}",
            report.collections_scanned,
            report.collections_skipped,
            report.issues_found,
            report.pages_written,
            failures,
            report.total_notices
        );
        if report.collections_scanned == 0 {
            println!("  No base directories found to process.");
        }
    }

    pub fn print_manifest(&self, report: &ManifestReport) {
        println!(
            "Generated {} with {} years ({} issues).",
            report.output.display().to_string().bold(),
            report.years,
            report.issues
        );
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
