// SPDX-License-Identifier: PMPL-1.0-or-later

//! Collection discovery
//!
//! A collection root holds base directories (`1945`), their translation
//! siblings (`1945_t`) and the published output (`1945_final`). Scanning a
//! collection lists its transcripts in natural order and pairs each one
//! with the translation of the same file name.

pub mod natural;

use crate::config::SiteConfig;
use crate::types::{Issue, IssueSequence};
use anyhow::{bail, Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub use natural::{natural_cmp, natural_sort, NaturalKey};

/// One base directory and where its translations and pages live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub name: String,
    pub base_dir: PathBuf,
    /// Expected translation directory, whether or not it exists
    pub translation_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Collection {
    pub fn new(root: &Path, name: &str, config: &SiteConfig) -> Self {
        Self {
            name: name.to_string(),
            base_dir: root.join(name),
            translation_dir: root.join(format!("{}{}", name, config.translation_suffix)),
            output_dir: root.join(format!("{}{}", name, config.output_suffix)),
        }
    }

    pub fn has_translations(&self) -> bool {
        self.translation_dir.is_dir()
    }
}

/// Find every base collection directly under `root`, naturally ordered.
///
/// Output directories and translation directories are not collections.
/// Translation directories without a base are logged and ignored.
pub fn discover_collections(root: &Path, config: &SiteConfig) -> Result<Vec<Collection>> {
    if !root.is_dir() {
        bail!("collection root is not a directory: {}", root.display());
    }

    let mut base_names = BTreeSet::new();
    let mut translation_names = BTreeSet::new();
    let entries =
        fs::read_dir(root).with_context(|| format!("reading collection root {}", root.display()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || name.ends_with(&config.output_suffix) {
            continue;
        }
        match name.strip_suffix(&config.translation_suffix) {
            Some(base) => {
                translation_names.insert(base.to_string());
            }
            None => {
                base_names.insert(name);
            }
        }
    }

    for orphan in translation_names.difference(&base_names) {
        log::warn!(
            "translation directory {}{} has no base directory, skipping",
            orphan,
            config.translation_suffix
        );
    }

    let mut names: Vec<String> = base_names.into_iter().collect();
    natural_sort(&mut names);
    Ok(names
        .iter()
        .map(|name| Collection::new(root, name, config))
        .collect())
}

/// List the transcripts of one collection as an ordered issue sequence.
///
/// A missing base directory fails this collection only; an empty one yields
/// an empty sequence.
pub fn scan_collection(collection: &Collection, config: &SiteConfig) -> Result<IssueSequence> {
    if !collection.base_dir.is_dir() {
        bail!(
            "base directory not found: {}",
            collection.base_dir.display()
        );
    }

    let extension = config.extension();
    let mut file_names: Vec<String> = fs::read_dir(&collection.base_dir)
        .with_context(|| format!("listing {}", collection.base_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, &extension))
        .filter_map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
        .collect();
    natural_sort(&mut file_names);

    let translations = collection.has_translations();
    let issues = file_names
        .iter()
        .map(|file_name| {
            let identifier = Path::new(file_name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_else(|| file_name.clone());
            let translation = collection.translation_dir.join(file_name);
            let translation_path = (translations && translation.is_file()).then_some(translation);
            Issue::new(
                &identifier,
                collection.base_dir.join(file_name),
                translation_path,
            )
        })
        .collect();

    Ok(IssueSequence::new(issues))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: PathBuf) {
        fs::create_dir_all(path.parent().expect("path has parent")).expect("dir should create");
        fs::write(path, "# title\n").expect("file should write");
    }

    #[test]
    fn discovers_base_directories_only() {
        let dir = TempDir::new().expect("temp dir should create");
        for name in ["1945", "1945_t", "1945_final", "1939SH", "1944", ".git", "orphan_t"] {
            fs::create_dir_all(dir.path().join(name)).expect("dir should create");
        }
        fs::write(dir.path().join("stray.md"), "x").expect("file should write");

        let config = SiteConfig::default();
        let collections = discover_collections(dir.path(), &config).expect("discovery succeeds");
        let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["1939SH", "1944", "1945"]);

        let c1945 = &collections[2];
        assert!(c1945.has_translations());
        assert!(c1945.output_dir.ends_with("1945_final"));
        assert!(!collections[0].has_translations());
    }

    #[test]
    fn discovery_fails_without_root() {
        let dir = TempDir::new().expect("temp dir should create");
        let missing = dir.path().join("nope");
        assert!(discover_collections(&missing, &SiteConfig::default()).is_err());
    }

    #[test]
    fn scan_orders_naturally_and_pairs_translations() {
        let dir = TempDir::new().expect("temp dir should create");
        let config = SiteConfig::default();
        let collection = Collection::new(dir.path(), "misc", &config);
        for name in ["a10.md", "a2.md", "a1.MD", "notes.txt"] {
            touch(collection.base_dir.join(name));
        }
        touch(collection.translation_dir.join("a2.md"));

        let seq = scan_collection(&collection, &config).expect("scan succeeds");
        assert_eq!(seq.identifiers(), vec!["a1", "a2", "a10"]);
        assert!(seq.get(0).unwrap().translation_path.is_none());
        assert!(seq.get(1).unwrap().translation_path.is_some());
    }

    #[test]
    fn scan_missing_base_is_an_error() {
        let dir = TempDir::new().expect("temp dir should create");
        let config = SiteConfig::default();
        let collection = Collection::new(dir.path(), "1945", &config);
        assert!(scan_collection(&collection, &config).is_err());
    }

    #[test]
    fn scan_empty_collection_is_empty() {
        let dir = TempDir::new().expect("temp dir should create");
        let config = SiteConfig::default();
        let collection = Collection::new(dir.path(), "1945", &config);
        fs::create_dir_all(&collection.base_dir).expect("dir should create");
        let seq = scan_collection(&collection, &config).expect("scan succeeds");
        assert!(seq.is_empty());
    }
}
