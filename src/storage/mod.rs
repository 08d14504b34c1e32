// SPDX-License-Identifier: PMPL-1.0-or-later

//! Filesystem helpers: transcript reading and the two write policies
//!
//! Pages are always overwritten. Shared assets go through
//! [`write_if_changed`], which leaves the file alone when its trimmed
//! content digest already matches.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// A transcript decoded to text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    /// The bytes were not UTF-8 and were decoded as Windows-1252
    pub fallback_decoded: bool,
}

/// SHA-256 of the content with surrounding whitespace trimmed
pub fn content_digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.trim().as_bytes()))
}

/// Write `content` unless `path` already holds the same content
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome> {
    if path.is_file() {
        match fs::read(path) {
            Ok(bytes) => {
                let existing = String::from_utf8_lossy(&bytes);
                if content_digest(&existing) == content_digest(content) {
                    log::debug!("{} is up to date", path.display());
                    return Ok(WriteOutcome::Unchanged);
                }
                log::debug!("{} differs, overwriting", path.display());
            }
            Err(err) => {
                log::warn!("could not read {} ({}), overwriting", path.display(), err);
            }
        }
    }
    write_file(path, content)?;
    Ok(WriteOutcome::Written)
}

/// Write a page unconditionally, creating parent directories
pub fn write_page(path: &Path, content: &str) -> Result<()> {
    write_file(path, content)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read a transcript; `Ok(None)` when there is no file to read
pub fn read_transcript(path: Option<&Path>) -> Result<Option<Transcript>> {
    let Some(path) = path else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }

    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let transcript = match String::from_utf8(bytes) {
        Ok(text) => Transcript {
            text,
            fallback_decoded: false,
        },
        Err(err) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(err.as_bytes());
            log::warn!(
                "{} is not valid UTF-8, decoded as Windows-1252",
                path.display()
            );
            Transcript {
                text: decoded.into_owned(),
                fallback_decoded: true,
            }
        }
    };
    Ok(Some(Transcript {
        text: transcript.text.trim_start_matches('\u{feff}').to_string(),
        ..transcript
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn second_identical_write_is_skipped() {
        let dir = TempDir::new().expect("temp dir should create");
        let path = dir.path().join("out/styles.css");
        assert_eq!(
            write_if_changed(&path, "body {}\n").expect("write succeeds"),
            WriteOutcome::Written
        );
        assert_eq!(
            write_if_changed(&path, "body {}").expect("write succeeds"),
            WriteOutcome::Unchanged
        );
        assert_eq!(
            write_if_changed(&path, "body { margin: 0 }").expect("write succeeds"),
            WriteOutcome::Written
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "body { margin: 0 }");
    }

    #[test]
    fn pages_are_always_rewritten() {
        let dir = TempDir::new().expect("temp dir should create");
        let path = dir.path().join("a/b/page.html");
        write_page(&path, "<p>one</p>").expect("write succeeds");
        write_page(&path, "<p>two</p>").expect("write succeeds");
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>two</p>");
    }

    #[test]
    fn missing_transcript_is_none() {
        let dir = TempDir::new().expect("temp dir should create");
        assert!(read_transcript(None).unwrap().is_none());
        assert!(read_transcript(Some(&dir.path().join("x.md")))
            .unwrap()
            .is_none());
    }

    #[test]
    fn latin1_transcript_falls_back() {
        let dir = TempDir::new().expect("temp dir should create");
        let path = dir.path().join("x.md");
        fs::write(&path, b"caf\xe9").expect("file should write");
        let transcript = read_transcript(Some(&path)).unwrap().unwrap();
        assert_eq!(transcript.text, "café");
        assert!(transcript.fallback_decoded);
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let dir = TempDir::new().expect("temp dir should create");
        let path = dir.path().join("x.md");
        fs::write(&path, "\u{feff}# Title").expect("file should write");
        let transcript = read_transcript(Some(&path)).unwrap().unwrap();
        assert_eq!(transcript.text, "# Title");
    }

    #[test]
    fn digest_ignores_surrounding_whitespace() {
        assert_eq!(content_digest("  a \n"), content_digest("a"));
        assert_ne!(content_digest("a"), content_digest("b"));
    }
}
