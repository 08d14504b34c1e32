// SPDX-License-Identifier: PMPL-1.0-or-later

//! Broadsheet: static bilingual reading pages for dated archive collections.
//!
//! A collection is a directory of plain-text transcripts (`NAME`) with an
//! optional sibling of translations (`NAME_t`). Each transcript becomes one
//! standalone page in `NAME_final`, showing both languages side by side,
//! linked to its neighbours in natural filename order.
//!
//! PIPELINE:
//! 1. **Scan**: discover collections, order transcripts, pair translations.
//! 2. **Render**: turn the header dialect into HTML panes.
//! 3. **Assemble**: build the page with its navigation record and viewer.
//! 4. **Manifest**: index published pages by year and month.

pub mod assemble;
pub mod build;
pub mod config;
pub mod manifest;
pub mod render;
pub mod report;
pub mod scan;
pub mod storage;
pub mod types;
pub mod viewer;
