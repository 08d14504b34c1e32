// SPDX-License-Identifier: PMPL-1.0-or-later

//! Issue page assembly
//!
//! Combines an issue's two rendered panes, its navigation record and the
//! viewer script into one standalone HTML document. The output depends only
//! on its inputs, so regenerating an unchanged issue yields the same bytes.

pub mod page;

use crate::config::SiteConfig;
use crate::render::{escape_html, RenderedPane};
use crate::storage;
use crate::types::{DisplayTitle, Issue, NavigationData};
use crate::viewer::{self, ViewerConfig};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub use page::{escape_attr, render_page, PageParts};

const STYLESHEET: &str = include_str!("stylesheet.css");
const WIDTH_SLOT: &str = "__SMALL_VIEWPORT_WIDTH__";

/// Stylesheet shared by all pages of a collection.
///
/// The single-pane media query uses the same threshold as the viewer script.
pub fn stylesheet(viewer: &ViewerConfig) -> String {
    STYLESHEET.replace(WIDTH_SLOT, &viewer.small_viewport_width.to_string())
}

/// One issue ready for assembly
#[derive(Debug, Clone)]
pub struct IssuePage<'a> {
    pub issue: &'a Issue,
    pub base: RenderedPane,
    pub translation: RenderedPane,
    pub nav: NavigationData,
}

pub struct IssuePageAssembler<'c> {
    config: &'c SiteConfig,
    script: String,
}

impl<'c> IssuePageAssembler<'c> {
    /// Prepare an assembler; the viewer script is rendered once per build
    pub fn new(config: &'c SiteConfig) -> Result<Self> {
        Ok(Self {
            config,
            script: viewer::viewer_script(&config.viewer)?,
        })
    }

    pub fn assemble(&self, page: &IssuePage<'_>) -> Result<String> {
        let translation_html = translation_pane_html(&page.issue.title, &page.translation);
        let nav_json = page.nav.to_script_json()?;
        Ok(render_page(
            self.config,
            &PageParts {
                title: page.issue.title.as_str(),
                base_html: page.base.html(),
                translation_html: &translation_html,
                nav_json: &nav_json,
                script: &self.script,
            },
        ))
    }

    /// Assemble and write `<output_dir>/<output stem>.html`, always overwriting
    pub fn write(&self, page: &IssuePage<'_>, output_dir: &Path) -> Result<PathBuf> {
        let html = self.assemble(page)?;
        let path = output_dir.join(page.issue.output_file_name());
        storage::write_page(&path, &html)?;
        Ok(path)
    }
}

/// The translation pane, headed by the issue title unless it seems empty.
///
/// The base pane never gets a title.
pub fn translation_pane_html(title: &DisplayTitle, pane: &RenderedPane) -> String {
    match pane {
        RenderedPane::Blocks(_) | RenderedPane::NotAvailable => {
            format!("<h1>{}</h1>\n{}", escape_html(title.as_str()), pane.html())
        }
        RenderedPane::Empty => pane.html().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render_transcript, NOT_AVAILABLE_HTML, SEEMS_EMPTY_HTML};

    fn issue(id: &str) -> Issue {
        Issue::new(id, PathBuf::from(format!("{id}.md")), None)
    }

    #[test]
    fn translation_title_rules() {
        let title = DisplayTitle::from_identifier("1945.08.15");
        let content = render_transcript(Some("Peace"));
        assert_eq!(
            translation_pane_html(&title, &content),
            "<h1>1945.08.15</h1>\n<p>Peace</p>"
        );
        assert_eq!(
            translation_pane_html(&title, &RenderedPane::NotAvailable),
            format!("<h1>1945.08.15</h1>\n{NOT_AVAILABLE_HTML}")
        );
        assert_eq!(
            translation_pane_html(&title, &RenderedPane::Empty),
            SEEMS_EMPTY_HTML
        );
    }

    #[test]
    fn raw_titles_are_escaped() {
        let title = DisplayTitle::from_identifier("a<b>&c");
        let html = translation_pane_html(&title, &RenderedPane::NotAvailable);
        assert!(html.starts_with("<h1>a&lt;b&gt;&amp;c</h1>"));
    }

    #[test]
    fn base_pane_is_not_titled() {
        let config = SiteConfig::default();
        let assembler = IssuePageAssembler::new(&config).expect("assembler should build");
        let issue = issue("1945.01.02");
        let html = assembler
            .assemble(&IssuePage {
                issue: &issue,
                base: render_transcript(Some("本文")),
                translation: RenderedPane::NotAvailable,
                nav: NavigationData::default(),
            })
            .expect("page should assemble");
        let base_start = html.find("id=\"content-base\"").unwrap();
        let t_start = html.find("id=\"content-t\"").unwrap();
        assert!(!html[base_start..t_start].contains("<h1>"));
        assert!(html[t_start..].contains("<h1>1945.01.02</h1>"));
    }

    #[test]
    fn stylesheet_follows_viewport_threshold() {
        let narrow = ViewerConfig {
            small_viewport_width: 600,
            ..ViewerConfig::default()
        };
        let css = stylesheet(&narrow);
        assert!(css.contains("@media (max-width: 600px) {"));
        assert!(!css.contains("768px"));
        assert!(!css.contains(WIDTH_SLOT));
        assert!(stylesheet(&ViewerConfig::default()).contains("@media (max-width: 768px) {"));
    }

    #[test]
    fn assembly_is_byte_identical() {
        let config = SiteConfig::default();
        let assembler = IssuePageAssembler::new(&config).expect("assembler should build");
        let issue = issue("note-draft");
        let page = IssuePage {
            issue: &issue,
            base: render_transcript(Some("# x\ny")),
            translation: render_transcript(Some("z")),
            nav: NavigationData {
                prev: Some("a.html".to_string()),
                next: None,
            },
        };
        assert_eq!(
            assembler.assemble(&page).unwrap(),
            assembler.assemble(&page).unwrap()
        );
    }
}
