// SPDX-License-Identifier: PMPL-1.0-or-later

//! Transcript rendering
//!
//! Transcripts use a three-level header convention and nothing else:
//! `# `, `## ` and `### ` lines become headers, every other non-blank line
//! is its own paragraph. Blank lines are dropped.

pub const NOT_AVAILABLE_HTML: &str = "<p><em>Content not available.</em></p>";
pub const SEEMS_EMPTY_HTML: &str = "<p><em>Content seems empty.</em></p>";

/// Rendered pane for one language of one issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedPane {
    /// Header and paragraph blocks joined by newlines
    Blocks(String),
    /// The transcript file does not exist
    NotAvailable,
    /// The transcript exists but has no non-blank line
    Empty,
}

impl RenderedPane {
    pub fn html(&self) -> &str {
        match self {
            RenderedPane::Blocks(html) => html,
            RenderedPane::NotAvailable => NOT_AVAILABLE_HTML,
            RenderedPane::Empty => SEEMS_EMPTY_HTML,
        }
    }

    pub fn has_content(&self) -> bool {
        matches!(self, RenderedPane::Blocks(_))
    }
}

/// Render an optional transcript; `None` means the file is missing
pub fn render_transcript(text: Option<&str>) -> RenderedPane {
    let Some(text) = text else {
        return RenderedPane::NotAvailable;
    };

    let blocks: Vec<String> = text.lines().filter_map(render_line).collect();
    if blocks.is_empty() {
        RenderedPane::Empty
    } else {
        RenderedPane::Blocks(blocks.join("\n"))
    }
}

fn render_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    // Longest prefix first: "### " also starts with "## " and "# ".
    let block = if let Some(rest) = line.strip_prefix("### ") {
        format!("<h3>{}</h3>", escape_html(rest.trim()))
    } else if let Some(rest) = line.strip_prefix("## ") {
        format!("<h2>{}</h2>", escape_html(rest.trim()))
    } else if let Some(rest) = line.strip_prefix("# ") {
        format!("<h1>{}</h1>", escape_html(rest.trim()))
    } else {
        format!("<p>{}</p>", escape_html(line))
    };
    Some(block)
}

/// Escape the three characters that can open markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
