// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTML document template for one issue page

use crate::config::SiteConfig;
use crate::render::escape_html;
use crate::viewer::LayoutMode;

/// Everything a page needs, already rendered and escaped where required
pub struct PageParts<'a> {
    pub title: &'a str,
    pub base_html: &'a str,
    pub translation_html: &'a str,
    /// Navigation JSON, safe to place inside `<script>`
    pub nav_json: &'a str,
    pub script: &'a str,
}

pub fn escape_attr(value: &str) -> String {
    escape_html(value).replace('"', "&quot;")
}

pub fn render_page(config: &SiteConfig, parts: &PageParts<'_>) -> String {
    let mut head_links = String::new();
    for href in &config.font_links {
        head_links.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"{}\">\n",
            escape_attr(href)
        ));
    }
    head_links.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">",
        escape_attr(&config.stylesheet)
    ));

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} {site}</title>
{head_links}
</head>
<body>

<div class="controls">
    <div class="view-mode-buttons">
        <button id="view-hsplit-btn" class="split-btn" data-view="{hsplit}" title="Side by side">|</button>
        <button id="view-vsplit-btn" class="split-btn" data-view="{vsplit}" title="Stacked">–</button>
        <button id="view-single-btn" data-view="{single}" title="Single pane">☐</button>
    </div>
    <button id="toggle-language-btn" class="toggle-language-btn">{toggle}</button>
</div>

<div class="container">
    <div id="content-base" class="pane">
{base}
    </div>
    <div id="content-t" class="pane">
{translation}
    </div>
</div>

<footer>
    <a href="{home_href}">{home_label}</a>
</footer>

<script id="nav-data" type="application/json">{nav}</script>
<script>
{script}</script>

</body>
</html>
"#,
        lang = escape_attr(&config.html_lang),
        title = escape_html(parts.title),
        site = escape_html(&config.site_title),
        head_links = head_links,
        hsplit = LayoutMode::HorizontalSplit.query_value(),
        vsplit = LayoutMode::VerticalSplit.query_value(),
        single = LayoutMode::Single.query_value(),
        toggle = escape_html(&config.viewer.translation_label),
        base = parts.base_html,
        translation = parts.translation_html,
        home_href = escape_attr(&config.home_href),
        home_label = escape_html(&config.home_label),
        nav = parts.nav_json,
        script = parts.script,
    )
}
