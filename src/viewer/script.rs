// SPDX-License-Identifier: PMPL-1.0-or-later

//! Browser-side controller source, parametrized from [`ViewerConfig`].

use super::{LayoutMode, ViewerConfig};
use anyhow::{Context, Result};
use serde::Serialize;

const VIEWER_SOURCE: &str = include_str!("viewer.js");
const CONFIG_SLOT: &str = "__VIEWER_CONFIG__";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptConfig<'a> {
    small_viewport_width: u32,
    flash_ms: u32,
    flash_color: &'a str,
    query_param: &'a str,
    layouts: ScriptLayouts,
    labels: ScriptLabels<'a>,
    keys: ScriptKeys<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptLayouts {
    horizontal_split: &'static str,
    vertical_split: &'static str,
    single: &'static str,
}

#[derive(Serialize)]
struct ScriptLabels<'a> {
    base: &'a str,
    translation: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptKeys<'a> {
    horizontal_split: &'a str,
    vertical_split: &'a str,
    single: &'a str,
    toggle_language: &'a str,
    prev: &'a str,
    next: &'a str,
}

/// The inline `<script>` body shared by every page of a build
pub fn viewer_script(config: &ViewerConfig) -> Result<String> {
    let keys = &config.keys;
    let script_config = ScriptConfig {
        small_viewport_width: config.small_viewport_width,
        flash_ms: config.flash_ms,
        flash_color: &config.flash_color,
        query_param: &config.query_param,
        layouts: ScriptLayouts {
            horizontal_split: LayoutMode::HorizontalSplit.query_value(),
            vertical_split: LayoutMode::VerticalSplit.query_value(),
            single: LayoutMode::Single.query_value(),
        },
        labels: ScriptLabels {
            base: &config.base_label,
            translation: &config.translation_label,
        },
        keys: ScriptKeys {
            horizontal_split: &keys.horizontal_split,
            vertical_split: &keys.vertical_split,
            single: &keys.single,
            toggle_language: &keys.toggle_language,
            prev: &keys.prev,
            next: &keys.next,
        },
    };
    let json = serde_json::to_string(&script_config)
        .context("serializing viewer configuration")?
        .replace("</", "<\\/");
    Ok(VIEWER_SOURCE.replacen(CONFIG_SLOT, &json, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_keeps_url_and_focus_contracts() {
        let script = viewer_script(&ViewerConfig::default()).expect("script should render");
        assert!(script.contains("window.history.replaceState"));
        assert!(script.contains("this.urlMode === layout"));
        assert!(script.contains("const CONTROL_TAGS = ['BUTTON', 'INPUT', 'TEXTAREA', 'SELECT'];"));
        assert!(script.contains("CONTROL_TAGS.includes(active.tagName)"));
        assert!(script.contains("url.searchParams.set(CONFIG.queryParam, this.state.layoutMode)"));
        assert!(script.contains("window.innerWidth <= CONFIG.smallViewportWidth"));
    }

    #[test]
    fn config_slot_is_filled() {
        let script = viewer_script(&ViewerConfig::default()).expect("script should render");
        assert!(!script.contains(CONFIG_SLOT));
        assert!(script.contains("\"smallViewportWidth\":768"));
        assert!(script.contains("\"single\":\"view-single\""));
        assert!(script.contains("\"prev\":\"ArrowLeft\""));
    }

    #[test]
    fn labels_cannot_close_the_script_element() {
        let config = ViewerConfig {
            base_label: "</script><b>".to_string(),
            ..ViewerConfig::default()
        };
        let script = viewer_script(&config).expect("script should render");
        assert!(!script.contains("</script>"));
    }
}
