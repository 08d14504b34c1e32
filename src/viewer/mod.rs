// SPDX-License-Identifier: PMPL-1.0-or-later

//! Reader view state machine
//!
//! Every published page carries a small script that owns the page's
//! layout (side-by-side, stacked or single pane), which language the single
//! pane shows, and whether the viewport is small enough to force single
//! view. This module is the executable model of that script: the same
//! transitions, driven by the same events, parametrized by the same
//! [`ViewerConfig`] that is serialized into the page.
//!
//! Invariants:
//! - a small viewport never shows a split layout
//! - entering any layout starts on the base language
//! - the language toggle only acts in single view
//! - growing the viewport never restores a split layout
//! - navigation at a sequence boundary changes nothing but flashes

mod script;

use crate::types::{NavDirection, NavigationData};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use script::viewer_script;

/// Layout of the two panes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Panes side by side, divided vertically
    HorizontalSplit,
    /// Panes stacked, divided horizontally
    VerticalSplit,
    /// One pane at a time with a language toggle
    Single,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 3] = [
        LayoutMode::HorizontalSplit,
        LayoutMode::VerticalSplit,
        LayoutMode::Single,
    ];

    /// Value used for the `view` query parameter and the body class
    pub fn query_value(self) -> &'static str {
        match self {
            LayoutMode::HorizontalSplit => "view-hsplit",
            LayoutMode::VerticalSplit => "view-vsplit",
            LayoutMode::Single => "view-single",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.query_value() == value)
    }

    pub fn is_split(self) -> bool {
        !matches!(self, LayoutMode::Single)
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value())
    }
}

/// Which transcript the single pane shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Base,
    Translation,
}

impl Language {
    fn flipped(self) -> Self {
        match self {
            Language::Base => Language::Translation,
            Language::Translation => Language::Base,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub layout: LayoutMode,
    pub language: Language,
    pub small_viewport: bool,
}

/// Keys bound to viewer actions, as `KeyboardEvent.key` values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub horizontal_split: String,
    pub vertical_split: String,
    pub single: String,
    pub toggle_language: String,
    pub prev: String,
    pub next: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            horizontal_split: "v".to_string(),
            vertical_split: "h".to_string(),
            single: "s".to_string(),
            toggle_language: "t".to_string(),
            prev: "ArrowLeft".to_string(),
            next: "ArrowRight".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Viewports at most this wide (CSS px) are forced into single view
    pub small_viewport_width: u32,
    /// Duration of the boundary flash
    pub flash_ms: u32,
    pub flash_color: String,
    pub query_param: String,
    /// Toggle label while the translation is shown
    pub base_label: String,
    /// Toggle label while the base text is shown
    pub translation_label: String,
    pub keys: KeyBindings,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            small_viewport_width: 768,
            flash_ms: 200,
            flash_color: "#ffeeee".to_string(),
            query_param: "view".to_string(),
            base_label: "Chinese".to_string(),
            translation_label: "English".to_string(),
            keys: KeyBindings::default(),
        }
    }
}

impl ViewerConfig {
    pub fn is_small(&self, viewport_width: u32) -> bool {
        viewport_width <= self.small_viewport_width
    }
}

/// Input delivered to the controller after page load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent<'a> {
    /// Click on a layout button, carrying its `data-view` value
    ModeButton(&'a str),
    ToggleButton,
    Key {
        key: &'a str,
        /// Focus is on a button, input, textarea or select
        focus_on_control: bool,
    },
    Resize {
        viewport_width: u32,
    },
}

/// Side effect the page must carry out after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Rewrite the `view` query parameter in place, without a history entry
    ReplaceUrl(LayoutMode),
    /// Leave for another issue page
    Navigate(String),
    /// Transient highlight acknowledging a rejected navigation
    Flash,
    Warn(String),
}

/// One page's controller: owns the state, routes every mutation
#[derive(Debug, Clone)]
pub struct ViewController {
    config: ViewerConfig,
    nav: NavigationData,
    state: ViewState,
    /// Last valid mode seen in the URL, to skip redundant rewrites
    url_mode: Option<LayoutMode>,
}

impl ViewController {
    /// Build the initial state from the `view` query value and viewport.
    ///
    /// The URL is never rewritten on load.
    pub fn load(
        config: ViewerConfig,
        nav: NavigationData,
        query: Option<&str>,
        viewport_width: u32,
    ) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();
        let small = config.is_small(viewport_width);
        let hinted = match query {
            Some(value) => match LayoutMode::parse(value) {
                Some(mode) => Some(mode),
                None => {
                    effects.push(invalid_mode_warning(value));
                    None
                }
            },
            None => None,
        };

        let default = if small {
            LayoutMode::Single
        } else {
            LayoutMode::HorizontalSplit
        };
        let requested = hinted.unwrap_or(default);

        let controller = Self {
            state: ViewState {
                layout: coerce(requested, small),
                language: Language::Base,
                small_viewport: small,
            },
            url_mode: hinted,
            config,
            nav,
        };
        (controller, effects)
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn handle(&mut self, event: ViewerEvent<'_>) -> Vec<Effect> {
        match event {
            ViewerEvent::ModeButton(value) => match LayoutMode::parse(value) {
                Some(mode) => self.request_mode(mode),
                None => vec![invalid_mode_warning(value)],
            },
            ViewerEvent::ToggleButton => {
                self.toggle_language();
                Vec::new()
            }
            ViewerEvent::Key {
                key,
                focus_on_control,
            } => {
                if focus_on_control {
                    return Vec::new();
                }
                self.handle_key(key)
            }
            ViewerEvent::Resize { viewport_width } => self.resize(viewport_width),
        }
    }

    /// User-driven layout change, persisted to the URL
    pub fn request_mode(&mut self, mode: LayoutMode) -> Vec<Effect> {
        let layout = coerce(mode, self.state.small_viewport);
        self.state.layout = layout;
        self.state.language = Language::Base;

        if self.url_mode == Some(layout) {
            return Vec::new();
        }
        self.url_mode = Some(layout);
        vec![Effect::ReplaceUrl(layout)]
    }

    /// Flip the single pane's language; returns whether anything changed
    pub fn toggle_language(&mut self) -> bool {
        if self.state.layout != LayoutMode::Single {
            return false;
        }
        self.state.language = self.state.language.flipped();
        true
    }

    /// Re-evaluate the viewport; shrinking out of a split forces single view
    pub fn resize(&mut self, viewport_width: u32) -> Vec<Effect> {
        self.state.small_viewport = self.config.is_small(viewport_width);
        if self.state.small_viewport && self.state.layout != LayoutMode::Single {
            return self.request_mode(LayoutMode::Single);
        }
        Vec::new()
    }

    /// Go to the neighbouring issue, carrying the current layout forward
    pub fn navigate(&mut self, direction: NavDirection) -> Vec<Effect> {
        match self.nav.target(direction) {
            Some(target) => vec![Effect::Navigate(format!(
                "{}?{}={}",
                target,
                self.config.query_param,
                self.state.layout.query_value()
            ))],
            None => vec![Effect::Flash],
        }
    }

    fn handle_key(&mut self, key: &str) -> Vec<Effect> {
        let keys = &self.config.keys;
        if key == keys.prev {
            self.navigate(NavDirection::Prev)
        } else if key == keys.next {
            self.navigate(NavDirection::Next)
        } else if key.eq_ignore_ascii_case(&keys.horizontal_split) {
            self.request_mode(LayoutMode::HorizontalSplit)
        } else if key.eq_ignore_ascii_case(&keys.vertical_split) {
            self.request_mode(LayoutMode::VerticalSplit)
        } else if key.eq_ignore_ascii_case(&keys.single) {
            self.request_mode(LayoutMode::Single)
        } else if key.eq_ignore_ascii_case(&keys.toggle_language) {
            self.toggle_language();
            Vec::new()
        } else {
            Vec::new()
        }
    }
}

fn coerce(mode: LayoutMode, small_viewport: bool) -> LayoutMode {
    if small_viewport && mode.is_split() {
        LayoutMode::Single
    } else {
        mode
    }
}

fn invalid_mode_warning(value: &str) -> Effect {
    Effect::Warn(format!("Invalid view class requested: {value:?}"))
}
