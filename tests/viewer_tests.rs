// SPDX-License-Identifier: PMPL-1.0-or-later

//! Reader view behaviour across load, resize, key and navigation events

use broadsheet::config::SiteConfig;
use broadsheet::scan::{self, Collection};
use broadsheet::types::NavDirection;
use broadsheet::viewer::{
    viewer_script, Effect, Language, LayoutMode, ViewController, ViewState, ViewerConfig,
    ViewerEvent,
};
use std::fs;
use tempfile::TempDir;

const WIDE: u32 = 1440;
const SMALL: u32 = 500;

fn controller_for(query: Option<&str>, width: u32) -> ViewController {
    ViewController::load(ViewerConfig::default(), Default::default(), query, width).0
}

fn key(controller: &mut ViewController, key: &str) -> Vec<Effect> {
    controller.handle(ViewerEvent::Key {
        key,
        focus_on_control: false,
    })
}

#[test]
fn test_small_viewport_always_lands_on_single_base() {
    for requested in LayoutMode::ALL {
        let mut c = controller_for(Some("view-single"), SMALL);
        c.toggle_language();
        c.request_mode(requested);
        assert_eq!(
            c.state(),
            ViewState {
                layout: LayoutMode::Single,
                language: Language::Base,
                small_viewport: true,
            },
            "requesting {requested} on a small viewport"
        );
    }
}

#[test]
fn test_language_resets_on_round_trip() {
    let mut c = controller_for(Some("view-single"), WIDE);
    assert!(c.toggle_language());
    assert_eq!(c.state().language, Language::Translation);

    c.request_mode(LayoutMode::VerticalSplit);
    c.request_mode(LayoutMode::Single);
    assert_eq!(c.state().layout, LayoutMode::Single);
    assert_eq!(c.state().language, Language::Base);
}

#[test]
fn test_shrinking_forces_single_and_growing_keeps_it() {
    let mut c = controller_for(Some("view-vsplit"), WIDE);
    assert_eq!(c.state().layout, LayoutMode::VerticalSplit);

    let effects = c.handle(ViewerEvent::Resize {
        viewport_width: SMALL,
    });
    assert_eq!(effects, vec![Effect::ReplaceUrl(LayoutMode::Single)]);
    assert_eq!(c.state().layout, LayoutMode::Single);

    assert!(c
        .handle(ViewerEvent::Resize {
            viewport_width: WIDE
        })
        .is_empty());
    assert_eq!(c.state().layout, LayoutMode::Single);
    assert!(!c.state().small_viewport);
}

#[test]
fn test_keys_are_ignored_while_a_control_has_focus() {
    let mut c = controller_for(None, WIDE);
    let effects = c.handle(ViewerEvent::Key {
        key: "s",
        focus_on_control: true,
    });
    assert!(effects.is_empty());
    assert_eq!(c.state().layout, LayoutMode::HorizontalSplit);

    key(&mut c, "S");
    assert_eq!(c.state().layout, LayoutMode::Single);
    key(&mut c, "t");
    assert_eq!(c.state().language, Language::Translation);
}

#[test]
fn test_end_to_end_navigation_carries_current_mode() {
    let dir = TempDir::new().unwrap();
    for day in ["01", "02", "03"] {
        let path = dir.path().join(format!("1945/1945.01.{day}.md"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, day).unwrap();
    }
    let site = SiteConfig::default();
    let collection = Collection::new(dir.path(), "1945", &site);
    let sequence = scan::scan_collection(&collection, &site).expect("scan should succeed");
    assert_eq!(sequence.len(), 3);

    let (mut first, _) =
        ViewController::load(site.viewer.clone(), sequence.navigation(0), None, WIDE);
    let before = first.state();
    assert_eq!(first.navigate(NavDirection::Prev), vec![Effect::Flash]);
    assert_eq!(first.state(), before);

    let (mut middle, _) = ViewController::load(
        site.viewer.clone(),
        sequence.navigation(1),
        Some("view-vsplit"),
        WIDE,
    );
    assert_eq!(
        key(&mut middle, "ArrowLeft"),
        vec![Effect::Navigate(
            "1945.01.01.html?view=view-vsplit".to_string()
        )]
    );
    key(&mut middle, "s");
    assert_eq!(
        key(&mut middle, "ArrowRight"),
        vec![Effect::Navigate(
            "1945.01.03.html?view=view-single".to_string()
        )]
    );

    let (mut last, _) = ViewController::load(site.viewer, sequence.navigation(2), None, WIDE);
    assert_eq!(last.navigate(NavDirection::Next), vec![Effect::Flash]);
}

#[test]
fn test_page_script_carries_configured_threshold() {
    let config = ViewerConfig {
        small_viewport_width: 900,
        ..ViewerConfig::default()
    };
    let script = viewer_script(&config).expect("script should render");
    assert!(script.contains("\"smallViewportWidth\":900"));
    assert!(!script.contains("__VIEWER_CONFIG__"));
}
