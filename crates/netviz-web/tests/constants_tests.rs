// Host-side tests for page constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn presentation_constants_are_within_reasonable_bounds() {
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!(TOOLTIP_OFFSET_PX > 0.0);
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.25);
    assert!(BLOOM_DOWNSCALE >= 1);
    assert!(GRADIENT_SIZE.is_power_of_two());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn label_baseline_fits_label_canvas() {
    assert!(LABEL_BASELINE_Y > 0.0);
    assert!(LABEL_BASELINE_Y < LABEL_CANVAS_HEIGHT as f64);
    assert!(LABEL_CANVAS_WIDTH >= LABEL_CANVAS_HEIGHT);
}

#[test]
fn header_and_panel_stats_use_distinct_ids() {
    let ids = [STAT_COMMUNITIES_IDS, STAT_LOCATIONS_IDS, STAT_EDGES_IDS].concat();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_ne!(PANEL_TOGGLE_OPEN, PANEL_TOGGLE_CLOSED);
}

#[test]
fn data_url_is_site_absolute_json() {
    assert!(DATA_URL.starts_with('/'));
    assert!(DATA_URL.ends_with(".json"));
}
