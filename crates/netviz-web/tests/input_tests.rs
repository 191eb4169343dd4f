// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn drag_reports_deltas_only_while_active() {
    let mut drag = DragState::default();
    assert_eq!(drag.move_to(Vec2::new(10.0, 10.0)), None);

    drag.begin(Vec2::new(10.0, 10.0));
    assert_eq!(drag.move_to(Vec2::new(14.0, 7.0)), Some(Vec2::new(4.0, -3.0)));
    // Deltas are relative to the previous move, not the drag origin
    assert_eq!(drag.move_to(Vec2::new(15.0, 7.0)), Some(Vec2::new(1.0, 0.0)));

    drag.end();
    assert!(!drag.active);
    assert_eq!(drag.move_to(Vec2::new(50.0, 50.0)), None);
}

#[test]
fn css_px_to_ndc_maps_corners_and_center() {
    let size = Vec2::new(800.0, 600.0);
    let center = css_px_to_ndc(Vec2::new(400.0, 300.0), size).unwrap();
    assert!(center.length() < 1e-6);

    let top_left = css_px_to_ndc(Vec2::ZERO, size).unwrap();
    assert!((top_left - Vec2::new(-1.0, 1.0)).length() < 1e-6);

    let bottom_right = css_px_to_ndc(size, size).unwrap();
    assert!((bottom_right - Vec2::new(1.0, -1.0)).length() < 1e-6);
}

#[test]
fn css_px_to_ndc_rejects_outside_points_and_empty_boxes() {
    let size = Vec2::new(800.0, 600.0);
    assert_eq!(css_px_to_ndc(Vec2::new(-1.0, 10.0), size), None);
    assert_eq!(css_px_to_ndc(Vec2::new(10.0, 601.0), size), None);
    assert_eq!(css_px_to_ndc(Vec2::new(0.0, 0.0), Vec2::ZERO), None);
    assert_eq!(css_px_to_ndc(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)), None);
}

#[test]
fn wheel_delta_scales_by_mode() {
    assert_eq!(wheel_delta_px(100.0, 0), 100.0);
    assert_eq!(wheel_delta_px(3.0, 1), 48.0);
    assert_eq!(wheel_delta_px(-1.0, 2), -800.0);
    // Unknown modes fall back to pixels
    assert_eq!(wheel_delta_px(5.0, 7), 5.0);
}
