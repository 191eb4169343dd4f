// End-to-end behaviour of the viewer against recording fakes.

mod common;

use common::{sample_file, RecordingBackend, RecordingSurface, SAMPLE_JSON};
use glam::{Vec2, Vec3};
use netviz_core::builder::SceneBuilder;
use netviz_core::camera::OrbitCamera;
use netviz_core::dataset::DatasetStats;
use netviz_core::params::{ParamChange, ParamField, ParamValue, VisualParams};
use netviz_core::registry::{PickShape, PrimitiveTag};
use netviz_core::viewer::{load_error_message, Viewer};

type TestViewer = Viewer<RecordingBackend, RecordingSurface>;

fn viewer() -> TestViewer {
    Viewer::new(
        RecordingBackend::new(),
        RecordingSurface::default(),
        SceneBuilder::with_seed(11),
    )
}

fn loaded() -> TestViewer {
    let mut v = viewer();
    v.load(sample_file());
    v
}

#[test]
fn new_viewer_shows_default_params() {
    let v = viewer();
    assert_eq!(v.surface().params.len(), 1);
    assert_eq!(v.surface().params[0], VisualParams::default().display_state());
    assert!(v.registry().is_empty());
}

#[test]
fn load_applies_overrides_and_reports_stats() {
    let v = loaded();
    assert_eq!(v.params().node_size, 1.5);
    assert!(!v.params().show_labels);

    let surface = v.surface();
    assert_eq!(surface.ready, 1);
    assert!(surface.errors.is_empty());
    assert_eq!(
        surface.stats,
        [DatasetStats {
            communities: 3,
            locations: 4,
            edges: 2
        }]
    );
    assert_eq!(surface.params.last().unwrap(), &v.display_state());

    assert!(v.registry().labels.iter().all(|l| !l.visible));
    assert_eq!(v.backend().live.len(), v.registry().iter().count());
}

#[test]
fn load_json_parses_the_file() {
    let mut v = viewer();
    let report = v.load_json(SAMPLE_JSON).unwrap();
    assert!(report.is_clean());
    assert_eq!(v.dataset().unwrap().communities.len(), 3);
}

#[test]
fn bad_json_is_reported_once_and_nothing_is_built() {
    let mut v = viewer();
    assert!(v.load_json("{\"communities\": 3").is_err());
    let surface = v.surface();
    assert_eq!(surface.errors.len(), 1);
    assert!(surface.errors[0].starts_with("Error loading data: invalid network data"));
    assert!(surface.errors[0].contains("F12"));
    assert_eq!(surface.ready, 0);
    assert!(v.registry().is_empty());
    assert!(v.backend().live.is_empty());
}

#[test]
fn load_error_message_lists_the_checklist() {
    let msg = load_error_message("HTTP 404: Not Found");
    let lines: Vec<&str> = msg.lines().collect();
    assert_eq!(lines[0], "Error loading data: HTTP 404: Not Found");
    assert_eq!(lines.iter().filter(|l| l.starts_with("- ")).count(), 3);
}

#[test]
fn style_change_restyles_in_place() {
    let mut v = loaded();
    let shown = v.surface().params.len();
    let change = v.on_param_changed(ParamField::BloomStrength, ParamValue::Number(3.0));
    assert_eq!(change, ParamChange::Restyle);
    assert_eq!(v.backend().bloom_strength, Some(3.0));
    assert!(v.backend().disposed.is_empty());
    assert_eq!(v.surface().params.len(), shown + 1);
    assert_eq!(
        v.surface().params.last().unwrap().entry(ParamField::BloomStrength).unwrap().text,
        "3.0"
    );
}

#[test]
fn spread_change_rebuilds_every_data_group() {
    let mut v = loaded();
    let change = v.on_param_changed(ParamField::Spread, ParamValue::Number(2.0));
    assert!(matches!(change, ParamChange::Rebuild(_)));

    // 4 nodes, 3 cores, 3 glows, 3 labels and 1 beam; stars and edges stay.
    assert_eq!(v.backend().disposed.len(), 14);
    let PickShape::Sphere { center, .. } = v.registry().nodes[0].shape else {
        panic!("node is not a sphere");
    };
    assert_eq!(center, Vec3::new(2.0, 2.0, 2.0));
    assert_eq!(v.backend().live.len(), v.registry().iter().count());
}

#[test]
fn rebuild_keeps_current_style() {
    let mut v = loaded();
    v.on_param_changed(ParamField::ShowConnections, ParamValue::Flag(false));
    v.on_param_changed(ParamField::ConnectionWidth, ParamValue::Number(3.0));
    let beam = &v.registry().beams[0];
    assert!(!beam.visible);
    assert!(!v.backend().visible[&beam.handle]);
}

#[test]
fn wrong_kind_changes_nothing() {
    let mut v = loaded();
    let shown = v.surface().params.len();
    let change = v.on_param_changed(ParamField::Spread, ParamValue::Flag(true));
    assert_eq!(change, ParamChange::Unchanged);
    assert_eq!(v.surface().params.len(), shown);
    assert!(v.backend().disposed.is_empty());
}

#[test]
fn changes_before_load_only_update_params() {
    let mut v = viewer();
    v.on_param_changed(ParamField::NodeSize, ParamValue::Number(2.0));
    assert_eq!(v.params().node_size, 2.0);
    assert!(v.backend().live.is_empty());
}

#[test]
fn reset_restores_defaults_and_rebuilds_changed_geometry() {
    let mut v = loaded();
    v.on_param_changed(ParamField::ConnectionWidth, ParamValue::Number(4.0));
    let disposed_before = v.backend().disposed.len();
    v.reset();

    assert_eq!(v.params(), &VisualParams::default());
    // node_size came from the file (1.5), so nodes and representatives are
    // rebuilt along with the beam.
    assert_eq!(v.backend().disposed.len(), disposed_before + 14);
    assert!(v.registry().labels.iter().all(|l| l.visible));
    assert_eq!(
        v.surface().params.last().unwrap(),
        &VisualParams::default().display_state()
    );
}

#[test]
fn reset_with_unchanged_geometry_rebuilds_nothing() {
    let mut v = viewer();
    v.load_json(r#"{"communities": [], "locations": [], "edges": []}"#)
        .unwrap();
    v.on_param_changed(ParamField::EdgeOpacity, ParamValue::Number(0.5));
    v.reset();
    assert!(v.backend().disposed.is_empty());
    assert_eq!(v.params().edge_opacity, 0.12);
}

#[test]
fn hover_shows_and_hides_the_tooltip() {
    let mut v = loaded();
    *v.camera_mut() = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 30.0), Vec3::ZERO, 1.0);

    let picked = v.hover(Vec2::ZERO, Vec2::new(120.0, 80.0)).unwrap();
    assert_eq!(picked.tag, PrimitiveTag::Representative(0));
    let (tooltip, pointer) = v.surface().tooltips.last().unwrap().clone();
    assert_eq!(tooltip.unwrap().title, "Community 0");
    assert_eq!(pointer, Vec2::new(120.0, 80.0));

    // Top-left corner looks into empty space.
    assert!(v.hover(Vec2::new(-0.99, 0.99), Vec2::ZERO).is_none());
    assert!(v.surface().tooltips.last().unwrap().0.is_none());

    v.clear_hover();
    assert!(v.surface().tooltips.last().unwrap().0.is_none());
}

#[test]
fn auto_rotate_toggle_reaches_the_camera() {
    let mut v = loaded();
    let azimuth = v.camera().azimuth;
    v.tick(1.0);
    assert!(v.camera().azimuth < azimuth);

    v.on_param_changed(ParamField::AutoRotate, ParamValue::Flag(false));
    assert!(!v.camera().auto_rotate);
}

#[test]
fn reload_replaces_the_previous_scene() {
    let mut v = loaded();
    let first = v.backend().created.len();
    v.load(sample_file());
    assert_eq!(v.backend().disposed.len(), first);
    assert_eq!(v.backend().live.len(), v.registry().iter().count());
    assert_eq!(v.surface().ready, 2);
}

#[test]
fn aspect_ignores_degenerate_sizes() {
    let mut v = viewer();
    v.set_aspect(2.0);
    v.set_aspect(0.0);
    v.set_aspect(f32::NAN);
    assert_eq!(v.camera().aspect, 2.0);
}
