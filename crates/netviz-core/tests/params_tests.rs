// Parameter defaults, sparse overrides and update categories.

use netviz_core::params::*;
use serde_json::json;

#[test]
fn defaults_match_documented_values() {
    let p = VisualParams::default();
    assert_eq!(p.node_size, 1.0);
    assert_eq!(p.bloom_strength, 2.0);
    assert_eq!(p.spread, 1.0);
    assert_eq!(p.connection_width, 1.0);
    assert_eq!(p.connection_opacity, 0.6);
    assert_eq!(p.edge_opacity, 0.12);
    assert_eq!(p.star_opacity, 0.7);
    assert!(p.show_edges && p.show_connections && p.auto_rotate && p.show_labels);
    assert_eq!(p.location_node_size, 0.12);
    assert_eq!(p.community_size_min, 0.4);
    assert_eq!(p.community_size_range, 0.8);
    assert_eq!(p.member_count_min, 34.0);
    assert_eq!(p.member_count_max, 122.0);
}

#[test]
fn load_overrides_only_recognized_well_typed_keys() {
    let mut p = VisualParams::default();
    p.load(&json!({
        "node_size": 1.5,
        "bloom_strength": "bright",
        "show_edges": false,
        "auto_rotate": 1,
        "node_spread": null,
        "mystery": 42
    }));
    assert_eq!(p.node_size, 1.5);
    assert_eq!(p.bloom_strength, 2.0);
    assert!(!p.show_edges);
    assert!(p.auto_rotate);
    assert_eq!(p.spread, 1.0);
}

#[test]
fn load_keeps_prior_values_not_defaults() {
    let prior = VisualParams {
        node_size: 2.2,
        bloom_strength: 0.5,
        spread: 1.7,
        connection_width: 3.0,
        connection_opacity: 0.1,
        edge_opacity: 0.9,
        star_opacity: 0.2,
        show_edges: false,
        show_connections: false,
        auto_rotate: false,
        show_labels: false,
        location_node_size: 0.3,
        community_size_min: 0.7,
        community_size_range: 1.4,
        member_count_min: 10.0,
        member_count_max: 500.0,
    };
    let mut p = prior.clone();
    p.load(&json!({ "node_size": 1.1, "show_labels": true, "node_spread": null }));

    let expected = VisualParams {
        node_size: 1.1,
        show_labels: true,
        ..prior
    };
    assert_eq!(p, expected);
}

#[test]
fn load_of_empty_or_non_object_is_a_no_op() {
    let mut p = VisualParams::default();
    p.load(&json!({}));
    p.load(&json!([1, 2, 3]));
    p.load(&json!("node_size"));
    assert_eq!(p, VisualParams::default());
}

#[test]
fn load_accepts_integer_numbers_and_does_not_clamp() {
    let mut p = VisualParams::default();
    p.load(&json!({ "connection_width": 3, "edge_opacity": -0.5 }));
    assert_eq!(p.connection_width, 3.0);
    assert_eq!(p.edge_opacity, -0.5);
}

#[test]
fn reset_restores_every_field() {
    let mut p = VisualParams::default();
    for field in ParamField::ALL {
        let value = match p.get(field) {
            ParamValue::Number(n) => ParamValue::Number(n + 7.0),
            ParamValue::Flag(b) => ParamValue::Flag(!b),
        };
        p.set(field, value);
    }
    assert_ne!(p, VisualParams::default());
    p.reset();
    assert_eq!(p, VisualParams::default());
}

#[test]
fn style_only_fields_report_restyle() {
    let mut p = VisualParams::default();
    assert_eq!(
        p.set(ParamField::BloomStrength, ParamValue::Number(3.0)),
        ParamChange::Restyle
    );
    assert_eq!(
        p.set(ParamField::ShowLabels, ParamValue::Flag(false)),
        ParamChange::Restyle
    );
    assert_eq!(
        p.set(ParamField::EdgeOpacity, ParamValue::Number(0.3)),
        ParamChange::Restyle
    );
    assert_eq!(p.bloom_strength, 3.0);
    assert!(!p.show_labels);
}

#[test]
fn geometry_fields_name_their_dependent_groups() {
    let mut p = VisualParams::default();
    let scope = |c: ParamChange| match c {
        ParamChange::Rebuild(s) => s,
        other => panic!("expected rebuild, got {other:?}"),
    };

    let s = scope(p.set(ParamField::NodeSize, ParamValue::Number(2.0)));
    assert!(s.nodes && s.representatives && !s.connections);

    let s = scope(p.set(ParamField::Spread, ParamValue::Number(1.5)));
    assert_eq!(s, RebuildScope::ALL);

    let s = scope(p.set(ParamField::ConnectionWidth, ParamValue::Number(2.0)));
    assert!(!s.nodes && !s.representatives && s.connections);

    let s = scope(p.set(ParamField::LocationNodeSize, ParamValue::Number(0.2)));
    assert!(s.nodes && !s.representatives && !s.connections);

    for field in [
        ParamField::CommunitySizeMin,
        ParamField::CommunitySizeRange,
        ParamField::MemberCountMin,
        ParamField::MemberCountMax,
    ] {
        let s = scope(p.set(field, ParamValue::Number(1.0)));
        assert!(!s.nodes && s.representatives && !s.connections, "{field:?}");
    }
}

#[test]
fn wrong_value_kind_is_ignored() {
    let mut p = VisualParams::default();
    assert_eq!(
        p.set(ParamField::NodeSize, ParamValue::Flag(true)),
        ParamChange::Unchanged
    );
    assert_eq!(
        p.set(ParamField::ShowEdges, ParamValue::Number(0.0)),
        ParamChange::Unchanged
    );
    assert_eq!(p, VisualParams::default());
}

#[test]
fn keys_round_trip_through_from_key() {
    for field in ParamField::ALL {
        assert_eq!(ParamField::from_key(field.key()), Some(field));
    }
    assert_eq!(ParamField::from_key("nodeSize"), None);
}

#[test]
fn display_state_formats_each_control() {
    let mut p = VisualParams::default();
    p.set(ParamField::ShowEdges, ParamValue::Flag(false));
    let state = p.display_state();
    assert_eq!(state.entries.len(), ParamField::ALL.len());

    let text = |f: ParamField| state.entry(f).unwrap().text.clone();
    assert_eq!(text(ParamField::NodeSize), "1.00");
    assert_eq!(text(ParamField::BloomStrength), "2.0");
    assert_eq!(text(ParamField::ConnectionWidth), "1.0");
    assert_eq!(text(ParamField::ConnectionOpacity), "0.60");
    assert_eq!(text(ParamField::EdgeOpacity), "0.12");
    assert_eq!(text(ParamField::MemberCountMax), "122");
    assert_eq!(text(ParamField::ShowEdges), "off");
    assert_eq!(text(ParamField::AutoRotate), "on");
}
