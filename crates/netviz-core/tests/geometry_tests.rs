// Unit meshes, beam placement and the starfield distribution.

use glam::Vec3;
use netviz_core::geometry::*;
use netviz_core::starfield::{generate, spherical_direction};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn unit_sphere_has_unit_radius_and_expected_counts() {
    let mesh = unit_sphere(16, 16);
    assert_eq!(mesh.vertices.len(), 17 * 17);
    // Pole rows contribute one triangle per segment instead of two.
    assert_eq!(mesh.indices.len(), 16 * 15 * 6);
    for v in &mesh.vertices {
        let p = Vec3::from_array(v.position);
        assert!((p.length() - 1.0).abs() < 1e-5);
    }
    assert!(mesh
        .indices
        .iter()
        .all(|i| (*i as usize) < mesh.vertices.len()));
}

#[test]
fn unit_tube_spans_minus_half_to_half() {
    let mesh = unit_tube(12, 1.0);
    assert_eq!(mesh.vertices.len(), 2 * 13);
    assert_eq!(mesh.indices.len(), 12 * 6);
    for v in &mesh.vertices {
        assert!((v.position[1].abs() - 0.5).abs() < 1e-6);
        let radial = (v.position[0].powi(2) + v.position[2].powi(2)).sqrt();
        assert!((radial - 1.0).abs() < 1e-5);
        // Gradient coordinate runs bottom (0) to top (1).
        let expected = if v.position[1] > 0.0 { 1.0 } else { 0.0 };
        assert_eq!(v.uv[1], expected);
    }
}

#[test]
fn beam_placement_between_two_points() {
    let start = Vec3::ZERO;
    let end = Vec3::new(10.0, 0.0, 0.0);
    let placement = BeamPlacement::between(start, end).unwrap();
    assert!(approx(placement.midpoint, Vec3::new(5.0, 0.0, 0.0)));
    assert!((placement.length - 10.0).abs() < 1e-5);
    assert!(approx(placement.rotation * Vec3::Y, Vec3::X));

    // The unit tube's end caps land on the endpoints.
    let m = placement.transform(0.033).matrix();
    assert!(approx(m.transform_point3(Vec3::new(0.0, -0.5, 0.0)), start));
    assert!(approx(m.transform_point3(Vec3::new(0.0, 0.5, 0.0)), end));
}

#[test]
fn beam_placement_handles_downward_direction() {
    let placement =
        BeamPlacement::between(Vec3::new(0.0, 4.0, 0.0), Vec3::new(0.0, -4.0, 0.0)).unwrap();
    assert!(approx(placement.rotation * Vec3::Y, -Vec3::Y));
}

#[test]
fn coincident_endpoints_have_no_placement() {
    let p = Vec3::new(3.0, 3.0, 3.0);
    assert!(BeamPlacement::between(p, p).is_none());
}

#[test]
fn sphere_transform_scales_uniformly() {
    let m = Transform::sphere(Vec3::new(1.0, 2.0, 3.0), 0.5).matrix();
    assert!(approx(m.transform_point3(Vec3::X), Vec3::new(1.5, 2.0, 3.0)));
}

#[test]
fn starfield_stays_within_the_shell() {
    let mut rng = StdRng::seed_from_u64(7);
    let stars = generate(&mut rng, 3000);
    assert_eq!(stars.len(), 3000);
    for s in &stars {
        let r = s.position.length();
        assert!((79.99..=260.01).contains(&r), "radius {r}");
        assert!((0.4..0.9).contains(&s.brightness));
    }
}

#[test]
fn starfield_is_reproducible_per_seed() {
    let a = generate(&mut StdRng::seed_from_u64(42), 100);
    let b = generate(&mut StdRng::seed_from_u64(42), 100);
    let c = generate(&mut StdRng::seed_from_u64(43), 100);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn starfield_directions_are_uniform_in_cos_polar() {
    // Uniform over the sphere means z / r is uniform in [-1, 1].
    let stars = generate(&mut StdRng::seed_from_u64(1234), 3000);
    let mut bins = [0usize; 10];
    for s in &stars {
        let cos = s.position.z / s.position.length();
        let bin = (((cos + 1.0) / 2.0) * 10.0).floor().clamp(0.0, 9.0) as usize;
        bins[bin] += 1;
    }
    for (i, count) in bins.iter().enumerate() {
        assert!((210..=390).contains(count), "bin {i} has {count}");
    }
}

#[test]
fn spherical_direction_reaches_both_poles() {
    assert!(approx(spherical_direction(0.0, 1.0), Vec3::Z));
    assert!(approx(spherical_direction(0.0, 0.0), -Vec3::Z));
    assert!(approx(spherical_direction(0.0, 0.5), Vec3::X));
}
