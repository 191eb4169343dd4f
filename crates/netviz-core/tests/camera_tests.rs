// Orbit camera motion, limits and screen rays.

use glam::{Vec2, Vec3};
use netviz_core::camera::OrbitCamera;
use std::f32::consts::FRAC_PI_2;

fn still_camera() -> OrbitCamera {
    let mut cam = OrbitCamera::default();
    cam.auto_rotate = false;
    cam
}

#[test]
fn default_camera_starts_at_35_35_35() {
    let cam = OrbitCamera::default();
    assert!((cam.eye() - Vec3::splat(35.0)).length() < 1e-3);
    assert!((cam.distance - 35.0 * 3f32.sqrt()).abs() < 1e-3);
    assert!((cam.fovy_radians - 55f32.to_radians()).abs() < 1e-6);
    assert!(cam.auto_rotate);
}

#[test]
fn centre_ray_hits_the_target() {
    let cam = OrbitCamera::default();
    let ray = cam.ray_from_ndc(Vec2::ZERO);
    let expected = (cam.target - cam.eye()).normalize();
    assert!((ray.direction - expected).length() < 1e-4);
    assert!((ray.origin - cam.eye()).length() < 1e-4);
}

#[test]
fn still_camera_does_not_drift() {
    let mut cam = still_camera();
    let eye = cam.eye();
    for _ in 0..100 {
        cam.update(1.0 / 60.0);
    }
    assert!((cam.eye() - eye).length() < 1e-4);
}

#[test]
fn auto_rotate_turns_without_changing_distance() {
    let mut cam = OrbitCamera::default();
    let azimuth = cam.azimuth;
    let distance = cam.distance;
    cam.update(1.0);
    assert!(cam.azimuth < azimuth);
    assert!((cam.distance - distance).abs() < 1e-4);
}

#[test]
fn drag_eases_to_full_angle() {
    let mut cam = still_camera();
    let start = cam.azimuth;
    // A quarter of the viewport height is a quarter turn.
    cam.rotate_by_pixels(150.0, 0.0, 600.0);
    let after_one = cam.azimuth;
    for _ in 0..600 {
        cam.update(1.0 / 60.0);
    }
    assert!((start - after_one).abs() < 1e-6, "input applies on update");
    assert!((cam.azimuth - (start - FRAC_PI_2)).abs() < 1e-3);
}

#[test]
fn polar_angle_stays_off_the_poles() {
    let mut cam = still_camera();
    cam.rotate_by_pixels(0.0, -100_000.0, 600.0);
    for _ in 0..200 {
        cam.update(1.0 / 60.0);
    }
    assert!(cam.polar > 0.0);
    assert!(cam.polar < std::f32::consts::PI);
    assert!(cam.eye().is_finite());
}

#[test]
fn zoom_is_clamped_to_limits() {
    let mut cam = still_camera();
    for _ in 0..200 {
        cam.zoom(-1.0);
        cam.update(1.0 / 60.0);
    }
    assert_eq!(cam.distance, 10.0);
    for _ in 0..200 {
        cam.zoom(1.0);
        cam.update(1.0 / 60.0);
    }
    assert_eq!(cam.distance, 150.0);
}

#[test]
fn zoom_steps_by_five_percent() {
    let mut cam = still_camera();
    let d = cam.distance;
    cam.zoom(-120.0);
    cam.update(0.0);
    assert!((cam.distance - d * 0.95).abs() < 1e-3);
    cam.zoom(0.0);
    cam.update(0.0);
    assert!((cam.distance - d * 0.95).abs() < 1e-3);
}

#[test]
fn pixel_to_ndc_flips_y() {
    let viewport = Vec2::new(800.0, 600.0);
    assert_eq!(
        OrbitCamera::pixel_to_ndc(Vec2::ZERO, viewport),
        Vec2::new(-1.0, 1.0)
    );
    assert_eq!(
        OrbitCamera::pixel_to_ndc(Vec2::new(400.0, 300.0), viewport),
        Vec2::ZERO
    );
    assert_eq!(
        OrbitCamera::pixel_to_ndc(viewport, viewport),
        Vec2::new(1.0, -1.0)
    );
}

#[test]
fn right_and_up_are_orthonormal_to_the_view() {
    let cam = OrbitCamera::default();
    let (right, up) = cam.right_up();
    let forward = (cam.target - cam.eye()).normalize();
    assert!((right.length() - 1.0).abs() < 1e-5);
    assert!((up.length() - 1.0).abs() < 1e-5);
    assert!(right.dot(up).abs() < 1e-5);
    assert!(right.dot(forward).abs() < 1e-5);
    assert!(up.y > 0.0);
}

#[test]
fn looking_at_round_trips_the_eye() {
    let eye = Vec3::new(-12.0, 4.0, 20.0);
    let cam = OrbitCamera::looking_at(eye, Vec3::new(1.0, 1.0, 1.0), 1.5);
    assert!((cam.eye() - eye).length() < 1e-4);
}
