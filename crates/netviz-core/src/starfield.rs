//! Decorative background stars on a thick spherical shell.

use crate::constants::{
    STAR_BRIGHTNESS_MAX, STAR_BRIGHTNESS_MIN, STAR_RADIUS_MAX, STAR_RADIUS_MIN,
};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Vec3,
    /// Grayscale level in [0.4, 0.9).
    pub brightness: f32,
}

/// `count` stars uniformly distributed in direction, with radius uniform in
/// [80, 260).
pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| {
            let r = rng.gen_range(STAR_RADIUS_MIN..STAR_RADIUS_MAX);
            let dir = spherical_direction(rng.gen::<f32>(), rng.gen::<f32>());
            let brightness = rng.gen_range(STAR_BRIGHTNESS_MIN..STAR_BRIGHTNESS_MAX);
            Star {
                position: dir * r,
                brightness,
            }
        })
        .collect()
}

/// Map two uniforms in [0, 1) to a unit direction, uniform over the sphere.
///
/// The polar angle comes from `acos(2v - 1)` so directions do not bunch up at
/// the poles.
#[inline]
pub fn spherical_direction(u: f32, v: f32) -> Vec3 {
    let theta = u * TAU;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    )
}
