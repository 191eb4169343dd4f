//! Community colors and luminance-compensated emissive strength.

use crate::constants::{INTENSITY_MAX, LUMINANCE_FLOOR, PALETTE};
use glam::Vec3;

/// Palette slot for an entity id; cyclic, and defined for negative ids.
#[inline]
pub fn palette_index(id: i64) -> usize {
    id.rem_euclid(PALETTE.len() as i64) as usize
}

#[inline]
pub fn palette_color(id: i64) -> Vec3 {
    hex_to_rgb(PALETTE[palette_index(id)])
}

/// `0xRRGGBB` to normalized channels.
#[inline]
pub fn hex_to_rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// `#rrggbb` for canvas fill styles.
pub fn css_hex(color: Vec3) -> String {
    let [r, g, b] = to_rgb8(color);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Perceived luminance with ITU-R BT.709 weights.
#[inline]
pub fn luminance(color: Vec3) -> f32 {
    0.2126 * color.x + 0.7152 * color.y + 0.0722 * color.z
}

/// Emissive intensity that keeps dark and bright hues at a similar glow.
///
/// `base` is 0.6 for location nodes and 1.2 for representative cores. The
/// result never exceeds 6.0.
#[inline]
pub fn emissive_intensity(color: Vec3, bloom: f32, base: f32) -> f32 {
    intensity_for_luminance(luminance(color), bloom, base)
}

#[inline]
pub fn intensity_for_luminance(lum: f32, bloom: f32, base: f32) -> f32 {
    let boost = 1.0 / lum.max(LUMINANCE_FLOOR);
    (bloom * 0.5 * boost * base).min(INTENSITY_MAX)
}

/// RGBA8 texels of a square radial gradient: white out to 35% of the radius,
/// then fading linearly to `color` at the edge (and beyond, in the corners).
pub fn radial_gradient_rgba(color: Vec3, size: u32) -> Vec<u8> {
    let edge = to_rgb8(color);
    let half = size as f32 / 2.0;
    let mut out = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let r = (dx * dx + dy * dy).sqrt() / half;
            let t = ((r - 0.35) / 0.65).clamp(0.0, 1.0);
            for c in edge {
                out.push((255.0 + (c as f32 - 255.0) * t).round() as u8);
            }
            out.push(255);
        }
    }
    out
}

/// Clamped, rounded 8-bit channels.
pub fn to_rgb8(color: Vec3) -> [u8; 3] {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8]
}
