// Palette lookup and luminance-compensated intensity.

use glam::Vec3;
use netviz_core::constants::{CORE_EMISSIVE_BASE, NODE_EMISSIVE_BASE, PALETTE};
use netviz_core::palette::*;

#[test]
fn palette_is_cyclic_and_handles_negative_ids() {
    assert_eq!(palette_index(0), 0);
    assert_eq!(palette_index(12), 0);
    assert_eq!(palette_index(14), 2);
    assert_eq!(palette_index(-1), 11);
    assert_eq!(palette_color(25), hex_to_rgb(PALETTE[1]));
}

#[test]
fn hex_and_css_conversions_agree() {
    let c = hex_to_rgb(0x1f77b4);
    assert!((c.x - 31.0 / 255.0).abs() < 1e-6);
    assert_eq!(css_hex(c), "#1f77b4");
    assert_eq!(css_hex(Vec3::new(2.0, -1.0, 0.5)), "#ff0080");
}

#[test]
fn luminance_uses_bt709_weights() {
    assert!((luminance(Vec3::ONE) - 1.0).abs() < 1e-6);
    assert!((luminance(Vec3::new(0.0, 1.0, 0.0)) - 0.7152).abs() < 1e-6);
    assert_eq!(luminance(Vec3::ZERO), 0.0);
}

#[test]
fn white_gets_the_plain_formula() {
    // 2.0 * 0.5 * (1 / 1.0) * 0.6
    let i = emissive_intensity(Vec3::ONE, 2.0, 0.6);
    assert!((i - 0.6).abs() < 1e-6);
}

#[test]
fn dark_colors_are_boosted_up_to_the_floor() {
    // Luminance below 0.12 is treated as 0.12.
    let black = emissive_intensity(Vec3::ZERO, 2.0, 0.6);
    let floor = intensity_for_luminance(0.12, 2.0, 0.6);
    assert!((black - floor).abs() < 1e-6);
    assert!((black - 5.0).abs() < 1e-4);
}

#[test]
fn intensity_never_exceeds_six() {
    assert_eq!(emissive_intensity(Vec3::ZERO, 2.0, 1.2), 6.0);
    assert_eq!(intensity_for_luminance(0.5, 100.0, 1.2), 6.0);
    for hex in PALETTE {
        let i = emissive_intensity(hex_to_rgb(hex), 10.0, 1.2);
        assert!(i <= 6.0);
    }
}

#[test]
fn zero_bloom_means_no_emission() {
    assert_eq!(emissive_intensity(hex_to_rgb(PALETTE[3]), 0.0, 0.6), 0.0);
}

#[test]
fn gradient_is_white_in_the_middle_and_tinted_at_the_corner() {
    let size = 128;
    let texels = radial_gradient_rgba(Vec3::new(1.0, 0.0, 0.0), size);
    assert_eq!(texels.len(), (size * size * 4) as usize);

    let at = |x: u32, y: u32| {
        let i = ((y * size + x) * 4) as usize;
        [texels[i], texels[i + 1], texels[i + 2], texels[i + 3]]
    };
    assert_eq!(at(64, 64), [255, 255, 255, 255]);
    assert_eq!(at(0, 0), [255, 0, 0, 255]);
    let [_, g, _, _] = at(64 + 40, 64);
    assert!(g > 0 && g < 255);
}

#[test]
fn intensity_is_monotonic_in_bloom_and_capped() {
    for base in [NODE_EMISSIVE_BASE, CORE_EMISSIVE_BASE] {
        for l in 0..=100 {
            let lum = l as f32 / 100.0;
            let mut prev = intensity_for_luminance(lum, 0.0, base);
            for b in 1..=200 {
                let bloom = b as f32 * 0.05;
                let i = intensity_for_luminance(lum, bloom, base);
                assert!(i >= prev, "lum {lum} bloom {bloom}: {i} < {prev}");
                assert!(i <= 6.0);
                prev = i;
            }
        }
    }
}
