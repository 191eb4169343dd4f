//! Unit meshes and placement transforms.
//!
//! All spheres and beams are built from a handful of unit meshes; size and
//! orientation live in each primitive's [`Transform`], so a rebuild never has
//! to regenerate vertex data.

use glam::{Mat4, Quat, Vec3};
use std::f32::consts::PI;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self {
            translation: center,
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(radius),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// UV sphere of radius 1, `width_segments` around and `height_segments`
/// pole to pole. `uv.y` runs from 1 at the north pole to 0 at the south.
pub fn unit_sphere(width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let theta = v * PI;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let phi = u * 2.0 * PI;
            let p = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            vertices.push(Vertex {
                position: p.to_array(),
                normal: p.to_array(),
                uv: [u, 1.0 - v],
            });
        }
    }
    let stride = ws + 1;
    let mut indices = Vec::with_capacity((ws * hs * 6) as usize);
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    MeshData { vertices, indices }
}

/// Open-ended tube along +Y from -0.5 to 0.5 with radius 1 at the bottom and
/// `top_ratio` at the top. `uv.y` is 0 at the bottom and 1 at the top.
pub fn unit_tube(radial_segments: u32, top_ratio: f32) -> MeshData {
    let rs = radial_segments.max(3);
    let slope = 1.0 - top_ratio;
    let mut vertices = Vec::with_capacity(((rs + 1) * 2) as usize);
    for (row, (y, radius)) in [(0.5_f32, top_ratio), (-0.5, 1.0)].into_iter().enumerate() {
        for ix in 0..=rs {
            let u = ix as f32 / rs as f32;
            let a = u * 2.0 * PI;
            let (s, c) = a.sin_cos();
            let normal = Vec3::new(s, slope, c).normalize();
            vertices.push(Vertex {
                position: [radius * s, y, radius * c],
                normal: normal.to_array(),
                uv: [u, 1.0 - row as f32],
            });
        }
    }
    let stride = rs + 1;
    let mut indices = Vec::with_capacity((rs * 6) as usize);
    for ix in 0..rs {
        let a = ix;
        let b = stride + ix;
        let c = stride + ix + 1;
        let d = ix + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }
    MeshData { vertices, indices }
}

/// Placement of a beam between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamPlacement {
    pub midpoint: Vec3,
    pub length: f32,
    /// Shortest-arc rotation taking +Y onto the start-to-end direction.
    pub rotation: Quat,
}

impl BeamPlacement {
    /// `None` for coincident endpoints, which have no direction.
    pub fn between(start: Vec3, end: Vec3) -> Option<Self> {
        let dir = end - start;
        let length = dir.length();
        if !(length > f32::EPSILON) {
            return None;
        }
        Some(Self {
            midpoint: (start + end) * 0.5,
            length,
            rotation: Quat::from_rotation_arc(Vec3::Y, dir / length),
        })
    }

    pub fn transform(&self, radius: f32) -> Transform {
        Transform {
            translation: self.midpoint,
            rotation: self.rotation,
            scale: Vec3::new(radius, self.length, radius),
        }
    }
}
