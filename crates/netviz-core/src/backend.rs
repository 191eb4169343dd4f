//! The rendering capability the core drives.
//!
//! The scene builder describes primitives with [`PrimitiveDesc`] and hands
//! them to a [`RenderBackend`]; afterwards it only talks to them through
//! their [`PrimitiveHandle`]. Ray casting does not go through the backend:
//! the core keeps its own pick shapes in the registry.

use crate::geometry::{MeshData, Transform};
use glam::{Vec2, Vec3};
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveHandle(pub u32);

impl fmt::Display for PrimitiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("unknown primitive {0}")]
    UnknownPrimitive(PrimitiveHandle),
    #[error("primitive {handle} has no {property}")]
    MissingProperty {
        handle: PrimitiveHandle,
        property: &'static str,
    },
    #[error("render device error: {0}")]
    Device(String),
}

/// Lit material with an optional radial gradient map.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardMaterial {
    pub color: Vec3,
    /// Tint of a white-centred radial gradient multiplied into `color`.
    pub gradient_map: Option<Vec3>,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    Standard(StandardMaterial),
    /// Unlit, additive, back faces only.
    Glow { color: Vec3, opacity: f32 },
    /// Unlit, additive, both faces; `uv.y` blends `start` into `end` and the
    /// result is scaled by `bloom`.
    Gradient {
        start: Vec3,
        end: Vec3,
        bloom: f32,
        opacity: f32,
    },
}

#[derive(Clone, Debug)]
pub struct PointsDesc {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub size: f32,
    pub opacity: f32,
}

/// Additive line list.
#[derive(Clone, Debug)]
pub struct LinesDesc {
    pub segments: Vec<[Vec3; 2]>,
    pub color: Vec3,
    pub opacity: f32,
    pub visible: bool,
}

#[derive(Clone, Debug)]
pub struct MeshDesc {
    pub mesh: Rc<MeshData>,
    pub transform: Transform,
    pub material: Material,
    pub visible: bool,
}

/// Camera-facing text quad.
#[derive(Clone, Debug)]
pub struct SpriteDesc {
    pub text: String,
    pub color: Vec3,
    pub position: Vec3,
    pub scale: Vec2,
    pub opacity: f32,
    pub visible: bool,
}

#[derive(Clone, Debug)]
pub enum PrimitiveDesc {
    Points(PointsDesc),
    Lines(LinesDesc),
    Mesh(MeshDesc),
    Sprite(SpriteDesc),
}

impl PrimitiveDesc {
    pub fn visible(&self) -> bool {
        match self {
            PrimitiveDesc::Points(_) => true,
            PrimitiveDesc::Lines(d) => d.visible,
            PrimitiveDesc::Mesh(d) => d.visible,
            PrimitiveDesc::Sprite(d) => d.visible,
        }
    }
}

pub trait RenderBackend {
    fn add(&mut self, desc: PrimitiveDesc) -> Result<PrimitiveHandle, RenderError>;

    /// Remove a primitive and release its GPU-side geometry and textures.
    /// Unknown handles are ignored.
    fn dispose(&mut self, handle: PrimitiveHandle);

    fn set_visible(&mut self, handle: PrimitiveHandle, visible: bool) -> Result<(), RenderError>;

    fn set_opacity(&mut self, handle: PrimitiveHandle, opacity: f32) -> Result<(), RenderError>;

    /// Only meaningful for [`Material::Standard`] meshes.
    fn set_emissive_intensity(
        &mut self,
        handle: PrimitiveHandle,
        intensity: f32,
    ) -> Result<(), RenderError>;

    /// Only meaningful for [`Material::Gradient`] meshes.
    fn set_beam_bloom(&mut self, handle: PrimitiveHandle, bloom: f32) -> Result<(), RenderError>;

    /// Strength of the bloom post-process pass.
    fn set_bloom_strength(&mut self, strength: f32);
}
