use crate::backend::{PrimitiveHandle, RenderBackend};
use crate::params::RebuildScope;
use glam::{Vec2, Vec3};

/// Synthetic back-reference of a connection beam.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeamLink {
    pub from: i64,
    pub to: i64,
    pub from_size: u32,
    pub to_size: u32,
}

/// Semantic type of a primitive and the entity it stands for. Indices point
/// into the dataset's `locations` / `communities`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveTag {
    Background,
    RawEdges,
    Location(usize),
    Representative(usize),
    Connection(BeamLink),
}

impl PrimitiveTag {
    /// Background stars and raw edges never answer the pointer.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, PrimitiveTag::Background | PrimitiveTag::RawEdges)
    }
}

/// Geometry used for ray casting, in world space.
#[derive(Clone, Debug, PartialEq)]
pub enum PickShape {
    Sphere { center: Vec3, radius: f32 },
    /// Open cylinder between two points.
    Cylinder { start: Vec3, end: Vec3, radius: f32 },
    /// Camera-facing quad.
    Billboard { center: Vec3, half_size: Vec2 },
    Segments(Vec<[Vec3; 2]>),
    Points(Vec<Vec3>),
}

/// Emissive color and per-group base multiplier, kept so intensity can be
/// recomputed when bloom changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emissive {
    pub color: Vec3,
    pub base: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub handle: PrimitiveHandle,
    pub tag: PrimitiveTag,
    pub shape: PickShape,
    pub visible: bool,
    pub emissive: Option<Emissive>,
}

/// Core sphere and glow shell of one community.
#[derive(Clone, Debug, PartialEq)]
pub struct RepresentativePair {
    pub core: Primitive,
    pub glow: Primitive,
}

/// Everything the scene builder created, by group.
#[derive(Debug, Default)]
pub struct PrimitiveRegistry {
    pub starfield: Option<Primitive>,
    pub raw_edges: Vec<Primitive>,
    pub nodes: Vec<Primitive>,
    pub representatives: Vec<RepresentativePair>,
    pub beams: Vec<Primitive>,
    pub labels: Vec<Primitive>,
}

impl PrimitiveRegistry {
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Every primitive, background first.
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.starfield
            .iter()
            .chain(&self.raw_edges)
            .chain(&self.nodes)
            .chain(
                self.representatives
                    .iter()
                    .flat_map(|p| [&p.core, &p.glow]),
            )
            .chain(&self.beams)
            .chain(&self.labels)
    }

    /// Dispose the data-driven groups; the starfield survives.
    pub fn clear<B: RenderBackend + ?Sized>(&mut self, backend: &mut B) {
        dispose_all(backend, self.raw_edges.drain(..));
        self.clear_scope(RebuildScope::ALL, backend);
    }

    /// Dispose the groups named by `scope`. Representatives take their
    /// labels with them.
    pub fn clear_scope<B: RenderBackend + ?Sized>(&mut self, scope: RebuildScope, backend: &mut B) {
        if scope.nodes {
            dispose_all(backend, self.nodes.drain(..));
        }
        if scope.representatives {
            dispose_all(
                backend,
                self.representatives
                    .drain(..)
                    .flat_map(|p| [p.core, p.glow]),
            );
            dispose_all(backend, self.labels.drain(..));
        }
        if scope.connections {
            dispose_all(backend, self.beams.drain(..));
        }
    }

    /// Dispose everything, starfield included.
    pub fn clear_all<B: RenderBackend + ?Sized>(&mut self, backend: &mut B) {
        self.clear(backend);
        dispose_all(backend, self.starfield.take());
    }
}

fn dispose_all<B: RenderBackend + ?Sized>(
    backend: &mut B,
    prims: impl IntoIterator<Item = Primitive>,
) {
    for p in prims {
        backend.dispose(p.handle);
    }
}
