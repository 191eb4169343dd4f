//! Turns a dataset and the current parameters into render primitives.
//!
//! The builder owns the shared unit meshes and the starfield RNG. Every add
//! that the backend refuses is logged and skipped; the rest of the group is
//! still built.

use crate::backend::{
    LinesDesc, Material, MeshDesc, PointsDesc, PrimitiveDesc, RenderBackend, SpriteDesc,
    StandardMaterial,
};
use crate::constants::{
    BEAM_RADIAL_SEGMENTS, BEAM_RADIUS_PER_MEMBER, CORE_EMISSIVE_BASE, CORE_METALNESS,
    CORE_ROUGHNESS, CORE_SEGMENTS, EDGE_COLOR, GLOW_OPACITY, GLOW_SCALE, GLOW_SEGMENTS,
    LABEL_HEIGHT, LABEL_LIFT, LABEL_OPACITY, LABEL_WIDTH, NODE_EMISSIVE_BASE, NODE_METALNESS,
    NODE_OPACITY, NODE_ROUGHNESS, NODE_SEGMENTS, STAR_COUNT, STAR_POINT_SIZE,
};
use crate::dataset::{Community, Dataset};
use crate::geometry::{unit_sphere, unit_tube, BeamPlacement, MeshData, Transform};
use crate::palette::{emissive_intensity, hex_to_rgb, palette_color};
use crate::params::{RebuildScope, VisualParams};
use crate::registry::{
    BeamLink, Emissive, PickShape, Primitive, PrimitiveRegistry, PrimitiveTag, RepresentativePair,
};
use crate::starfield;
use fnv::FnvHashSet;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;

struct MeshLibrary {
    node: Rc<MeshData>,
    core: Rc<MeshData>,
    glow: Rc<MeshData>,
    beam: Rc<MeshData>,
}

impl MeshLibrary {
    fn new() -> Self {
        Self {
            node: Rc::new(unit_sphere(NODE_SEGMENTS, NODE_SEGMENTS)),
            core: Rc::new(unit_sphere(CORE_SEGMENTS, CORE_SEGMENTS)),
            glow: Rc::new(unit_sphere(GLOW_SEGMENTS, GLOW_SEGMENTS)),
            beam: Rc::new(unit_tube(BEAM_RADIAL_SEGMENTS, 1.0)),
        }
    }
}

pub struct SceneBuilder {
    rng: StdRng,
    meshes: MeshLibrary,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible starfield.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            meshes: MeshLibrary::new(),
        }
    }

    /// Build every group from scratch.
    pub fn build<B: RenderBackend + ?Sized>(
        &mut self,
        dataset: &Dataset,
        params: &VisualParams,
        backend: &mut B,
    ) -> PrimitiveRegistry {
        let mut registry = PrimitiveRegistry::default();
        log::info!("[scene] building starfield");
        registry.starfield = self.build_starfield(params, backend);
        log::info!("[scene] building {} raw edges", dataset.edges.len());
        registry.raw_edges = build_raw_edges(dataset, params, backend)
            .into_iter()
            .collect();
        self.rebuild(&mut registry, RebuildScope::ALL, dataset, params, backend);
        log::info!(
            "[scene] scene ready: {} nodes, {} communities, {} connections",
            registry.nodes.len(),
            registry.representatives.len(),
            registry.beams.len()
        );
        registry
    }

    /// Dispose and rebuild the groups named by `scope` with the current
    /// parameters. Other groups are left untouched.
    pub fn rebuild<B: RenderBackend + ?Sized>(
        &mut self,
        registry: &mut PrimitiveRegistry,
        scope: RebuildScope,
        dataset: &Dataset,
        params: &VisualParams,
        backend: &mut B,
    ) {
        registry.clear_scope(scope, backend);
        if scope.nodes {
            registry.nodes = self.build_location_nodes(dataset, params, backend);
        }
        if scope.representatives {
            let (pairs, labels) = self.build_representatives(dataset, params, backend);
            registry.representatives = pairs;
            registry.labels = labels;
        }
        if scope.connections {
            registry.beams = self.build_connections(dataset, params, backend);
        }
    }

    fn build_starfield<B: RenderBackend + ?Sized>(
        &mut self,
        params: &VisualParams,
        backend: &mut B,
    ) -> Option<Primitive> {
        let stars = starfield::generate(&mut self.rng, STAR_COUNT);
        let positions: Vec<Vec3> = stars.iter().map(|s| s.position).collect();
        let desc = PrimitiveDesc::Points(PointsDesc {
            positions: positions.clone(),
            colors: stars.iter().map(|s| Vec3::splat(s.brightness)).collect(),
            size: STAR_POINT_SIZE,
            opacity: params.star_opacity,
        });
        register(
            backend,
            desc,
            PrimitiveTag::Background,
            PickShape::Points(positions),
            None,
        )
    }

    fn build_location_nodes<B: RenderBackend + ?Sized>(
        &self,
        dataset: &Dataset,
        params: &VisualParams,
        backend: &mut B,
    ) -> Vec<Primitive> {
        log::info!("[scene] building {} location nodes", dataset.locations.len());
        let radius = location_radius(params);
        dataset
            .locations
            .iter()
            .enumerate()
            .filter_map(|(i, loc)| {
                let color = palette_color(loc.community);
                let center = loc.position() * params.spread;
                let desc = PrimitiveDesc::Mesh(MeshDesc {
                    mesh: self.meshes.node.clone(),
                    transform: Transform::sphere(center, radius),
                    material: Material::Standard(StandardMaterial {
                        color: Vec3::ONE,
                        gradient_map: Some(color),
                        emissive: color,
                        emissive_intensity: emissive_intensity(
                            color,
                            params.bloom_strength,
                            NODE_EMISSIVE_BASE,
                        ),
                        metalness: NODE_METALNESS,
                        roughness: NODE_ROUGHNESS,
                        opacity: NODE_OPACITY,
                    }),
                    visible: true,
                });
                register(
                    backend,
                    desc,
                    PrimitiveTag::Location(i),
                    PickShape::Sphere { center, radius },
                    Some(Emissive {
                        color,
                        base: NODE_EMISSIVE_BASE,
                    }),
                )
            })
            .collect()
    }

    fn build_representatives<B: RenderBackend + ?Sized>(
        &self,
        dataset: &Dataset,
        params: &VisualParams,
        backend: &mut B,
    ) -> (Vec<RepresentativePair>, Vec<Primitive>) {
        log::info!(
            "[scene] building {} community representatives",
            dataset.communities.len()
        );
        let mut pairs = Vec::with_capacity(dataset.communities.len());
        let mut labels = Vec::with_capacity(dataset.communities.len());
        for (i, community) in dataset.communities.iter().enumerate() {
            let tag = PrimitiveTag::Representative(i);
            let color = palette_color(community.id);
            let center = community.position() * params.spread;
            let radius = representative_radius(community, params);

            let core = register(
                backend,
                PrimitiveDesc::Mesh(MeshDesc {
                    mesh: self.meshes.core.clone(),
                    transform: Transform::sphere(center, radius),
                    material: Material::Standard(StandardMaterial {
                        color,
                        gradient_map: None,
                        emissive: color,
                        emissive_intensity: emissive_intensity(
                            color,
                            params.bloom_strength,
                            CORE_EMISSIVE_BASE,
                        ),
                        metalness: CORE_METALNESS,
                        roughness: CORE_ROUGHNESS,
                        opacity: 1.0,
                    }),
                    visible: true,
                }),
                tag,
                PickShape::Sphere { center, radius },
                Some(Emissive {
                    color,
                    base: CORE_EMISSIVE_BASE,
                }),
            );
            let Some(core) = core else {
                continue;
            };
            let glow_radius = radius * GLOW_SCALE;
            let glow = register(
                backend,
                PrimitiveDesc::Mesh(MeshDesc {
                    mesh: self.meshes.glow.clone(),
                    transform: Transform::sphere(center, glow_radius),
                    material: Material::Glow {
                        color,
                        opacity: GLOW_OPACITY,
                    },
                    visible: true,
                }),
                tag,
                PickShape::Sphere {
                    center,
                    radius: glow_radius,
                },
                None,
            );
            let Some(glow) = glow else {
                backend.dispose(core.handle);
                continue;
            };
            pairs.push(RepresentativePair { core, glow });

            let scale = Vec2::new(LABEL_WIDTH, LABEL_HEIGHT);
            let label_center = center + Vec3::Y * (radius + LABEL_LIFT);
            let label = register(
                backend,
                PrimitiveDesc::Sprite(SpriteDesc {
                    text: format!("C{}", community.id),
                    color,
                    position: label_center,
                    scale,
                    opacity: LABEL_OPACITY,
                    visible: params.show_labels,
                }),
                tag,
                PickShape::Billboard {
                    center: label_center,
                    half_size: scale * 0.5,
                },
                None,
            );
            labels.extend(label);
        }
        (pairs, labels)
    }

    fn build_connections<B: RenderBackend + ?Sized>(
        &self,
        dataset: &Dataset,
        params: &VisualParams,
        backend: &mut B,
    ) -> Vec<Primitive> {
        let index = dataset.community_index();
        let mut seen: FnvHashSet<(i64, i64)> = FnvHashSet::default();
        let mut beams = Vec::new();
        for community in &dataset.communities {
            for &other_id in &community.connections {
                if community.id >= other_id {
                    continue;
                }
                let Some(&j) = index.get(&other_id) else {
                    log::debug!(
                        "[scene] C{} lists unknown community {other_id}",
                        community.id
                    );
                    continue;
                };
                if !seen.insert((community.id, other_id)) {
                    continue;
                }
                let other = &dataset.communities[j];
                let radius = beam_radius(community.size, other.size, params);
                if !(radius > 0.0) {
                    continue;
                }
                let start = community.position() * params.spread;
                let end = other.position() * params.spread;
                let Some(placement) = BeamPlacement::between(start, end) else {
                    log::debug!(
                        "[scene] C{} and C{other_id} coincide, no beam",
                        community.id
                    );
                    continue;
                };
                let desc = PrimitiveDesc::Mesh(MeshDesc {
                    mesh: self.meshes.beam.clone(),
                    transform: placement.transform(radius),
                    material: Material::Gradient {
                        start: palette_color(community.id),
                        end: palette_color(other.id),
                        bloom: params.bloom_strength,
                        opacity: params.connection_opacity,
                    },
                    visible: params.show_connections,
                });
                let link = BeamLink {
                    from: community.id,
                    to: other_id,
                    from_size: community.size,
                    to_size: other.size,
                };
                beams.extend(register(
                    backend,
                    desc,
                    PrimitiveTag::Connection(link),
                    PickShape::Cylinder { start, end, radius },
                    None,
                ));
            }
        }
        log::info!("[scene] built {} community connections", beams.len());
        beams
    }
}

/// Radius of every location node.
pub fn location_radius(params: &VisualParams) -> f32 {
    params.location_node_size * params.node_size
}

/// Core radius of a community: its member count mapped linearly from
/// `[member_count_min, member_count_max]` onto
/// `[community_size_min, community_size_min + community_size_range]`,
/// clamped at both ends, times the node size.
pub fn representative_radius(community: &Community, params: &VisualParams) -> f32 {
    let span = params.member_count_max - params.member_count_min;
    let norm = if span > 0.0 {
        ((community.size as f32 - params.member_count_min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (params.community_size_min + norm * params.community_size_range) * params.node_size
}

pub fn beam_radius(from_size: u32, to_size: u32, params: &VisualParams) -> f32 {
    let members = (u64::from(from_size) + u64::from(to_size)) as f32;
    BEAM_RADIUS_PER_MEMBER * members * params.connection_width
}

fn build_raw_edges<B: RenderBackend + ?Sized>(
    dataset: &Dataset,
    params: &VisualParams,
    backend: &mut B,
) -> Option<Primitive> {
    if dataset.edges.is_empty() {
        return None;
    }
    let segments: Vec<[Vec3; 2]> = dataset.edges.iter().map(|e| e.segment()).collect();
    let desc = PrimitiveDesc::Lines(LinesDesc {
        segments: segments.clone(),
        color: hex_to_rgb(EDGE_COLOR),
        opacity: params.edge_opacity,
        visible: params.show_edges,
    });
    register(
        backend,
        desc,
        PrimitiveTag::RawEdges,
        PickShape::Segments(segments),
        None,
    )
}

fn register<B: RenderBackend + ?Sized>(
    backend: &mut B,
    desc: PrimitiveDesc,
    tag: PrimitiveTag,
    shape: PickShape,
    emissive: Option<Emissive>,
) -> Option<Primitive> {
    let visible = desc.visible();
    match backend.add(desc) {
        Ok(handle) => Some(Primitive {
            handle,
            tag,
            shape,
            visible,
            emissive,
        }),
        Err(e) => {
            log::warn!("[scene] skipped {tag:?}: {e}");
            None
        }
    }
}
