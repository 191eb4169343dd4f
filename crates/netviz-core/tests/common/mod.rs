// Shared fakes for the host-side tests: a backend that records every call
// and a control surface that records everything shown to the user.

#![allow(dead_code)]

use glam::Vec2;
use netviz_core::backend::{
    Material, MeshDesc, PrimitiveDesc, PrimitiveHandle, RenderBackend, RenderError,
};
use netviz_core::dataset::{DatasetStats, NetworkFile};
use netviz_core::params::DisplayState;
use netviz_core::pick::Tooltip;
use netviz_core::viewer::ControlSurface;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Default)]
pub struct RecordingBackend {
    next: u32,
    pub live: BTreeMap<PrimitiveHandle, PrimitiveDesc>,
    pub disposed: Vec<PrimitiveHandle>,
    pub created: Vec<PrimitiveHandle>,
    pub visible: BTreeMap<PrimitiveHandle, bool>,
    pub opacity: BTreeMap<PrimitiveHandle, f32>,
    pub emissive: BTreeMap<PrimitiveHandle, f32>,
    pub beam_bloom: BTreeMap<PrimitiveHandle, f32>,
    pub bloom_strength: Option<f32>,
    /// Property writes to these handles fail.
    pub broken: BTreeSet<PrimitiveHandle>,
    /// Adds with this 1-based sequence number fail.
    pub reject_adds: BTreeSet<u32>,
    add_calls: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meshes(&self) -> impl Iterator<Item = (PrimitiveHandle, &MeshDesc)> {
        self.live.iter().filter_map(|(h, d)| match d {
            PrimitiveDesc::Mesh(m) => Some((*h, m)),
            _ => None,
        })
    }

    pub fn glow_count(&self) -> usize {
        self.meshes()
            .filter(|(_, m)| matches!(m.material, Material::Glow { .. }))
            .count()
    }

    pub fn beam_count(&self) -> usize {
        self.meshes()
            .filter(|(_, m)| matches!(m.material, Material::Gradient { .. }))
            .count()
    }

    pub fn sprite_count(&self) -> usize {
        self.live
            .values()
            .filter(|d| matches!(d, PrimitiveDesc::Sprite(_)))
            .count()
    }

    fn check(&self, handle: PrimitiveHandle) -> Result<&PrimitiveDesc, RenderError> {
        if self.broken.contains(&handle) {
            return Err(RenderError::Device(format!("lost {handle}")));
        }
        self.live
            .get(&handle)
            .ok_or(RenderError::UnknownPrimitive(handle))
    }
}

impl RenderBackend for RecordingBackend {
    fn add(&mut self, desc: PrimitiveDesc) -> Result<PrimitiveHandle, RenderError> {
        self.add_calls += 1;
        if self.reject_adds.contains(&self.add_calls) {
            return Err(RenderError::Device("out of memory".to_string()));
        }
        self.next += 1;
        let handle = PrimitiveHandle(self.next);
        self.visible.insert(handle, desc.visible());
        self.live.insert(handle, desc);
        self.created.push(handle);
        Ok(handle)
    }

    fn dispose(&mut self, handle: PrimitiveHandle) {
        if self.live.remove(&handle).is_some() {
            self.disposed.push(handle);
        }
    }

    fn set_visible(&mut self, handle: PrimitiveHandle, visible: bool) -> Result<(), RenderError> {
        self.check(handle)?;
        self.visible.insert(handle, visible);
        Ok(())
    }

    fn set_opacity(&mut self, handle: PrimitiveHandle, opacity: f32) -> Result<(), RenderError> {
        self.check(handle)?;
        self.opacity.insert(handle, opacity);
        Ok(())
    }

    fn set_emissive_intensity(
        &mut self,
        handle: PrimitiveHandle,
        intensity: f32,
    ) -> Result<(), RenderError> {
        let lit = matches!(
            self.check(handle)?,
            PrimitiveDesc::Mesh(MeshDesc {
                material: Material::Standard(_),
                ..
            })
        );
        if !lit {
            return Err(RenderError::MissingProperty {
                handle,
                property: "emissive",
            });
        }
        self.emissive.insert(handle, intensity);
        Ok(())
    }

    fn set_beam_bloom(&mut self, handle: PrimitiveHandle, bloom: f32) -> Result<(), RenderError> {
        self.check(handle)?;
        self.beam_bloom.insert(handle, bloom);
        Ok(())
    }

    fn set_bloom_strength(&mut self, strength: f32) {
        self.bloom_strength = Some(strength);
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    pub params: Vec<DisplayState>,
    pub stats: Vec<DatasetStats>,
    pub tooltips: Vec<(Option<Tooltip>, Vec2)>,
    pub ready: usize,
    pub errors: Vec<String>,
}

impl ControlSurface for RecordingSurface {
    fn show_params(&mut self, state: &DisplayState) {
        self.params.push(state.clone());
    }

    fn show_stats(&mut self, stats: &DatasetStats) {
        self.stats.push(*stats);
    }

    fn show_tooltip(&mut self, tooltip: Option<&Tooltip>, pointer: Vec2) {
        self.tooltips.push((tooltip.cloned(), pointer));
    }

    fn show_ready(&mut self) {
        self.ready += 1;
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

// Three communities (0, 1, 2), four locations and two raw edges. Community 0
// lists 1 twice and an unknown id; 1 and 2 list 0 back.
pub const SAMPLE_JSON: &str = r#"{
  "communities": [
    { "id": 0, "position": [0, 0, 0], "size": 50, "reach": 1234567,
      "retweets": 2500, "likes": 0, "connections": [1, 1, 99] },
    { "id": 1, "position": [10, 0, 0], "size": 60, "reach": 900,
      "connections": [0] },
    { "id": 2, "position": [0, 10, 0], "size": 122, "reach": 45000,
      "connections": [0] }
  ],
  "locations": [
    { "id": "loc-a", "position": [1, 1, 1], "community": 0, "reach": 1500 },
    { "id": "loc-b", "position": [9, 1, 0], "community": 1, "reach": 20 },
    { "id": 17, "position": [0, 9, 1], "community": 2, "reach": 0 },
    { "id": "loc-d", "position": [0, 11, -1], "community": 14 }
  ],
  "edges": [
    { "source": [1, 1, 1], "target": [9, 1, 0], "weight": 3 },
    { "source": [9, 1, 0], "target": [0, 9, 1] }
  ],
  "threejs_params": { "node_size": 1.5, "show_labels": false }
}"#;

pub fn sample_file() -> NetworkFile {
    NetworkFile::from_json(SAMPLE_JSON).unwrap()
}
