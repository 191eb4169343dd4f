//! In-place style updates that need no new geometry.

use crate::backend::{PrimitiveHandle, RenderBackend, RenderError};
use crate::camera::OrbitCamera;
use crate::palette::emissive_intensity;
use crate::params::VisualParams;
use crate::registry::{Primitive, PrimitiveRegistry};

/// Outcome of one restyle pass: property writes that succeeded and failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RestyleReport {
    pub updated: usize,
    pub failed: usize,
}

impl RestyleReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, group: &str, handle: PrimitiveHandle, result: Result<(), RenderError>) {
        match result {
            Ok(()) => self.updated += 1,
            Err(e) => {
                self.failed += 1;
                log::warn!("[restyle] {group} {handle}: {e}");
            }
        }
    }
}

/// Push visibility, opacity and intensity from `params` onto every existing
/// primitive. A failing primitive is logged and counted; everything else is
/// still updated.
pub fn restyle<B: RenderBackend + ?Sized>(
    registry: &mut PrimitiveRegistry,
    params: &VisualParams,
    camera: &mut OrbitCamera,
    backend: &mut B,
) -> RestyleReport {
    let mut report = RestyleReport::default();

    backend.set_bloom_strength(params.bloom_strength);
    camera.auto_rotate = params.auto_rotate;

    if let Some(stars) = &registry.starfield {
        let result = backend.set_opacity(stars.handle, params.star_opacity);
        report.record("starfield", stars.handle, result);
    }

    for label in &mut registry.labels {
        set_visible(&mut report, "label", label, params.show_labels, backend);
    }

    for edges in &mut registry.raw_edges {
        set_visible(&mut report, "edges", edges, params.show_edges, backend);
        let result = backend.set_opacity(edges.handle, params.edge_opacity);
        report.record("edges", edges.handle, result);
    }

    for beam in &mut registry.beams {
        set_visible(&mut report, "beam", beam, params.show_connections, backend);
        let result = backend.set_opacity(beam.handle, params.connection_opacity);
        report.record("beam", beam.handle, result);
        let result = backend.set_beam_bloom(beam.handle, params.bloom_strength);
        report.record("beam", beam.handle, result);
    }

    let cores = registry.representatives.iter().map(|pair| &pair.core);
    for prim in registry.nodes.iter().chain(cores) {
        let Some(emissive) = prim.emissive else {
            continue;
        };
        let intensity = emissive_intensity(emissive.color, params.bloom_strength, emissive.base);
        let result = backend.set_emissive_intensity(prim.handle, intensity);
        report.record("emissive", prim.handle, result);
    }

    if !report.is_clean() {
        log::warn!(
            "[restyle] {} of {} updates failed",
            report.failed,
            report.failed + report.updated
        );
    }
    report
}

fn set_visible<B: RenderBackend + ?Sized>(
    report: &mut RestyleReport,
    group: &str,
    prim: &mut Primitive,
    visible: bool,
    backend: &mut B,
) {
    let result = backend.set_visible(prim.handle, visible);
    if result.is_ok() {
        prim.visible = visible;
    }
    report.record(group, prim.handle, result);
}
