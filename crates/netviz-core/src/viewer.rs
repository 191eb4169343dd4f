//! Ties parameters, the scene and the control surface together.
//!
//! A [`Viewer`] owns the backend, the control surface, the parameter record,
//! the orbit camera and the primitive registry. The platform layer forwards
//! data, control changes, pointer motion and frame ticks to it.

use crate::backend::RenderBackend;
use crate::builder::SceneBuilder;
use crate::camera::OrbitCamera;
use crate::dataset::{DataError, Dataset, DatasetStats, NetworkFile};
use crate::params::{DisplayState, ParamChange, ParamField, ParamValue, RebuildScope, VisualParams};
use crate::pick::{describe, PickController, Picked, Tooltip};
use crate::registry::PrimitiveRegistry;
use crate::restyle::{restyle, RestyleReport};
use glam::Vec2;

/// Hints appended to every load failure message.
pub const LOAD_CHECKLIST: [&str; 3] = [
    "The server is running from the project root",
    "data/network_data.json exists",
    "The browser console (F12) has details",
];

/// Where the viewer reports state to the user.
pub trait ControlSurface {
    fn show_params(&mut self, state: &DisplayState);
    fn show_stats(&mut self, stats: &DatasetStats);
    /// `pointer` is in page pixels; `None` hides the tooltip.
    fn show_tooltip(&mut self, tooltip: Option<&Tooltip>, pointer: Vec2);
    /// Data loaded and the scene is built.
    fn show_ready(&mut self);
    fn show_error(&mut self, message: &str);
}

/// Diagnostic followed by the checklist, one item per line.
pub fn load_error_message(diagnostic: &str) -> String {
    let mut message = format!("Error loading data: {diagnostic}\n\nCheck:");
    for item in LOAD_CHECKLIST {
        message.push_str("\n- ");
        message.push_str(item);
    }
    message
}

pub struct Viewer<B: RenderBackend, S: ControlSurface> {
    backend: B,
    surface: S,
    params: VisualParams,
    camera: OrbitCamera,
    builder: SceneBuilder,
    picker: PickController,
    dataset: Option<Dataset>,
    registry: PrimitiveRegistry,
}

impl<B: RenderBackend, S: ControlSurface> Viewer<B, S> {
    pub fn new(backend: B, mut surface: S, builder: SceneBuilder) -> Self {
        let params = VisualParams::default();
        surface.show_params(&params.display_state());
        Self {
            backend,
            surface,
            params,
            camera: OrbitCamera::default(),
            builder,
            picker: PickController::default(),
            dataset: None,
            registry: PrimitiveRegistry::default(),
        }
    }

    /// Apply the file's parameter overrides, build the whole scene and
    /// report stats. Replaces any previously loaded scene.
    pub fn load(&mut self, file: NetworkFile) -> RestyleReport {
        let NetworkFile {
            dataset,
            threejs_params,
        } = file;
        if let Some(overrides) = &threejs_params {
            self.params.load(overrides);
        }
        self.registry.clear_all(&mut self.backend);
        log::info!(
            "[load] {} communities, {} locations, {} edges",
            dataset.communities.len(),
            dataset.locations.len(),
            dataset.edges.len()
        );
        self.registry = self
            .builder
            .build(&dataset, &self.params, &mut self.backend);
        let report = restyle(
            &mut self.registry,
            &self.params,
            &mut self.camera,
            &mut self.backend,
        );
        self.surface.show_stats(&dataset.stats());
        self.surface.show_params(&self.params.display_state());
        self.dataset = Some(dataset);
        self.surface.show_ready();
        report
    }

    /// Parse and load the data file. A parse error is reported to the
    /// surface before it is returned.
    pub fn load_json(&mut self, text: &str) -> Result<RestyleReport, DataError> {
        match NetworkFile::from_json(text) {
            Ok(file) => Ok(self.load(file)),
            Err(e) => {
                self.report_load_failure(&e.to_string());
                Err(e)
            }
        }
    }

    pub fn report_load_failure(&mut self, diagnostic: &str) {
        log::error!("[load] {diagnostic}");
        self.surface.show_error(&load_error_message(diagnostic));
    }

    /// Single entry point for control changes: restyle in place or rebuild
    /// the dependent groups, then refresh the panel.
    pub fn on_param_changed(&mut self, field: ParamField, value: ParamValue) -> ParamChange {
        let change = self.params.set(field, value);
        match change {
            ParamChange::Unchanged => {
                log::debug!("[params] ignored {value:?} for {}", field.key());
                return change;
            }
            ParamChange::Restyle => {}
            ParamChange::Rebuild(scope) => self.rebuild(scope),
        }
        self.apply_style();
        self.surface.show_params(&self.params.display_state());
        change
    }

    /// Restore the defaults and rebuild whatever geometry they affect.
    pub fn reset(&mut self) {
        let before = self.params.clone();
        self.params.reset();
        let scope = ParamField::ALL
            .into_iter()
            .filter(|f| before.get(*f) != self.params.get(*f))
            .fold(RebuildScope::NONE, |acc, f| acc.union(f.rebuild_scope()));
        self.rebuild(scope);
        self.apply_style();
        self.surface.show_params(&self.params.display_state());
    }

    pub fn display_state(&self) -> DisplayState {
        self.params.display_state()
    }

    /// Pick under the pointer and update the tooltip. `ndc` locates the
    /// pointer on the canvas; `pointer` is where the tooltip goes.
    pub fn hover(&mut self, ndc: Vec2, pointer: Vec2) -> Option<Picked> {
        let ray = self.camera.ray_from_ndc(ndc);
        let picked = self.picker.pick(&ray, &self.camera, &self.registry);
        let tooltip = picked
            .as_ref()
            .zip(self.dataset.as_ref())
            .and_then(|(p, ds)| describe(p, ds));
        self.surface.show_tooltip(tooltip.as_ref(), pointer);
        picked
    }

    pub fn clear_hover(&mut self) {
        self.surface.show_tooltip(None, Vec2::ZERO);
    }

    /// Per-frame camera update.
    pub fn tick(&mut self, dt: f32) {
        self.camera.update(dt);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    pub fn params(&self) -> &VisualParams {
        &self.params
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn registry(&self) -> &PrimitiveRegistry {
        &self.registry
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Backend and camera together, for drawing a frame.
    pub fn render_parts(&mut self) -> (&mut B, &OrbitCamera) {
        (&mut self.backend, &self.camera)
    }

    fn rebuild(&mut self, scope: RebuildScope) {
        if scope.is_empty() {
            return;
        }
        let Some(dataset) = &self.dataset else {
            return;
        };
        self.builder.rebuild(
            &mut self.registry,
            scope,
            dataset,
            &self.params,
            &mut self.backend,
        );
    }

    fn apply_style(&mut self) -> RestyleReport {
        restyle(
            &mut self.registry,
            &self.params,
            &mut self.camera,
            &mut self.backend,
        )
    }
}
