//! Damped orbit camera.
//!
//! The camera circles `target` on a sphere described by an azimuth around +Y,
//! a polar angle from +Y and a distance. Pointer input accumulates pending
//! deltas; [`OrbitCamera::update`] applies a fraction of them every frame so
//! motion eases out.

use crate::constants::{
    AUTO_ROTATE_SPEED, CAMERA_DAMPING, CAMERA_FAR, CAMERA_FOVY_DEGREES, CAMERA_MAX_DISTANCE,
    CAMERA_MIN_DISTANCE, CAMERA_NEAR, CAMERA_START, ZOOM_STEP,
};
use crate::pick::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::{PI, TAU};

const POLAR_EPSILON: f32 = 1e-6;

#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Angle around +Y, measured from +Z towards +X.
    pub azimuth: f32,
    /// Angle from +Y.
    pub polar: f32,
    pub distance: f32,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Fraction of the pending motion applied per update.
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub auto_rotate: bool,
    /// 2.0 is one turn every 30 seconds.
    pub auto_rotate_speed: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_scale: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(CAMERA_START, Vec3::ZERO, 1.0)
    }
}

impl OrbitCamera {
    /// Camera at `eye` orbiting `target`, with the stock lens and limits.
    pub fn looking_at(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let (azimuth, polar) = if distance > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / distance).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };
        Self {
            target,
            azimuth,
            polar,
            distance,
            aspect,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            damping: CAMERA_DAMPING,
            min_distance: CAMERA_MIN_DISTANCE,
            max_distance: CAMERA_MAX_DISTANCE,
            auto_rotate: true,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_scale: 1.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.polar.sin();
        self.target
            + self.distance
                * Vec3::new(s * self.azimuth.sin(), self.polar.cos(), s * self.azimuth.cos())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space right and up axes of the view, for camera-facing quads.
    pub fn right_up(&self) -> (Vec3, Vec3) {
        let view = self.view_matrix();
        let right = Vec3::new(view.x_axis.x, view.y_axis.x, view.z_axis.x);
        let up = Vec3::new(view.x_axis.y, view.y_axis.y, view.z_axis.y);
        (right, up)
    }

    /// Drag by a pixel delta on a viewport `height` pixels tall. A drag across
    /// the full height is one full turn.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, height: f32) {
        let h = height.max(1.0);
        self.pending_azimuth -= TAU * dx / h;
        self.pending_polar -= TAU * dy / h;
    }

    /// Wheel zoom: scrolling up (negative delta) moves closer.
    pub fn zoom(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.pending_scale *= ZOOM_STEP;
        } else if delta_y > 0.0 {
            self.pending_scale /= ZOOM_STEP;
        }
    }

    /// Advance by `dt` seconds: auto-rotate, damped rotation, zoom and the
    /// distance/polar limits.
    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate {
            self.pending_azimuth -= TAU / 60.0 * self.auto_rotate_speed * dt;
        }
        self.azimuth += self.pending_azimuth * self.damping;
        self.polar += self.pending_polar * self.damping;
        self.polar = self.polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.distance = (self.distance * self.pending_scale)
            .clamp(self.min_distance, self.max_distance);

        self.pending_azimuth *= 1.0 - self.damping;
        self.pending_polar *= 1.0 - self.damping;
        self.pending_scale = 1.0;
    }

    /// Canvas pixel position to normalized device coordinates (+Y up).
    pub fn pixel_to_ndc(px: Vec2, viewport: Vec2) -> Vec2 {
        let w = viewport.x.max(1.0);
        let h = viewport.y.max(1.0);
        Vec2::new(2.0 * px.x / w - 1.0, 1.0 - 2.0 * px.y / h)
    }

    /// Ray from the eye through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        let eye = self.eye();
        Ray::new(eye, far - eye)
    }
}
