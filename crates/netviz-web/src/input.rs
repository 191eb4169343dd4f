use glam::Vec2;
use netviz_core::camera::OrbitCamera;
use web_sys as web;

/// Primary-button drag that orbits the camera.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, at: Vec2) {
        self.active = true;
        self.last = at;
    }

    /// Movement since the previous position, or `None` outside a drag.
    pub fn move_to(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some(delta)
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}

/// Pointer position relative to the canvas box, in CSS pixels.
#[inline]
pub fn pointer_css_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

#[inline]
pub fn pointer_client(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
pub fn canvas_css_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}

/// Normalized device coordinates of a CSS-pixel position inside a box of
/// `css_size`. `None` for an empty box or a point outside it.
pub fn css_px_to_ndc(px: Vec2, css_size: Vec2) -> Option<Vec2> {
    if css_size.x <= 0.0 || css_size.y <= 0.0 {
        return None;
    }
    if px.x < 0.0 || px.y < 0.0 || px.x > css_size.x || px.y > css_size.y {
        return None;
    }
    Some(OrbitCamera::pixel_to_ndc(px, css_size))
}

/// Wheel delta in pixels for any `deltaMode`.
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    let scale = match delta_mode {
        1 => 16.0,  // lines
        2 => 800.0, // pages
        _ => 1.0,
    };
    (delta_y * scale) as f32
}
