use crate::constants::MAX_PIXEL_RATIO;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[ui] missing #{element_id}");
    }
}

/// Attach `handler` to `event` on the element with `element_id`. The handler
/// receives the element itself.
pub fn add_element_listener<E: JsCast + Clone + 'static>(
    document: &web::Document,
    element_id: &str,
    event: &str,
    mut handler: impl FnMut(&E) + 'static,
) {
    let Some(el) = document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<E>().ok())
    else {
        log::warn!("[ui] missing #{element_id}");
        return;
    };
    let target = el.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(
        Box::new(move |_ev: web::Event| handler(&target)) as Box<dyn FnMut(web::Event)>,
    );
    if let Some(et) = el.dyn_ref::<web::EventTarget>() {
        let _ = et.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

pub fn pixel_ratio(window: &web::Window) -> f64 {
    window.device_pixel_ratio().clamp(1.0, MAX_PIXEL_RATIO)
}

/// Match the canvas backing store to its CSS box at the capped pixel ratio.
/// Returns the new backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = pixel_ratio(&w);
        let rect = canvas.get_bounding_client_rect();
        let w_px = ((rect.width() * dpr) as u32).max(1);
        let h_px = ((rect.height() * dpr) as u32).max(1);
        if canvas.width() != w_px {
            canvas.set_width(w_px);
        }
        if canvas.height() != h_px {
            canvas.set_height(h_px);
        }
    }
    (canvas.width(), canvas.height())
}
