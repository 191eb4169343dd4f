use crate::dom;
use crate::input;
use crate::WebViewer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<WebViewer>>,
    pub drag: Rc<RefCell<input::DragState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    // pointermove: orbit while dragging, otherwise hover pick
    {
        let viewer = w.viewer.clone();
        let drag = w.drag.clone();
        let canvas = w.canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = input::pointer_css_px(&ev, &canvas);
            let css_size = input::canvas_css_size(&canvas);
            if let Some(delta) = drag.borrow_mut().move_to(pos) {
                viewer
                    .borrow_mut()
                    .camera_mut()
                    .rotate_by_pixels(delta.x, delta.y, css_size.y);
                return;
            }
            let mut v = viewer.borrow_mut();
            match input::css_px_to_ndc(pos, css_size) {
                Some(ndc) => {
                    v.hover(ndc, input::pointer_client(&ev));
                }
                None => v.clear_hover(),
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ = wnd
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // pointerdown
    {
        let drag = w.drag.clone();
        let viewer = w.viewer.clone();
        let canvas_target = w.canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.button() != 0 {
                return;
            }
            drag.borrow_mut()
                .begin(input::pointer_css_px(&ev, &canvas_target));
            viewer.borrow_mut().clear_hover();
            let _ = canvas_target.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup
    {
        let drag = w.drag.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            drag.borrow_mut().end();
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ =
                wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // pointerleave
    {
        let viewer = w.viewer.clone();
        let drag = w.drag.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            if !drag.borrow().active {
                viewer.borrow_mut().clear_hover();
            }
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // wheel: non-passive so the page does not scroll
    {
        let viewer = w.viewer.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            let delta = input::wheel_delta_px(ev.delta_y(), ev.delta_mode());
            viewer.borrow_mut().camera_mut().zoom(delta);
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(false);
        let _ = w
            .canvas
            .add_event_listener_with_callback_and_add_event_listener_options(
                "wheel",
                closure.as_ref().unchecked_ref(),
                &options,
            );
        closure.forget();
    }

    // resize
    {
        let viewer = w.viewer.clone();
        let canvas = w.canvas.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            let (width, height) = dom::sync_canvas_backing_size(&canvas);
            if height > 0 {
                viewer
                    .borrow_mut()
                    .set_aspect(width as f32 / height as f32);
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}
