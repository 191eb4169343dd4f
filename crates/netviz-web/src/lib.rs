#![cfg(target_arch = "wasm32")]
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod ui;

use constants::{CANVAS_ID, DATA_URL, HTTP_ERROR_HINT};
use gloo_net::http::Request;
use instant::Instant;
use netviz_core::{SceneBuilder, Viewer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub(crate) type WebViewer = Viewer<render::GpuState<'static>, ui::DomSurface>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("netviz-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    // Surface borrows the canvas for the lifetime of the page
    let leaked_canvas: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let gpu = match render::GpuState::new(leaked_canvas).await {
        Ok(gpu) => gpu,
        Err(e) => {
            overlay::show_error(&document, &format!("WebGPU unavailable: {e}"));
            return Err(e);
        }
    };

    let mut viewer = Viewer::new(gpu, ui::DomSurface::new(document.clone()), SceneBuilder::new());
    viewer.set_aspect(width as f32 / height.max(1) as f32);
    let viewer = Rc::new(RefCell::new(viewer));

    ui::wire_controls(&document, &viewer);
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        viewer: viewer.clone(),
        drag: Rc::new(RefCell::new(input::DragState::default())),
    });
    frame::start_loop(Rc::new(RefCell::new(frame::FrameContext {
        viewer: viewer.clone(),
        canvas,
        last_instant: Instant::now(),
    })));

    load_network(&viewer).await;
    Ok(())
}

async fn load_network(viewer: &Rc<RefCell<WebViewer>>) {
    match fetch_text(DATA_URL).await {
        Ok(text) => {
            // Parse failures are reported to the overlay by the viewer
            if let Ok(report) = viewer.borrow_mut().load_json(&text) {
                log::info!("[load] {report:?}");
            }
        }
        Err(e) => viewer.borrow_mut().report_load_failure(&e.to_string()),
    }
}

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let resp = Request::get(url).send().await?;
    if !resp.ok() {
        anyhow::bail!(
            "HTTP {}: {}. {}",
            resp.status(),
            resp.status_text(),
            HTTP_ERROR_HINT
        );
    }
    Ok(resp.text().await?)
}
