use crate::constants::{LABEL_BASELINE_Y, LABEL_CANVAS_HEIGHT, LABEL_CANVAS_WIDTH, LABEL_FONT};
use glam::Vec3;
use netviz_core::palette::css_hex;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Draw `text` centred on a small transparent canvas and return its RGBA8
/// texels, `LABEL_CANVAS_WIDTH` by `LABEL_CANVAS_HEIGHT`.
pub(crate) fn rasterize_label(text: &str, color: Vec3) -> anyhow::Result<Vec<u8>> {
    let document = web::window()
        .and_then(|w| w.document())
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("element is not a canvas"))?;
    canvas.set_width(LABEL_CANVAS_WIDTH);
    canvas.set_height(LABEL_CANVAS_HEIGHT);
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("get_context: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow::anyhow!("context is not 2d"))?;
    ctx.set_font(LABEL_FONT);
    ctx.set_fill_style_str(&css_hex(color));
    ctx.set_text_align("center");
    ctx.fill_text(text, f64::from(LABEL_CANVAS_WIDTH) / 2.0, LABEL_BASELINE_Y)
        .map_err(|e| anyhow::anyhow!("fill_text: {:?}", e))?;
    let image = ctx
        .get_image_data(
            0.0,
            0.0,
            f64::from(LABEL_CANVAS_WIDTH),
            f64::from(LABEL_CANVAS_HEIGHT),
        )
        .map_err(|e| anyhow::anyhow!("get_image_data: {:?}", e))?;
    Ok(image.data().0)
}
