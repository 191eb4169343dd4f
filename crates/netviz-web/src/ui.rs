use crate::constants::{
    PANEL_ID, PANEL_OPEN_CLASS, PANEL_TOGGLE_CLOSED, PANEL_TOGGLE_ID, PANEL_TOGGLE_OPEN,
    RESET_BUTTON_ID, STAT_COMMUNITIES_IDS, STAT_EDGES_IDS, STAT_LOCATIONS_IDS, TOOLTIP_ID,
    TOOLTIP_OFFSET_PX,
};
use crate::dom;
use crate::overlay;
use crate::WebViewer;
use glam::Vec2;
use netviz_core::dataset::DatasetStats;
use netviz_core::params::{DisplayState, ParamField, ParamValue};
use netviz_core::pick::Tooltip;
use netviz_core::viewer::ControlSurface;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A panel control bound to one parameter.
pub struct Control {
    pub field: ParamField,
    pub input_id: &'static str,
    /// Text readout next to sliders.
    pub label_id: Option<&'static str>,
}

pub const CONTROLS: [Control; 11] = [
    Control {
        field: ParamField::NodeSize,
        input_id: "iSize",
        label_id: Some("vSize"),
    },
    Control {
        field: ParamField::BloomStrength,
        input_id: "iBloom",
        label_id: Some("vBloom"),
    },
    Control {
        field: ParamField::Spread,
        input_id: "iSpread",
        label_id: Some("vSpread"),
    },
    Control {
        field: ParamField::ConnectionWidth,
        input_id: "iConn",
        label_id: Some("vConn"),
    },
    Control {
        field: ParamField::ConnectionOpacity,
        input_id: "iConnOp",
        label_id: Some("vConnOp"),
    },
    Control {
        field: ParamField::EdgeOpacity,
        input_id: "iEdge",
        label_id: Some("vEdge"),
    },
    Control {
        field: ParamField::StarOpacity,
        input_id: "iStar",
        label_id: Some("vStar"),
    },
    Control {
        field: ParamField::ShowEdges,
        input_id: "cEdge",
        label_id: None,
    },
    Control {
        field: ParamField::ShowConnections,
        input_id: "cConn",
        label_id: None,
    },
    Control {
        field: ParamField::AutoRotate,
        input_id: "cRot",
        label_id: None,
    },
    Control {
        field: ParamField::ShowLabels,
        input_id: "cLabel",
        label_id: None,
    },
];

/// The page's control panel, stats, tooltip and loading overlay.
pub struct DomSurface {
    document: web::Document,
}

impl DomSurface {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    fn input(&self, id: &str) -> Option<web::HtmlInputElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    }
}

impl ControlSurface for DomSurface {
    fn show_params(&mut self, state: &DisplayState) {
        for control in &CONTROLS {
            let Some(entry) = state.entry(control.field) else {
                continue;
            };
            if let Some(input) = self.input(control.input_id) {
                match entry.value {
                    ParamValue::Number(n) => input.set_value(&n.to_string()),
                    ParamValue::Flag(b) => input.set_checked(b),
                }
            }
            if let Some(label) = control.label_id {
                dom::set_text(&self.document, label, &entry.text);
            }
        }
    }

    fn show_stats(&mut self, stats: &DatasetStats) {
        let groups = [
            (STAT_COMMUNITIES_IDS, stats.communities),
            (STAT_LOCATIONS_IDS, stats.locations),
            (STAT_EDGES_IDS, stats.edges),
        ];
        for (ids, count) in groups {
            for id in ids {
                dom::set_text(&self.document, id, &count.to_string());
            }
        }
    }

    fn show_tooltip(&mut self, tooltip: Option<&Tooltip>, pointer: Vec2) {
        let Some(el) = self
            .document
            .get_element_by_id(TOOLTIP_ID)
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        else {
            return;
        };
        let style = el.style();
        match tooltip {
            Some(t) => {
                el.set_inner_html(&tooltip_html(t));
                let _ = style.set_property("display", "block");
                let _ = style.set_property(
                    "left",
                    &format!("{}px", f64::from(pointer.x) + TOOLTIP_OFFSET_PX),
                );
                let _ = style.set_property(
                    "top",
                    &format!("{}px", f64::from(pointer.y) + TOOLTIP_OFFSET_PX),
                );
            }
            None => {
                let _ = style.set_property("display", "none");
            }
        }
    }

    fn show_ready(&mut self) {
        overlay::hide(&self.document);
    }

    fn show_error(&mut self, message: &str) {
        overlay::show_error(&self.document, message);
    }
}

fn tooltip_html(tooltip: &Tooltip) -> String {
    let mut html = format!("<strong>{}</strong>", overlay::escape_html(&tooltip.title));
    for line in &tooltip.lines {
        html.push_str("<br>");
        html.push_str(&overlay::escape_html(line));
    }
    html
}

/// Route slider `input` and checkbox `change` events into the viewer.
pub fn wire_controls(document: &web::Document, viewer: &Rc<RefCell<WebViewer>>) {
    for control in &CONTROLS {
        let field = control.field;
        let viewer = viewer.clone();
        let event = if field.is_flag() { "change" } else { "input" };
        dom::add_element_listener::<web::HtmlInputElement>(
            document,
            control.input_id,
            event,
            move |input| {
                let value = if field.is_flag() {
                    ParamValue::Flag(input.checked())
                } else {
                    match input.value().parse::<f32>() {
                        Ok(n) => ParamValue::Number(n),
                        Err(_) => {
                            log::warn!("[ui] {} is not a number: {:?}", field.key(), input.value());
                            return;
                        }
                    }
                };
                viewer.borrow_mut().on_param_changed(field, value);
            },
        );
    }

    let reset_viewer = viewer.clone();
    dom::add_click_listener(document, RESET_BUTTON_ID, move || {
        reset_viewer.borrow_mut().reset();
    });

    let doc = document.clone();
    dom::add_click_listener(document, PANEL_TOGGLE_ID, move || toggle_panel(&doc));
}

pub fn toggle_panel(document: &web::Document) {
    let (Some(panel), Some(button)) = (
        document.get_element_by_id(PANEL_ID),
        document.get_element_by_id(PANEL_TOGGLE_ID),
    ) else {
        return;
    };
    let classes = panel.class_list();
    if classes.contains(PANEL_OPEN_CLASS) {
        let _ = classes.remove_1(PANEL_OPEN_CLASS);
        button.set_text_content(Some(PANEL_TOGGLE_CLOSED));
    } else {
        let _ = classes.add_1(PANEL_OPEN_CLASS);
        button.set_text_content(Some(PANEL_TOGGLE_OPEN));
    }
}
