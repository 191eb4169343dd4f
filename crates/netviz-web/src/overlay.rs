use crate::constants::{LOADING_ID, LOADING_TEXT_ID};
use web_sys as web;

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

/// Replace the loading text with `message`: the first line in red, the rest
/// in smaller type. The overlay stays up.
pub fn show_error(document: &web::Document, message: &str) {
    let Some(el) = document.get_element_by_id(LOADING_TEXT_ID) else {
        return;
    };
    let mut lines = message.lines();
    let head = lines.next().unwrap_or_default();
    let rest: Vec<String> = lines
        .skip_while(|l| l.is_empty())
        .map(escape_html)
        .collect();
    let html = format!(
        "<span style=\"color: #ff6666;\">{}</span><br><br><span style=\"font-size: 14px;\">{}</span>",
        escape_html(head),
        rest.join("<br>")
    );
    el.set_inner_html(&html);
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
