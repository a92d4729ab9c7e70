use crate::dom;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("start-overlay") {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("start-overlay") {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

/// Surface a user-facing error in the banner element. Used for context-level
/// failures (no audio, resume rejected); per-source failures only log.
pub fn show_error(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id("error-banner") {
        el.set_text_content(Some(message));
        _ = el.class_list().remove_1("hidden");
    }
}

pub fn clear_error(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("error-banner") {
        el.set_text_content(None);
        _ = el.class_list().add_1("hidden");
    }
}

/// Convenience for callers without a document in hand.
pub fn report_error(message: &str) {
    log::error!("[ui] {message}");
    if let Some(document) = dom::window_document() {
        show_error(&document, message);
    }
}
