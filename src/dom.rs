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
    }
}

/// Wire an `input` event on a slider/number field; the handler receives the
/// parsed value. Unparsable values are ignored.
pub fn add_value_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(f32) + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
            else {
                return;
            };
            if let Ok(v) = input.value().parse::<f32>() {
                handler(v);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Wire a `change` event on a file input; the handler receives the element
/// so it can walk the selected files.
pub fn add_file_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(web::HtmlInputElement) + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
            if let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
            {
                handler(input);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Offer a text document as a browser download via a transient anchor.
pub fn trigger_download(document: &web::Document, file_name: &str, text: &str) {
    let encoded = String::from(js_sys::encode_uri_component(text));
    let href = format!("data:application/json;charset=utf-8,{encoded}");
    let Ok(anchor) = document.create_element("a") else {
        return;
    };
    _ = anchor.set_attribute("href", &href);
    _ = anchor.set_attribute("download", file_name);
    if let Ok(el) = anchor.dyn_into::<web::HtmlElement>() {
        el.click();
    }
}
