//! Pointer wiring for the spatial canvas: down hit-tests and picks one
//! source, move drags it with live pan updates on any playing chain, up
//! releases the selection.

use crate::core::SpatialScene;
use crate::events::pointer_canvas_px;
use crate::playback::SharedPlayback;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct SpatialWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<SpatialScene>>,
    pub playback: SharedPlayback,
}

/// Canvas pixels -> engine space (listener at the canvas center).
fn to_engine(canvas: &web::HtmlCanvasElement, pos: Vec2) -> Vec2 {
    Vec2::new(
        pos.x - canvas.width() as f32 / 2.0,
        pos.y - canvas.height() as f32 / 2.0,
    )
}

pub fn wire_spatial_input(w: SpatialWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
}

fn wire_pointerdown(w: &SpatialWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let p = to_engine(&w.canvas, pointer_canvas_px(&ev, &w.canvas));
        if let Some(index) = w.scene.borrow_mut().begin_drag(p) {
            log::info!("[pointer] begin drag on source {}", index);
            _ = w.canvas.set_pointer_capture(ev.pointer_id());
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &SpatialWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let p = to_engine(&w.canvas, pointer_canvas_px(&ev, &w.canvas));
        let moved = w.scene.borrow_mut().drag_to(p);
        if let Some((id, position)) = moved {
            // Pan follows the drag immediately for whichever set is live.
            if let Some(p) = w.playback.borrow().as_ref() {
                p.update_position(&id, position.x);
            }
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &SpatialWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.scene.borrow_mut().end_drag();
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}
