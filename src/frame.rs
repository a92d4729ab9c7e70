//! requestAnimationFrame loop. Redraws both views every frame as a full-scene
//! redraw, no diffing.

use crate::core::NotationState;
use crate::core::SpatialScene;
use crate::playback::SharedPlayback;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Breathing rate of the volume rings while audio runs.
const PULSE_RATE_HZ: f32 = 1.2;

pub struct FrameContext {
    pub notation: Rc<RefCell<NotationState>>,
    pub scene: Rc<RefCell<SpatialScene>>,
    pub playback: SharedPlayback,

    pub staff_canvas: web::HtmlCanvasElement,
    pub staff_ctx: web::CanvasRenderingContext2d,
    pub spatial_canvas: web::HtmlCanvasElement,
    pub spatial_ctx: web::CanvasRenderingContext2d,

    pub last_instant: Instant,
    pub pulse_phase: f32,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let playing = self
            .playback
            .borrow()
            .as_ref()
            .map(|p| p.any_playing())
            .unwrap_or(false);
        if playing {
            self.pulse_phase = (self.pulse_phase
                + dt * PULSE_RATE_HZ * std::f32::consts::TAU)
                % std::f32::consts::TAU;
        } else {
            self.pulse_phase = 0.0;
        }
        let pulse = self.pulse_phase.sin() * 0.5 + 0.5;

        // The notation canvas grows when staves are appended.
        let wanted_height = self.notation.borrow().canvas_height() as u32;
        if self.staff_canvas.height() != wanted_height {
            self.staff_canvas.set_height(wanted_height);
        }

        render::draw_notation(&self.staff_ctx, &self.staff_canvas, &self.notation.borrow());
        render::draw_spatial(
            &self.spatial_ctx,
            &self.spatial_canvas,
            &self.scene.borrow(),
            pulse,
            playing,
        );
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
