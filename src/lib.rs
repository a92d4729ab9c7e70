#![cfg(target_arch = "wasm32")]
//! Browser studio: a hand-drawn notation pad and a draggable spatial audio
//! room, sharing one Web Audio context.

mod audio;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod playback;
mod render;
mod synth;

use crate::core::{NotationState, SourceSet, SpatialProject, SpatialScene};
use crate::playback::{Playback, SharedPlayback};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

static STARTED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Info);
    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("[init] start called twice, ignoring");
        return;
    }
    spawn_local(async {
        if let Err(e) = init().await {
            log::error!("[init] failed: {e:#}");
            overlay::report_error("The studio failed to start. Reload the page.");
        }
    });
}

fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("#{id} is not a canvas"))
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let staff_canvas = canvas_by_id(&document, "staff-canvas")?;
    let spatial_canvas = canvas_by_id(&document, "spatial-canvas")?;
    let staff_ctx = render::context_2d(&staff_canvas)
        .ok_or_else(|| anyhow::anyhow!("no 2d context on #staff-canvas"))?;
    let spatial_ctx = render::context_2d(&spatial_canvas)
        .ok_or_else(|| anyhow::anyhow!("no 2d context on #spatial-canvas"))?;

    let notation = Rc::new(RefCell::new(NotationState::new()));
    let scene = Rc::new(RefCell::new(SpatialScene::with_demo_sources()));

    let master_volume = scene.borrow().master_volume;
    let playback: SharedPlayback = Rc::new(RefCell::new(build_playback(master_volume)));
    if playback.borrow().is_none() {
        overlay::show_error(
            &document,
            "Web Audio is not available in this browser; playback is disabled.",
        );
    }

    events::wire_notation_input(events::NotationWiring {
        canvas: staff_canvas.clone(),
        notation: notation.clone(),
    });
    events::wire_spatial_input(events::SpatialWiring {
        canvas: spatial_canvas.clone(),
        scene: scene.clone(),
        playback: playback.clone(),
    });

    wire_controls(&document, &notation, &scene, &playback);

    overlay::show(&document);
    {
        let overlay_document = document.clone();
        let playback = playback.clone();
        dom::add_click_listener(&document, "overlay-ok", move || {
            overlay::hide(&overlay_document);
            // Resume under the click gesture so later play buttons are cheap.
            if let Some(p) = playback.borrow().as_ref() {
                _ = p.audio_ctx.resume();
            }
        });
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        notation,
        scene,
        playback,
        staff_canvas,
        staff_ctx,
        spatial_canvas,
        spatial_ctx,
        last_instant: Instant::now(),
        pulse_phase: 0.0,
    }));
    frame::start_loop(frame_ctx);

    log::info!("[init] studio ready");
    Ok(())
}

fn build_playback(master_volume: f32) -> Option<Playback> {
    let audio_ctx = match web::AudioContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("[init] AudioContext unavailable: {e:?}");
            return None;
        }
    };
    Playback::new(audio_ctx, master_volume).ok()
}

fn wire_controls(
    document: &web::Document,
    notation: &Rc<RefCell<NotationState>>,
    scene: &Rc<RefCell<SpatialScene>>,
    playback: &SharedPlayback,
) {
    // Demo / uploaded set transport.
    for (play_id, stop_id, set) in [
        ("btn-demo-play", "btn-demo-stop", SourceSet::Demo),
        ("btn-uploaded-play", "btn-uploaded-stop", SourceSet::Uploaded),
    ] {
        let scene_play = scene.clone();
        let pb_play = playback.clone();
        dom::add_click_listener(document, play_id, move || {
            if set == SourceSet::Uploaded && scene_play.borrow().count_in(set) == 0 {
                overlay::report_error("Upload audio files first.");
                return;
            }
            spawn_local(playback::start_set(pb_play.clone(), scene_play.clone(), set));
        });

        let pb_stop = playback.clone();
        dom::add_click_listener(document, stop_id, move || {
            if let Some(p) = pb_stop.borrow_mut().as_mut() {
                p.stop_set(set);
            }
        });
    }

    let pb_all = playback.clone();
    dom::add_click_listener(document, "btn-stop-all", move || {
        if let Some(p) = pb_all.borrow_mut().as_mut() {
            p.stop_all();
        }
    });

    // Drawn-note transport.
    let notation_play = notation.clone();
    let pb_notes = playback.clone();
    dom::add_click_listener(document, "btn-notes-play", move || {
        let notes = notation_play.borrow().notes.clone();
        spawn_local(playback::start_notes(pb_notes.clone(), notes));
    });
    let pb_notes_stop = playback.clone();
    dom::add_click_listener(document, "btn-notes-stop", move || {
        if let Some(p) = pb_notes_stop.borrow_mut().as_mut() {
            p.stop_notes();
        }
    });

    // Notation editing.
    let notation_undo = notation.clone();
    dom::add_click_listener(document, "btn-undo", move || {
        notation_undo.borrow_mut().undo();
    });
    let notation_clear = notation.clone();
    dom::add_click_listener(document, "btn-clear", move || {
        notation_clear.borrow_mut().clear();
    });
    let notation_add = notation.clone();
    dom::add_click_listener(document, "btn-add-staff", move || {
        if !notation_add.borrow_mut().add_staff() {
            log::info!("[staff] staff cap reached");
        }
    });
    let notation_remove = notation.clone();
    dom::add_click_listener(document, "btn-remove-staff", move || {
        notation_remove.borrow_mut().remove_last_staff();
    });

    // Volume sliders.
    let scene_master = scene.clone();
    let pb_master = playback.clone();
    dom::add_value_listener(document, "master-volume", move |v| {
        scene_master.borrow_mut().set_master_volume(v);
        if let Some(p) = pb_master.borrow().as_ref() {
            p.set_master_volume(v);
        }
    });
    let scene_source = scene.clone();
    let pb_source = playback.clone();
    dom::add_value_listener(document, "source-volume", move |v| {
        let changed = {
            let mut s = scene_source.borrow_mut();
            let Some(index) = s.focused else { return };
            s.set_volume(index, v).map(|src| src.id.clone())
        };
        if let Some(id) = changed {
            if let Some(p) = pb_source.borrow().as_ref() {
                p.update_volume(&id, v);
            }
        }
    });

    // Audio file uploads become new positioned sources.
    let scene_upload = scene.clone();
    dom::add_file_listener(document, "audio-upload", move |input| {
        let Some(files) = input.files() else { return };
        let batch_len = files.length() as usize;
        for i in 0..files.length() {
            let Some(file) = files.get(i) else { continue };
            let url = match web::Url::create_object_url_with_blob(&file) {
                Ok(url) => url,
                Err(e) => {
                    log::warn!("[upload] object URL failed: {e:?}");
                    continue;
                }
            };
            let name = file.name();
            let label = name
                .rsplit_once('.')
                .map(|(stem, _)| stem.to_string())
                .unwrap_or_else(|| name.clone());
            let id = format!("upload_{}_{}", js_sys::Date::now() as u64, i);
            scene_upload
                .borrow_mut()
                .add_uploaded(id, label, url, Some(name), i as usize, batch_len);
        }
        input.set_value("");
        log::info!("[upload] added {batch_len} file sources");
    });

    // Project save/load.
    let scene_save = scene.clone();
    dom::add_click_listener(document, "btn-save-project", move || {
        let project = SpatialProject::from_scene(&scene_save.borrow());
        match project.to_json() {
            Ok(json) => {
                let name = format!("spatial-project-{}.json", js_sys::Date::now() as u64);
                if let Some(doc) = dom::window_document() {
                    dom::trigger_download(&doc, &name, &json);
                }
            }
            Err(e) => overlay::report_error(&format!("Could not serialize project: {e}")),
        }
    });

    let scene_load = scene.clone();
    let pb_load = playback.clone();
    dom::add_file_listener(document, "project-upload", move |input| {
        let Some(file) = input.files().and_then(|f| f.get(0)) else {
            return;
        };
        input.set_value("");
        let scene = scene_load.clone();
        let playback = pb_load.clone();
        spawn_local(async move {
            let text = match JsFuture::from(file.text()).await {
                Ok(v) => v.as_string().unwrap_or_default(),
                Err(e) => {
                    log::warn!("[project] read failed: {e:?}");
                    return;
                }
            };
            match SpatialProject::from_json(&text) {
                Ok(project) => {
                    if let Some(p) = playback.borrow_mut().as_mut() {
                        p.stop_all();
                    }
                    let loaded = project.into_scene();
                    if let Some(p) = playback.borrow().as_ref() {
                        p.set_master_volume(loaded.master_volume);
                    }
                    let count = loaded.sources.len();
                    *scene.borrow_mut() = loaded;
                    log::info!("[project] loaded {count} sources");
                }
                Err(e) => {
                    overlay::report_error(&format!("Project file could not be parsed: {e}"));
                }
            }
        });
    });
}
