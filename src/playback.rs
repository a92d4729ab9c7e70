//! Playback controller: owns the audio context, the master bus, and the
//! registry of live chains keyed by source id.
//!
//! The demo and uploaded sets start and stop independently; both share the
//! master bus and the spatial canvas. Position and volume edits always land
//! in scene state first, so changes made while a set is still starting take
//! effect the moment its chains exist.

use crate::audio::{self, SourceChain};
use crate::core::constants::SECONDS_PER_BEAT;
use crate::core::{
    midi_to_hz, pan_from_x, Note, PlaybackSet, SetState, SoundSource, SourceSet, SpatialScene,
};
use crate::overlay;
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct Playback {
    pub audio_ctx: web::AudioContext,
    master: web::GainNode,
    demo: PlaybackSet,
    uploaded: PlaybackSet,
    chains: FnvHashMap<String, SourceChain>,
    note_nodes: Vec<(web::OscillatorNode, web::GainNode)>,
}

impl Playback {
    pub fn new(audio_ctx: web::AudioContext, master_volume: f32) -> Result<Self, ()> {
        let master = audio::build_master_bus(&audio_ctx, master_volume)?;
        Ok(Self {
            audio_ctx,
            master,
            demo: PlaybackSet::default(),
            uploaded: PlaybackSet::default(),
            chains: FnvHashMap::default(),
            note_nodes: Vec::new(),
        })
    }

    fn set_mut(&mut self, set: SourceSet) -> &mut PlaybackSet {
        match set {
            SourceSet::Demo => &mut self.demo,
            SourceSet::Uploaded => &mut self.uploaded,
        }
    }

    pub fn any_playing(&self) -> bool {
        self.demo.state == SetState::Playing || self.uploaded.state == SetState::Playing
    }

    /// Master volume scales every active source multiplicatively.
    pub fn set_master_volume(&self, volume: f32) {
        self.master.gain().set_value(volume.clamp(0.0, 1.0));
    }

    /// Follow a dragged source with its live pan, for whichever set happens
    /// to be playing it.
    pub fn update_position(&self, id: &str, x: f32) {
        if let Some(chain) = self.chains.get(id) {
            chain.set_pan(pan_from_x(x));
        }
    }

    pub fn update_volume(&self, id: &str, volume: f32) {
        if let Some(chain) = self.chains.get(id) {
            chain.set_volume(volume);
        }
    }

    /// Build chains for every source of a batch; one bad source is logged
    /// and skipped without aborting its siblings.
    fn spawn_chains(&mut self, sources: &[SoundSource]) {
        for source in sources {
            match audio::build_chain(&self.audio_ctx, source, &self.master) {
                Ok(chain) => {
                    self.chains.insert(source.id.clone(), chain);
                }
                Err(()) => {
                    log::warn!("[playback] skipping source '{}'", source.label);
                }
            }
        }
    }

    /// Tear down every chain of the set and return it to idle. Idempotent:
    /// stopping an idle set is a no-op.
    pub fn stop_set(&mut self, set: SourceSet) {
        let was_active = self.set_mut(set).stop();
        let ids: Vec<String> = self
            .chains
            .iter()
            .filter(|(_, chain)| chain.in_set(set))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &ids {
            if let Some(chain) = self.chains.remove(id) {
                chain.stop();
            }
        }
        if was_active {
            log::info!("[playback] stopped {:?} set ({} chains)", set, ids.len());
        }
    }

    pub fn stop_all(&mut self) {
        self.stop_set(SourceSet::Demo);
        self.stop_set(SourceSet::Uploaded);
        self.stop_notes();
    }

    /// Cancel scheduled envelopes and stop any notation one-shots. Nodes
    /// that already finished are benign no-ops.
    pub fn stop_notes(&mut self) {
        let now = self.audio_ctx.current_time();
        for (osc, env) in self.note_nodes.drain(..) {
            _ = env.gain().cancel_scheduled_values(now);
            env.gain().set_value(0.0);
            _ = osc.stop();
        }
    }

    fn schedule_notes(&mut self, notes: &[Note]) {
        self.stop_notes();
        let now = self.audio_ctx.current_time();
        for (i, note) in notes.iter().enumerate() {
            let start = now + 0.02 + i as f64 * SECONDS_PER_BEAT;
            let duration = note.duration_beats as f64 * SECONDS_PER_BEAT;
            let freq = midi_to_hz(note.midi() as f32);
            if let Ok(handle) = crate::synth::trigger_note(
                &self.audio_ctx,
                freq,
                start,
                duration,
                &self.master,
            ) {
                self.note_nodes.push(handle);
            }
        }
        log::info!("[playback] scheduled {} notes", self.note_nodes.len());
    }
}

/// Shared, optional playback handle. `None` means the platform has no audio
/// context; the UI stays usable, just silent.
pub type SharedPlayback = Rc<RefCell<Option<Playback>>>;

/// Start one source set: flip to Starting, await the context resume, then
/// build chains. The scene is snapshotted after the resume, so drags and
/// slider moves landing in the resume gap are already in the batch. A stop
/// that lands during the resume wins and the start aborts quietly.
pub async fn start_set(
    playback: SharedPlayback,
    scene: Rc<RefCell<SpatialScene>>,
    set: SourceSet,
) {
    let audio_ctx = {
        let mut guard = playback.borrow_mut();
        let Some(p) = guard.as_mut() else { return };
        if !p.set_mut(set).begin_start() {
            return;
        }
        p.audio_ctx.clone()
    };

    if let Err(e) = audio::ensure_running(&audio_ctx).await {
        log::warn!("[playback] {:?} start failed: {e}", set);
        overlay::report_error("Could not start audio. Click play to try again.");
        if let Some(p) = playback.borrow_mut().as_mut() {
            p.set_mut(set).stop();
        }
        return;
    }

    let mut guard = playback.borrow_mut();
    let Some(p) = guard.as_mut() else { return };
    if !p.set_mut(set).mark_playing() {
        // Stopped while the context was resuming.
        return;
    }
    let (batch, master_volume) = {
        let s = scene.borrow();
        (s.snapshot_set(set), s.master_volume)
    };
    p.set_master_volume(master_volume);
    p.spawn_chains(&batch);
    log::info!("[playback] started {:?} set ({} sources)", set, batch.len());
    if let Some(document) = crate::dom::window_document() {
        overlay::clear_error(&document);
    }
}

/// Play the drawn note list front to back on the shared context clock.
pub async fn start_notes(playback: SharedPlayback, notes: Vec<Note>) {
    if notes.is_empty() {
        return;
    }
    let audio_ctx = {
        let guard = playback.borrow();
        let Some(p) = guard.as_ref() else { return };
        p.audio_ctx.clone()
    };
    if let Err(e) = audio::ensure_running(&audio_ctx).await {
        log::warn!("[playback] note playback failed: {e}");
        overlay::report_error("Could not start audio. Click play to try again.");
        return;
    }
    if let Some(p) = playback.borrow_mut().as_mut() {
        p.schedule_notes(&notes);
    }
}
