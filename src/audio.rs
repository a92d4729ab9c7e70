//! WebAudio node plumbing.
//!
//! Every active source gets its own chain `source -> gain -> panner -> master
//! bus -> destination`. Gain and pan are set by immediate value assignment so
//! dragging a source moves it with no scheduling latency; onset/release ramps
//! live in `synth`.

use crate::core::constants::DEMO_SYNTH_TRIM;
use crate::core::{SoundSource, SourceKind, SourceSet};
use smallvec::SmallVec;
use web_sys as web;

pub fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

/// Master bus: one gain node in front of the destination, shared by every
/// chain. Its value is the master volume.
pub fn build_master_bus(
    audio_ctx: &web::AudioContext,
    master_volume: f32,
) -> Result<web::GainNode, ()> {
    let master = create_gain(audio_ctx, master_volume.clamp(0.0, 1.0), "Master")?;
    _ = master.connect_with_audio_node(&audio_ctx.destination());
    Ok(master)
}

/// Resume a suspended context before anything is started. Browsers gate
/// audio output behind a user gesture; the returned error is reportable and
/// non-fatal.
pub async fn ensure_running(audio_ctx: &web::AudioContext) -> anyhow::Result<()> {
    if audio_ctx.state() == web::AudioContextState::Suspended {
        let promise = audio_ctx
            .resume()
            .map_err(|e| anyhow::anyhow!("resume rejected: {:?}", e))?;
        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| anyhow::anyhow!("resume failed: {:?}", e))?;
    }
    Ok(())
}

/// Live playback handles for one source.
pub enum ChainHandle {
    Synth {
        oscillators: SmallVec<[web::OscillatorNode; 4]>,
        noise: Option<web::AudioBufferSourceNode>,
    },
    Media(web::HtmlAudioElement),
}

pub struct SourceChain {
    pub gain: web::GainNode,
    pub panner: web::StereoPannerNode,
    pub handle: ChainHandle,
}

impl SourceChain {
    pub fn in_set(&self, set: SourceSet) -> bool {
        match (&self.handle, set) {
            (ChainHandle::Media(_), SourceSet::Uploaded) => true,
            (ChainHandle::Synth { .. }, SourceSet::Demo) => true,
            _ => false,
        }
    }

    /// Immediate pan update; applied mid-drag on every pointer move.
    pub fn set_pan(&self, pan: f32) {
        self.panner.pan().set_value(pan.clamp(-1.0, 1.0));
    }

    /// Immediate per-source volume update. Demo chains carry a fixed trim so
    /// stacked oscillators do not clip the bus.
    pub fn set_volume(&self, volume: f32) {
        let trim = match self.handle {
            ChainHandle::Synth { .. } => DEMO_SYNTH_TRIM,
            ChainHandle::Media(_) => 1.0,
        };
        self.gain.gain().set_value(volume.clamp(0.0, 1.0) * trim);
    }

    /// Tear down this chain. A node that already finished naturally makes
    /// `stop` throw; that is a benign no-op here.
    pub fn stop(self) {
        match self.handle {
            ChainHandle::Synth { oscillators, noise } => {
                for osc in &oscillators {
                    _ = osc.stop();
                }
                if let Some(n) = &noise {
                    _ = n.stop();
                }
            }
            ChainHandle::Media(audio) => {
                _ = audio.pause();
                audio.set_current_time(0.0);
            }
        }
        _ = self.gain.disconnect();
        _ = self.panner.disconnect();
    }
}

/// Build and start the chain for one source. Errors are per-source: the
/// caller logs, skips, and keeps going with the rest of the batch.
pub fn build_chain(
    audio_ctx: &web::AudioContext,
    source: &SoundSource,
    master: &web::GainNode,
) -> Result<SourceChain, ()> {
    let gain = create_gain(audio_ctx, 0.0, &source.label)?;
    let panner = web::StereoPannerNode::new(audio_ctx).map_err(|e| {
        log::error!("{} StereoPannerNode error: {:?}", source.label, e);
    })?;
    panner.pan().set_value(source.pan());
    _ = gain.connect_with_audio_node(&panner);
    _ = panner.connect_with_audio_node(master);

    let handle = match &source.kind {
        SourceKind::Demo(voice) => crate::synth::build_demo_voice(audio_ctx, *voice, &gain)?,
        SourceKind::File { url, .. } => build_media_handle(audio_ctx, url, &source.label, &gain)?,
    };

    let chain = SourceChain {
        gain,
        panner,
        handle,
    };
    chain.set_volume(source.volume);
    Ok(chain)
}

fn build_media_handle(
    audio_ctx: &web::AudioContext,
    url: &str,
    label: &str,
    gain: &web::GainNode,
) -> Result<ChainHandle, ()> {
    let audio = web::HtmlAudioElement::new_with_src(url).map_err(|e| {
        log::error!("{} media element error: {:?}", label, e);
    })?;
    audio.set_loop(true);
    audio.set_cross_origin(Some("anonymous"));
    let node = audio_ctx.create_media_element_source(&audio).map_err(|e| {
        log::error!("{} media source error: {:?}", label, e);
    })?;
    _ = node.connect_with_audio_node(gain);
    // An undecodable upload rejects the play() promise, not the call itself.
    // Either way the failure only silences this one source.
    match audio.play() {
        Ok(promise) => {
            let label = label.to_string();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    log::warn!("{} playback rejected: {:?}", label, e);
                }
            });
        }
        Err(e) => {
            log::warn!("{} play rejected: {:?}", label, e);
        }
    }
    Ok(ChainHandle::Media(audio))
}
