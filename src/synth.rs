//! Procedural demo voices and one-shot note triggers.
//!
//! Demo instruments are synthesized, not sampled: hand-authored envelopes
//! over a few oscillators (plus a noise buffer for the drums), each with a
//! scheduled stop so a triggered voice always self-terminates.

use crate::audio::ChainHandle;
use crate::core::constants::{NOTE_ATTACK_SEC, NOTE_PEAK_GAIN, RELEASE_FLOOR_GAIN};
use crate::core::DemoVoice;
use rand::Rng;
use smallvec::SmallVec;
use web_sys as web;

pub fn build_demo_voice(
    audio_ctx: &web::AudioContext,
    voice: DemoVoice,
    out: &web::GainNode,
) -> Result<ChainHandle, ()> {
    match voice {
        DemoVoice::Piano => build_piano(audio_ctx, out),
        DemoVoice::Bass => build_bass(audio_ctx, out),
        DemoVoice::Drums => build_drums(audio_ctx, out),
    }
}

fn new_osc(
    audio_ctx: &web::AudioContext,
    kind: web::OscillatorType,
    frequency_hz: f32,
) -> Result<web::OscillatorNode, ()> {
    let osc = web::OscillatorNode::new(audio_ctx).map_err(|e| {
        log::error!("OscillatorNode error: {:?}", e);
    })?;
    osc.set_type(kind);
    osc.frequency().set_value(frequency_hz);
    Ok(osc)
}

/// Triangle-wave harmonic stack over a C-major triad with a long staged
/// decay. Warmer than plain sines, dead silent by eight seconds.
fn build_piano(audio_ctx: &web::AudioContext, out: &web::GainNode) -> Result<ChainHandle, ()> {
    const CHORD_HZ: [f32; 3] = [262.0, 330.0, 392.0];
    const HARMONICS: [f32; 4] = [1.0, 0.5, 0.25, 0.1];

    let now = audio_ctx.current_time();
    let mut oscillators: SmallVec<[web::OscillatorNode; 4]> = SmallVec::new();
    for freq in CHORD_HZ {
        for (h, amp) in HARMONICS.iter().enumerate() {
            let osc = new_osc(audio_ctx, web::OscillatorType::Triangle, freq * (h + 1) as f32)?;
            let env = crate::audio::create_gain(audio_ctx, 0.0, "Piano partial")?;
            let g = env.gain();
            _ = g.set_value_at_time(0.0, now);
            _ = g.linear_ramp_to_value_at_time(amp * 0.3, now + 0.01);
            _ = g.exponential_ramp_to_value_at_time(amp * 0.15, now + 1.0);
            _ = g.exponential_ramp_to_value_at_time(amp * 0.05, now + 4.0);
            _ = g.exponential_ramp_to_value_at_time(0.001, now + 8.0);
            _ = osc.connect_with_audio_node(&env);
            _ = env.connect_with_audio_node(out);
            _ = osc.start();
            _ = osc.stop_with_when(now + 8.2);
            oscillators.push(osc);
        }
    }
    Ok(ChainHandle::Synth {
        oscillators,
        noise: None,
    })
}

/// Sawtooth E2 through a resonant lowpass, doubled an octave down by a sine
/// sub. Staged decay, silent by six seconds.
fn build_bass(audio_ctx: &web::AudioContext, out: &web::GainNode) -> Result<ChainHandle, ()> {
    let now = audio_ctx.current_time();
    let bass = new_osc(audio_ctx, web::OscillatorType::Sawtooth, 82.0)?;
    let sub = new_osc(audio_ctx, web::OscillatorType::Sine, 41.0)?;

    let filter = web::BiquadFilterNode::new(audio_ctx).map_err(|e| {
        log::error!("BiquadFilterNode error: {:?}", e);
    })?;
    filter.set_type(web::BiquadFilterType::Lowpass);
    filter.frequency().set_value(200.0);
    filter.q().set_value(2.0);

    let env = crate::audio::create_gain(audio_ctx, 0.0, "Bass env")?;
    let g = env.gain();
    _ = g.set_value_at_time(0.0, now);
    _ = g.linear_ramp_to_value_at_time(0.4, now + 0.05);
    _ = g.exponential_ramp_to_value_at_time(0.2, now + 0.5);
    _ = g.exponential_ramp_to_value_at_time(0.1, now + 3.0);
    _ = g.exponential_ramp_to_value_at_time(0.001, now + 6.0);

    _ = bass.connect_with_audio_node(&filter);
    _ = filter.connect_with_audio_node(&env);
    _ = sub.connect_with_audio_node(&env);
    _ = env.connect_with_audio_node(out);
    _ = bass.start();
    _ = sub.start();
    _ = bass.stop_with_when(now + 6.2);
    _ = sub.stop_with_when(now + 6.2);

    let mut oscillators: SmallVec<[web::OscillatorNode; 4]> = SmallVec::new();
    oscillators.push(bass);
    oscillators.push(sub);
    Ok(ChainHandle::Synth {
        oscillators,
        noise: None,
    })
}

/// Kick with an exponential pitch drop plus a looping white-noise snare bed
/// that decays over five seconds.
fn build_drums(audio_ctx: &web::AudioContext, out: &web::GainNode) -> Result<ChainHandle, ()> {
    let now = audio_ctx.current_time();

    let kick = new_osc(audio_ctx, web::OscillatorType::Sine, 60.0)?;
    _ = kick
        .frequency()
        .exponential_ramp_to_value_at_time(30.0, now + 0.1);
    let kick_env = crate::audio::create_gain(audio_ctx, 0.0, "Kick env")?;
    let kg = kick_env.gain();
    _ = kg.set_value_at_time(0.5, now);
    _ = kg.exponential_ramp_to_value_at_time(0.001, now + 0.5);

    let noise = build_noise_source(audio_ctx)?;
    let noise_env = crate::audio::create_gain(audio_ctx, 0.0, "Snare env")?;
    let ng = noise_env.gain();
    _ = ng.set_value_at_time(0.2, now);
    _ = ng.exponential_ramp_to_value_at_time(0.1, now + 0.25);
    _ = ng.exponential_ramp_to_value_at_time(0.001, now + 5.0);

    _ = kick.connect_with_audio_node(&kick_env);
    _ = kick_env.connect_with_audio_node(out);
    _ = noise.connect_with_audio_node(&noise_env);
    _ = noise_env.connect_with_audio_node(out);
    _ = kick.start();
    _ = kick.stop_with_when(now + 0.8);
    _ = noise.start();
    _ = noise.stop_with_when(now + 5.2);

    let mut oscillators: SmallVec<[web::OscillatorNode; 4]> = SmallVec::new();
    oscillators.push(kick);
    Ok(ChainHandle::Synth {
        oscillators,
        noise: Some(noise),
    })
}

fn build_noise_source(
    audio_ctx: &web::AudioContext,
) -> Result<web::AudioBufferSourceNode, ()> {
    let sample_rate = audio_ctx.sample_rate();
    let len = (sample_rate * 0.3) as u32;
    let buffer = audio_ctx
        .create_buffer(1, len.max(1), sample_rate)
        .map_err(|e| {
            log::error!("noise buffer error: {:?}", e);
        })?;
    let mut rng = rand::thread_rng();
    let mut data: Vec<f32> = (0..len).map(|_| rng.gen::<f32>() * 2.0 - 1.0).collect();
    _ = buffer.copy_to_channel(&mut data, 0);

    let node = web::AudioBufferSourceNode::new(audio_ctx).map_err(|e| {
        log::error!("AudioBufferSourceNode error: {:?}", e);
    })?;
    node.set_buffer(Some(&buffer));
    node.set_loop(true);
    Ok(node)
}

/// Fire a one-shot note for the notation player: sine oscillator with a
/// short linear attack and an exponential release, scheduled entirely on the
/// context clock.
pub fn trigger_note(
    audio_ctx: &web::AudioContext,
    frequency_hz: f32,
    start_time_sec: f64,
    duration_sec: f64,
    out: &web::GainNode,
) -> Result<(web::OscillatorNode, web::GainNode), ()> {
    let osc = new_osc(audio_ctx, web::OscillatorType::Sine, frequency_hz)?;
    let env = crate::audio::create_gain(audio_ctx, 0.0, "Note env")?;
    let g = env.gain();
    _ = g.set_value_at_time(0.0, start_time_sec);
    _ = g.linear_ramp_to_value_at_time(NOTE_PEAK_GAIN, start_time_sec + NOTE_ATTACK_SEC);
    _ = g.exponential_ramp_to_value_at_time(
        RELEASE_FLOOR_GAIN,
        start_time_sec + duration_sec.max(NOTE_ATTACK_SEC * 2.0),
    );
    _ = osc.connect_with_audio_node(&env);
    _ = env.connect_with_audio_node(out);
    _ = osc.start_with_when(start_time_sec);
    _ = osc.stop_with_when(start_time_sec + duration_sec + 0.05);
    Ok((osc, env))
}
