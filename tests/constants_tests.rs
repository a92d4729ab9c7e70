// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
#[path = "../src/core/constants.rs"]
mod constants;

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn stroke_thresholds_are_ordered() {
    assert!(STROKE_KEEP_MIN_POINTS <= CLASSIFY_MIN_POINTS);
    assert!(STEM_ASPECT_RATIO > 1.0);
    assert!(STEM_MIN_HEIGHT_PX > 0.0);
    assert!(CIRCLE_RADIUS_MIN_PX < CIRCLE_RADIUS_MAX_PX);
    assert!(CIRCLE_DEVIATION_RATIO > 0.0 && CIRCLE_DEVIATION_RATIO < 1.0);
    // A filled head must fit inside the plausible circle range.
    assert!(FILLED_NOTE_MAX_EXTENT_PX <= 2.0 * CIRCLE_RADIUS_MAX_PX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn staff_geometry_is_consistent() {
    assert!(PITCH_STEP * 2.0 == LINE_SPACING);
    // The pitch ladder must fit inside one staff block.
    assert!(PITCH_TABLE_TOP_OFFSET + PITCH_TABLE_LEN as f32 * PITCH_STEP < STAFF_HEIGHT);
    assert!(MAX_STAVES >= 1);
    assert!(STAFF_GROW_MARGIN_PX < MIN_CANVAS_HEIGHT);
    assert!(CANVAS_BOTTOM_PAD > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn durations_and_attach_window_are_positive() {
    assert!(QUARTER_NOTE_BEATS < HALF_NOTE_BEATS);
    assert!(STEM_ATTACH_DX_PX > 0.0);
    assert!(STEM_ATTACH_DY_PX > 0.0);
    assert!(SECONDS_PER_BEAT > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn spatial_and_gain_constants_are_in_range() {
    assert!(ROOM_HALF_WIDTH > 0.0 && ROOM_HALF_HEIGHT > 0.0);
    assert!(PAN_X_DIVISOR > 0.0);
    // Full pan is reachable inside the room.
    assert!(PAN_X_DIVISOR <= ROOM_HALF_WIDTH);
    assert!(SOURCE_HIT_RADIUS_PX > 0.0);
    assert!(DEFAULT_MASTER_VOLUME >= 0.0 && DEFAULT_MASTER_VOLUME <= 1.0);
    assert!(DEMO_SYNTH_TRIM > 0.0 && DEMO_SYNTH_TRIM <= 1.0);
    assert!(NOTE_PEAK_GAIN > RELEASE_FLOOR_GAIN);
}
