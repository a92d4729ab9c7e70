//! Shared geometry and audio tuning constants for the notation and spatial
//! views. Pixel-valued constants are in canvas space unless noted.

// ---------------- Stroke capture / recognition ----------------

// Strokes shorter than this are discarded at pointer-up without ever
// reaching the classifier.
pub const STROKE_KEEP_MIN_POINTS: usize = 3;
// Strokes shorter than this are kept as ink but classify as unknown.
pub const CLASSIFY_MIN_POINTS: usize = 5;

// Stem test: height > STEM_ASPECT_RATIO * width and taller than the minimum.
pub const STEM_ASPECT_RATIO: f32 = 3.0;
pub const STEM_MIN_HEIGHT_PX: f32 = 30.0;

// Circle test: mean absolute radius deviation below this fraction of the
// mean radius, with the mean radius inside the plausible note-head range.
pub const CIRCLE_DEVIATION_RATIO: f32 = 0.5;
pub const CIRCLE_RADIUS_MIN_PX: f32 = 3.0;
pub const CIRCLE_RADIUS_MAX_PX: f32 = 30.0;

// Note heads at or under this extent on both axes read as filled.
pub const FILLED_NOTE_MAX_EXTENT_PX: f32 = 20.0;

// ---------------- Staff layout ----------------

pub const STAFF_TOP_MARGIN: f32 = 40.0;
pub const STAFF_HEIGHT: f32 = 220.0;
pub const LINE_SPACING: f32 = 15.0;
// Vertical gap between adjacent pitch positions (half of the line spacing).
pub const PITCH_STEP: f32 = 7.5;
// First pitch position sits this far below the staff origin.
pub const PITCH_TABLE_TOP_OFFSET: f32 = 20.0;
pub const PITCH_TABLE_LEN: usize = 15;

pub const MAX_STAVES: usize = 5;
pub const MIN_CANVAS_HEIGHT: f32 = 300.0;
pub const CANVAS_BOTTOM_PAD: f32 = 50.0;
// Drawing within this distance of the bottom edge appends a staff.
pub const STAFF_GROW_MARGIN_PX: f32 = 100.0;

// ---------------- Durations (beats) ----------------

pub const HALF_NOTE_BEATS: f32 = 2.0;
pub const QUARTER_NOTE_BEATS: f32 = 1.0;

// A recognized stem attaches to a note inside this window and shortens it.
pub const STEM_ATTACH_DX_PX: f32 = 20.0;
pub const STEM_ATTACH_DY_PX: f32 = 40.0;

// ---------------- Spatial scene ----------------

// Engine-space bounds, centered on the listener at the origin.
pub const ROOM_HALF_WIDTH: f32 = 200.0;
pub const ROOM_HALF_HEIGHT: f32 = 150.0;
// Engine-space x maps linearly onto stereo pan with this divisor.
pub const PAN_X_DIVISOR: f32 = 150.0;
// Pointer hit-test radius against a source's screen projection.
pub const SOURCE_HIT_RADIUS_PX: f32 = 15.0;

pub const DEFAULT_MASTER_VOLUME: f32 = 0.8;
// Demo synth chains are trimmed so stacked oscillators stay headroom-safe.
pub const DEMO_SYNTH_TRIM: f32 = 0.3;

// Auto-placement grid for uploaded sources.
pub const UPLOAD_SPACING_X: f32 = 80.0;
pub const UPLOAD_SPACING_Y: f32 = 30.0;
pub const UPLOAD_OFFSET_Y: f32 = -50.0;

// ---------------- Note playback ----------------

pub const SECONDS_PER_BEAT: f64 = 0.5;
pub const NOTE_PEAK_GAIN: f32 = 0.3;
pub const NOTE_ATTACK_SEC: f64 = 0.05;
// Exponential ramps cannot reach zero; this floor is inaudible.
pub const RELEASE_FLOOR_GAIN: f32 = 0.01;
