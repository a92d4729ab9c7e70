//! Staff pitch grid and the note-entry state machine.
//!
//! Recognized note heads snap vertically onto the nearest named pitch of the
//! staff under the stroke; horizontal position is kept verbatim. Append order
//! of the note list is playback order.

use crate::core::constants::*;
use crate::core::recognizer::{classify, RecognizedShape, ShapeKind};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// Semitone offset above C.
    #[inline]
    pub fn semitone(self) -> i32 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::D => "D",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::G => "G",
            NoteName::A => "A",
            NoteName::B => "B",
        }
    }
}

/// One named vertical position on a staff, ledger lines included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchPosition {
    pub name: NoteName,
    pub octave: i32,
    pub y: f32,
}

/// Descending pitch ladder for one staff, A5 at the top through A3 below the
/// ledger lines, one entry per half step of staff geometry.
const PITCH_LADDER: [(NoteName, i32); PITCH_TABLE_LEN] = [
    (NoteName::A, 5),
    (NoteName::G, 5),
    (NoteName::F, 5),
    (NoteName::E, 5),
    (NoteName::D, 5),
    (NoteName::C, 5),
    (NoteName::B, 4),
    (NoteName::A, 4),
    (NoteName::G, 4),
    (NoteName::F, 4),
    (NoteName::E, 4),
    (NoteName::D, 4),
    (NoteName::C, 4),
    (NoteName::B, 3),
    (NoteName::A, 3),
];

#[inline]
pub fn staff_base_y(staff_index: usize) -> f32 {
    STAFF_TOP_MARGIN + staff_index as f32 * STAFF_HEIGHT
}

pub fn pitch_positions(staff_index: usize) -> [PitchPosition; PITCH_TABLE_LEN] {
    let base = staff_base_y(staff_index);
    let mut table = [PitchPosition {
        name: NoteName::A,
        octave: 5,
        y: 0.0,
    }; PITCH_TABLE_LEN];
    for (i, (name, octave)) in PITCH_LADDER.iter().enumerate() {
        table[i] = PitchPosition {
            name: *name,
            octave: *octave,
            y: base + PITCH_TABLE_TOP_OFFSET + i as f32 * PITCH_STEP,
        };
    }
    table
}

/// Nearest pitch by vertical distance; ties resolve to the earlier table
/// entry (the higher pitch).
pub fn nearest_pitch(staff_index: usize, y: f32) -> PitchPosition {
    let table = pitch_positions(staff_index);
    let mut best = table[0];
    for p in table.iter().skip(1) {
        if (p.y - y).abs() < (best.y - y).abs() {
            best = *p;
        }
    }
    best
}

/// Staff index for a canvas-space y, clamped into the live range.
pub fn staff_index_for_y(y: f32, staff_count: usize) -> usize {
    let raw = ((y - STAFF_TOP_MARGIN) / STAFF_HEIGHT).floor();
    let clamped = raw.max(0.0) as usize;
    clamped.min(staff_count.saturating_sub(1))
}

#[derive(Clone, Debug, PartialEq)]
pub struct Note {
    pub name: NoteName,
    pub octave: i32,
    pub x: f32,
    pub y: f32,
    pub duration_beats: f32,
    pub staff_index: usize,
}

impl Note {
    #[inline]
    pub fn midi(&self) -> i32 {
        self.name.semitone() + (self.octave + 1) * 12
    }
}

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

/// Raw ink. Recognized strokes are hidden once converted into a note or a
/// stem attachment; unrecognized ones stay visible forever.
#[derive(Clone, Debug)]
pub struct Stroke {
    pub points: Vec<Vec2>,
    pub recognized: bool,
}

/// What a finished stroke turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeOutcome {
    Discarded,
    NotePlaced,
    StemAttached,
    Unrecognized,
}

/// Append-ordered note list plus the ink that produced it.
#[derive(Clone, Debug)]
pub struct NotationState {
    pub notes: Vec<Note>,
    pub strokes: Vec<Stroke>,
    pub staff_count: usize,
    current: Vec<Vec2>,
    drawing: bool,
}

impl Default for NotationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NotationState {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            strokes: Vec::new(),
            staff_count: 1,
            current: Vec::new(),
            drawing: false,
        }
    }

    /// Canvas extent needed by the current staff count.
    pub fn canvas_height(&self) -> f32 {
        let required =
            STAFF_TOP_MARGIN + self.staff_count as f32 * STAFF_HEIGHT + CANVAS_BOTTOM_PAD;
        required.max(MIN_CANVAS_HEIGHT)
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn current_stroke(&self) -> &[Vec2] {
        &self.current
    }

    pub fn begin_stroke(&mut self, p: Vec2) {
        self.drawing = true;
        self.current.clear();
        self.current.push(p);
    }

    pub fn extend_stroke(&mut self, p: Vec2) {
        if self.drawing {
            self.current.push(p);
        }
    }

    /// Consume the in-progress stroke: classify it, place a note, attach a
    /// stem, or keep it as unrecognized ink.
    pub fn finish_stroke(&mut self) -> StrokeOutcome {
        if !self.drawing {
            return StrokeOutcome::Discarded;
        }
        self.drawing = false;
        let points = std::mem::take(&mut self.current);
        if points.len() < STROKE_KEEP_MIN_POINTS {
            return StrokeOutcome::Discarded;
        }

        let shape = classify(&points);
        match shape.kind {
            ShapeKind::FilledNote | ShapeKind::HollowNote => {
                self.place_note(&shape);
                self.strokes.push(Stroke {
                    points,
                    recognized: true,
                });
                StrokeOutcome::NotePlaced
            }
            ShapeKind::Stem => {
                let attached = self.attach_stem(&shape);
                self.strokes.push(Stroke {
                    points,
                    recognized: attached,
                });
                if attached {
                    StrokeOutcome::StemAttached
                } else {
                    StrokeOutcome::Unrecognized
                }
            }
            ShapeKind::Unknown => {
                self.strokes.push(Stroke {
                    points,
                    recognized: false,
                });
                StrokeOutcome::Unrecognized
            }
        }
    }

    fn place_note(&mut self, shape: &RecognizedShape) {
        let staff_index = staff_index_for_y(shape.center.y, self.staff_count);
        let pitch = nearest_pitch(staff_index, shape.center.y);
        let duration_beats = match shape.kind {
            ShapeKind::HollowNote => HALF_NOTE_BEATS,
            _ => QUARTER_NOTE_BEATS,
        };
        self.notes.push(Note {
            name: pitch.name,
            octave: pitch.octave,
            x: shape.center.x,
            y: pitch.y,
            duration_beats,
            staff_index,
        });

        // Grow the canvas once drawing approaches the bottom edge.
        if shape.center.y > self.canvas_height() - STAFF_GROW_MARGIN_PX {
            self.add_staff();
        }
    }

    /// A stem near an existing note is a duration refinement: a long note in
    /// the window shortens to a quarter. Returns whether the stem landed on
    /// any note at all.
    fn attach_stem(&mut self, shape: &RecognizedShape) -> bool {
        let center = shape.center;
        let in_window = |n: &Note| {
            (n.x - center.x).abs() < STEM_ATTACH_DX_PX && (n.y - center.y).abs() < STEM_ATTACH_DY_PX
        };
        if let Some(note) = self
            .notes
            .iter_mut()
            .find(|n| in_window(n) && n.duration_beats >= HALF_NOTE_BEATS)
        {
            note.duration_beats = QUARTER_NOTE_BEATS;
            return true;
        }
        // A stem over an already-short note still counts as recognized ink.
        self.notes.iter().any(in_window)
    }

    pub fn add_staff(&mut self) -> bool {
        if self.staff_count < MAX_STAVES {
            self.staff_count += 1;
            true
        } else {
            false
        }
    }

    /// Drop the last staff and every note on it.
    pub fn remove_last_staff(&mut self) -> bool {
        if self.staff_count > 1 {
            self.staff_count -= 1;
            let count = self.staff_count;
            self.notes.retain(|n| n.staff_index < count);
            true
        } else {
            false
        }
    }

    pub fn undo(&mut self) {
        self.notes.pop();
    }

    pub fn clear(&mut self) {
        self.notes.clear();
        self.strokes.clear();
        self.current.clear();
        self.drawing = false;
    }

    pub fn unrecognized_count(&self) -> usize {
        self.strokes.iter().filter(|s| !s.recognized).count()
    }
}
