//! Spatial scene state: positioned sound sources around a fixed listener.
//!
//! Positions live in an abstract 2D space centered on the listener at the
//! origin, independent of canvas pixel size. Only the horizontal axis drives
//! stereo placement; vertical position is visual.

use crate::core::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoVoice {
    Piano,
    Drums,
    Bass,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SourceKind {
    Demo(DemoVoice),
    File {
        url: String,
        file_name: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SoundSource {
    pub id: String,
    pub label: String,
    pub position: Vec2,
    pub volume: f32,
    pub color: String,
    pub kind: SourceKind,
}

impl SoundSource {
    #[inline]
    pub fn is_file(&self) -> bool {
        matches!(self.kind, SourceKind::File { .. })
    }

    #[inline]
    pub fn pan(&self) -> f32 {
        pan_from_x(self.position.x)
    }
}

/// Linear map from engine-space x onto stereo pan, clamped at the edges.
#[inline]
pub fn pan_from_x(x: f32) -> f32 {
    (x / PAN_X_DIVISOR).clamp(-1.0, 1.0)
}

/// Keep a source inside the bounded room rectangle.
#[inline]
pub fn clamp_position(p: Vec2) -> Vec2 {
    Vec2::new(
        p.x.clamp(-ROOM_HALF_WIDTH, ROOM_HALF_WIDTH),
        p.y.clamp(-ROOM_HALF_HEIGHT, ROOM_HALF_HEIGHT),
    )
}

/// Effective gain of a source: per-source volume scaled by the master, both
/// clamped to the unit range before composition.
#[inline]
pub fn effective_gain(volume: f32, master: f32) -> f32 {
    volume.clamp(0.0, 1.0) * master.clamp(0.0, 1.0)
}

/// Named subset of sources that starts and stops as one batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceSet {
    Demo,
    Uploaded,
}

impl SourceSet {
    #[inline]
    pub fn contains(self, source: &SoundSource) -> bool {
        match self {
            SourceSet::Demo => !source.is_file(),
            SourceSet::Uploaded => source.is_file(),
        }
    }
}

/// Per-set playback lifecycle. `Starting` covers the asynchronous gap while
/// a suspended audio context resumes; stopping in that window simply returns
/// the set to idle so the resume path can bail out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SetState {
    #[default]
    Idle,
    Starting,
    Playing,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PlaybackSet {
    pub state: SetState,
}

impl PlaybackSet {
    /// Idle -> Starting. False when already starting or playing.
    pub fn begin_start(&mut self) -> bool {
        if self.state == SetState::Idle {
            self.state = SetState::Starting;
            true
        } else {
            false
        }
    }

    /// Starting -> Playing. False when a stop raced the resume.
    pub fn mark_playing(&mut self) -> bool {
        if self.state == SetState::Starting {
            self.state = SetState::Playing;
            true
        } else {
            false
        }
    }

    /// Any state -> Idle. Returns whether anything was actually active, so
    /// repeated stops are harmless no-ops.
    pub fn stop(&mut self) -> bool {
        let was_active = self.state != SetState::Idle;
        self.state = SetState::Idle;
        was_active
    }
}

/// The full source list plus interaction state for the spatial canvas.
#[derive(Clone, Debug)]
pub struct SpatialScene {
    pub sources: Vec<SoundSource>,
    pub master_volume: f32,
    /// Source under an active drag, if any. Single-selection: at most one
    /// source moves at a time.
    pub dragging: Option<usize>,
    /// Most recently picked source; survives pointer-up so volume edits have
    /// a target.
    pub focused: Option<usize>,
}

impl Default for SpatialScene {
    fn default() -> Self {
        Self::with_demo_sources()
    }
}

impl SpatialScene {
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
            master_volume: DEFAULT_MASTER_VOLUME,
            dragging: None,
            focused: None,
        }
    }

    /// Session-start demo set: three synthesized instruments spread around
    /// the listener.
    pub fn with_demo_sources() -> Self {
        let mut scene = Self::empty();
        scene.sources = vec![
            SoundSource {
                id: "demo1".to_string(),
                label: "Piano".to_string(),
                position: Vec2::new(-100.0, 0.0),
                volume: 0.8,
                color: "#3b82f6".to_string(),
                kind: SourceKind::Demo(DemoVoice::Piano),
            },
            SoundSource {
                id: "demo2".to_string(),
                label: "Drums".to_string(),
                position: Vec2::new(100.0, -80.0),
                volume: 0.6,
                color: "#ef4444".to_string(),
                kind: SourceKind::Demo(DemoVoice::Drums),
            },
            SoundSource {
                id: "demo3".to_string(),
                label: "Bass".to_string(),
                position: Vec2::new(0.0, 120.0),
                volume: 0.7,
                color: "#22c55e".to_string(),
                kind: SourceKind::Demo(DemoVoice::Bass),
            },
        ];
        scene
    }

    pub fn source_by_id(&self, id: &str) -> Option<&SoundSource> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// First source whose engine-space position lies within the hit radius.
    pub fn hit_test(&self, p: Vec2) -> Option<usize> {
        self.sources
            .iter()
            .position(|s| s.position.distance(p) <= SOURCE_HIT_RADIUS_PX)
    }

    /// Pointer-down: pick at most one source and start dragging it.
    pub fn begin_drag(&mut self, p: Vec2) -> Option<usize> {
        let hit = self.hit_test(p);
        self.dragging = hit;
        if hit.is_some() {
            self.focused = hit;
        }
        hit
    }

    /// Pointer-move: reposition the dragged source, clamped to the room.
    /// Returns the id and new position so live audio can follow.
    pub fn drag_to(&mut self, p: Vec2) -> Option<(String, Vec2)> {
        let index = self.dragging?;
        let source = self.sources.get_mut(index)?;
        source.position = clamp_position(p);
        Some((source.id.clone(), source.position))
    }

    /// Pointer-up: release the selection.
    pub fn end_drag(&mut self) {
        self.dragging = None;
    }

    pub fn set_volume(&mut self, index: usize, volume: f32) -> Option<&SoundSource> {
        let source = self.sources.get_mut(index)?;
        source.volume = volume.clamp(0.0, 1.0);
        Some(source)
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Append an uploaded-file source, auto-placed on a grid so a batch of
    /// uploads does not stack on one spot.
    pub fn add_uploaded(
        &mut self,
        id: String,
        label: String,
        url: String,
        file_name: Option<String>,
        index_in_batch: usize,
        batch_len: usize,
    ) {
        let i = index_in_batch as f32;
        let position = clamp_position(Vec2::new(
            (i - batch_len as f32 / 2.0) * UPLOAD_SPACING_X,
            i * UPLOAD_SPACING_Y + UPLOAD_OFFSET_Y,
        ));
        let hue = (index_in_batch * 120 + 180) % 360;
        self.sources.push(SoundSource {
            id,
            label,
            position,
            volume: 0.8,
            color: format!("hsl({hue}, 70%, 60%)"),
            kind: SourceKind::File { url, file_name },
        });
    }

    pub fn set_sources(&mut self, sources: Vec<SoundSource>) {
        self.sources = sources;
        self.dragging = None;
        self.focused = None;
    }

    pub fn count_in(&self, set: SourceSet) -> usize {
        self.sources.iter().filter(|s| set.contains(s)).count()
    }

    /// Clone the current members of one set. Taken at graph-build time, not
    /// at click time, so edits made while a start is in flight are honored.
    pub fn snapshot_set(&self, set: SourceSet) -> Vec<SoundSource> {
        self.sources
            .iter()
            .filter(|s| set.contains(s))
            .cloned()
            .collect()
    }
}
