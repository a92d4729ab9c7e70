//! Freehand stroke classification.
//!
//! A stroke is an ordered run of canvas-space points captured while the
//! pointer is held down. Classification is a stateless projection: it never
//! looks at prior strokes or notes. Stems are tested before circles so a tall
//! thin scribble can never read as a note head.

use crate::core::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Stem,
    FilledNote,
    HollowNote,
    Unknown,
}

/// Axis-aligned bounding box of a stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn of(points: &[Vec2]) -> Self {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self { min, max }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Classification result with the derived geometry that later stages need.
///
/// `mean_radius` and `radius_deviation` are only meaningful for circular
/// shapes; they are zero for stems and degenerate strokes.
#[derive(Clone, Copy, Debug)]
pub struct RecognizedShape {
    pub kind: ShapeKind,
    pub center: Vec2,
    pub bounds: Bounds,
    pub mean_radius: f32,
    pub radius_deviation: f32,
}

impl RecognizedShape {
    fn unknown(center: Vec2, bounds: Bounds) -> Self {
        Self {
            kind: ShapeKind::Unknown,
            center,
            bounds,
            mean_radius: 0.0,
            radius_deviation: 0.0,
        }
    }

    /// Top of a stem in canvas space.
    #[inline]
    pub fn top(&self) -> f32 {
        self.bounds.min.y
    }

    /// Bottom of a stem in canvas space.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.bounds.max.y
    }
}

/// Classify a captured stroke into a musical-shape token.
pub fn classify(points: &[Vec2]) -> RecognizedShape {
    if points.len() < CLASSIFY_MIN_POINTS {
        let bounds = if points.is_empty() {
            Bounds::default()
        } else {
            Bounds::of(points)
        };
        return RecognizedShape::unknown(bounds.center(), bounds);
    }

    let bounds = Bounds::of(points);
    let width = bounds.width();
    let height = bounds.height();
    let center = bounds.center();

    // Stems first: tall and thin wins regardless of circularity.
    if height > STEM_ASPECT_RATIO * width && height > STEM_MIN_HEIGHT_PX {
        return RecognizedShape {
            kind: ShapeKind::Stem,
            center,
            bounds,
            mean_radius: 0.0,
            radius_deviation: 0.0,
        };
    }

    let mean_radius =
        points.iter().map(|p| p.distance(center)).sum::<f32>() / points.len() as f32;
    let radius_deviation = points
        .iter()
        .map(|p| (p.distance(center) - mean_radius).abs())
        .sum::<f32>()
        / points.len() as f32;

    let is_circular = radius_deviation < CIRCLE_DEVIATION_RATIO * mean_radius
        && mean_radius > CIRCLE_RADIUS_MIN_PX
        && mean_radius < CIRCLE_RADIUS_MAX_PX;

    if is_circular {
        // Small on both axes reads as a filled head; anything larger reads
        // as hollow. Ambiguous mid-size shapes deliberately land on filled.
        let kind = if width < FILLED_NOTE_MAX_EXTENT_PX && height < FILLED_NOTE_MAX_EXTENT_PX {
            ShapeKind::FilledNote
        } else {
            ShapeKind::HollowNote
        };
        return RecognizedShape {
            kind,
            center,
            bounds,
            mean_radius,
            radius_deviation,
        };
    }

    RecognizedShape::unknown(center, bounds)
}
