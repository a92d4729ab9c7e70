// Host-side tests for stroke classification.
// The main crate is wasm-only, so the pure modules are included directly.

#![allow(dead_code)]

#[path = "../src/core"]
mod core {
    pub mod constants;
    pub mod recognizer;
}

use crate::core::recognizer::{classify, Bounds, ShapeKind};
use glam::Vec2;

/// Evenly sampled circle of `n` points.
fn circle(center: Vec2, radius: f32, n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let a = i as f32 / n as f32 * std::f32::consts::TAU;
            center + Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect()
}

/// Roughly vertical stroke with a small alternating x wobble.
fn vertical_stroke(x: f32, y_top: f32, y_bottom: f32, n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            let wobble = if i % 2 == 0 { -3.0 } else { 3.0 };
            Vec2::new(x + wobble, y_top + t * (y_bottom - y_top))
        })
        .collect()
}

#[test]
fn fewer_than_five_points_is_unknown() {
    let points = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(0.0, 10.0),
    ];
    let shape = classify(&points);
    assert_eq!(shape.kind, ShapeKind::Unknown);
}

#[test]
fn empty_stroke_is_unknown() {
    assert_eq!(classify(&[]).kind, ShapeKind::Unknown);
}

#[test]
fn tall_thin_stroke_is_stem() {
    let points = vertical_stroke(100.0, 100.0, 140.0, 12);
    let shape = classify(&points);
    assert_eq!(shape.kind, ShapeKind::Stem);
    assert!((shape.top() - 100.0).abs() < 1e-3);
    assert!((shape.bottom() - 140.0).abs() < 1e-3);
}

#[test]
fn short_vertical_stroke_is_not_stem() {
    // Height 20 is under the stem minimum, and a straight line fails the
    // circularity test.
    let points: Vec<Vec2> = (0..=10).map(|i| Vec2::new(50.0, i as f32 * 2.0)).collect();
    assert_eq!(classify(&points).kind, ShapeKind::Unknown);
}

#[test]
fn small_circle_is_filled_note() {
    let shape = classify(&circle(Vec2::new(100.0, 140.0), 6.0, 32));
    assert_eq!(shape.kind, ShapeKind::FilledNote);
    assert!((shape.center.x - 100.0).abs() < 1e-3);
    assert!((shape.center.y - 140.0).abs() < 1e-3);
    assert!((shape.mean_radius - 6.0).abs() < 1e-3);
    assert!(shape.radius_deviation < 0.1);
}

#[test]
fn large_circle_is_hollow_note() {
    // Width 30 exceeds the filled extent on both axes.
    let shape = classify(&circle(Vec2::new(200.0, 80.0), 15.0, 32));
    assert_eq!(shape.kind, ShapeKind::HollowNote);
}

#[test]
fn tiny_scribble_is_unknown() {
    // Mean radius under the plausible note-head range.
    let shape = classify(&circle(Vec2::new(40.0, 40.0), 2.0, 16));
    assert_eq!(shape.kind, ShapeKind::Unknown);
}

#[test]
fn oversized_loop_is_unknown() {
    // Mean radius above the plausible note-head range, and not tall enough
    // relative to width to read as a stem.
    let shape = classify(&circle(Vec2::new(300.0, 300.0), 40.0, 32));
    assert_eq!(shape.kind, ShapeKind::Unknown);
}

#[test]
fn stem_wins_over_circularity() {
    // A narrow closed loop is both tall-and-thin and fairly round; the stem
    // test runs first.
    let points: Vec<Vec2> = (0..32)
        .map(|i| {
            let a = i as f32 / 32.0 * std::f32::consts::TAU;
            Vec2::new(100.0 + a.cos() * 4.0, 200.0 + a.sin() * 30.0)
        })
        .collect();
    assert_eq!(classify(&points).kind, ShapeKind::Stem);
}

#[test]
fn bounds_of_points() {
    let b = Bounds::of(&[Vec2::new(1.0, 2.0), Vec2::new(5.0, 10.0)]);
    assert_eq!(b.width(), 4.0);
    assert_eq!(b.height(), 8.0);
    assert_eq!(b.center(), Vec2::new(3.0, 6.0));
}
