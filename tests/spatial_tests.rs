// Host-side tests for the spatial scene and playback-set lifecycle.
// The main crate is wasm-only, so the pure modules are included directly.

#![allow(dead_code)]

#[path = "../src/core"]
mod core {
    pub mod constants;
    pub mod spatial;
}

use crate::core::spatial::{
    clamp_position, effective_gain, pan_from_x, PlaybackSet, SourceSet, SpatialScene,
};
use glam::Vec2;

#[test]
fn pan_is_centered_monotonic_and_clamped() {
    assert_eq!(pan_from_x(0.0), 0.0);
    assert!((pan_from_x(75.0) - 0.5).abs() < 1e-6);
    assert!((pan_from_x(-75.0) + 0.5).abs() < 1e-6);
    assert!(pan_from_x(50.0) < pan_from_x(100.0));
    // Room edges overdrive the divisor and clamp at full pan.
    assert_eq!(pan_from_x(200.0), 1.0);
    assert_eq!(pan_from_x(-200.0), -1.0);
}

#[test]
fn effective_gain_composes_and_clamps() {
    assert!((effective_gain(0.5, 0.8) - 0.4).abs() < 1e-6);
    assert_eq!(effective_gain(1.5, 1.0), 1.0);
    assert_eq!(effective_gain(0.5, 2.0), 0.5);
    assert_eq!(effective_gain(-0.2, 0.8), 0.0);
}

#[test]
fn positions_clamp_to_room_bounds() {
    let p = clamp_position(Vec2::new(500.0, -900.0));
    assert_eq!(p, Vec2::new(200.0, -150.0));
    let inside = Vec2::new(-13.0, 42.0);
    assert_eq!(clamp_position(inside), inside);
}

#[test]
fn demo_scene_has_three_synth_sources() {
    let scene = SpatialScene::with_demo_sources();
    assert_eq!(scene.sources.len(), 3);
    assert_eq!(scene.count_in(SourceSet::Demo), 3);
    assert_eq!(scene.count_in(SourceSet::Uploaded), 0);
    let ids: Vec<&str> = scene.sources.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["demo1", "demo2", "demo3"]);
    // Piano sits fully left of the listener, half pan.
    let piano = scene.source_by_id("demo1").unwrap();
    assert!((piano.pan() + 100.0 / 150.0).abs() < 1e-6);
}

#[test]
fn hit_test_uses_fixed_radius() {
    let scene = SpatialScene::with_demo_sources();
    assert_eq!(scene.hit_test(Vec2::new(-100.0, 14.9)), Some(0));
    assert_eq!(scene.hit_test(Vec2::new(-100.0, 15.1)), None);
    assert_eq!(scene.hit_test(Vec2::new(100.0, -80.0)), Some(1));
}

#[test]
fn drag_moves_one_source_and_clamps() {
    let mut scene = SpatialScene::with_demo_sources();
    assert_eq!(scene.begin_drag(Vec2::new(-100.0, 0.0)), Some(0));
    assert_eq!(scene.focused, Some(0));

    let (id, pos) = scene.drag_to(Vec2::new(-500.0, 10.0)).unwrap();
    assert_eq!(id, "demo1");
    assert_eq!(pos, Vec2::new(-200.0, 10.0));
    assert_eq!(scene.sources[0].position, pos);
    // Only the dragged source moved.
    assert_eq!(scene.sources[1].position, Vec2::new(100.0, -80.0));

    scene.end_drag();
    assert_eq!(scene.dragging, None);
    // Focus survives pointer-up so the volume slider has a target.
    assert_eq!(scene.focused, Some(0));
    assert_eq!(scene.drag_to(Vec2::new(0.0, 0.0)), None);
}

#[test]
fn drag_on_empty_space_is_a_no_op() {
    let mut scene = SpatialScene::with_demo_sources();
    assert_eq!(scene.begin_drag(Vec2::new(0.0, 0.0)), None);
    assert_eq!(scene.drag_to(Vec2::new(50.0, 50.0)), None);
    assert_eq!(scene.sources[0].position, Vec2::new(-100.0, 0.0));
    assert_eq!(scene.focused, None);
}

#[test]
fn volume_edits_clamp() {
    let mut scene = SpatialScene::with_demo_sources();
    assert!(scene.set_volume(0, 1.7).is_some());
    assert_eq!(scene.sources[0].volume, 1.0);
    assert!(scene.set_volume(99, 0.5).is_none());
    scene.set_master_volume(-3.0);
    assert_eq!(scene.master_volume, 0.0);
}

#[test]
fn uploaded_sources_spread_on_a_grid() {
    let mut scene = SpatialScene::with_demo_sources();
    scene.add_uploaded(
        "upload_1_0".into(),
        "kick".into(),
        "blob:a".into(),
        Some("kick.wav".into()),
        0,
        2,
    );
    scene.add_uploaded(
        "upload_1_1".into(),
        "pad".into(),
        "blob:b".into(),
        Some("pad.wav".into()),
        1,
        2,
    );
    assert_eq!(scene.count_in(SourceSet::Uploaded), 2);
    assert_eq!(scene.count_in(SourceSet::Demo), 3);
    assert_eq!(scene.sources[3].position, Vec2::new(-80.0, -50.0));
    assert_eq!(scene.sources[4].position, Vec2::new(0.0, -20.0));
    assert!(scene.sources[3].is_file());
}

#[test]
fn playback_set_lifecycle() {
    let mut set = PlaybackSet::default();
    assert!(set.begin_start());
    // Starting again while a start is in flight is refused.
    assert!(!set.begin_start());
    assert!(set.mark_playing());
    assert!(!set.mark_playing());

    assert!(set.stop());
    // Stop is idempotent.
    assert!(!set.stop());
}

#[test]
fn edits_during_the_resume_gap_land_in_the_start_snapshot() {
    let mut scene = SpatialScene::with_demo_sources();
    let mut set = PlaybackSet::default();
    assert!(set.begin_start());

    // Drag and slider input arriving while the context resume is in flight.
    scene.begin_drag(Vec2::new(-100.0, 0.0));
    scene.drag_to(Vec2::new(150.0, 60.0));
    scene.end_drag();
    scene.set_master_volume(0.3);
    scene.set_volume(0, 0.1);

    // The graph is built from a snapshot taken after the resume, so the
    // mid-gap edits are already in it.
    assert!(set.mark_playing());
    let batch = scene.snapshot_set(SourceSet::Demo);
    assert_eq!(batch.len(), 3);
    assert_eq!(batch[0].position, Vec2::new(150.0, 60.0));
    assert!((batch[0].pan() - 1.0).abs() < 1e-6);
    assert_eq!(batch[0].volume, 0.1);
    assert_eq!(scene.master_volume, 0.3);
}

#[test]
fn snapshot_filters_by_set() {
    let mut scene = SpatialScene::with_demo_sources();
    scene.add_uploaded(
        "upload_1_0".into(),
        "kick".into(),
        "blob:a".into(),
        Some("kick.wav".into()),
        0,
        1,
    );
    assert_eq!(scene.snapshot_set(SourceSet::Demo).len(), 3);
    let uploads = scene.snapshot_set(SourceSet::Uploaded);
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].id, "upload_1_0");
}

#[test]
fn stop_during_start_wins_the_race() {
    let mut set = PlaybackSet::default();
    assert!(set.begin_start());
    assert!(set.stop());
    // The resume path observes the stop and aborts.
    assert!(!set.mark_playing());
}
