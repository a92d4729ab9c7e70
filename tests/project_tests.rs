// Host-side tests for the persisted project document.
// The main crate is wasm-only, so the pure modules are included directly.

#![allow(dead_code)]

#[path = "../src/core"]
mod core {
    pub mod constants;
    pub mod spatial;
    pub mod project;
}

use crate::core::spatial::{DemoVoice, SourceKind, SpatialScene};
use crate::core::project::SpatialProject;
use glam::Vec2;

fn scene_with_upload() -> SpatialScene {
    let mut scene = SpatialScene::with_demo_sources();
    scene.set_master_volume(0.5);
    scene.set_volume(1, 0.25);
    scene.add_uploaded(
        "upload_7_0".into(),
        "rain".into(),
        "blob:rain".into(),
        Some("rain.ogg".into()),
        0,
        1,
    );
    scene
}

#[test]
fn save_load_round_trip_preserves_layout() {
    let scene = scene_with_upload();
    let json = SpatialProject::from_scene(&scene).to_json().unwrap();
    let restored = SpatialProject::from_json(&json).unwrap().into_scene();

    assert_eq!(restored.master_volume, 0.5);
    assert_eq!(restored.sources.len(), 4);
    for (a, b) in scene.sources.iter().zip(restored.sources.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.label, b.label);
        assert_eq!(a.position, b.position);
        assert_eq!(a.volume, b.volume);
        assert_eq!(a.color, b.color);
        assert_eq!(a.kind, b.kind);
    }
    // Interaction state never round-trips.
    assert_eq!(restored.dragging, None);
    assert_eq!(restored.focused, None);
}

#[test]
fn settings_count_source_kinds() {
    let project = SpatialProject::from_scene(&scene_with_upload());
    assert_eq!(project.settings.total_sources, 4);
    assert_eq!(project.settings.demo_sources, 3);
    assert_eq!(project.settings.uploaded_files, 1);
}

#[test]
fn document_uses_camel_case_keys() {
    let json = SpatialProject::from_scene(&scene_with_upload())
        .to_json()
        .unwrap();
    assert!(json.contains("\"masterVolume\""));
    assert!(json.contains("\"isUploadedFile\""));
    assert!(json.contains("\"audioUrl\""));
    assert!(json.contains("\"fileName\""));
    assert!(!json.contains("\"master_volume\""));
}

#[test]
fn demo_voice_rehydrates_from_label() {
    let scene = SpatialProject::from_scene(&SpatialScene::with_demo_sources()).into_scene();
    let kinds: Vec<&SourceKind> = scene.sources.iter().map(|s| &s.kind).collect();
    assert_eq!(kinds[0], &SourceKind::Demo(DemoVoice::Piano));
    assert_eq!(kinds[1], &SourceKind::Demo(DemoVoice::Drums));
    assert_eq!(kinds[2], &SourceKind::Demo(DemoVoice::Bass));
}

#[test]
fn minimal_document_parses_with_defaults() {
    let json = r##"{
        "room": {"width": 10.0, "height": 3.0, "depth": 10.0},
        "listener": {"x": 0.0, "y": 0.0, "z": 0.0},
        "sources": [{
            "id": "demo1",
            "label": "Piano",
            "position": [-100.0, 0.0],
            "volume": 0.8,
            "color": "#3b82f6"
        }],
        "settings": {"masterVolume": 0.8, "totalSources": 1}
    }"##;
    let scene = SpatialProject::from_json(json).unwrap().into_scene();
    assert_eq!(scene.sources.len(), 1);
    assert_eq!(scene.sources[0].kind, SourceKind::Demo(DemoVoice::Piano));
    assert_eq!(scene.sources[0].position, Vec2::new(-100.0, 0.0));
}

#[test]
fn out_of_range_volumes_clamp_on_load() {
    let json = r##"{
        "room": {"width": 10.0, "height": 3.0, "depth": 10.0},
        "listener": {"x": 0.0, "y": 0.0, "z": 0.0},
        "sources": [{
            "id": "demo1",
            "label": "Bass",
            "position": [0.0, 120.0],
            "volume": 1.9,
            "color": "#22c55e"
        }],
        "settings": {"masterVolume": 4.0, "totalSources": 1}
    }"##;
    let scene = SpatialProject::from_json(json).unwrap().into_scene();
    assert_eq!(scene.master_volume, 1.0);
    assert_eq!(scene.sources[0].volume, 1.0);
}

#[test]
fn garbage_input_is_an_error() {
    assert!(SpatialProject::from_json("not json").is_err());
    assert!(SpatialProject::from_json("{\"room\": {}}").is_err());
}

#[test]
fn uploaded_source_keeps_name_and_url() {
    let json = SpatialProject::from_scene(&scene_with_upload())
        .to_json()
        .unwrap();
    let restored = SpatialProject::from_json(&json).unwrap();
    let upload = restored
        .sources
        .iter()
        .find(|s| s.is_uploaded_file)
        .unwrap();
    assert_eq!(upload.file_name.as_deref(), Some("rain.ogg"));
    assert_eq!(upload.audio_url.as_deref(), Some("blob:rain"));
}
