//! Persisted project shape.
//!
//! The backing store keeps a JSON document describing the room, the listener
//! and the source layout. Audio bytes are never embedded; uploaded files are
//! referenced by name/URL only, so a rehydrated file source may point at a
//! stale object URL until re-uploaded.

use crate::core::constants::*;
use crate::core::spatial::{DemoVoice, SoundSource, SourceKind, SpatialScene};
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for RoomSpec {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 3.0,
            depth: 10.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListenerSpec {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSource {
    pub id: String,
    pub label: String,
    pub position: [f32; 2],
    pub volume: f32,
    pub color: String,
    #[serde(default)]
    pub is_uploaded_file: bool,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub master_volume: f32,
    pub total_sources: usize,
    #[serde(default)]
    pub uploaded_files: usize,
    #[serde(default)]
    pub demo_sources: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialProject {
    pub room: RoomSpec,
    pub listener: ListenerSpec,
    pub sources: Vec<ProjectSource>,
    pub settings: ProjectSettings,
}

impl ProjectSource {
    fn from_source(source: &SoundSource) -> Self {
        let (file_name, audio_url) = match &source.kind {
            SourceKind::File { url, file_name } => (file_name.clone(), Some(url.clone())),
            SourceKind::Demo(_) => (None, None),
        };
        Self {
            id: source.id.clone(),
            label: source.label.clone(),
            position: [source.position.x, source.position.y],
            volume: source.volume,
            color: source.color.clone(),
            is_uploaded_file: source.is_file(),
            file_name,
            audio_url,
        }
    }

    fn into_source(self) -> SoundSource {
        let kind = if self.is_uploaded_file {
            SourceKind::File {
                url: self.audio_url.unwrap_or_default(),
                file_name: self.file_name,
            }
        } else {
            // Demo voices are identified by label in the stored shape.
            SourceKind::Demo(match self.label.as_str() {
                "Drums" => DemoVoice::Drums,
                "Bass" => DemoVoice::Bass,
                _ => DemoVoice::Piano,
            })
        };
        SoundSource {
            id: self.id,
            label: self.label,
            position: Vec2::new(self.position[0], self.position[1]),
            volume: self.volume.clamp(0.0, 1.0),
            color: self.color,
            kind,
        }
    }
}

impl SpatialProject {
    pub fn from_scene(scene: &SpatialScene) -> Self {
        let uploaded = scene.sources.iter().filter(|s| s.is_file()).count();
        Self {
            room: RoomSpec::default(),
            listener: ListenerSpec::default(),
            sources: scene.sources.iter().map(ProjectSource::from_source).collect(),
            settings: ProjectSettings {
                master_volume: scene.master_volume,
                total_sources: scene.sources.len(),
                uploaded_files: uploaded,
                demo_sources: scene.sources.len() - uploaded,
            },
        }
    }

    /// Rebuild a scene from the stored shape. Live audio handles are never
    /// part of the project; playback restarts from scratch.
    pub fn into_scene(self) -> SpatialScene {
        let mut scene = SpatialScene::empty();
        scene.master_volume = self.settings.master_volume.clamp(0.0, 1.0);
        scene.set_sources(
            self.sources
                .into_iter()
                .map(ProjectSource::into_source)
                .collect(),
        );
        scene
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for SpatialProject {
    fn default() -> Self {
        Self {
            room: RoomSpec::default(),
            listener: ListenerSpec::default(),
            sources: Vec::new(),
            settings: ProjectSettings {
                master_volume: DEFAULT_MASTER_VOLUME,
                total_sources: 0,
                uploaded_files: 0,
                demo_sources: 0,
            },
        }
    }
}
