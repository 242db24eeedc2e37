//! Scene file format
//!
//! ```json
//! {
//!   "Scene": "Start",
//!   "Viewport": { "Width": 1280, "Height": 720 },
//!   "Entities": [
//!     { "Entity": 1234, "TagComponent": { "Tag": "Player" }, "TransformComponent": { ... } }
//!   ]
//! }
//! ```
//!
//! Component keys are the registered component names. Unknown keys are
//! skipped with a warning so files from newer builds still open.

use super::component_registry::component_registry;
use super::{Scene, SceneError, ViewportSize};
use crate::core::Uuid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Serialized form of a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(rename = "Scene", default = "default_scene_name")]
    pub name: String,
    #[serde(rename = "Viewport", default)]
    pub viewport: ViewportSize,
    #[serde(rename = "Entities", default)]
    pub entities: Vec<EntityDocument>,
    /// Present only in play-mode snapshots
    #[serde(rename = "Runtime", default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<RuntimeState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDocument {
    #[serde(rename = "Entity")]
    pub id: Uuid,
    #[serde(flatten)]
    pub components: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuntimeState {
    pub paused: bool,
    pub step_frames: u32,
}

fn default_scene_name() -> String {
    "Untitled".to_string()
}

pub struct SceneSerializer;

impl SceneSerializer {
    /// Capture every entity, ordered by UUID
    pub fn to_document(scene: &Scene) -> Result<SceneDocument, SceneError> {
        let registry = component_registry();
        let mut entities = Vec::with_capacity(scene.entity_count());

        for uuid in scene.entities() {
            let Some(entity) = scene.get_entity_by_uuid(uuid) else {
                continue;
            };
            let mut components = BTreeMap::new();
            for entry in registry.entries() {
                if let Some(value) = (entry.serialize)(scene.registry(), entity)? {
                    components.insert(entry.name.to_string(), value);
                }
            }
            entities.push(EntityDocument {
                id: uuid,
                components,
            });
        }

        Ok(SceneDocument {
            name: scene.name().to_string(),
            viewport: scene.viewport(),
            entities,
            runtime: None,
        })
    }

    /// Build a scene from a document. Nothing is returned unless every known
    /// component parses.
    pub fn from_document(document: &SceneDocument) -> Result<Scene, SceneError> {
        let registry = component_registry();
        let mut scene = Scene::new(document.name.clone());
        scene.set_viewport(document.viewport);

        for entity_doc in &document.entities {
            let entity = scene.create_entity_with_uuid(entity_doc.id, "");
            for (name, value) in &entity_doc.components {
                let Some(entry) = registry.get(name) else {
                    warn!(component = %name, entity = %entity_doc.id, "Unknown component, skipping");
                    continue;
                };
                let viewport = scene.viewport();
                (entry.deserialize)(scene.registry_mut(), entity, value, viewport)
                    .map_err(|e| e.into_scene_error(name, entity_doc.id))?;
            }
        }

        if let Some(runtime) = document.runtime {
            scene.set_paused(runtime.paused);
            scene.step(runtime.step_frames);
        }
        Ok(scene)
    }

    /// Write the scene as pretty JSON, creating parent directories
    pub fn serialize<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), SceneError> {
        let path = path.as_ref();
        let document = Self::to_document(scene)?;
        let json = serde_json::to_string_pretty(&document)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, json)?;
        info!(path = ?path, entities = document.entities.len(), "Scene saved");
        Ok(())
    }

    pub fn deserialize<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let document: SceneDocument = serde_json::from_str(&content)?;
        let scene = Self::from_document(&document)?;
        info!(path = ?path, entities = scene.entity_count(), "Scene loaded");
        Ok(scene)
    }

    /// Replace `scene` with the file's contents; on failure `scene` is untouched
    pub fn deserialize_into<P: AsRef<Path>>(scene: &mut Scene, path: P) -> bool {
        let path = path.as_ref();
        match Self::deserialize(path) {
            Ok(loaded) => {
                *scene = loaded;
                true
            }
            Err(e) => {
                error!(path = ?path, error = %e, "Failed to load scene");
                false
            }
        }
    }

    /// Compact snapshot including pause state, for play-mode round trips
    pub fn serialize_runtime(scene: &Scene) -> Result<String, SceneError> {
        let mut document = Self::to_document(scene)?;
        document.runtime = Some(RuntimeState {
            paused: scene.is_paused(),
            step_frames: scene.step_frames(),
        });
        Ok(serde_json::to_string(&document)?)
    }

    pub fn deserialize_runtime(snapshot: &str) -> Result<Scene, SceneError> {
        let document: SceneDocument = serde_json::from_str(snapshot)?;
        Self::from_document(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SpriteRendererComponent, TagComponent, TransformComponent};
    use glam::Vec3;

    #[test]
    fn test_unknown_component_is_skipped() {
        let json = r#"{
            "Scene": "Future",
            "Entities": [
                { "Entity": 7, "TagComponent": { "Tag": "Thing" }, "HologramComponent": { "Flicker": 3 } }
            ]
        }"#;
        let document: SceneDocument = serde_json::from_str(json).unwrap();
        let scene = SceneSerializer::from_document(&document).unwrap();

        let entity = scene.get_entity_by_uuid(Uuid::from_u64(7)).unwrap();
        assert_eq!(scene.get_component::<TagComponent>(entity).unwrap().tag, "Thing");
        assert_eq!(scene.name(), "Future");
    }

    #[test]
    fn test_malformed_component_fails() {
        let json = r#"{
            "Scene": "Broken",
            "Entities": [ { "Entity": 1, "TransformComponent": { "Translation": "up" } } ]
        }"#;
        let document: SceneDocument = serde_json::from_str(json).unwrap();
        match SceneSerializer::from_document(&document) {
            Err(SceneError::Component { name, entity, .. }) => {
                assert_eq!(name, "TransformComponent");
                assert_eq!(entity, Uuid::from_u64(1));
            }
            other => panic!("expected component error, got {other:?}"),
        }
    }

    #[test]
    fn test_document_keys() {
        let mut scene = Scene::new("Keys");
        let entity = scene.create_entity("Box");
        scene
            .add_component(entity, SpriteRendererComponent::default())
            .unwrap();
        let value = serde_json::to_value(SceneSerializer::to_document(&scene).unwrap()).unwrap();

        assert_eq!(value["Scene"], "Keys");
        let first = &value["Entities"][0];
        assert!(first["Entity"].is_u64());
        assert_eq!(first["TagComponent"]["Tag"], "Box");
        assert!(first.get("SpriteRendererComponent").is_some());
        assert!(first.get("IdComponent").is_none());
        assert!(value.get("Runtime").is_none());
    }

    #[test]
    fn test_runtime_snapshot_keeps_pause_state() {
        let mut scene = Scene::new("Snap");
        let entity = scene.create_entity("Mover");
        scene.get_component_mut::<TransformComponent>(entity).unwrap().translation =
            Vec3::new(3.0, 4.0, 0.0);
        scene.set_paused(true);
        scene.step(2);

        let snapshot = SceneSerializer::serialize_runtime(&scene).unwrap();
        assert!(!snapshot.contains('\n'));
        let restored = SceneSerializer::deserialize_runtime(&snapshot).unwrap();
        assert!(restored.is_paused());
        assert_eq!(restored.step_frames(), 2);
        let entity = restored.find_entity_by_name("Mover").unwrap();
        assert_eq!(
            restored.get_component::<TransformComponent>(entity).unwrap().translation,
            Vec3::new(3.0, 4.0, 0.0)
        );
    }

    #[test]
    fn test_deserialize_into_keeps_scene_on_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.cobra");
        std::fs::write(&path, "{ not json").unwrap();

        let mut scene = Scene::new("Keep");
        scene.create_entity("Survivor");
        assert!(!SceneSerializer::deserialize_into(&mut scene, &path));
        assert_eq!(scene.name(), "Keep");
        assert!(scene.find_entity_by_name("Survivor").is_some());
    }
}
