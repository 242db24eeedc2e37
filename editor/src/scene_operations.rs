//! Scene operation handlers
//!
//! The editor keeps one editable scene. Play and simulate run on a deep copy
//! of it, so stopping always returns to the untouched editor scene.

use cobra_engine::core::Uuid;
use cobra_engine::graphics::Renderer2D;
use cobra_engine::scene::{Entity, Scene, SceneError, SceneSerializer, ViewportSize};
use cobra_engine::scripting::{NullScriptHost, ScriptHost};
use glam::Mat4;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneState {
    #[default]
    Edit,
    Play,
    Simulate,
}

pub struct EditorSceneController {
    editor_scene: Scene,
    runtime_scene: Option<Scene>,
    state: SceneState,
    editor_scene_path: Option<PathBuf>,
    selected: Option<Uuid>,
    viewport: ViewportSize,
    scripts: Box<dyn ScriptHost>,
}

impl EditorSceneController {
    pub fn new() -> Self {
        Self::with_script_host(Box::new(NullScriptHost))
    }

    pub fn with_script_host(scripts: Box<dyn ScriptHost>) -> Self {
        Self {
            editor_scene: Scene::new("Untitled"),
            runtime_scene: None,
            state: SceneState::Edit,
            editor_scene_path: None,
            selected: None,
            viewport: ViewportSize::default(),
            scripts,
        }
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Scene currently shown: the runtime copy while playing or simulating
    pub fn active_scene(&self) -> &Scene {
        self.runtime_scene.as_ref().unwrap_or(&self.editor_scene)
    }

    pub fn active_scene_mut(&mut self) -> &mut Scene {
        self.runtime_scene.as_mut().unwrap_or(&mut self.editor_scene)
    }

    pub fn editor_scene(&self) -> &Scene {
        &self.editor_scene
    }

    pub fn editor_scene_mut(&mut self) -> &mut Scene {
        &mut self.editor_scene
    }

    pub fn editor_scene_path(&self) -> Option<&Path> {
        self.editor_scene_path.as_deref()
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn select(&mut self, entity: Option<Uuid>) {
        self.selected = entity;
    }

    pub fn selected_entity(&self) -> Option<Entity> {
        self.active_scene().get_entity_by_uuid(self.selected?)
    }

    /// Replace the editor scene with an empty one
    pub fn new_scene(&mut self, name: &str) {
        self.stop();
        let mut scene = Scene::new(name);
        scene.on_viewport_resize(self.viewport.width, self.viewport.height);
        self.editor_scene = scene;
        self.editor_scene_path = None;
        self.selected = None;
        info!(scene = name, "Created new scene");
    }

    /// Load a scene file as the editor scene; the current scene stays on failure
    pub fn open_scene<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SceneError> {
        let path = path.as_ref();
        self.stop();
        let mut scene = SceneSerializer::deserialize(path)?;
        scene.on_viewport_resize(self.viewport.width, self.viewport.height);
        self.editor_scene = scene;
        self.editor_scene_path = Some(path.to_path_buf());
        self.selected = None;
        info!(path = ?path, "Opened scene");
        Ok(())
    }

    pub fn save_scene<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SceneError> {
        let path = path.as_ref();
        SceneSerializer::serialize(&self.editor_scene, path)?;
        self.editor_scene_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Save to the path the scene was opened from or last saved to
    pub fn save_current(&mut self) -> Result<bool, SceneError> {
        let Some(path) = self.editor_scene_path.clone() else {
            warn!("Scene has no file path yet");
            return Ok(false);
        };
        self.save_scene(path)?;
        Ok(true)
    }

    pub fn play(&mut self) {
        if self.state == SceneState::Simulate {
            self.stop();
        }
        if self.state == SceneState::Play {
            return;
        }
        let mut runtime = Scene::copy(&self.editor_scene);
        runtime.on_runtime_start(self.scripts.as_mut());
        self.runtime_scene = Some(runtime);
        self.state = SceneState::Play;
    }

    pub fn simulate(&mut self) {
        if self.state == SceneState::Play {
            self.stop();
        }
        if self.state == SceneState::Simulate {
            return;
        }
        let mut runtime = Scene::copy(&self.editor_scene);
        runtime.on_simulation_start();
        self.runtime_scene = Some(runtime);
        self.state = SceneState::Simulate;
    }

    /// Stop playback and discard the runtime copy
    pub fn stop(&mut self) {
        if let Some(mut runtime) = self.runtime_scene.take() {
            match self.state {
                SceneState::Play => runtime.on_runtime_stop(self.scripts.as_mut()),
                SceneState::Simulate => runtime.on_simulation_stop(),
                SceneState::Edit => {}
            }
        }
        self.state = SceneState::Edit;
    }

    /// Pause or resume the running scene; ignored while editing
    pub fn set_paused(&mut self, paused: bool) {
        if let Some(runtime) = &mut self.runtime_scene {
            runtime.set_paused(paused);
        }
    }

    pub fn step(&mut self, frames: u32) {
        if let Some(runtime) = &mut self.runtime_scene {
            runtime.step(frames);
        }
    }

    pub fn on_update(&mut self, ts: f32, editor_view_projection: Mat4, renderer: &mut dyn Renderer2D) {
        match (self.state, self.runtime_scene.as_mut()) {
            (SceneState::Play, Some(runtime)) => {
                runtime.on_update_runtime(ts, self.scripts.as_mut(), renderer)
            }
            (SceneState::Simulate, Some(runtime)) => {
                runtime.on_update_simulation(ts, editor_view_projection, renderer)
            }
            _ => self
                .editor_scene
                .on_update_editor(editor_view_projection, renderer),
        }
    }

    pub fn on_viewport_resize(&mut self, width: u32, height: u32) {
        self.viewport = ViewportSize::new(width, height);
        self.editor_scene.on_viewport_resize(width, height);
        if let Some(runtime) = &mut self.runtime_scene {
            runtime.on_viewport_resize(width, height);
        }
    }

    /// Duplicate the selected entity in edit mode and select the copy
    pub fn duplicate_selected(&mut self) -> Option<Entity> {
        if self.state != SceneState::Edit {
            return None;
        }
        let entity = self.editor_scene.get_entity_by_uuid(self.selected?)?;
        let duplicate = self.editor_scene.duplicate_entity(entity).ok()?;
        self.selected = self.editor_scene.uuid_of(duplicate).ok();
        Some(duplicate)
    }
}

impl Default for EditorSceneController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobra_engine::scene::TagComponent;

    #[test]
    fn test_state_transitions() {
        let mut controller = EditorSceneController::new();
        assert_eq!(controller.state(), SceneState::Edit);

        controller.play();
        assert_eq!(controller.state(), SceneState::Play);
        assert!(controller.active_scene().is_running());

        controller.simulate();
        assert_eq!(controller.state(), SceneState::Simulate);
        assert!(!controller.active_scene().is_running());
        assert!(controller.active_scene().physics_world().is_some());

        controller.stop();
        assert_eq!(controller.state(), SceneState::Edit);
        assert!(controller.active_scene().physics_world().is_none());
    }

    #[test]
    fn test_duplicate_selected_only_in_edit_mode() {
        let mut controller = EditorSceneController::new();
        let entity = controller.editor_scene_mut().create_entity("Crate");
        let uuid = controller.editor_scene().uuid_of(entity).unwrap();
        controller.select(Some(uuid));

        let duplicate = controller.duplicate_selected().unwrap();
        assert_ne!(controller.selected(), Some(uuid));
        assert_eq!(
            controller
                .editor_scene()
                .get_component::<TagComponent>(duplicate)
                .unwrap()
                .tag,
            "Crate"
        );

        controller.play();
        assert!(controller.duplicate_selected().is_none());
    }

    #[test]
    fn test_save_current_without_path() {
        let mut controller = EditorSceneController::new();
        assert!(!controller.save_current().unwrap());
    }
}
