//! Main editor state management
//!
//! [`EditorState`] owns one editing session: the open project, its asset
//! manager, the content browser model and the scene controller. The frame
//! loop calls [`EditorState::on_update`] once per frame.

use crate::asset_tree::AssetTree;
use crate::scene_operations::{EditorSceneController, SceneState};
use crate::settings::EditorSettings;
use crate::shared_state::SharedEditorStateHandle;
use crate::thumbnail_cache::ThumbnailCache;
use cobra_engine::asset::{AssetHandle, AssetManagerBase, AssetType, EditorAssetManager};
use cobra_engine::core::{MainThreadQueue, Uuid};
use cobra_engine::graphics::Renderer2D;
use cobra_engine::project::{Project, ProjectError};
use cobra_engine::scene::SceneError;
use glam::Mat4;
use std::path::Path;
use tracing::{info, warn};

pub struct EditorState {
    pub asset_manager: EditorAssetManager,
    pub asset_tree: AssetTree,
    pub thumbnail_cache: ThumbnailCache,
    pub scenes: EditorSceneController,
    pub main_thread: MainThreadQueue,
    pub shared: SharedEditorStateHandle,
    pub settings: EditorSettings,
    /// Selection both sides agreed on at the last sync
    synced_selection: Option<Uuid>,
}

impl EditorState {
    /// Open a project: load its registry and its start scene if registered
    pub fn open_project<P: AsRef<Path>>(path: P, settings: EditorSettings) -> Result<Self, ProjectError> {
        let project = Project::load(path.as_ref())?;
        Ok(Self::new(project, settings))
    }

    pub fn new(project: Project, settings: EditorSettings) -> Self {
        info!(project = %project.config().name, "Opening editor session");

        let mut asset_manager = EditorAssetManager::new(project.clone());
        if !asset_manager.deserialize_asset_registry() {
            warn!("Starting with an empty asset registry");
        }
        let asset_tree = AssetTree::from_registry(asset_manager.asset_registry());
        let thumbnail_cache = ThumbnailCache::with_config(project.clone(), settings.thumbnails.into());

        let mut state = Self {
            asset_manager,
            asset_tree,
            thumbnail_cache,
            scenes: EditorSceneController::new(),
            main_thread: MainThreadQueue::new(),
            shared: SharedEditorStateHandle::new(),
            settings,
            synced_selection: None,
        };

        let start_scene = project.start_scene_path();
        if start_scene.is_file() {
            if let Err(e) = state.open_scene(&start_scene) {
                warn!(path = ?start_scene, error = %e, "Could not open start scene");
            }
        }
        state
    }

    pub fn project(&self) -> &Project {
        self.asset_manager.project()
    }

    /// Register a file and refresh the content browser
    pub fn import_asset<P: AsRef<Path>>(&mut self, path: P) -> Option<AssetHandle> {
        let handle = self.asset_manager.import_asset(path)?;
        self.refresh_asset_tree();
        Some(handle)
    }

    pub fn refresh_asset_tree(&mut self) {
        self.asset_tree.refresh(self.asset_manager.asset_registry());
    }

    /// Open a registered scene asset in the editor
    pub fn open_scene_asset(&mut self, handle: AssetHandle) -> bool {
        if self.asset_manager.get_asset_type(handle) != AssetType::Scene {
            warn!(handle = %handle, "Asset is not a scene");
            return false;
        }
        let Some(path) = self.asset_manager.get_file_path(handle) else {
            return false;
        };
        let absolute = self.project().asset_absolute_path(path);
        match self.open_scene(&absolute) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = ?absolute, error = %e, "Could not open scene asset");
                false
            }
        }
    }

    pub fn open_scene<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SceneError> {
        self.scenes.open_scene(path.as_ref())?;
        let mut shared = self.shared.lock();
        shared.set_scene_path(Some(path.as_ref().to_path_buf()));
        shared.set_selected_entity(None);
        shared.mark_scene_saved();
        shared.scene_state = SceneState::Edit;
        Ok(())
    }

    pub fn save_scene<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SceneError> {
        self.scenes.save_scene(path.as_ref())?;
        let mut shared = self.shared.lock();
        shared.set_scene_path(Some(path.as_ref().to_path_buf()));
        shared.mark_scene_saved();
        Ok(())
    }

    pub fn play(&mut self) {
        self.scenes.play();
        self.sync_scene_state();
    }

    pub fn simulate(&mut self) {
        self.scenes.simulate();
        self.sync_scene_state();
    }

    pub fn stop(&mut self) {
        self.scenes.stop();
        self.sync_scene_state();
    }

    /// One editor frame: deferred tasks, thumbnails, then the active scene
    pub fn on_update(&mut self, ts: f32, editor_view_projection: Mat4, renderer: &mut dyn Renderer2D) {
        self.main_thread.execute();
        self.thumbnail_cache.on_update();

        self.sync_selection();
        self.scenes.on_update(ts, editor_view_projection, renderer);
    }

    /// Duplicate the selected entity and select the copy on both sides
    pub fn duplicate_selected(&mut self) -> Option<Uuid> {
        self.sync_selection();
        let duplicate = self.scenes.duplicate_selected()?;
        let uuid = self.scenes.editor_scene().uuid_of(duplicate).ok()?;
        self.shared.mark_scene_modified();
        self.sync_selection();
        Some(uuid)
    }

    /// Reconcile the hierarchy panel's selection with the controller's.
    ///
    /// Whichever side moved since the last sync wins; the panel wins when
    /// both moved.
    pub fn sync_selection(&mut self) {
        let shared = self.shared.selected_entity();
        let local = self.scenes.selected();
        if shared != self.synced_selection {
            self.scenes.select(shared);
            self.synced_selection = shared;
        } else if local != self.synced_selection {
            self.shared.set_selected_entity(local);
            self.synced_selection = local;
        }
    }

    fn sync_scene_state(&self) {
        self.shared.lock().scene_state = self.scenes.state();
    }
}
