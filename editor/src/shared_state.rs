//! Editor state shared with background work
//!
//! Selection, dirty flag and scene path live behind a mutex so asset
//! import jobs and the main loop can both read them.

use crate::scene_operations::SceneState;
use cobra_engine::core::Uuid;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
pub struct SharedEditorState {
    /// Currently selected entity in the hierarchy
    pub selected_entity: Option<Uuid>,
    /// Whether the scene has been modified since last save
    pub scene_modified: bool,
    pub current_scene_path: Option<PathBuf>,
    pub scene_state: SceneState,
}

impl SharedEditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_selected_entity(&mut self, entity: Option<Uuid>) {
        if self.selected_entity != entity {
            debug!(from = ?self.selected_entity, to = ?entity, "Selected entity changed");
            self.selected_entity = entity;
        }
    }

    pub fn mark_scene_modified(&mut self) {
        if !self.scene_modified {
            debug!("Scene marked as modified");
            self.scene_modified = true;
        }
    }

    pub fn mark_scene_saved(&mut self) {
        if self.scene_modified {
            debug!("Scene marked as saved");
            self.scene_modified = false;
        }
    }

    pub fn set_scene_path(&mut self, path: Option<PathBuf>) {
        if self.current_scene_path != path {
            debug!(from = ?self.current_scene_path, to = ?path, "Scene path changed");
            self.current_scene_path = path;
        }
    }
}

/// Cloneable handle to [`SharedEditorState`]
#[derive(Debug, Clone, Default)]
pub struct SharedEditorStateHandle {
    inner: Arc<Mutex<SharedEditorState>>,
}

impl SharedEditorStateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the state, recovering from a poisoned lock
    pub fn lock(&self) -> MutexGuard<'_, SharedEditorState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn selected_entity(&self) -> Option<Uuid> {
        self.lock().selected_entity
    }

    pub fn set_selected_entity(&self, entity: Option<Uuid>) {
        self.lock().set_selected_entity(entity);
    }

    pub fn mark_scene_modified(&self) {
        self.lock().mark_scene_modified();
    }

    pub fn mark_scene_saved(&self) {
        self.lock().mark_scene_saved();
    }

    pub fn is_scene_modified(&self) -> bool {
        self.lock().scene_modified
    }

    pub fn scene_state(&self) -> SceneState {
        self.lock().scene_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modified_flag_round_trip() {
        let handle = SharedEditorStateHandle::new();
        assert!(!handle.is_scene_modified());
        handle.mark_scene_modified();
        assert!(handle.is_scene_modified());
        handle.mark_scene_saved();
        assert!(!handle.is_scene_modified());
    }

    #[test]
    fn test_selection_visible_across_clones() {
        let handle = SharedEditorStateHandle::new();
        let other = handle.clone();
        let id = Uuid::from_u64(9);
        std::thread::spawn(move || other.set_selected_entity(Some(id)))
            .join()
            .unwrap();
        assert_eq!(handle.selected_entity(), Some(id));
    }
}
