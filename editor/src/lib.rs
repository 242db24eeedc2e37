//! Editor services for Cobra projects
//!
//! Content browser model and thumbnails, the edit/play/simulate scene
//! controller and persisted editor settings. Rendering of the editor UI itself
//! is left to the host application.

pub mod asset_tree;
pub mod editor_state;
pub mod scene_operations;
pub mod settings;
pub mod shared_state;
pub mod thumbnail_cache;

pub use editor_state::EditorState;
pub use scene_operations::{EditorSceneController, SceneState};
pub use settings::EditorSettings;
pub use thumbnail_cache::{ThumbnailCache, ThumbnailCacheConfig};
