//! Handle-indexed asset management
//!
//! Assets are identified by an [`AssetHandle`]. The registry maps each
//! handle to its [`AssetMetadata`] (type plus path relative to the project's
//! asset directory); loaded instances are cached separately and created on
//! first access through the [`AssetImporter`].

pub mod editor_asset_manager;
pub mod handle;
pub mod importer;
pub mod metadata;
pub mod scene_importer;
pub mod texture_importer;

pub use editor_asset_manager::{AssetRegistry, EditorAssetManager};
pub use handle::AssetHandle;
pub use importer::{AssetImporter, ImportFn};
pub use metadata::{AssetMetadata, AssetType};

use crate::graphics::texture::Texture2D;
use crate::scene::Scene;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors produced while decoding or importing an asset
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("unsupported asset data: {0}")]
    UnsupportedType(String),
    #[error("malformed asset data: {0}")]
    Malformed(String),
    #[error("asset IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A loaded asset instance
#[derive(Clone)]
pub enum Asset {
    Texture2D(Arc<Texture2D>),
    Scene(Arc<Scene>),
}

impl Asset {
    pub fn asset_type(&self) -> AssetType {
        match self {
            Asset::Texture2D(_) => AssetType::Texture2D,
            Asset::Scene(_) => AssetType::Scene,
        }
    }

    pub fn as_texture(&self) -> Option<&Arc<Texture2D>> {
        match self {
            Asset::Texture2D(texture) => Some(texture),
            _ => None,
        }
    }

    pub fn as_scene(&self) -> Option<&Arc<Scene>> {
        match self {
            Asset::Scene(scene) => Some(scene),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Asset::Texture2D(texture) => f
                .debug_struct("Texture2D")
                .field("width", &texture.width())
                .field("height", &texture.height())
                .field("format", &texture.format())
                .finish(),
            Asset::Scene(scene) => f
                .debug_struct("Scene")
                .field("name", &scene.name())
                .field("entities", &scene.entity_count())
                .finish(),
        }
    }
}

/// Lookup surface shared by asset manager implementations
pub trait AssetManagerBase {
    /// Loaded asset for `handle`, importing it on first access
    fn get_asset(&mut self, handle: AssetHandle) -> Option<Asset>;

    fn is_asset_handle_valid(&self, handle: AssetHandle) -> bool;

    fn is_asset_loaded(&self, handle: AssetHandle) -> bool;

    fn get_asset_type(&self, handle: AssetHandle) -> AssetType;
}
