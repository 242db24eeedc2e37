//! Asset manager used while editing a project
//!
//! Owns the persistent registry (`<assetDir>/AssetRegistry.json`) and the
//! lazily populated cache of loaded assets.

use super::{
    Asset, AssetError, AssetHandle, AssetImporter, AssetManagerBase, AssetMetadata, AssetType,
};
use crate::graphics::texture::Texture2D;
use crate::project::Project;
use crate::scene::Scene;
use crate::utils::paths;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Handle → metadata, ordered by handle so the serialized form is stable
pub type AssetRegistry = BTreeMap<AssetHandle, AssetMetadata>;

#[derive(Debug, Serialize, Deserialize)]
struct RegistryDocument {
    #[serde(rename = "AssetRegistry")]
    asset_registry: Vec<RegistryEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RegistryEntry {
    handle: AssetHandle,
    file_path: String,
    #[serde(rename = "Type")]
    asset_type: AssetType,
}

pub struct EditorAssetManager {
    project: Project,
    importer: AssetImporter,
    asset_registry: AssetRegistry,
    loaded_assets: HashMap<AssetHandle, Asset>,
}

impl EditorAssetManager {
    pub fn new(project: Project) -> Self {
        Self::with_importer(project, AssetImporter::new())
    }

    pub fn with_importer(project: Project, importer: AssetImporter) -> Self {
        Self {
            project,
            importer,
            asset_registry: AssetRegistry::new(),
            loaded_assets: HashMap::new(),
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn importer_mut(&mut self) -> &mut AssetImporter {
        &mut self.importer
    }

    /// Register a file under the asset directory and persist the registry.
    ///
    /// Already tracked paths return their existing handle. Files outside the
    /// asset directory, missing files and unknown extensions yield `None`.
    pub fn import_asset<P: AsRef<Path>>(&mut self, filepath: P) -> Option<AssetHandle> {
        let filepath = filepath.as_ref();
        let Some(relative) = self.project.asset_relative_path(filepath) else {
            warn!(path = ?filepath, "Asset path is outside the asset directory");
            return None;
        };

        if let Some(handle) = self.handle_for_path(&relative) {
            debug!(path = ?relative, handle = %handle, "Asset already imported");
            return Some(handle);
        }

        let asset_type = paths::extension_lowercase(&relative)
            .map(|ext| AssetType::from_extension(&ext))
            .unwrap_or_default();
        if asset_type == AssetType::None {
            warn!(path = ?relative, "File type is not importable");
            return None;
        }

        if !self.project.asset_absolute_path(&relative).is_file() {
            error!(path = ?relative, "Cannot import missing file");
            return None;
        }

        let handle = AssetHandle::new();
        info!(path = ?relative, handle = %handle, asset_type = %asset_type, "Imported asset");
        self.asset_registry
            .insert(handle, AssetMetadata::new(asset_type, relative));
        self.serialize_asset_registry();
        Some(handle)
    }

    /// Drop a registry entry and its loaded instance, then persist
    pub fn remove_asset(&mut self, handle: AssetHandle) -> bool {
        let Some(metadata) = self.asset_registry.remove(&handle) else {
            return false;
        };
        self.loaded_assets.remove(&handle);
        info!(handle = %handle, path = ?metadata.file_path, "Removed asset");
        self.serialize_asset_registry();
        true
    }

    /// Evict a loaded instance; the registry entry stays
    pub fn unload_asset(&mut self, handle: AssetHandle) -> bool {
        self.loaded_assets.remove(&handle).is_some()
    }

    pub fn get_metadata(&self, handle: AssetHandle) -> Option<&AssetMetadata> {
        self.asset_registry.get(&handle)
    }

    pub fn get_file_path(&self, handle: AssetHandle) -> Option<&Path> {
        self.get_metadata(handle).map(|m| m.file_path.as_path())
    }

    pub fn asset_registry(&self) -> &AssetRegistry {
        &self.asset_registry
    }

    /// Handle of the asset tracked at `path` (relative or absolute under the asset directory)
    pub fn handle_for_path<P: AsRef<Path>>(&self, path: P) -> Option<AssetHandle> {
        let key = paths::path_key(self.project.asset_relative_path(path)?);
        self.asset_registry
            .iter()
            .find(|(_, metadata)| paths::path_key(&metadata.file_path) == key)
            .map(|(handle, _)| *handle)
    }

    pub fn get_texture(&mut self, handle: AssetHandle) -> Option<Arc<Texture2D>> {
        self.get_asset(handle)?.as_texture().cloned()
    }

    pub fn get_scene(&mut self, handle: AssetHandle) -> Option<Arc<Scene>> {
        self.get_asset(handle)?.as_scene().cloned()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded_assets.len()
    }

    /// Write the registry to disk; failures are logged and reported as `false`
    pub fn serialize_asset_registry(&self) -> bool {
        let path = self.project.asset_registry_path();
        match self.write_registry(&path) {
            Ok(()) => {
                debug!(path = ?path, count = self.asset_registry.len(), "Serialized asset registry");
                true
            }
            Err(e) => {
                error!(path = ?path, error = %e, "Failed to serialize asset registry");
                false
            }
        }
    }

    /// Replace the in-memory registry with the one on disk.
    ///
    /// On any failure the current registry is left untouched.
    pub fn deserialize_asset_registry(&mut self) -> bool {
        let path = self.project.asset_registry_path();
        match Self::read_registry(&path) {
            Ok(registry) => {
                info!(path = ?path, count = registry.len(), "Loaded asset registry");
                self.asset_registry = registry;
                true
            }
            Err(e) => {
                error!(path = ?path, error = %e, "Failed to deserialize asset registry");
                false
            }
        }
    }

    fn write_registry(&self, path: &Path) -> Result<(), AssetError> {
        let document = RegistryDocument {
            asset_registry: self
                .asset_registry
                .iter()
                .map(|(handle, metadata)| RegistryEntry {
                    handle: *handle,
                    file_path: paths::path_key(&metadata.file_path),
                    asset_type: metadata.asset_type,
                })
                .collect(),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&document)?)?;
        Ok(())
    }

    fn read_registry(path: &Path) -> Result<AssetRegistry, AssetError> {
        if !path.is_file() {
            return Err(AssetError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let document: RegistryDocument = serde_json::from_str(&content)?;

        let mut registry = AssetRegistry::new();
        for entry in document.asset_registry {
            if entry.file_path.is_empty() {
                return Err(AssetError::Malformed(format!(
                    "registry entry {} has an empty file path",
                    entry.handle
                )));
            }
            let file_path = paths::normalize_path(&entry.file_path);
            if paths::escapes_base(&file_path) {
                return Err(AssetError::Malformed(format!(
                    "registry entry {} points outside the asset directory: {}",
                    entry.handle, entry.file_path
                )));
            }
            let metadata = AssetMetadata::new(entry.asset_type, file_path);
            if registry.insert(entry.handle, metadata).is_some() {
                warn!(handle = %entry.handle, "Duplicate handle in asset registry");
            }
        }
        Ok(registry)
    }
}

impl AssetManagerBase for EditorAssetManager {
    fn get_asset(&mut self, handle: AssetHandle) -> Option<Asset> {
        let metadata = self.asset_registry.get(&handle)?;
        if let Some(asset) = self.loaded_assets.get(&handle) {
            return Some(asset.clone());
        }

        let asset = self.importer.import_asset(&self.project, handle, metadata)?;
        debug!(handle = %handle, asset_type = %asset.asset_type(), "Loaded asset");
        self.loaded_assets.insert(handle, asset.clone());
        Some(asset)
    }

    fn is_asset_handle_valid(&self, handle: AssetHandle) -> bool {
        self.asset_registry.contains_key(&handle)
    }

    fn is_asset_loaded(&self, handle: AssetHandle) -> bool {
        self.loaded_assets.contains_key(&handle)
    }

    fn get_asset_type(&self, handle: AssetHandle) -> AssetType {
        self.asset_registry
            .get(&handle)
            .map(|metadata| metadata.asset_type)
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for EditorAssetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorAssetManager")
            .field("asset_directory", &self.project.asset_directory())
            .field("registered", &self.asset_registry.len())
            .field("loaded", &self.loaded_assets.len())
            .finish()
    }
}
