use super::{scene_importer, texture_importer, Asset, AssetHandle, AssetMetadata, AssetType};
use crate::project::Project;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Builds an in-memory asset from its registry record
pub type ImportFn = Arc<dyn Fn(&Project, AssetHandle, &AssetMetadata) -> Option<Asset> + Send + Sync>;

/// Per-type dispatch table of import functions
#[derive(Clone)]
pub struct AssetImporter {
    importers: HashMap<AssetType, ImportFn>,
}

impl AssetImporter {
    /// Importer with the built-in texture and scene importers registered
    pub fn new() -> Self {
        let mut importer = Self::empty();
        importer.register(AssetType::Texture2D, texture_importer::import_texture_2d);
        importer.register(AssetType::Scene, scene_importer::import_scene);
        importer
    }

    pub fn empty() -> Self {
        Self {
            importers: HashMap::new(),
        }
    }

    /// Register or replace the importer for `asset_type`
    pub fn register<F>(&mut self, asset_type: AssetType, import: F)
    where
        F: Fn(&Project, AssetHandle, &AssetMetadata) -> Option<Asset> + Send + Sync + 'static,
    {
        debug!(asset_type = %asset_type, "Registering asset importer");
        self.importers.insert(asset_type, Arc::new(import));
    }

    pub fn has_importer(&self, asset_type: AssetType) -> bool {
        self.importers.contains_key(&asset_type)
    }

    pub fn import_asset(
        &self,
        project: &Project,
        handle: AssetHandle,
        metadata: &AssetMetadata,
    ) -> Option<Asset> {
        let Some(import) = self.importers.get(&metadata.asset_type) else {
            error!(
                asset_type = %metadata.asset_type,
                handle = %handle,
                "No importer available for asset type"
            );
            return None;
        };
        import(project, handle, metadata)
    }
}

impl Default for AssetImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AssetImporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.importers.keys().collect();
        types.sort();
        f.debug_struct("AssetImporter").field("types", &types).finish()
    }
}
