use super::{Asset, AssetHandle, AssetMetadata};
use crate::project::Project;
use crate::scene::SceneSerializer;
use std::sync::Arc;
use tracing::error;

pub fn import_scene(project: &Project, handle: AssetHandle, metadata: &AssetMetadata) -> Option<Asset> {
    let path = project.asset_absolute_path(&metadata.file_path);
    match SceneSerializer::deserialize(&path) {
        Ok(scene) => Some(Asset::Scene(Arc::new(scene))),
        Err(e) => {
            error!(handle = %handle, path = ?path, error = %e, "Could not load scene");
            None
        }
    }
}
