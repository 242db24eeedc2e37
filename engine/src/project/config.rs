use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contents of a `.cproj` project file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProjectConfig {
    pub name: String,
    /// Start scene, relative to the asset directory
    pub start_scene: PathBuf,
    /// Asset directory, relative to the project directory
    pub asset_directory: PathBuf,
    /// Registry file, relative to the asset directory
    pub asset_registry_path: PathBuf,
    pub script_module_path: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            start_scene: PathBuf::from("Scenes/Start.cobra"),
            asset_directory: PathBuf::from("Assets"),
            asset_registry_path: PathBuf::from("AssetRegistry.json"),
            script_module_path: PathBuf::from("Scripts/Binaries/Sandbox.dll"),
        }
    }
}
