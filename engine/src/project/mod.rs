//! Project descriptor: where assets, scenes and the registry live
//!
//! A [`Project`] is passed explicitly to anything that needs to resolve an
//! asset path. There is no process-wide active project.

mod config;

pub use config::ProjectConfig;

use crate::utils::paths;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while reading or writing a project file
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("project JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An opened project: its configuration plus the directory it lives in
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    config: ProjectConfig,
    project_directory: PathBuf,
}

impl Project {
    pub fn new(config: ProjectConfig, project_directory: impl Into<PathBuf>) -> Self {
        Self {
            config,
            project_directory: project_directory.into(),
        }
    }

    /// Load a `.cproj` file; the project directory is the file's parent
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: ProjectConfig = serde_json::from_str(&content)?;
        let project_directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        info!(path = ?path, name = %config.name, "Loaded project");
        Ok(Self::new(config, project_directory))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ProjectError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(path, json)?;
        info!(path = ?path, "Saved project");
        Ok(())
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ProjectConfig {
        &mut self.config
    }

    pub fn project_directory(&self) -> &Path {
        &self.project_directory
    }

    /// Absolute root every asset file path is relative to
    pub fn asset_directory(&self) -> PathBuf {
        self.project_directory.join(&self.config.asset_directory)
    }

    pub fn asset_registry_path(&self) -> PathBuf {
        self.asset_directory().join(&self.config.asset_registry_path)
    }

    pub fn asset_absolute_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.asset_directory().join(relative)
    }

    /// Path relative to the asset directory, if `path` is inside it
    pub fn asset_relative_path<P: AsRef<Path>>(&self, path: P) -> Option<PathBuf> {
        paths::relative_to(path, self.asset_directory())
    }

    pub fn start_scene_path(&self) -> PathBuf {
        self.asset_absolute_path(&self.config.start_scene)
    }

    pub fn script_module_path(&self) -> PathBuf {
        self.asset_absolute_path(&self.config.script_module_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_asset_directory_resolution() {
        let project = Project::new(ProjectConfig::default(), "/work/Sandbox");
        assert_eq!(project.asset_directory(), PathBuf::from("/work/Sandbox/Assets"));
        assert_eq!(
            project.asset_registry_path(),
            PathBuf::from("/work/Sandbox/Assets/AssetRegistry.json")
        );
        assert_eq!(
            project.start_scene_path(),
            PathBuf::from("/work/Sandbox/Assets/Scenes/Start.cobra")
        );
    }

    #[test]
    fn test_asset_relative_path() {
        let project = Project::new(ProjectConfig::default(), "/work/Sandbox");
        let rel = project
            .asset_relative_path("/work/Sandbox/Assets/Textures/a.png")
            .unwrap();
        assert_eq!(rel, PathBuf::from("Textures/a.png"));
        assert!(project.asset_relative_path("/other/a.png").is_none());
    }

    #[test]
    fn test_save_load_project() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("Sandbox.cproj");

        let mut config = ProjectConfig::default();
        config.name = "Sandbox".to_string();
        let project = Project::new(config, dir.path());
        project.save(&path).expect("Failed to save project");

        let loaded = Project::load(&path).expect("Failed to load project");
        assert_eq!(loaded.config().name, "Sandbox");
        assert_eq!(loaded.project_directory(), dir.path());
    }

    #[test]
    fn test_load_missing_project() {
        let dir = TempDir::new().unwrap();
        let result = Project::load(dir.path().join("missing.cproj"));
        assert!(matches!(result, Err(ProjectError::Io(_))));
    }
}
