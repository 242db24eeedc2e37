//! Editor settings management
//!
//! Persistent user preferences for the editor, stored as JSON next to the
//! working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main editor settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub thumbnails: ThumbnailSettings,

    /// Project opened on the previous run
    #[serde(default)]
    pub last_project: Option<PathBuf>,

    /// Settings version for future migration support
    #[serde(default)]
    pub version: u32,
}

/// Content browser thumbnail generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailSettings {
    /// Thumbnails decoded per editor frame
    pub per_frame_budget: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            thumbnails: ThumbnailSettings::default(),
            last_project: None,
            version: 1,
        }
    }
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self { per_frame_budget: 1 }
    }
}

impl EditorSettings {
    /// Get the default path for the settings file
    pub fn default_path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("editor_settings.json")
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(Self::default_path())
    }

    /// Load settings from the default location.
    ///
    /// A missing file yields defaults; an unreadable one is an error.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_existing(Self::default_path())
    }

    /// Load settings from `path`, or defaults when no file exists there
    pub fn load_existing<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = ?path, "No settings file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Project to open: the requested one, else the one from the last run
    pub fn project_to_open(&self, requested: Option<PathBuf>) -> Option<PathBuf> {
        requested.or_else(|| self.last_project.clone())
    }

    /// Record `project` as the one to reopen next time
    pub fn remember_project<P: AsRef<Path>>(&mut self, project: P) {
        let project = project.as_ref();
        let project = std::fs::canonicalize(project).unwrap_or_else(|_| project.to_path_buf());
        info!(project = ?project, "Remembering last project");
        self.last_project = Some(project);
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load_existing(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = ?path, error = %e, "Failed to read settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Save settings to a specific path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        info!("Saved editor settings to {:?}", path.as_ref());
        Ok(())
    }

    /// Load settings from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(&path)?;
        let settings = serde_json::from_str(&content)?;
        info!("Loaded editor settings from {:?}", path.as_ref());
        Ok(settings)
    }
}
