use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum AssetType {
    #[default]
    None,
    Scene,
    Texture2D,
}

impl AssetType {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::None => "None",
            AssetType::Scene => "Scene",
            AssetType::Texture2D => "Texture2D",
        }
    }

    /// Asset type implied by a file extension (without the dot, any case)
    pub fn from_extension(extension: &str) -> AssetType {
        match extension.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" => AssetType::Texture2D,
            "cobra" => AssetType::Scene,
            _ => AssetType::None,
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(AssetType::None),
            "Scene" => Ok(AssetType::Scene),
            "Texture2D" => Ok(AssetType::Texture2D),
            other => Err(format!("unknown asset type '{other}'")),
        }
    }
}

/// Registry record for one asset
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetMetadata {
    pub asset_type: AssetType,
    /// Relative to the project's asset directory
    pub file_path: PathBuf,
}

impl AssetMetadata {
    pub fn new(asset_type: AssetType, file_path: impl Into<PathBuf>) -> Self {
        Self {
            asset_type,
            file_path: file_path.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.asset_type != AssetType::None
    }
}
