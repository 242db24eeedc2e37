use crate::core::Uuid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical identity of an asset, independent of its file path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetHandle(Uuid);

impl AssetHandle {
    pub fn new() -> Self {
        Self(Uuid::new())
    }

    pub const fn from_u64(value: u64) -> Self {
        Self(Uuid::from_u64(value))
    }

    pub const fn as_u64(self) -> u64 {
        self.0.as_u64()
    }
}

impl Default for AssetHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AssetHandle {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
