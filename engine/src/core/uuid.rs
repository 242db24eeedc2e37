//! 64-bit identifiers used for entities and asset handles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable 64-bit identifier.
///
/// Generated from a random v4 UUID folded down to 64 bits. Serialized as a
/// bare integer so scene and registry files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uuid(u64);

impl Uuid {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        let (hi, lo) = ::uuid::Uuid::new_v4().as_u64_pair();
        Self(hi ^ lo)
    }

    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl Default for Uuid {
    fn default() -> Self {
        Self::new()
    }
}

impl From<u64> for Uuid {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Uuid> for u64 {
    fn from(value: Uuid) -> Self {
        value.0
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
