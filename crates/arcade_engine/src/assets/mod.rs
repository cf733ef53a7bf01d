//! Asset catalog
//!
//! Names of the textures, sounds, scenes and effects the host can provide.
//! Games check their required assets against it at startup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kind of asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Sprite image
    Texture,
    /// Sound file
    Sound,
    /// Presentable scene
    Scene,
    /// Particle effect
    Effect,
}

/// Asset lookup errors
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AssetError {
    /// The asset is not in the catalog
    #[error("{kind:?} asset not found: {name}")]
    NotFound {
        /// Kind that was looked up
        kind: AssetKind,
        /// Name that was looked up
        name: String,
    },
}

/// Set of known asset names per kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetCatalog {
    #[serde(default)]
    textures: BTreeSet<String>,
    #[serde(default)]
    sounds: BTreeSet<String>,
    #[serde(default)]
    scenes: BTreeSet<String>,
    #[serde(default)]
    effects: BTreeSet<String>,
}

impl AssetCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    fn names(&self, kind: AssetKind) -> &BTreeSet<String> {
        match kind {
            AssetKind::Texture => &self.textures,
            AssetKind::Sound => &self.sounds,
            AssetKind::Scene => &self.scenes,
            AssetKind::Effect => &self.effects,
        }
    }

    fn names_mut(&mut self, kind: AssetKind) -> &mut BTreeSet<String> {
        match kind {
            AssetKind::Texture => &mut self.textures,
            AssetKind::Sound => &mut self.sounds,
            AssetKind::Scene => &mut self.scenes,
            AssetKind::Effect => &mut self.effects,
        }
    }

    /// Register an asset
    pub fn insert(&mut self, kind: AssetKind, name: impl Into<String>) {
        self.names_mut(kind).insert(name.into());
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, kind: AssetKind, name: impl Into<String>) -> Self {
        self.insert(kind, name);
        self
    }

    /// Check if an asset is known
    pub fn contains(&self, kind: AssetKind, name: &str) -> bool {
        self.names(kind).contains(name)
    }

    /// Fail if an asset is not known
    pub fn require(&self, kind: AssetKind, name: &str) -> Result<(), AssetError> {
        if self.contains(kind, name) {
            Ok(())
        } else {
            Err(AssetError::NotFound { kind, name: name.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_checks_the_right_kind() {
        let catalog = AssetCatalog::new()
            .with(AssetKind::Texture, "player")
            .with(AssetKind::Sound, "explosionSound.wav");

        assert!(catalog.require(AssetKind::Texture, "player").is_ok());
        assert_eq!(
            catalog.require(AssetKind::Scene, "player"),
            Err(AssetError::NotFound { kind: AssetKind::Scene, name: "player".into() })
        );
    }
}
