//! Scene configuration.
//!
//! Asset locations are resolved relative to a root directory rather than
//! compiled in, so the scene can be run from any checkout or install prefix.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the asset root.
pub const ASSETS_ENV: &str = "AQUARIUM_ASSETS";

/// Asset root used when nothing else is configured.
pub const DEFAULT_ASSET_ROOT: &str = "./assets";

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub asset_root: PathBuf,
    /// Flip images vertically on load so row 0 is the bottom edge.
    pub flip_vertically: bool,
    /// Abort a frame on the first texture or material tag that does not
    /// resolve instead of drawing with fallback state.
    pub strict_bindings: bool,
}

impl SceneConfig {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            flip_vertically: true,
            strict_bindings: false,
        }
    }

    /// Defaults, with the asset root taken from `AQUARIUM_ASSETS` when set.
    pub fn from_env() -> Self {
        match std::env::var_os(ASSETS_ENV) {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::default(),
        }
    }

    pub fn asset_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.asset_root.join(file)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_ROOT)
    }
}
