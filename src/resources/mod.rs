use crate::{
    config::SceneConfig,
    resources::{
        decode::ImageLoader,
        texture::{TextureBackend, TextureError, TextureRegistry},
    },
};

/**
 * This module contains all logic for loading textures from external files
 * and the interfaces of the collaborators that do the heavy lifting.
 */
pub mod decode;
pub mod mesh;
pub mod texture;

/// Loads every `(tag, file)` pair of `manifest` from the configured asset root.
///
/// Failures are returned with their tag; they do not stop the remaining
/// loads, so a missing file only leaves its own tag unregistered.
pub fn load_textures<B: TextureBackend>(
    registry: &mut TextureRegistry<B>,
    loader: &dyn ImageLoader,
    config: &SceneConfig,
    manifest: &[(&str, &str)],
) -> Vec<(String, TextureError)> {
    let mut failures = Vec::new();
    for (tag, file) in manifest {
        let path = config.asset_path(file);
        if let Err(e) = registry.load_texture(loader, &path, tag) {
            failures.push((tag.to_string(), e));
        }
    }
    failures
}
