//! Engine data structures: materials, textures and transforms.
//!
//! - `material` contains material presets and the tag registry
//! - `texture` contains the GPU texture wrapper and upload path
//! - `transform` holds per-draw scale/rotation/translation

pub mod material;
pub mod texture;
pub mod transform;
