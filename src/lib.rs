//! aquarium-scene
//!
//! A small textured and lit scene: an aquarium on a wooden stand, built from
//! boxes, spheres and a plane. The crate owns the part between asset files
//! and draw calls: a texture registry mapping tags to image units, a material
//! registry, a fixed light setup and the per-draw protocol that pushes
//! texture, material, UV tiling and model matrix into the shader before each
//! mesh is drawn.
//!
//! High-level modules
//! - `config`: asset root and binding policy
//! - `context`: headless wgpu device/queue used for texture uploads
//! - `data_structures`: materials, GPU textures and transforms
//! - `pipelines`: scene lights and blend modes
//! - `resources`: image decoding, texture registry and mesh library interface
//! - `render`: the shader-state binder
//! - `scene`: the compiled-in scene and its manager
//! - `shader`: uniform names and the uniform sink interface
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
pub mod shader;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Matrix4, Vector2, Vector3, Vector4};
