//! Fixed-function state shared by the scene's draws.
//!
//! - `light` contains the scene lights and their uniform layout
//! - `transparent` contains blend modes for glass surfaces

pub mod light;
pub mod transparent;
