//! Per-draw shader state.
//!
//! Before each mesh draw the scene pushes the object's appearance, material
//! and model matrix into the [`UniformSink`]. [`ShaderStateBinder`] resolves the
//! tags involved against the registries and performs those writes.
//!
//! # Key types
//!
//! - [`Appearance`] is either a flat colour or a tiled texture, never both
//! - [`DrawCall`] bundles everything one draw needs
//! - [`BindError`] reports tags that do not resolve
//!

use cgmath::{Vector2, Vector4};
use thiserror::Error;

use crate::{
    data_structures::{material::MaterialRegistry, transform::Transform},
    resources::texture::{TextureBackend, TextureRegistry},
    shader::{self, UniformSink},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("no texture registered under '{0}'")]
    UnknownTexture(String),
    #[error("no material defined under '{0}'")]
    UnknownMaterial(String),
}

/// How a surface is coloured.
///
/// The shader has a single "use texture" switch, so the two cases are
/// mutually exclusive by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Appearance<'a> {
    /// Solid RGBA colour, texturing disabled.
    Flat([f32; 4]),
    /// Registered texture sampled with the given UV tiling factor.
    Textured { tag: &'a str, uv_scale: [f32; 2] },
}

/// Everything needed to set up the shader for one mesh draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall<'a> {
    pub appearance: Appearance<'a>,
    pub material: Option<&'a str>,
    pub transform: Transform,
}

/// Resolves texture and material tags and writes per-draw uniforms.
///
/// Every `apply_*` call is a plain overwrite of the affected uniforms, so
/// all of them must happen before the mesh they are meant for is drawn.
pub struct ShaderStateBinder<'r, B: TextureBackend> {
    textures: &'r TextureRegistry<B>,
    materials: &'r MaterialRegistry,
}

impl<'r, B: TextureBackend> ShaderStateBinder<'r, B> {
    pub fn new(textures: &'r TextureRegistry<B>, materials: &'r MaterialRegistry) -> Self {
        Self {
            textures,
            materials,
        }
    }

    pub fn apply_transform(&self, sink: &mut dyn UniformSink, transform: &Transform) {
        sink.set_mat4(shader::MODEL, transform.to_matrix());
    }

    /// Disables texturing and sets the flat object colour.
    pub fn apply_flat_color(&self, sink: &mut dyn UniformSink, color: Vector4<f32>) {
        sink.set_bool(shader::USE_TEXTURE, false);
        sink.set_vec4(shader::OBJECT_COLOR, color);
    }

    /// Enables texturing and points the sampler at the unit holding `tag`.
    ///
    /// Nothing is written when the tag is unknown, so the previous texture
    /// state stays in place and the caller decides how to degrade.
    pub fn apply_texture(&self, sink: &mut dyn UniformSink, tag: &str) -> Result<usize, BindError> {
        let slot = self
            .textures
            .find_slot(tag)
            .ok_or_else(|| BindError::UnknownTexture(tag.to_string()))?;
        sink.set_bool(shader::USE_TEXTURE, true);
        sink.set_sampler(shader::OBJECT_TEXTURE, slot as u32);
        Ok(slot)
    }

    pub fn apply_uv_scale(&self, sink: &mut dyn UniformSink, u: f32, v: f32) {
        sink.set_vec2(shader::UV_SCALE, Vector2::new(u, v));
    }

    /// Writes all material fields, or nothing if the tag is unknown.
    pub fn apply_material(&self, sink: &mut dyn UniformSink, tag: &str) -> Result<(), BindError> {
        let material = self
            .materials
            .find(tag)
            .ok_or_else(|| BindError::UnknownMaterial(tag.to_string()))?;
        sink.set_vec3(shader::MATERIAL_AMBIENT_COLOR, material.ambient_color);
        sink.set_float(shader::MATERIAL_AMBIENT_STRENGTH, material.ambient_strength);
        sink.set_vec3(shader::MATERIAL_DIFFUSE_COLOR, material.diffuse_color);
        sink.set_vec3(shader::MATERIAL_SPECULAR_COLOR, material.specular_color);
        sink.set_float(shader::MATERIAL_SHININESS, material.shininess);
        Ok(())
    }

    pub fn apply_appearance(
        &self,
        sink: &mut dyn UniformSink,
        appearance: &Appearance<'_>,
    ) -> Result<(), BindError> {
        match *appearance {
            Appearance::Flat(color) => {
                self.apply_flat_color(sink, color.into());
                Ok(())
            }
            Appearance::Textured { tag, uv_scale } => {
                self.apply_texture(sink, tag)?;
                self.apply_uv_scale(sink, uv_scale[0], uv_scale[1]);
                Ok(())
            }
        }
    }

    /// Applies appearance, material and transform of `call`, in that order.
    ///
    /// Stops at the first unresolved tag; uniforms written up to that point
    /// stay written and the transform is not applied.
    pub fn bind(&self, sink: &mut dyn UniformSink, call: &DrawCall<'_>) -> Result<(), BindError> {
        self.apply_appearance(sink, &call.appearance)?;
        if let Some(material) = call.material {
            self.apply_material(sink, material)?;
        }
        self.apply_transform(sink, &call.transform);
        Ok(())
    }
}
