//! Shader uniform plumbing.
//!
//! The scene never talks to a shader program directly. Every per-draw value is
//! pushed by name through a [`UniformSink`], which a host implements on top of
//! whatever program object it owns. [`UniformTable`] is an in-memory sink that
//! keeps the latest value per name, useful for staging writes before a GPU
//! upload and for inspecting what a draw call would see.

use std::collections::HashMap;

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

/// Model (object-to-world) matrix.
pub const MODEL: &str = "model";
/// Flat RGBA colour used when texturing is disabled.
pub const OBJECT_COLOR: &str = "objectColor";
/// Sampler that reads the bound image unit.
pub const OBJECT_TEXTURE: &str = "objectTexture";
/// Toggles between the flat colour and the texture sampler.
pub const USE_TEXTURE: &str = "bUseTexture";
/// Toggles the lighting model on or off.
pub const USE_LIGHTING: &str = "bUseLighting";
/// Texture coordinate tiling factor.
pub const UV_SCALE: &str = "UVscale";
/// Camera position used for specular highlights.
pub const VIEW_POSITION: &str = "viewPosition";

pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

/// Name of a field inside the `lightSources` uniform array, e.g. `lightSources[2].position`.
pub fn light_field(index: usize, field: &str) -> String {
    format!("lightSources[{index}].{field}")
}

/// Receiver of named shader uniforms.
///
/// Writes are order-sensitive: the pipeline reads whatever was written last
/// when the next mesh is drawn.
pub trait UniformSink {
    fn set_float(&mut self, name: &str, value: f32);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_vec2(&mut self, name: &str, value: Vector2<f32>);
    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);
    fn set_vec4(&mut self, name: &str, value: Vector4<f32>);
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>);
    /// Points a sampler uniform at a numbered image unit.
    fn set_sampler(&mut self, name: &str, unit: u32);
}

/// A single value as last written to a [`UniformTable`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Mat4(Matrix4<f32>),
    Sampler(u32),
}

/// In-memory [`UniformSink`] holding the latest value for every name.
#[derive(Clone, Debug, Default)]
pub struct UniformTable {
    values: HashMap<String, UniformValue>,
    writes: usize,
}

impl UniformTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    /// Total number of writes received, including overwrites.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.values.get(name) {
            Some(UniformValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(UniformValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn vec2(&self, name: &str) -> Option<Vector2<f32>> {
        match self.values.get(name) {
            Some(UniformValue::Vec2(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vector3<f32>> {
        match self.values.get(name) {
            Some(UniformValue::Vec3(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn vec4(&self, name: &str) -> Option<Vector4<f32>> {
        match self.values.get(name) {
            Some(UniformValue::Vec4(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn mat4(&self, name: &str) -> Option<Matrix4<f32>> {
        match self.values.get(name) {
            Some(UniformValue::Mat4(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn sampler(&self, name: &str) -> Option<u32> {
        match self.values.get(name) {
            Some(UniformValue::Sampler(v)) => Some(*v),
            _ => None,
        }
    }

    fn put(&mut self, name: &str, value: UniformValue) {
        self.writes += 1;
        self.values.insert(name.to_string(), value);
    }
}

impl UniformSink for UniformTable {
    fn set_float(&mut self, name: &str, value: f32) {
        self.put(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.put(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.put(name, UniformValue::Bool(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.put(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.put(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.put(name, UniformValue::Vec4(value));
    }

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.put(name, UniformValue::Mat4(value));
    }

    fn set_sampler(&mut self, name: &str, unit: u32) {
        self.put(name, UniformValue::Sampler(unit));
    }
}
