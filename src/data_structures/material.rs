//! Lighting material presets and the registry that resolves them by tag.

use cgmath::Vector3;

/// Phong-style surface parameters applied to a draw call.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub ambient_color: Vector3<f32>,
    pub ambient_strength: f32,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

/// Compile-time description of a [`Material`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialPreset {
    pub tag: &'static str,
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

impl From<&MaterialPreset> for Material {
    fn from(preset: &MaterialPreset) -> Self {
        Material {
            tag: preset.tag.to_string(),
            ambient_color: preset.ambient_color.into(),
            ambient_strength: preset.ambient_strength,
            diffuse_color: preset.diffuse_color.into(),
            specular_color: preset.specular_color.into(),
            shininess: preset.shininess,
        }
    }
}

/// Materials available to the aquarium scene.
pub const MATERIAL_PRESETS: [MaterialPreset; 4] = [
    MaterialPreset {
        tag: "glass",
        ambient_color: [0.4, 0.4, 0.5],
        ambient_strength: 0.5,
        diffuse_color: [0.4, 0.4, 0.5],
        specular_color: [1.0, 1.0, 1.0],
        shininess: 32.0,
    },
    MaterialPreset {
        tag: "wood",
        ambient_color: [0.4, 0.2, 0.0],
        ambient_strength: 0.6,
        diffuse_color: [0.8, 0.4, 0.2],
        specular_color: [0.2, 0.2, 0.2],
        shininess: 8.0,
    },
    MaterialPreset {
        tag: "metal",
        ambient_color: [0.5, 0.5, 0.5],
        ambient_strength: 0.5,
        diffuse_color: [0.8, 0.8, 0.8],
        specular_color: [1.0, 1.0, 1.0],
        shininess: 64.0,
    },
    MaterialPreset {
        tag: "carpet",
        ambient_color: [0.4, 0.4, 0.4],
        ambient_strength: 0.7,
        diffuse_color: [0.7, 0.7, 0.7],
        specular_color: [0.2, 0.2, 0.2],
        shininess: 4.0,
    },
];

/// Append-only list of materials.
///
/// Tags are not required to be unique; lookups return the earliest definition.
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(
        &mut self,
        tag: &str,
        ambient_color: Vector3<f32>,
        ambient_strength: f32,
        diffuse_color: Vector3<f32>,
        specular_color: Vector3<f32>,
        shininess: f32,
    ) {
        self.materials.push(Material {
            tag: tag.to_string(),
            ambient_color,
            ambient_strength,
            diffuse_color,
            specular_color,
            shininess,
        });
    }

    pub fn define_presets(&mut self, presets: &[MaterialPreset]) {
        self.materials.extend(presets.iter().map(Material::from));
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    pub fn clear(&mut self) {
        self.materials.clear();
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}
