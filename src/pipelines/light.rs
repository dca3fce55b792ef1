use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::shader::{self, UniformSink};

/// A point light as seen by the scene shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub position: [f32; 3],
    pub ambient_color: [f32; 3],
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

/// Overhead, frontal and fill light of the aquarium scene.
pub const SCENE_LIGHTS: [LightSource; 3] = [
    LightSource {
        position: [0.0, 5.0, 2.0],
        ambient_color: [1.0, 1.0, 1.0],
        diffuse_color: [1.0, 1.0, 1.0],
        specular_color: [1.0, 1.0, 1.0],
        focal_strength: 16.0,
        specular_intensity: 3.0,
    },
    LightSource {
        position: [0.0, 2.0, 5.0],
        ambient_color: [0.5, 0.5, 0.5],
        diffuse_color: [1.0, 1.0, 1.0],
        specular_color: [1.0, 1.0, 1.0],
        focal_strength: 16.0,
        specular_intensity: 2.0,
    },
    LightSource {
        position: [0.0, 3.0, -8.0],
        ambient_color: [0.3, 0.3, 0.3],
        diffuse_color: [0.7, 0.7, 0.7],
        specular_color: [0.7, 0.7, 0.7],
        focal_strength: 16.0,
        specular_intensity: 1.0,
    },
];

/// Writes `lights` into `lightSources[0..]` and turns lighting on.
pub fn configure_lights(sink: &mut dyn UniformSink, lights: &[LightSource]) {
    for (i, light) in lights.iter().enumerate() {
        sink.set_vec3(&shader::light_field(i, "position"), Vector3::from(light.position));
        sink.set_vec3(&shader::light_field(i, "ambientColor"), Vector3::from(light.ambient_color));
        sink.set_vec3(&shader::light_field(i, "diffuseColor"), Vector3::from(light.diffuse_color));
        sink.set_vec3(&shader::light_field(i, "specularColor"), Vector3::from(light.specular_color));
        sink.set_float(&shader::light_field(i, "focalStrength"), light.focal_strength);
        sink.set_float(&shader::light_field(i, "specularIntensity"), light.specular_intensity);
    }
    sink.set_bool(shader::USE_LIGHTING, true);
}

impl LightSource {
    pub fn to_uniform(&self) -> LightUniform {
        LightUniform {
            position: self.position,
            focal_strength: self.focal_strength,
            ambient_color: self.ambient_color,
            specular_intensity: self.specular_intensity,
            diffuse_color: self.diffuse_color,
            _padding: 0,
            specular_color: self.specular_color,
            _padding2: 0,
        }
    }
}

/// GPU layout of a [`LightSource`] inside a uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    position: [f32; 3],
    // The scalars fill the fourth float of each vec3 row
    focal_strength: f32,
    ambient_color: [f32; 3],
    specular_intensity: f32,
    diffuse_color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    specular_color: [f32; 3],
    _padding2: u32,
}

/// GPU rows for `lights`, in `lightSources` order.
pub fn light_uniforms(lights: &[LightSource]) -> Vec<LightUniform> {
    lights.iter().map(LightSource::to_uniform).collect()
}

pub fn mk_buffer(device: &wgpu::Device, lights: &[LightUniform]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Scene Lights Buffer"),
        contents: bytemuck::cast_slice(lights),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}
