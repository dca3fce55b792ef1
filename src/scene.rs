//! The aquarium scene.
//!
//! The scene is compiled-in data: which textures to load, which objects to
//! draw and where. [`SceneManager`] owns the texture and material registries,
//! prepares GPU-side state once and replays the draw list every frame.
//!
//! # Lifecycle
//!
//! 1. [`SceneManager::prepare_scene`] loads textures, defines materials,
//!    configures lights and uploads the primitive meshes
//! 2. [`SceneManager::render_scene`] binds shader state for every object and
//!    draws it, toggling alpha blending around the glass passes
//! 3. [`SceneManager::release`] (or dropping the manager) frees the textures
//!

use cgmath::Vector3;
use thiserror::Error;

use crate::{
    config::SceneConfig,
    data_structures::{
        material::{MATERIAL_PRESETS, MaterialRegistry},
        transform::Transform,
    },
    pipelines::{
        light::{SCENE_LIGHTS, configure_lights},
        transparent::{BlendMode, RasterState, with_alpha_blending},
    },
    render::{Appearance, BindError, DrawCall, ShaderStateBinder},
    resources::{
        self,
        decode::{ImageCrateLoader, ImageLoader},
        mesh::{MeshLibrary, Shape},
        texture::{TextureBackend, TextureError, TextureRegistry},
    },
    shader::{self, UniformSink},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("the scene has already been prepared")]
    AlreadyPrepared,
    #[error("the scene must be prepared before it is rendered")]
    NotPrepared,
    #[error("cannot draw '{object}': {source}")]
    Bind {
        object: &'static str,
        #[source]
        source: BindError,
    },
}

/// Textures of the scene as `(tag, file)`; files resolve against the asset root.
pub const SCENE_TEXTURES: [(&str, &str); 6] = [
    ("wood_texture", "rusticwood.jpg"),
    ("water_texture", "goodWater.png"),
    ("lip_texture", "knife_handle.jpg"),
    ("floor_texture", "hardwoodFloor.png"),
    ("carpet_texture", "carpet.png"),
    ("handle_texture", "stainless_end.jpg"),
];

/// Colour drawn in place of a texture that failed to load.
pub const MISSING_TEXTURE_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// Yaw applied to every object so the scene is seen slightly from the side.
const TILT: f32 = 10.0;

/// One drawable object of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    pub name: &'static str,
    pub shape: Shape,
    pub appearance: Appearance<'static>,
    pub material: Option<&'static str>,
    pub transform: Transform,
}

impl SceneObject {
    pub fn draw_call(&self) -> DrawCall<'static> {
        DrawCall {
            appearance: self.appearance,
            material: self.material,
            transform: self.transform,
        }
    }
}

/// Consecutive objects drawn under the same blend mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePass {
    pub blend: BlendMode,
    pub objects: &'static [SceneObject],
}

const fn textured(tag: &'static str, u: f32, v: f32) -> Appearance<'static> {
    Appearance::Textured {
        tag,
        uv_scale: [u, v],
    }
}

const TANK: [SceneObject; 2] = [
    SceneObject {
        name: "tank outline",
        shape: Shape::Box,
        appearance: textured("lip_texture", 0.5, 0.5),
        material: Some("metal"),
        transform: Transform::new([5.1, 2.1, 1.1], [0.0, TILT, 0.0], [0.0, 2.0, -0.1]),
    },
    SceneObject {
        name: "water",
        shape: Shape::Box,
        appearance: textured("water_texture", 3.0, 2.0),
        material: Some("glass"),
        transform: Transform::new([5.0, 2.0, 1.5], [0.0, TILT, 0.0], [0.0, 2.0, 0.0]),
    },
];

const ORNAMENT: [SceneObject; 1] = [SceneObject {
    name: "decorative sphere",
    shape: Shape::Sphere,
    appearance: textured("wood_texture", 3.0, 2.0),
    material: Some("wood"),
    transform: Transform::new([1.0, 0.3, 0.8], [0.0, TILT, 0.0], [0.0, 4.0, 0.0]),
}];

const FURNITURE: [SceneObject; 5] = [
    SceneObject {
        name: "stand",
        shape: Shape::Box,
        appearance: textured("wood_texture", 0.5, 0.5),
        material: Some("wood"),
        transform: Transform::new([4.8, 2.0, 1.5], [0.0, TILT, 0.0], [0.0, 0.0, 0.0]),
    },
    SceneObject {
        name: "door",
        shape: Shape::Box,
        appearance: textured("lip_texture", 0.25, 0.25),
        material: Some("wood"),
        transform: Transform::new([1.6, 1.0, 0.1], [0.0, TILT, 90.0], [0.0, 0.0, 0.75]),
    },
    SceneObject {
        name: "handle",
        shape: Shape::Sphere,
        appearance: textured("handle_texture", 0.1, 0.1),
        material: Some("metal"),
        transform: Transform::new([0.1, 0.1, 0.1], [0.0, TILT, 0.0], [-0.3, 0.0, 0.9]),
    },
    SceneObject {
        name: "base lip",
        shape: Shape::Box,
        appearance: textured("lip_texture", 0.5, 0.5),
        material: Some("metal"),
        transform: Transform::new([5.2, 0.2, 1.7], [0.0, TILT, 0.0], [0.0, -1.0, 0.0]),
    },
    SceneObject {
        name: "floor",
        shape: Shape::Plane,
        appearance: textured("carpet_texture", 4.0, 4.0),
        material: Some("carpet"),
        transform: Transform::new([15.0, 1.0, 15.0], [0.0, TILT, 0.0], [0.0, -1.2, 0.0]),
    },
];

/// The draw list, in order. Blended passes are closed before the next pass starts.
pub static SCENE_PASSES: [ScenePass; 3] = [
    ScenePass {
        blend: BlendMode::AlphaBlend,
        objects: &TANK,
    },
    ScenePass {
        blend: BlendMode::AlphaBlend,
        objects: &ORNAMENT,
    },
    ScenePass {
        blend: BlendMode::Opaque,
        objects: &FURNITURE,
    },
];

/// Every scene object in draw order.
pub fn scene_objects() -> impl Iterator<Item = &'static SceneObject> {
    SCENE_PASSES.iter().flat_map(|pass| pass.objects.iter())
}

/// Outcome of [`SceneManager::prepare_scene`].
#[derive(Debug, Default)]
pub struct PrepareReport {
    pub textures_loaded: usize,
    /// Textures that could not be registered, with the reason.
    pub texture_failures: Vec<(String, TextureError)>,
    pub materials_defined: usize,
    pub lights_configured: usize,
}

/// Outcome of one [`SceneManager::render_scene`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub draws: usize,
    /// Draws that used [`MISSING_TEXTURE_COLOR`] because their texture is absent.
    pub texture_fallbacks: usize,
    /// Draws whose material tag did not resolve.
    pub material_misses: usize,
}

pub struct SceneManager<B: TextureBackend> {
    config: SceneConfig,
    loader: Box<dyn ImageLoader>,
    textures: TextureRegistry<B>,
    materials: MaterialRegistry,
    prepared: bool,
}

impl<B: TextureBackend> SceneManager<B> {
    pub fn new(config: SceneConfig, backend: B, loader: Box<dyn ImageLoader>) -> Self {
        Self {
            config,
            loader,
            textures: TextureRegistry::new(backend),
            materials: MaterialRegistry::new(),
            prepared: false,
        }
    }

    /// Manager decoding image files from disk, flipped as configured.
    pub fn with_file_loader(config: SceneConfig, backend: B) -> Self {
        let loader = Box::new(ImageCrateLoader::new(config.flip_vertically));
        Self::new(config, backend, loader)
    }

    /// Loads and binds textures, defines materials, configures lights and
    /// uploads the primitive meshes. Runs once per manager.
    ///
    /// Missing or unsupported texture files are reported, not fatal.
    pub fn prepare_scene(
        &mut self,
        sink: &mut dyn UniformSink,
        meshes: &mut dyn MeshLibrary,
    ) -> Result<PrepareReport, SceneError> {
        if self.prepared {
            return Err(SceneError::AlreadyPrepared);
        }

        let texture_failures = resources::load_textures(
            &mut self.textures,
            self.loader.as_ref(),
            &self.config,
            &SCENE_TEXTURES,
        );
        self.textures.bind_all();
        self.materials.define_presets(&MATERIAL_PRESETS);
        configure_lights(sink, &SCENE_LIGHTS);
        for shape in Shape::ALL {
            meshes.load_mesh(shape);
        }
        self.prepared = true;

        log::info!(
            "Scene prepared: {} textures, {} materials, {} lights",
            self.textures.len(),
            self.materials.len(),
            SCENE_LIGHTS.len()
        );
        Ok(PrepareReport {
            textures_loaded: self.textures.len(),
            texture_failures,
            materials_defined: self.materials.len(),
            lights_configured: SCENE_LIGHTS.len(),
        })
    }

    /// Draws every scene object with its shader state.
    ///
    /// With `strict_bindings` off, an absent texture is replaced by
    /// [`MISSING_TEXTURE_COLOR`] and an unknown material leaves the previous
    /// material in place. With it on, the first miss aborts the frame.
    pub fn render_scene(
        &self,
        sink: &mut dyn UniformSink,
        meshes: &mut dyn MeshLibrary,
        raster: &mut dyn RasterState,
        view_position: Vector3<f32>,
    ) -> Result<RenderReport, SceneError> {
        if !self.prepared {
            return Err(SceneError::NotPrepared);
        }

        sink.set_vec3(shader::VIEW_POSITION, view_position);
        let binder = ShaderStateBinder::new(&self.textures, &self.materials);
        let mut report = RenderReport::default();
        for pass in SCENE_PASSES.iter() {
            let mut draw_pass = || -> Result<(), SceneError> {
                for object in pass.objects {
                    self.draw_object(&binder, object, sink, meshes, &mut report)?;
                }
                Ok(())
            };
            match pass.blend {
                BlendMode::AlphaBlend => with_alpha_blending(raster, draw_pass)?,
                BlendMode::Opaque => draw_pass()?,
            }
        }
        Ok(report)
    }

    fn draw_object(
        &self,
        binder: &ShaderStateBinder<'_, B>,
        object: &SceneObject,
        sink: &mut dyn UniformSink,
        meshes: &mut dyn MeshLibrary,
        report: &mut RenderReport,
    ) -> Result<(), SceneError> {
        let strict = self.config.strict_bindings;
        let fail = |source| SceneError::Bind {
            object: object.name,
            source,
        };

        match binder.apply_appearance(sink, &object.appearance) {
            Ok(()) => {}
            Err(e) if strict => return Err(fail(e)),
            Err(e) => {
                log::warn!("{}: {e}, drawing flat", object.name);
                binder.apply_flat_color(sink, MISSING_TEXTURE_COLOR.into());
                report.texture_fallbacks += 1;
            }
        }
        if let Some(material) = object.material {
            match binder.apply_material(sink, material) {
                Ok(()) => {}
                Err(e) if strict => return Err(fail(e)),
                Err(e) => {
                    log::warn!("{}: {e}", object.name);
                    report.material_misses += 1;
                }
            }
        }
        binder.apply_transform(sink, &object.transform);
        log::debug!("Drawing {} as {:?}", object.name, object.shape);
        meshes.draw_mesh(object.shape);
        report.draws += 1;
        Ok(())
    }

    /// Frees all textures and forgets the materials so the scene can be
    /// prepared again.
    pub fn release(&mut self) {
        self.textures.release_all();
        self.materials.clear();
        self.prepared = false;
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn textures(&self) -> &TextureRegistry<B> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }
}
