use aquarium_scene::{
    Vector3,
    config::SceneConfig,
    context::Context,
    pipelines::light::{SCENE_LIGHTS, light_uniforms, mk_buffer},
    pipelines::transparent::{BlendMode, RasterState},
    resources::mesh::{MeshLibrary, Shape},
    scene::SceneManager,
    shader::UniformTable,
};

/// Mesh library that only records what would be drawn.
#[derive(Default)]
struct DrawLog {
    loaded: Vec<Shape>,
    draws: usize,
}

impl MeshLibrary for DrawLog {
    fn load_mesh(&mut self, shape: Shape) {
        self.loaded.push(shape);
    }

    fn draw_mesh(&mut self, shape: Shape) {
        if !self.loaded.contains(&shape) {
            log::warn!("{shape:?} drawn before it was loaded");
        }
        log::info!("draw {shape:?}");
        self.draws += 1;
    }
}

struct BlendLog;

impl RasterState for BlendLog {
    fn set_blend_mode(&mut self, mode: BlendMode) {
        log::info!("blend {mode:?}: {:?}", mode.blend_state());
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SceneConfig::from_env();
    log::info!("Loading assets from {}", config.asset_root.display());
    let ctx = futures::executor::block_on(Context::new_headless())?;

    let lights = mk_buffer(&ctx.device, &light_uniforms(&SCENE_LIGHTS));
    log::info!("Uploaded {} lights ({} bytes)", SCENE_LIGHTS.len(), lights.size());

    let mut scene = SceneManager::with_file_loader(config, ctx.texture_backend());
    let mut uniforms = UniformTable::new();
    let mut meshes = DrawLog::default();
    let mut raster = BlendLog;

    let prepared = scene.prepare_scene(&mut uniforms, &mut meshes)?;
    for (tag, e) in &prepared.texture_failures {
        log::warn!("{tag}: {e}");
    }

    let report = scene.render_scene(
        &mut uniforms,
        &mut meshes,
        &mut raster,
        Vector3::new(0.0, 5.0, 12.0),
    )?;
    log::info!(
        "Rendered {} objects ({} without texture, {} without material), {} uniform writes",
        report.draws,
        report.texture_fallbacks,
        report.material_misses,
        uniforms.writes()
    );

    scene.release();
    Ok(())
}
