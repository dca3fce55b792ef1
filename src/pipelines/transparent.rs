/// Colour blending applied to subsequent draws.
///
/// Glass and water surfaces are drawn with standard alpha blending
/// (`src * a + dst * (1 - a)`); everything else overwrites the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Opaque,
    AlphaBlend,
}

impl BlendMode {
    pub fn blend_state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Opaque => wgpu::BlendState {
                alpha: wgpu::BlendComponent::REPLACE,
                color: wgpu::BlendComponent::REPLACE,
            },
            BlendMode::AlphaBlend => wgpu::BlendState::ALPHA_BLENDING,
        }
    }
}

/// Fixed-function raster state that persists across draws until changed.
pub trait RasterState {
    fn set_blend_mode(&mut self, mode: BlendMode);
}

/// Runs `draw` with alpha blending and restores opaque output afterwards.
pub fn with_alpha_blending<R>(raster: &mut dyn RasterState, draw: impl FnOnce() -> R) -> R {
    raster.set_blend_mode(BlendMode::AlphaBlend);
    let result = draw();
    raster.set_blend_mode(BlendMode::Opaque);
    result
}
