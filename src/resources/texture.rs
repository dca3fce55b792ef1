use std::path::{Path, PathBuf};

use image::ImageError;
use thiserror::Error;

use crate::{
    data_structures::texture::Texture,
    resources::decode::{DecodedImage, ImageLoader},
};

/// Number of image units a scene may occupy.
pub const MAX_TEXTURE_UNITS: usize = 16;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("could not load image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("image {} has {channels} channels, only RGB and RGBA are supported", path.display())]
    UnsupportedChannels { path: PathBuf, channels: u8 },
    #[error("texture table is full ({capacity} units), cannot register '{tag}'")]
    CapacityExceeded { tag: String, capacity: usize },
    #[error("a texture tagged '{0}' is already registered")]
    DuplicateTag(String),
    #[error("failed to upload texture '{tag}': {reason}")]
    Upload { tag: String, reason: String },
}

/// Graphics-API side of texture management.
///
/// The registry decides *what* lives in which unit, the backend owns the
/// actual texture objects.
pub trait TextureBackend {
    type Handle;

    /// Creates a texture object from RGB or RGBA pixels. Implementations use
    /// repeat wrapping, linear filtering and generate mipmaps.
    fn create(&mut self, image: &DecodedImage, tag: &str) -> Result<Self::Handle, TextureError>;

    /// Makes `handle` the texture sampled through image unit `unit`.
    fn bind_to_unit(&mut self, handle: &Self::Handle, unit: u32);

    /// Frees the texture object.
    fn delete(&mut self, handle: Self::Handle);
}

/// A registered texture. Its image unit is its position in the registry.
#[derive(Debug)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub handle: H,
}

/// Ordered tag → texture table, at most [`MAX_TEXTURE_UNITS`] entries.
///
/// Entry `i` is bound to image unit `i` by [`bind_all`](Self::bind_all).
/// The registry owns its handles: they are deleted by
/// [`release_all`](Self::release_all) or when the registry is dropped.
pub struct TextureRegistry<B: TextureBackend> {
    backend: B,
    entries: Vec<TextureEntry<B::Handle>>,
}

impl<B: TextureBackend> TextureRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            entries: Vec::new(),
        }
    }

    /// Decodes `path`, uploads it and registers it under `tag`.
    ///
    /// Returns the slot (image unit) assigned to the texture. On failure the
    /// registry is left unchanged.
    pub fn load_texture(
        &mut self,
        loader: &dyn ImageLoader,
        path: &Path,
        tag: &str,
    ) -> Result<usize, TextureError> {
        if self.entries.len() >= MAX_TEXTURE_UNITS {
            log::warn!("No free image unit for '{tag}', all {MAX_TEXTURE_UNITS} are in use");
            return Err(TextureError::CapacityExceeded {
                tag: tag.to_string(),
                capacity: MAX_TEXTURE_UNITS,
            });
        }
        if self.find_slot(tag).is_some() {
            log::warn!("Texture tag '{tag}' is already registered");
            return Err(TextureError::DuplicateTag(tag.to_string()));
        }

        let image = loader.decode(path).map_err(|source| {
            log::warn!("Could not load image {}: {source}", path.display());
            TextureError::Decode {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if !matches!(image.channels, 3 | 4) {
            log::warn!(
                "Not implemented to handle image with {} channels: {}",
                image.channels,
                path.display()
            );
            return Err(TextureError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels: image.channels,
            });
        }

        let handle = self.backend.create(&image, tag).inspect_err(|e| {
            log::warn!("Could not upload image {}: {e}", path.display());
        })?;
        log::info!(
            "Loaded image {}: {}x{}, {} channels, tag '{}'",
            path.display(),
            image.width,
            image.height,
            image.channels,
            tag
        );
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        Ok(self.entries.len() - 1)
    }

    /// Binds every registered texture to the image unit equal to its slot.
    pub fn bind_all(&mut self) {
        for (unit, entry) in self.entries.iter().enumerate() {
            self.backend.bind_to_unit(&entry.handle, unit as u32);
        }
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    pub fn find_handle(&self, tag: &str) -> Option<&B::Handle> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.handle)
    }

    /// Deletes every texture object and empties the table.
    pub fn release_all(&mut self) {
        for entry in self.entries.drain(..) {
            log::debug!("Releasing texture '{}'", entry.tag);
            self.backend.delete(entry.handle);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.tag.as_str())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: TextureBackend> Drop for TextureRegistry<B> {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// [`TextureBackend`] on top of a wgpu device.
///
/// wgpu has no global texture units; binding records the texture in a unit
/// table from which bind groups are assembled.
#[derive(Debug)]
pub struct WgpuTextureBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    units: Vec<Option<Texture>>,
}

impl WgpuTextureBackend {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            units: vec![None; MAX_TEXTURE_UNITS],
        }
    }

    /// Texture currently bound to `unit`, if any.
    pub fn unit(&self, unit: u32) -> Option<&Texture> {
        self.units.get(unit as usize).and_then(Option::as_ref)
    }
}

impl TextureBackend for WgpuTextureBackend {
    type Handle = Texture;

    fn create(&mut self, image: &DecodedImage, tag: &str) -> Result<Texture, TextureError> {
        if image.width == 0 || image.height == 0 {
            return Err(TextureError::Upload {
                tag: tag.to_string(),
                reason: format!("{}x{} image has no texels", image.width, image.height),
            });
        }
        Texture::from_decoded(&self.device, &self.queue, image, Some(tag)).ok_or_else(|| {
            TextureError::Upload {
                tag: tag.to_string(),
                reason: format!(
                    "{} bytes do not describe a {}x{} image with {} channels",
                    image.pixels.len(),
                    image.width,
                    image.height,
                    image.channels
                ),
            }
        })
    }

    fn bind_to_unit(&mut self, handle: &Texture, unit: u32) {
        match self.units.get_mut(unit as usize) {
            Some(slot) => *slot = Some(handle.clone()),
            None => log::warn!("Image unit {unit} is out of range, texture not bound"),
        }
    }

    fn delete(&mut self, handle: Texture) {
        for slot in self.units.iter_mut() {
            if slot.as_ref().is_some_and(|bound| bound.texture == handle.texture) {
                *slot = None;
            }
        }
        handle.texture.destroy();
    }
}
