//! Image decoding.
//!
//! Decoding sits behind [`ImageLoader`] so that texture registration can be
//! driven by any source of pixels. [`ImageCrateLoader`] is the file-backed
//! implementation built on the `image` crate.

use std::path::Path;

use image::{DynamicImage, ImageError};

/// Raw 8-bit pixel data as produced by an [`ImageLoader`].
///
/// `pixels` is tightly packed, row-major, `channels` bytes per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl DecodedImage {
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        Self {
            pixels,
            width,
            height,
            channels,
        }
    }

    /// Converts to tightly packed RGBA8, filling alpha with 255 for RGB input.
    ///
    /// Returns `None` for any layout other than 3 or 4 channels, for an empty
    /// image, or when the buffer length does not match the dimensions.
    pub fn to_rgba8(&self) -> Option<image::RgbaImage> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        match self.channels {
            4 => image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone()),
            3 => image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                .map(|rgb| DynamicImage::ImageRgb8(rgb).to_rgba8()),
            _ => None,
        }
    }
}

/// Source of decoded images.
pub trait ImageLoader {
    fn decode(&self, path: &Path) -> Result<DecodedImage, ImageError>;
}

/// Decodes image files from disk with the `image` crate.
#[derive(Clone, Copy, Debug)]
pub struct ImageCrateLoader {
    flip_vertically: bool,
}

impl ImageCrateLoader {
    /// `flip_vertically` turns images upside down on load so that row 0 is the
    /// bottom of the picture, matching texture coordinates with v pointing up.
    pub fn new(flip_vertically: bool) -> Self {
        Self { flip_vertically }
    }
}

impl Default for ImageCrateLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ImageLoader for ImageCrateLoader {
    fn decode(&self, path: &Path) -> Result<DecodedImage, ImageError> {
        let img = image::open(path)?;
        let img = if self.flip_vertically { img.flipv() } else { img };
        Ok(from_dynamic(img))
    }
}

/// Flattens a decoded image to 8 bits per channel, keeping its channel count.
pub fn from_dynamic(img: DynamicImage) -> DecodedImage {
    let (width, height) = (img.width(), img.height());
    let channels = img.color().channel_count();
    let pixels = match channels {
        1 => img.to_luma8().into_raw(),
        2 => img.to_luma_alpha8().into_raw(),
        3 => img.to_rgb8().into_raw(),
        _ => img.to_rgba8().into_raw(),
    };
    DecodedImage {
        pixels,
        width,
        height,
        channels,
    }
}
