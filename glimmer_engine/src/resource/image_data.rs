/// Decoded RGBA8 image data, ready for texture upload.
///
/// Rows are stored bottom row first so the first texel is the lower-left
/// corner, the origin texture coordinates expect.

use std::path::Path;
use crate::error::{Error, Result};
use crate::engine_debug;

/// Tightly packed RGBA8 pixels, origin bottom-left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageData {
    /// Wrap raw RGBA8 pixels already in bottom-left row order
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if `pixels.len() != width * height * 4` or
    /// either dimension is zero.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidResource(format!(
                "image dimensions must be non-zero, got {}x{}", width, height)));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(Error::InvalidResource(format!(
                "{}x{} RGBA8 image needs {} bytes, got {}",
                width, height, expected, pixels.len())));
        }
        Ok(Self { width, height, pixels })
    }

    /// Decode an image file (PNG), flip it vertically and convert to RGBA8
    ///
    /// # Errors
    ///
    /// `Error::ResourceNotFound` naming the path if the file is missing or
    /// cannot be decoded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .map_err(|e| Error::ResourceNotFound(format!("{}: {}", path.display(), e)))?;
        let data = Self::from_decoded(decoded);
        engine_debug!(
            "glimmer::image",
            "Loaded {} ({}x{})",
            path.display(), data.width, data.height
        );
        Ok(data)
    }

    /// Decode an in-memory encoded image, flip it vertically and convert to RGBA8
    pub fn from_memory(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| Error::ResourceNotFound(format!("in-memory image: {}", e)))?;
        Ok(Self::from_decoded(decoded))
    }

    fn from_decoded(decoded: image::DynamicImage) -> Self {
        let rgba = decoded.flipv().into_rgba8();
        let (width, height) = rgba.dimensions();
        Self { width, height, pixels: rgba.into_raw() }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 bytes, bottom row first
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value of the texel at (x, y), y counted from the bottom
    pub fn texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }
}

#[cfg(test)]
#[path = "image_data_tests.rs"]
mod tests;
