/// Texture trait, texture descriptor and sampler state

use std::any::Any;

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Texture coordinate wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

/// Sampling parameters applied to a texture at upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerState {
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
}

impl SamplerState {
    /// The one sampling policy every uploaded texture gets
    pub const TEXTURE_2D: SamplerState = SamplerState {
        mag_filter: FilterMode::Linear,
        min_filter: FilterMode::Nearest,
        wrap_s: WrapMode::Repeat,
        wrap_t: WrapMode::Repeat,
    };
}

/// Descriptor for uploading a 2D texture
///
/// `pixels` is tightly packed RGBA8, row-major, first row at the bottom.
/// The device only borrows it for the duration of the upload.
#[derive(Debug, Clone, Copy)]
pub struct TextureDesc<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u8],
    /// Texture unit the texture is bound to after upload
    pub unit: u32,
}

/// Texture properties after upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub sampler: SamplerState,
}

/// Texture resource trait
///
/// The texture is released when dropped.
pub trait Texture {
    /// Texture properties
    fn info(&self) -> &TextureInfo;

    /// Downcast hook for the owning backend
    fn as_any(&self) -> &dyn Any;
}
