/// Buffer manager: single owner of every uploaded buffer and texture.
///
/// Uses SlotMaps so a released key stays invalid even after its slot is
/// reused. Handles are released when removed from the manager, when the
/// manager is cleared, or when it is dropped.

use slotmap::{new_key_type, SlotMap};
use bytemuck::Pod;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, BufferKind, GraphicsDevice, Texture, TextureDesc,
};
use crate::resource::ImageData;
use crate::{engine_bail, engine_debug};

// ===== SLOT MAP KEYS =====

new_key_type! {
    /// Stable key for a buffer owned by a BufferManager
    pub struct BufferKey;

    /// Stable key for a texture owned by a BufferManager
    pub struct TextureKey;
}

// ===== GPU BUFFER =====

/// A vertex or index buffer plus its creation parameters
pub struct GpuBuffer {
    kind: BufferKind,
    size: u64,
    handle: Box<dyn Buffer>,
}

impl GpuBuffer {
    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of u32 elements (meaningful for index buffers)
    ///
    /// Saturates at `u32::MAX` for buffers larger than 16 GiB.
    pub fn element_count(&self) -> u32 {
        u32::try_from(self.size / 4).unwrap_or(u32::MAX)
    }

    /// Backend handle
    pub fn handle(&self) -> &dyn Buffer {
        self.handle.as_ref()
    }
}

// ===== GPU TEXTURE =====

/// An uploaded 2D texture
pub struct GpuTexture {
    unit: u32,
    handle: Box<dyn Texture>,
}

impl GpuTexture {
    /// Texture unit it was bound to at upload
    pub fn unit(&self) -> u32 {
        self.unit
    }

    pub fn width(&self) -> u32 {
        self.handle.info().width
    }

    pub fn height(&self) -> u32 {
        self.handle.info().height
    }

    /// Backend handle
    pub fn handle(&self) -> &dyn Texture {
        self.handle.as_ref()
    }
}

// ===== BUFFER MANAGER =====

/// Owns buffers and textures, addressed by stable keys
pub struct BufferManager {
    buffers: SlotMap<BufferKey, GpuBuffer>,
    textures: SlotMap<TextureKey, GpuTexture>,
}

impl BufferManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self {
            buffers: SlotMap::with_key(),
            textures: SlotMap::with_key(),
        }
    }

    /// Upload `bytes` into a new write-once buffer
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if `bytes` is empty; any device error as-is.
    pub fn allocate_buffer(
        &mut self,
        device: &mut dyn GraphicsDevice,
        kind: BufferKind,
        bytes: &[u8],
    ) -> Result<BufferKey> {
        if bytes.is_empty() {
            engine_bail!(InvalidResource => "glimmer::buffer_manager",
                "cannot allocate an empty {:?} buffer", kind);
        }

        let handle = device.create_buffer(BufferDesc { kind, data: bytes })?;
        let key = self.buffers.insert(GpuBuffer {
            kind,
            size: bytes.len() as u64,
            handle,
        });
        engine_debug!("glimmer::buffer_manager", "Allocated {:?} buffer ({} bytes)", kind, bytes.len());
        Ok(key)
    }

    /// Upload a slice of plain vertex structs (or floats) as a vertex buffer
    pub fn allocate_vertices<T: Pod>(
        &mut self,
        device: &mut dyn GraphicsDevice,
        vertices: &[T],
    ) -> Result<BufferKey> {
        self.allocate_buffer(device, BufferKind::Vertex, bytemuck::cast_slice(vertices))
    }

    /// Upload u32 indices as an index buffer
    pub fn allocate_indices(
        &mut self,
        device: &mut dyn GraphicsDevice,
        indices: &[u32],
    ) -> Result<BufferKey> {
        self.allocate_buffer(device, BufferKind::Index, bytemuck::cast_slice(indices))
    }

    /// Upload an RGBA8 image as a 2D texture bound to `unit`
    ///
    /// The pixels are only borrowed for the upload; the caller keeps the
    /// image and may drop it right after.
    pub fn allocate_texture(
        &mut self,
        device: &mut dyn GraphicsDevice,
        image: &ImageData,
        unit: u32,
    ) -> Result<TextureKey> {
        let handle = device.create_texture(TextureDesc {
            width: image.width(),
            height: image.height(),
            pixels: image.pixels(),
            unit,
        })?;
        let key = self.textures.insert(GpuTexture { unit, handle });
        engine_debug!(
            "glimmer::buffer_manager",
            "Allocated {}x{} texture on unit {}",
            image.width(), image.height(), unit
        );
        Ok(key)
    }

    /// Get a buffer by key
    pub fn buffer(&self, key: BufferKey) -> Option<&GpuBuffer> {
        self.buffers.get(key)
    }

    /// Get a texture by key
    pub fn texture(&self, key: TextureKey) -> Option<&GpuTexture> {
        self.textures.get(key)
    }

    /// Release a buffer. Returns false if the key was already released.
    pub fn release_buffer(&mut self, key: BufferKey) -> bool {
        self.buffers.remove(key).is_some()
    }

    /// Release a texture. Returns false if the key was already released.
    pub fn release_texture(&mut self, key: TextureKey) -> bool {
        self.textures.remove(key).is_some()
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.buffers.clear();
        self.textures.clear();
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl Default for BufferManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "buffer_manager_tests.rs"]
mod tests;
