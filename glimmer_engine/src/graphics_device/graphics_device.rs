/// GraphicsDevice trait - the only door to the GPU
///
/// Every operation takes the objects it acts on as explicit arguments. A
/// backend may rely on stateful binding internally (OpenGL does), but callers
/// never depend on whatever happens to be bound.

use bitflags::bitflags;

use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, IndexType, PrimitiveTopology, Program, Shader, ShaderDesc,
    Texture, TextureDesc, VertexArray, VertexAttribute,
};

// ============================================================================
// Configuration and device information
// ============================================================================

/// Device configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Application name (logged at device creation)
    pub app_name: String,
    /// Check for a pending driver error after every call
    pub enable_debug_checks: bool,
    /// Enable standard alpha blending (src_alpha, 1 - src_alpha)
    pub enable_alpha_blending: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Glimmer Application".to_string(),
            enable_debug_checks: cfg!(debug_assertions),
            enable_alpha_blending: true,
        }
    }
}

/// Static information about the device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Backend name ("OpenGL", "Mock", ...)
    pub backend: String,
    /// Driver version string as reported by the driver
    pub version: String,
}

/// Live resource counts and cumulative draw count
///
/// A handle is counted from creation until it is released. Comparing two
/// snapshots is how leaks show up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    pub live_shaders: u32,
    pub live_programs: u32,
    pub live_buffers: u32,
    pub live_textures: u32,
    pub live_vertex_arrays: u32,
    /// Draw calls issued since the device was created
    pub draw_calls: u64,
}

impl DeviceStats {
    /// Total number of live GPU handles of any kind
    pub fn live_total(&self) -> u32 {
        self.live_shaders
            + self.live_programs
            + self.live_buffers
            + self.live_textures
            + self.live_vertex_arrays
    }
}

bitflags! {
    /// Which framebuffer planes a clear touches
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Main device trait
///
/// Implemented by backend devices (e.g. GlGraphicsDevice). All calls are
/// issued from the thread that owns the rendering context.
pub trait GraphicsDevice {
    /// Backend and driver information
    fn info(&self) -> &DeviceInfo;

    /// Compile one shader stage
    ///
    /// On failure the half-created stage object is released before the
    /// `Error::CompileError` is returned.
    fn compile_shader(&mut self, desc: ShaderDesc) -> Result<Box<dyn Shader>>;

    /// Attach, link and validate a program from two compiled stages
    ///
    /// Both stages are consumed and released whether linking succeeds or not.
    fn link_program(
        &mut self,
        vertex: Box<dyn Shader>,
        fragment: Box<dyn Shader>,
    ) -> Result<Box<dyn Program>>;

    /// Allocate a buffer and copy `desc.data` into it (static usage)
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Box<dyn Buffer>>;

    /// Upload an RGBA8 2D texture and bind it to `desc.unit`
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Box<dyn Texture>>;

    /// Create an empty vertex array object
    fn create_vertex_array(&mut self) -> Result<Box<dyn VertexArray>>;

    /// Make `buffer` the data source of one attribute slot of `vertex_array`
    fn set_vertex_attribute(
        &mut self,
        vertex_array: &dyn VertexArray,
        buffer: &dyn Buffer,
        attribute: &VertexAttribute,
    ) -> Result<()>;

    /// Attach an index buffer to `vertex_array`
    fn set_index_buffer(&mut self, vertex_array: &dyn VertexArray, buffer: &dyn Buffer) -> Result<()>;

    /// Bind a texture to a texture unit
    fn bind_texture(&mut self, unit: u32, texture: &dyn Texture) -> Result<()>;

    /// Clear the selected framebuffer planes
    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]) -> Result<()>;

    /// Make `program` the active program
    fn use_program(&mut self, program: &dyn Program) -> Result<()>;

    /// Set an integer uniform of `program` (the program must be active)
    ///
    /// A name that is not an active uniform is ignored, as the driver does.
    fn set_uniform_i32(&mut self, program: &dyn Program, name: &str, value: i32) -> Result<()>;

    /// Make `vertex_array` the active vertex array
    fn bind_vertex_array(&mut self, vertex_array: &dyn VertexArray) -> Result<()>;

    /// Non-indexed draw
    fn draw(&mut self, topology: PrimitiveTopology, first_vertex: u32, vertex_count: u32) -> Result<()>;

    /// Indexed draw reading `index_count` indices from the active vertex array's index buffer
    fn draw_indexed(
        &mut self,
        topology: PrimitiveTopology,
        index_count: u32,
        index_type: IndexType,
    ) -> Result<()>;

    /// Live resource counts and draw statistics
    fn stats(&self) -> DeviceStats;
}
