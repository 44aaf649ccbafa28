/// Graphics device module - backend-facing traits and types

// Module declarations
pub mod graphics_device;
pub mod shader;
pub mod buffer;
pub mod texture;
pub mod vertex_array;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use shader::*;
pub use buffer::*;
pub use texture::*;
pub use vertex_array::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
