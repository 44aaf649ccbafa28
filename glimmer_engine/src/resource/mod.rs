//! Resource module: buffer/texture ownership, vertex layouts and vertex
//! array state, decoded image data.

pub mod buffer_manager;
pub mod image_data;
pub mod vertex_layout;
pub mod vertex_array_state;

pub use buffer_manager::{BufferKey, BufferManager, GpuBuffer, GpuTexture, TextureKey};
pub use image_data::ImageData;
pub use vertex_layout::{AttributeFormat, VertexLayout};
pub use vertex_array_state::{IndexBinding, VertexArrayState};
