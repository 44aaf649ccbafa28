//! Renderer module: per-frame draw submission.

pub mod frame_renderer;

pub use frame_renderer::{DrawMode, FrameRenderer, UniformBinding};
