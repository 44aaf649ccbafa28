//! Shader loading, compilation and linking.

pub mod shader_source;
pub mod shader_program;

pub use shader_source::{ShaderSource, DEFAULT_STAGE_MARKER};
pub use shader_program::{CompiledStage, ShaderProgram};
