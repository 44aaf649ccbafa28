/// Engine enums to GL enums
///
/// Pure mappings, no GL calls.

use glimmer_engine::glimmer::device::{
    ClearFlags, ComponentType, FilterMode, IndexType, PrimitiveTopology, ShaderStage, WrapMode,
};
use glimmer_engine::glimmer::{Error, Result};

/// Convert a count, size or offset to a GL `GLint`/`GLsizei`
pub(crate) fn gl_int(value: u32, what: &str) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        Error::InvalidResource(format!("{} {} exceeds the GL integer range", what, value))
    })
}

pub(crate) fn shader_stage(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

pub(crate) fn component_type(ty: ComponentType) -> u32 {
    match ty {
        ComponentType::F32 => glow::FLOAT,
        ComponentType::I8 => glow::BYTE,
        ComponentType::U8 => glow::UNSIGNED_BYTE,
        ComponentType::I16 => glow::SHORT,
        ComponentType::U16 => glow::UNSIGNED_SHORT,
        ComponentType::I32 => glow::INT,
        ComponentType::U32 => glow::UNSIGNED_INT,
    }
}

pub(crate) fn topology(topology: PrimitiveTopology) -> u32 {
    match topology {
        PrimitiveTopology::TriangleList => glow::TRIANGLES,
        PrimitiveTopology::TriangleStrip => glow::TRIANGLE_STRIP,
        PrimitiveTopology::LineList => glow::LINES,
        PrimitiveTopology::PointList => glow::POINTS,
    }
}

pub(crate) fn index_type(ty: IndexType) -> u32 {
    match ty {
        IndexType::U16 => glow::UNSIGNED_SHORT,
        IndexType::U32 => glow::UNSIGNED_INT,
    }
}

pub(crate) fn filter(mode: FilterMode) -> i32 {
    match mode {
        FilterMode::Nearest => glow::NEAREST as i32,
        FilterMode::Linear => glow::LINEAR as i32,
    }
}

pub(crate) fn wrap(mode: WrapMode) -> i32 {
    match mode {
        WrapMode::Repeat => glow::REPEAT as i32,
        WrapMode::MirroredRepeat => glow::MIRRORED_REPEAT as i32,
        WrapMode::ClampToEdge => glow::CLAMP_TO_EDGE as i32,
    }
}

pub(crate) fn clear_mask(flags: ClearFlags) -> u32 {
    let mut mask = 0;
    if flags.contains(ClearFlags::COLOR) {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::DEPTH) {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::STENCIL) {
        mask |= glow::STENCIL_BUFFER_BIT;
    }
    mask
}

/// Symbolic name of a glGetError code
pub(crate) fn error_name(code: u32) -> &'static str {
    match code {
        glow::NO_ERROR => "GL_NO_ERROR",
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

#[cfg(test)]
#[path = "gl_format_tests.rs"]
mod tests;
