/// Shader and Program traits and the shader descriptor

use std::any::Any;
use std::fmt;

/// Shader stage
///
/// The harness only ever builds vertex + fragment programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    /// Lower-case stage name, as used in shader file markers
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Descriptor for compiling a shader stage
#[derive(Debug, Clone, Copy)]
pub struct ShaderDesc<'a> {
    /// Stage to compile
    pub stage: ShaderStage,
    /// GLSL source text
    pub source: &'a str,
}

/// Compiled shader stage
///
/// Implemented by backend-specific types. The compiled unit is released when
/// dropped.
pub trait Shader {
    /// Stage this unit was compiled for
    fn stage(&self) -> ShaderStage;

    /// Downcast hook for the owning backend
    fn as_any(&self) -> &dyn Any;
}

/// Linked program
///
/// Implemented by backend-specific types. The program is released when
/// dropped.
pub trait Program {
    /// Downcast hook for the owning backend
    fn as_any(&self) -> &dyn Any;
}
