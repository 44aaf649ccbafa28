//! Shader compile/link lifecycle.
//!
//! `CompiledStage` exists only for a stage the driver accepted. Linking
//! consumes both stages; afterwards only the `ShaderProgram` survives. A
//! program is never handed out unlinked, and its handle is released exactly
//! once, when the program is destroyed or dropped.

use std::path::Path;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, Program, Shader, ShaderDesc, ShaderStage};
use crate::shader::ShaderSource;
use crate::{engine_bail, engine_debug, engine_error, engine_info};

// ============================================================================
// COMPILED STAGE
// ============================================================================

/// One successfully compiled shader stage
pub struct CompiledStage {
    stage: ShaderStage,
    shader: Box<dyn Shader>,
}

impl CompiledStage {
    /// Compile `source` as `stage`
    ///
    /// # Errors
    ///
    /// `Error::CompileError` carrying the driver diagnostic. The driver-side
    /// object is already released when this returns.
    pub fn compile(device: &mut dyn GraphicsDevice, stage: ShaderStage, source: &str) -> Result<Self> {
        match device.compile_shader(ShaderDesc { stage, source }) {
            Ok(shader) => {
                engine_debug!("glimmer::shader", "Compiled {} stage ({} bytes)", stage, source.len());
                Ok(Self { stage, shader })
            }
            Err(err) => {
                if let Error::CompileError { diagnostic, .. } = &err {
                    engine_error!("glimmer::shader", "Failed to compile {} shader!\n{}", stage, diagnostic);
                }
                Err(err)
            }
        }
    }

    /// Stage this unit was compiled for
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

// ============================================================================
// SHADER PROGRAM
// ============================================================================

/// A linked vertex + fragment program
pub struct ShaderProgram {
    program: Box<dyn Program>,
}

impl ShaderProgram {
    /// Link two compiled stages into a program
    ///
    /// Both stages are consumed; their compiled units are released whether
    /// linking succeeds or fails.
    ///
    /// # Errors
    ///
    /// `Error::LinkError` if the stages are swapped or the driver rejects the
    /// attach/link/validate sequence.
    pub fn link(
        device: &mut dyn GraphicsDevice,
        vertex: CompiledStage,
        fragment: CompiledStage,
    ) -> Result<Self> {
        if vertex.stage != ShaderStage::Vertex || fragment.stage != ShaderStage::Fragment {
            engine_bail!(LinkError => "glimmer::shader",
                "expected (vertex, fragment) stages, got ({}, {})", vertex.stage, fragment.stage);
        }

        match device.link_program(vertex.shader, fragment.shader) {
            Ok(program) => {
                engine_info!("glimmer::shader", "Program linked");
                Ok(Self { program })
            }
            Err(err) => {
                engine_error!("glimmer::shader", "{}", err);
                Err(err)
            }
        }
    }

    /// Compile both stages of `source` and link them
    ///
    /// If the vertex stage fails, the fragment stage is never compiled. If
    /// the fragment stage fails, the compiled vertex stage is released.
    pub fn from_source(device: &mut dyn GraphicsDevice, source: &ShaderSource) -> Result<Self> {
        let vertex = CompiledStage::compile(device, ShaderStage::Vertex, source.vertex())?;
        let fragment = CompiledStage::compile(device, ShaderStage::Fragment, source.fragment())?;
        Self::link(device, vertex, fragment)
    }

    /// Read a combined shader file, then compile and link it
    pub fn from_file(device: &mut dyn GraphicsDevice, path: impl AsRef<Path>) -> Result<Self> {
        let source = ShaderSource::from_file(path)?;
        Self::from_source(device, &source)
    }

    /// Backend program handle
    pub fn program(&self) -> &dyn Program {
        self.program.as_ref()
    }

    /// Make this program active
    pub fn bind(&self, device: &mut dyn GraphicsDevice) -> Result<()> {
        device.use_program(self.program.as_ref())
    }

    /// Bind the program and set one integer uniform (e.g. a sampler's texture unit)
    pub fn set_uniform_i32(&self, device: &mut dyn GraphicsDevice, name: &str, value: i32) -> Result<()> {
        device.use_program(self.program.as_ref())?;
        device.set_uniform_i32(self.program.as_ref(), name, value)
    }

    /// Release the program
    ///
    /// Equivalent to dropping it; consuming `self` makes a second release
    /// impossible.
    pub fn destroy(self) {
        engine_debug!("glimmer::shader", "Program destroyed");
    }
}

#[cfg(test)]
#[path = "shader_program_tests.rs"]
mod tests;
