/// GlShader / GlProgram - OpenGL implementations of the Shader and Program traits

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use glow::HasContext;
use rustc_hash::FxHashMap;
use glimmer_engine::glimmer::device::{Program, Shader, ShaderStage};
use glimmer_engine::engine_warn;

use crate::gl_context::{GlContext, ProgramHandle, ShaderHandle, UniformLocation};

/// Compiled shader object
pub struct GlShader {
    ctx: Rc<GlContext>,
    pub(crate) handle: ShaderHandle,
    stage: ShaderStage,
}

impl GlShader {
    pub(crate) fn new(ctx: Rc<GlContext>, handle: ShaderHandle, stage: ShaderStage) -> Self {
        ctx.update_stats(|s| s.live_shaders += 1);
        Self { ctx, handle, stage }
    }
}

impl Shader for GlShader {
    fn stage(&self) -> ShaderStage {
        self.stage
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        unsafe {
            self.ctx.gl.delete_shader(self.handle);
        }
        self.ctx.update_stats(|s| s.live_shaders -= 1);
    }
}

/// Linked program object
///
/// Uniform locations are looked up once per name and cached, including
/// names the driver reports as inactive.
pub struct GlProgram {
    ctx: Rc<GlContext>,
    pub(crate) handle: ProgramHandle,
    uniforms: RefCell<FxHashMap<String, Option<UniformLocation>>>,
}

impl GlProgram {
    pub(crate) fn new(ctx: Rc<GlContext>, handle: ProgramHandle) -> Self {
        ctx.update_stats(|s| s.live_programs += 1);
        Self {
            ctx,
            handle,
            uniforms: RefCell::new(FxHashMap::default()),
        }
    }

    /// Location of `name`, or None if the uniform is not active
    pub(crate) fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        if let Some(cached) = self.uniforms.borrow().get(name) {
            return cached.clone();
        }

        let location = unsafe { self.ctx.gl.get_uniform_location(self.handle, name) };
        if location.is_none() {
            engine_warn!("glimmer::gl", "Uniform '{}' is not active in this program", name);
        }
        self.uniforms.borrow_mut().insert(name.to_string(), location.clone());
        location
    }
}

impl Program for GlProgram {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlProgram {
    fn drop(&mut self) {
        unsafe {
            self.ctx.gl.delete_program(self.handle);
        }
        self.ctx.update_stats(|s| s.live_programs -= 1);
    }
}
