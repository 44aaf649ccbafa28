/// GlVertexArray - OpenGL implementation of the VertexArray trait

use std::any::Any;
use std::rc::Rc;
use glow::HasContext;
use glimmer_engine::glimmer::device::VertexArray;

use crate::gl_context::{GlContext, VertexArrayHandle};

/// Vertex array object
pub struct GlVertexArray {
    ctx: Rc<GlContext>,
    pub(crate) handle: VertexArrayHandle,
}

impl GlVertexArray {
    pub(crate) fn new(ctx: Rc<GlContext>, handle: VertexArrayHandle) -> Self {
        ctx.update_stats(|s| s.live_vertex_arrays += 1);
        Self { ctx, handle }
    }
}

impl VertexArray for GlVertexArray {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        unsafe {
            self.ctx.gl.delete_vertex_array(self.handle);
        }
        self.ctx.update_stats(|s| s.live_vertex_arrays -= 1);
    }
}
