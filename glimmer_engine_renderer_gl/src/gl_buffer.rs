/// GlBuffer - OpenGL implementation of the Buffer trait

use std::any::Any;
use std::rc::Rc;
use glow::HasContext;
use glimmer_engine::glimmer::device::{Buffer, BufferKind};

use crate::gl_context::{BufferHandle, GlContext};

/// Static-draw buffer object
pub struct GlBuffer {
    ctx: Rc<GlContext>,
    pub(crate) handle: BufferHandle,
    kind: BufferKind,
    size: u64,
}

impl GlBuffer {
    pub(crate) fn new(ctx: Rc<GlContext>, handle: BufferHandle, kind: BufferKind, size: u64) -> Self {
        ctx.update_stats(|s| s.live_buffers += 1);
        Self { ctx, handle, kind, size }
    }
}

impl Buffer for GlBuffer {
    fn kind(&self) -> BufferKind {
        self.kind
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlBuffer {
    fn drop(&mut self) {
        unsafe {
            self.ctx.gl.delete_buffer(self.handle);
        }
        self.ctx.update_stats(|s| s.live_buffers -= 1);
    }
}
