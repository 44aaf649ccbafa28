/// GlTexture - OpenGL implementation of the Texture trait

use std::any::Any;
use std::rc::Rc;
use glow::HasContext;
use glimmer_engine::glimmer::device::{Texture, TextureInfo};

use crate::gl_context::{GlContext, TextureHandle};

/// 2D RGBA8 texture object
pub struct GlTexture {
    ctx: Rc<GlContext>,
    pub(crate) handle: TextureHandle,
    info: TextureInfo,
}

impl GlTexture {
    pub(crate) fn new(ctx: Rc<GlContext>, handle: TextureHandle, info: TextureInfo) -> Self {
        ctx.update_stats(|s| s.live_textures += 1);
        Self { ctx, handle, info }
    }
}

impl Texture for GlTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe {
            self.ctx.gl.delete_texture(self.handle);
        }
        self.ctx.update_stats(|s| s.live_textures -= 1);
    }
}
