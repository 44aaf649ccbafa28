/// GlContext - shared OpenGL state for every GL object
///
/// Holds the caller's `glow::Context`, the error-check policy and the live
/// resource counters. Shared through `Rc` by the device and every resource,
/// so a resource can release its handle on drop. Not `Send`: the context is
/// current on exactly one thread.

use std::cell::Cell;
use glow::HasContext;
use glimmer_engine::glimmer::{Error, Result, device::DeviceStats};
use glimmer_engine::engine_error;

use crate::gl_format;

pub(crate) type ShaderHandle = <glow::Context as HasContext>::Shader;
pub(crate) type ProgramHandle = <glow::Context as HasContext>::Program;
pub(crate) type BufferHandle = <glow::Context as HasContext>::Buffer;
pub(crate) type TextureHandle = <glow::Context as HasContext>::Texture;
pub(crate) type VertexArrayHandle = <glow::Context as HasContext>::VertexArray;
pub(crate) type UniformLocation = <glow::Context as HasContext>::UniformLocation;

const MAX_DRAINED_ERRORS: usize = 16;

pub(crate) struct GlContext {
    /// GL function table
    pub(crate) gl: glow::Context,
    /// Check glGetError after every call
    debug_checks: bool,
    /// Live handle counts and draw calls
    stats: Cell<DeviceStats>,
}

impl GlContext {
    pub(crate) fn new(gl: glow::Context, debug_checks: bool) -> Self {
        Self {
            gl,
            debug_checks: debug_checks || cfg!(feature = "gl-error-checks"),
            stats: Cell::new(DeviceStats::default()),
        }
    }

    pub(crate) fn debug_checks(&self) -> bool {
        self.debug_checks
    }

    /// Turn a pending GL error into `Error::BackendError` (or
    /// `Error::OutOfMemory` for GL_OUT_OF_MEMORY)
    ///
    /// Drains every queued error flag so the next check starts clean; the
    /// first one is reported. No-op when checks are disabled.
    pub(crate) fn check(&self, call: &str) -> Result<()> {
        if !self.debug_checks {
            return Ok(());
        }

        // Bounded: a lost context can report an error on every call
        let mut first = None;
        for _ in 0..MAX_DRAINED_ERRORS {
            let code = unsafe { self.gl.get_error() };
            if code == glow::NO_ERROR {
                break;
            }
            first.get_or_insert(code);
        }

        match first {
            None => Ok(()),
            Some(code) => {
                let message = format!("{} failed: {} (0x{:04X})", call, gl_format::error_name(code), code);
                engine_error!("glimmer::gl", "{}", message);
                if code == glow::OUT_OF_MEMORY {
                    Err(Error::OutOfMemory)
                } else {
                    Err(Error::BackendError(message))
                }
            }
        }
    }

    pub(crate) fn stats(&self) -> DeviceStats {
        self.stats.get()
    }

    pub(crate) fn update_stats(&self, f: impl FnOnce(&mut DeviceStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }
}
