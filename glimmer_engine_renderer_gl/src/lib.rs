/*!
# Glimmer Engine - OpenGL Backend

OpenGL 3.3 core implementation of the glimmer_engine `GraphicsDevice` trait,
built on [glow](https://docs.rs/glow).

Window and context creation stay with the application: create the context
(glutin, SDL2, ...), make it current, load it into a `glow::Context` and hand
it to [`GlGraphicsDevice::new`]. All calls must come from that thread.

With `Config::enable_debug_checks` (on by default in debug builds) or the
`gl-error-checks` feature, every GL call is followed by a `glGetError` check
and a pending error surfaces as `Error::BackendError`.

```ignore
use glimmer_engine::glimmer::device::Config;
use glimmer_engine_renderer_gl::GlGraphicsDevice;

let gl = unsafe { glow::Context::from_loader_function(|s| loader(s)) };
let mut device = GlGraphicsDevice::new(gl, Config::default())?;
```
*/

mod gl_context;
mod gl_format;
mod gl_shader;
mod gl_buffer;
mod gl_texture;
mod gl_vertex_array;
mod gl_graphics_device;

pub use gl_graphics_device::GlGraphicsDevice;
pub use gl_shader::{GlProgram, GlShader};
pub use gl_buffer::GlBuffer;
pub use gl_texture::GlTexture;
pub use gl_vertex_array::GlVertexArray;
