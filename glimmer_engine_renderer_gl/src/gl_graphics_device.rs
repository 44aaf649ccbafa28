/// GlGraphicsDevice - OpenGL 3.3 core implementation of GraphicsDevice
///
/// The caller creates the window and the GL context, makes it current and
/// hands the loaded `glow::Context` over. GL is a state machine; every
/// method binds what it needs itself and never relies on earlier bindings.

use std::rc::Rc;
use glow::HasContext;
use glimmer_engine::glimmer::{
    Error, Result,
    device::{
        Buffer, BufferDesc, ClearFlags, Config, DeviceInfo, DeviceStats, GraphicsDevice,
        IndexType, PrimitiveTopology, Program, SamplerState, Shader, ShaderDesc, ShaderStage,
        Texture, TextureDesc, TextureInfo, VertexArray, VertexAttribute,
    },
};
use glimmer_engine::{engine_debug, engine_err, engine_info};

use crate::gl_buffer::GlBuffer;
use crate::gl_context::GlContext;
use crate::gl_format;
use crate::gl_shader::{GlProgram, GlShader};
use crate::gl_texture::GlTexture;
use crate::gl_vertex_array::GlVertexArray;

/// OpenGL graphics device
pub struct GlGraphicsDevice {
    ctx: Rc<GlContext>,
    info: DeviceInfo,
}

impl GlGraphicsDevice {
    /// Wrap a current GL context
    ///
    /// Logs the driver version and enables alpha blending when configured.
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` if the context reports an error while
    /// the initial state is set.
    pub fn new(gl: glow::Context, config: Config) -> Result<Self> {
        let ctx = Rc::new(GlContext::new(gl, config.enable_debug_checks));

        let version = unsafe { ctx.gl.get_parameter_string(glow::VERSION) };
        engine_info!("glimmer::gl", "{}: OpenGL {}", config.app_name, version);
        if ctx.debug_checks() {
            engine_debug!("glimmer::gl", "Per-call GL error checks enabled");
        }

        if config.enable_alpha_blending {
            unsafe {
                ctx.gl.enable(glow::BLEND);
                ctx.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            }
        }
        ctx.check("initial state")
            .map_err(|e| Error::InitializationFailed(e.to_string()))?;

        Ok(Self {
            ctx,
            info: DeviceInfo {
                backend: "OpenGL".to_string(),
                version,
            },
        })
    }
}

// ===== DOWNCASTS =====

fn gl_shader(shader: &dyn Shader) -> Result<&GlShader> {
    shader.as_any().downcast_ref::<GlShader>()
        .ok_or_else(|| Error::InvalidResource("shader was not created by the GL device".to_string()))
}

fn gl_program(program: &dyn Program) -> Result<&GlProgram> {
    program.as_any().downcast_ref::<GlProgram>()
        .ok_or_else(|| Error::InvalidResource("program was not created by the GL device".to_string()))
}

fn gl_buffer(buffer: &dyn Buffer) -> Result<&GlBuffer> {
    buffer.as_any().downcast_ref::<GlBuffer>()
        .ok_or_else(|| Error::InvalidResource("buffer was not created by the GL device".to_string()))
}

fn gl_texture(texture: &dyn Texture) -> Result<&GlTexture> {
    texture.as_any().downcast_ref::<GlTexture>()
        .ok_or_else(|| Error::InvalidResource("texture was not created by the GL device".to_string()))
}

fn gl_vertex_array(vertex_array: &dyn VertexArray) -> Result<&GlVertexArray> {
    vertex_array.as_any().downcast_ref::<GlVertexArray>()
        .ok_or_else(|| Error::InvalidResource("vertex array was not created by the GL device".to_string()))
}

impl GraphicsDevice for GlGraphicsDevice {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn compile_shader(&mut self, desc: ShaderDesc) -> Result<Box<dyn Shader>> {
        let gl = &self.ctx.gl;
        let handle = unsafe { gl.create_shader(gl_format::shader_stage(desc.stage)) }
            .map_err(|e| engine_err!("glimmer::gl", "glCreateShader failed: {}", e))?;

        unsafe {
            gl.shader_source(handle, desc.source);
            gl.compile_shader(handle);
        }

        // From here on the handle is owned, so any early return releases it
        let shader = GlShader::new(self.ctx.clone(), handle, desc.stage);
        self.ctx.check("glCompileShader")?;

        if !unsafe { gl.get_shader_compile_status(handle) } {
            let log = unsafe { gl.get_shader_info_log(handle) };
            let diagnostic = if log.trim().is_empty() {
                "driver reported no diagnostic".to_string()
            } else {
                log.trim_end().to_string()
            };
            drop(shader);
            return Err(Error::CompileError { stage: desc.stage, diagnostic });
        }

        Ok(Box::new(shader))
    }

    fn link_program(
        &mut self,
        vertex: Box<dyn Shader>,
        fragment: Box<dyn Shader>,
    ) -> Result<Box<dyn Program>> {
        if vertex.stage() != ShaderStage::Vertex || fragment.stage() != ShaderStage::Fragment {
            return Err(Error::LinkError(format!(
                "expected (vertex, fragment) stages, got ({}, {})",
                vertex.stage(), fragment.stage())));
        }
        let vs = gl_shader(vertex.as_ref())?.handle;
        let fs = gl_shader(fragment.as_ref())?.handle;

        let gl = &self.ctx.gl;
        let handle = unsafe { gl.create_program() }
            .map_err(|e| engine_err!("glimmer::gl", "glCreateProgram failed: {}", e))?;
        let program = GlProgram::new(self.ctx.clone(), handle);

        unsafe {
            gl.attach_shader(handle, vs);
            gl.attach_shader(handle, fs);
            gl.link_program(handle);
        }
        // No glValidateProgram: its result depends on the state bound when it
        // runs, which is not the draw-time state. Link status and log decide.
        let linked = unsafe { gl.get_program_link_status(handle) };
        let log = unsafe { gl.get_program_info_log(handle) };
        unsafe {
            gl.detach_shader(handle, vs);
            gl.detach_shader(handle, fs);
        }

        // Stages are no longer needed whatever the outcome
        drop(vertex);
        drop(fragment);

        if !linked {
            drop(program);
            let diagnostic = if log.trim().is_empty() {
                "driver reported no diagnostic".to_string()
            } else {
                log.trim_end().to_string()
            };
            return Err(Error::LinkError(diagnostic));
        }
        if !log.trim().is_empty() {
            engine_debug!("glimmer::gl", "Link log:\n{}", log.trim_end());
        }
        self.ctx.check("glLinkProgram")?;

        Ok(Box::new(program))
    }

    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Box<dyn Buffer>> {
        let gl = &self.ctx.gl;
        let handle = unsafe { gl.create_buffer() }
            .map_err(|e| engine_err!("glimmer::gl", "glGenBuffers failed: {}", e))?;
        let buffer = GlBuffer::new(self.ctx.clone(), handle, desc.kind, desc.data.len() as u64);

        // Buffer objects are typeless; index buffers attach to ELEMENT_ARRAY_BUFFER
        // through their vertex array later
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(handle));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, desc.data, glow::STATIC_DRAW);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        self.ctx.check("glBufferData")?;

        Ok(Box::new(buffer))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Box<dyn Texture>> {
        let expected = desc.width as usize * desc.height as usize * 4;
        if desc.pixels.len() != expected {
            return Err(Error::InvalidResource(format!(
                "expected {} bytes of RGBA8, got {}", expected, desc.pixels.len())));
        }

        let width = gl_format::gl_int(desc.width, "texture width")?;
        let height = gl_format::gl_int(desc.height, "texture height")?;

        let gl = &self.ctx.gl;
        let handle = unsafe { gl.create_texture() }
            .map_err(|e| engine_err!("glimmer::gl", "glGenTextures failed: {}", e))?;
        let sampler = SamplerState::TEXTURE_2D;
        let texture = GlTexture::new(self.ctx.clone(), handle, TextureInfo {
            width: desc.width,
            height: desc.height,
            sampler,
        });

        unsafe {
            gl.active_texture(glow::TEXTURE0 + desc.unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, gl_format::filter(sampler.mag_filter));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, gl_format::filter(sampler.min_filter));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, gl_format::wrap(sampler.wrap_s));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, gl_format::wrap(sampler.wrap_t));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width,
                height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(desc.pixels),
            );
        }
        self.ctx.check("glTexImage2D")?;

        engine_debug!(
            "glimmer::gl",
            "Uploaded {}x{} texture to unit {}",
            desc.width, desc.height, desc.unit
        );
        Ok(Box::new(texture))
    }

    fn create_vertex_array(&mut self) -> Result<Box<dyn VertexArray>> {
        let handle = unsafe { self.ctx.gl.create_vertex_array() }
            .map_err(|e| engine_err!("glimmer::gl", "glGenVertexArrays failed: {}", e))?;
        Ok(Box::new(GlVertexArray::new(self.ctx.clone(), handle)))
    }

    fn set_vertex_attribute(
        &mut self,
        vertex_array: &dyn VertexArray,
        buffer: &dyn Buffer,
        attribute: &VertexAttribute,
    ) -> Result<()> {
        let vao = gl_vertex_array(vertex_array)?.handle;
        let vbo = gl_buffer(buffer)?.handle;
        let components = gl_format::gl_int(attribute.components, "attribute components")?;
        let stride = gl_format::gl_int(attribute.stride, "attribute stride")?;
        let offset = gl_format::gl_int(attribute.offset, "attribute offset")?;

        let gl = &self.ctx.gl;
        unsafe {
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.enable_vertex_attrib_array(attribute.location);
            gl.vertex_attrib_pointer_f32(
                attribute.location,
                components,
                gl_format::component_type(attribute.component_type),
                attribute.normalized,
                stride,
                offset,
            );
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        self.ctx.check("glVertexAttribPointer")
    }

    fn set_index_buffer(&mut self, vertex_array: &dyn VertexArray, buffer: &dyn Buffer) -> Result<()> {
        let vao = gl_vertex_array(vertex_array)?.handle;
        let ibo = gl_buffer(buffer)?.handle;

        // Element array binding is vertex array state; it stays with the VAO
        let gl = &self.ctx.gl;
        unsafe {
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
            gl.bind_vertex_array(None);
        }
        self.ctx.check("glBindBuffer(GL_ELEMENT_ARRAY_BUFFER)")
    }

    fn bind_texture(&mut self, unit: u32, texture: &dyn Texture) -> Result<()> {
        let handle = gl_texture(texture)?.handle;
        unsafe {
            self.ctx.gl.active_texture(glow::TEXTURE0 + unit);
            self.ctx.gl.bind_texture(glow::TEXTURE_2D, Some(handle));
        }
        self.ctx.check("glBindTexture")
    }

    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]) -> Result<()> {
        unsafe {
            self.ctx.gl.clear_color(color[0], color[1], color[2], color[3]);
            self.ctx.gl.clear(gl_format::clear_mask(flags));
        }
        self.ctx.check("glClear")
    }

    fn use_program(&mut self, program: &dyn Program) -> Result<()> {
        let handle = gl_program(program)?.handle;
        unsafe {
            self.ctx.gl.use_program(Some(handle));
        }
        self.ctx.check("glUseProgram")
    }

    fn set_uniform_i32(&mut self, program: &dyn Program, name: &str, value: i32) -> Result<()> {
        let program = gl_program(program)?;
        // Inactive uniforms are skipped, as glUniform* does for location -1
        if let Some(location) = program.uniform_location(name) {
            unsafe {
                self.ctx.gl.uniform_1_i32(Some(&location), value);
            }
        }
        self.ctx.check("glUniform1i")
    }

    fn bind_vertex_array(&mut self, vertex_array: &dyn VertexArray) -> Result<()> {
        let handle = gl_vertex_array(vertex_array)?.handle;
        unsafe {
            self.ctx.gl.bind_vertex_array(Some(handle));
        }
        self.ctx.check("glBindVertexArray")
    }

    fn draw(&mut self, topology: PrimitiveTopology, first_vertex: u32, vertex_count: u32) -> Result<()> {
        let first = gl_format::gl_int(first_vertex, "first vertex")?;
        let count = gl_format::gl_int(vertex_count, "vertex count")?;
        unsafe {
            self.ctx.gl.draw_arrays(gl_format::topology(topology), first, count);
        }
        self.ctx.update_stats(|s| s.draw_calls += 1);
        self.ctx.check("glDrawArrays")
    }

    fn draw_indexed(
        &mut self,
        topology: PrimitiveTopology,
        index_count: u32,
        index_type: IndexType,
    ) -> Result<()> {
        let count = gl_format::gl_int(index_count, "index count")?;
        unsafe {
            self.ctx.gl.draw_elements(
                gl_format::topology(topology),
                count,
                gl_format::index_type(index_type),
                0,
            );
        }
        self.ctx.update_stats(|s| s.draw_calls += 1);
        self.ctx.check("glDrawElements")
    }

    fn stats(&self) -> DeviceStats {
        self.ctx.stats()
    }
}

impl Drop for GlGraphicsDevice {
    fn drop(&mut self) {
        let stats = self.ctx.stats();
        if stats.live_total() > 0 {
            engine_debug!(
                "glimmer::gl",
                "Device dropped, {} GL object(s) still owned elsewhere",
                stats.live_total()
            );
        }
    }
}
