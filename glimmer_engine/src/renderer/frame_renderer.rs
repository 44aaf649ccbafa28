/// Frame renderer: one clear and one draw per frame.
///
/// Per frame: clear the color buffer, bind the program, set the optional
/// integer uniform, bind the vertex array, issue exactly one draw. Buffer
/// swaps and event polling stay with the caller.

use crate::error::Result;
use crate::graphics_device::{ClearFlags, GraphicsDevice, IndexType, PrimitiveTopology};
use crate::resource::VertexArrayState;
use crate::shader::ShaderProgram;
use crate::{engine_bail, engine_trace};

/// What the single draw of a frame reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Consecutive vertices starting at 0
    NonIndexed { vertex_count: u32 },
    /// Vertices in the order given by the bound u32 index buffer
    Indexed { index_count: u32 },
}

/// Integer uniform set after the program is bound (e.g. a sampler unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformBinding<'a> {
    pub name: &'a str,
    pub value: i32,
}

/// Issues one draw per frame
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    clear_color: [f32; 4],
    topology: PrimitiveTopology,
    frames: u64,
}

impl FrameRenderer {
    /// Black clear color, triangle list
    pub fn new() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            topology: PrimitiveTopology::TriangleList,
            frames: 0,
        }
    }

    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Frames drawn so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Draw one frame
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if an indexed draw has no index buffer bound
    /// or asks for more indices than it holds. Checked before the frame is
    /// cleared, so nothing reaches the device. Device errors propagate as-is.
    pub fn draw_frame(
        &mut self,
        device: &mut dyn GraphicsDevice,
        program: &ShaderProgram,
        state: &VertexArrayState,
        mode: DrawMode,
        uniform: Option<UniformBinding>,
    ) -> Result<()> {
        if let DrawMode::Indexed { index_count } = mode {
            match state.index_count() {
                None => {
                    engine_bail!(InvalidResource => "glimmer::frame_renderer",
                        "indexed draw requires a bound index buffer");
                }
                Some(available) if index_count > available => {
                    engine_bail!(InvalidResource => "glimmer::frame_renderer",
                        "indexed draw of {} indices, index buffer holds {}", index_count, available);
                }
                Some(_) => {}
            }
        }

        device.clear(ClearFlags::COLOR, self.clear_color)?;
        program.bind(device)?;
        if let Some(uniform) = uniform {
            device.set_uniform_i32(program.program(), uniform.name, uniform.value)?;
        }
        device.bind_vertex_array(state.vertex_array())?;

        match mode {
            DrawMode::NonIndexed { vertex_count } => {
                device.draw(self.topology, 0, vertex_count)?;
            }
            DrawMode::Indexed { index_count } => {
                device.draw_indexed(self.topology, index_count, IndexType::U32)?;
            }
        }

        self.frames += 1;
        engine_trace!("glimmer::frame_renderer", "Frame {} drawn ({:?})", self.frames, mode);
        Ok(())
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "frame_renderer_tests.rs"]
mod tests;
