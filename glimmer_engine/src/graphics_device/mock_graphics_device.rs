/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Tracks every live handle, records the commands it receives and emulates
/// vertex fetch so layouts can be checked against buffer contents.
///
/// Compilation rule: a stage compiles when its source contains `void main`.
/// Linking can be forced to fail through `fail_next_link`.

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graphics_device::{
    Buffer, BufferDesc, BufferKind, ClearFlags, ComponentType, DeviceInfo, DeviceStats,
    GraphicsDevice, IndexType, PrimitiveTopology, Program, SamplerState, Shader, ShaderDesc,
    ShaderStage, Texture, TextureDesc, TextureInfo, VertexArray, VertexAttribute,
};

// ============================================================================
// Recorded commands
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    Clear { flags: ClearFlags, color: [f32; 4] },
    UseProgram(u64),
    SetUniformI32 { program: u64, name: String, value: i32 },
    BindVertexArray(u64),
    BindTexture { unit: u32, texture: u64 },
    SetVertexAttribute { vertex_array: u64, buffer: u64, attribute: VertexAttribute },
    SetIndexBuffer { vertex_array: u64, buffer: u64 },
    Draw { topology: PrimitiveTopology, first_vertex: u32, vertex_count: u32 },
    DrawIndexed { topology: PrimitiveTopology, index_count: u32, index_type: IndexType },
}

impl MockCommand {
    pub fn is_draw(&self) -> bool {
        matches!(self, MockCommand::Draw { .. } | MockCommand::DrawIndexed { .. })
    }
}

// ============================================================================
// Shared state
// ============================================================================

#[derive(Debug, Default)]
struct MockVertexArrayRecord {
    attributes: BTreeMap<u32, (u64, VertexAttribute)>,
    index_buffer: Option<u64>,
}

#[derive(Debug, Default)]
pub struct MockState {
    next_id: u64,
    stats: DeviceStats,
    pub commands: Vec<MockCommand>,
    buffer_data: FxHashMap<u64, Vec<u8>>,
    vertex_arrays: FxHashMap<u64, MockVertexArrayRecord>,
}

impl MockState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

type SharedState = Rc<RefCell<MockState>>;

// ============================================================================
// Mock resources
// ============================================================================

pub struct MockShader {
    pub id: u64,
    pub stage: ShaderStage,
    state: SharedState,
}

impl Shader for MockShader {
    fn stage(&self) -> ShaderStage {
        self.stage
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for MockShader {
    fn drop(&mut self) {
        self.state.borrow_mut().stats.live_shaders -= 1;
    }
}

pub struct MockProgram {
    pub id: u64,
    state: SharedState,
}

impl Program for MockProgram {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for MockProgram {
    fn drop(&mut self) {
        self.state.borrow_mut().stats.live_programs -= 1;
    }
}

pub struct MockBuffer {
    pub id: u64,
    pub kind: BufferKind,
    pub size: u64,
    state: SharedState,
}

impl Buffer for MockBuffer {
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

impl Drop for MockBuffer {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.stats.live_buffers -= 1;
        state.buffer_data.remove(&self.id);
    }
}

pub struct MockTexture {
    pub id: u64,
    pub info: TextureInfo,
    state: SharedState,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        self.state.borrow_mut().stats.live_textures -= 1;
    }
}

pub struct MockVertexArray {
    pub id: u64,
    state: SharedState,
}

impl VertexArray for MockVertexArray {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for MockVertexArray {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.stats.live_vertex_arrays -= 1;
        state.vertex_arrays.remove(&self.id);
    }
}

// ============================================================================
// Mock device
// ============================================================================

pub struct MockGraphicsDevice {
    info: DeviceInfo,
    state: SharedState,
    /// When set, the next link fails with this diagnostic
    pub fail_next_link: Option<String>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            info: DeviceInfo {
                backend: "Mock".to_string(),
                version: "mock 1.0".to_string(),
            },
            state: Rc::new(RefCell::new(MockState::default())),
            fail_next_link: None,
        }
    }

    /// Snapshot of the recorded commands
    pub fn commands(&self) -> Vec<MockCommand> {
        self.state.borrow().commands.clone()
    }

    /// Recorded draw commands only
    pub fn draw_commands(&self) -> Vec<MockCommand> {
        self.state.borrow().commands.iter().filter(|c| c.is_draw()).cloned().collect()
    }

    pub fn clear_commands(&mut self) {
        self.state.borrow_mut().commands.clear();
    }

    /// Raw contents of a live buffer
    pub fn buffer_contents(&self, buffer: &dyn Buffer) -> Option<Vec<u8>> {
        let id = downcast::<MockBuffer>(buffer.as_any(), "buffer").ok()?.id;
        self.state.borrow().buffer_data.get(&id).cloned()
    }

    /// Id of the index buffer attached to a vertex array, if any
    pub fn index_buffer_of(&self, vertex_array: &dyn VertexArray) -> Option<u64> {
        let id = downcast::<MockVertexArray>(vertex_array.as_any(), "vertex array").ok()?.id;
        self.state.borrow().vertex_arrays.get(&id)?.index_buffer
    }

    /// Emulate the vertex fetch stage: read the value of attribute `location`
    /// for `vertex`, converted to f32 the way a float attribute pointer would.
    pub fn fetch_attribute(
        &self,
        vertex_array: &dyn VertexArray,
        location: u32,
        vertex: u32,
    ) -> Result<Vec<f32>> {
        let vao = downcast::<MockVertexArray>(vertex_array.as_any(), "vertex array")?;
        let state = self.state.borrow();
        let record = state.vertex_arrays.get(&vao.id)
            .ok_or_else(|| Error::InvalidResource("unknown vertex array".to_string()))?;
        let (buffer_id, attribute) = record.attributes.get(&location)
            .ok_or_else(|| Error::InvalidResource(format!("location {} not enabled", location)))?;
        let data = state.buffer_data.get(buffer_id)
            .ok_or_else(|| Error::InvalidResource("buffer released".to_string()))?;

        let range = attribute.byte_range(vertex);
        if range.end > data.len() as u64 {
            return Err(Error::InvalidResource(format!(
                "fetch {:?} past end of {}-byte buffer", range, data.len())));
        }

        let size = attribute.component_type.size_bytes() as usize;
        let bytes = &data[range.start as usize..range.end as usize];
        Ok(bytes
            .chunks_exact(size)
            .map(|c| decode_component(attribute.component_type, attribute.normalized, c))
            .collect())
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast<'a, T: 'static>(any: &'a dyn Any, what: &str) -> Result<&'a T> {
    any.downcast_ref::<T>()
        .ok_or_else(|| Error::InvalidResource(format!("{} does not belong to the mock device", what)))
}

fn decode_component(ty: ComponentType, normalized: bool, bytes: &[u8]) -> f32 {
    match ty {
        ComponentType::F32 => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        ComponentType::U8 => {
            let v = bytes[0] as f32;
            if normalized { v / u8::MAX as f32 } else { v }
        }
        ComponentType::I8 => {
            let v = bytes[0] as i8 as f32;
            if normalized { (v / i8::MAX as f32).max(-1.0) } else { v }
        }
        ComponentType::U16 => {
            let v = u16::from_le_bytes([bytes[0], bytes[1]]) as f32;
            if normalized { v / u16::MAX as f32 } else { v }
        }
        ComponentType::I16 => {
            let v = i16::from_le_bytes([bytes[0], bytes[1]]) as f32;
            if normalized { (v / i16::MAX as f32).max(-1.0) } else { v }
        }
        ComponentType::U32 => {
            let v = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f32;
            if normalized { v / u32::MAX as f32 } else { v }
        }
        ComponentType::I32 => {
            let v = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f32;
            if normalized { (v / i32::MAX as f32).max(-1.0) } else { v }
        }
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn compile_shader(&mut self, desc: ShaderDesc) -> Result<Box<dyn Shader>> {
        if !desc.source.contains("void main") {
            return Err(Error::CompileError {
                stage: desc.stage,
                diagnostic: "0:1(1): error: no function with name 'main'".to_string(),
            });
        }

        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state.stats.live_shaders += 1;
        Ok(Box::new(MockShader { id, stage: desc.stage, state: self.state.clone() }))
    }

    fn link_program(
        &mut self,
        vertex: Box<dyn Shader>,
        fragment: Box<dyn Shader>,
    ) -> Result<Box<dyn Program>> {
        downcast::<MockShader>(vertex.as_any(), "vertex shader")?;
        downcast::<MockShader>(fragment.as_any(), "fragment shader")?;

        let failure = self.fail_next_link.take();

        // Stages are released after the link attempt, success or not
        drop(vertex);
        drop(fragment);

        if let Some(diagnostic) = failure {
            return Err(Error::LinkError(diagnostic));
        }

        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state.stats.live_programs += 1;
        Ok(Box::new(MockProgram { id, state: self.state.clone() }))
    }

    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Box<dyn Buffer>> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state.stats.live_buffers += 1;
        state.buffer_data.insert(id, desc.data.to_vec());
        Ok(Box::new(MockBuffer {
            id,
            kind: desc.kind,
            size: desc.data.len() as u64,
            state: self.state.clone(),
        }))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Box<dyn Texture>> {
        let expected = desc.width as usize * desc.height as usize * 4;
        if desc.pixels.len() != expected {
            return Err(Error::InvalidResource(format!(
                "expected {} bytes of RGBA8, got {}", expected, desc.pixels.len())));
        }

        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state.stats.live_textures += 1;
        state.commands.push(MockCommand::BindTexture { unit: desc.unit, texture: id });
        Ok(Box::new(MockTexture {
            id,
            info: TextureInfo {
                width: desc.width,
                height: desc.height,
                sampler: SamplerState::TEXTURE_2D,
            },
            state: self.state.clone(),
        }))
    }

    fn create_vertex_array(&mut self) -> Result<Box<dyn VertexArray>> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state.stats.live_vertex_arrays += 1;
        state.vertex_arrays.insert(id, MockVertexArrayRecord::default());
        Ok(Box::new(MockVertexArray { id, state: self.state.clone() }))
    }

    fn set_vertex_attribute(
        &mut self,
        vertex_array: &dyn VertexArray,
        buffer: &dyn Buffer,
        attribute: &VertexAttribute,
    ) -> Result<()> {
        let vao = downcast::<MockVertexArray>(vertex_array.as_any(), "vertex array")?.id;
        let buf = downcast::<MockBuffer>(buffer.as_any(), "buffer")?.id;

        let mut state = self.state.borrow_mut();
        state.vertex_arrays.entry(vao).or_default()
            .attributes.insert(attribute.location, (buf, *attribute));
        state.commands.push(MockCommand::SetVertexAttribute {
            vertex_array: vao,
            buffer: buf,
            attribute: *attribute,
        });
        Ok(())
    }

    fn set_index_buffer(&mut self, vertex_array: &dyn VertexArray, buffer: &dyn Buffer) -> Result<()> {
        let vao = downcast::<MockVertexArray>(vertex_array.as_any(), "vertex array")?.id;
        let buf = downcast::<MockBuffer>(buffer.as_any(), "buffer")?.id;

        let mut state = self.state.borrow_mut();
        state.vertex_arrays.entry(vao).or_default().index_buffer = Some(buf);
        state.commands.push(MockCommand::SetIndexBuffer { vertex_array: vao, buffer: buf });
        Ok(())
    }

    fn bind_texture(&mut self, unit: u32, texture: &dyn Texture) -> Result<()> {
        let id = downcast::<MockTexture>(texture.as_any(), "texture")?.id;
        self.state.borrow_mut().commands.push(MockCommand::BindTexture { unit, texture: id });
        Ok(())
    }

    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]) -> Result<()> {
        self.state.borrow_mut().commands.push(MockCommand::Clear { flags, color });
        Ok(())
    }

    fn use_program(&mut self, program: &dyn Program) -> Result<()> {
        let id = downcast::<MockProgram>(program.as_any(), "program")?.id;
        self.state.borrow_mut().commands.push(MockCommand::UseProgram(id));
        Ok(())
    }

    fn set_uniform_i32(&mut self, program: &dyn Program, name: &str, value: i32) -> Result<()> {
        let id = downcast::<MockProgram>(program.as_any(), "program")?.id;
        self.state.borrow_mut().commands.push(MockCommand::SetUniformI32 {
            program: id,
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    fn bind_vertex_array(&mut self, vertex_array: &dyn VertexArray) -> Result<()> {
        let id = downcast::<MockVertexArray>(vertex_array.as_any(), "vertex array")?.id;
        self.state.borrow_mut().commands.push(MockCommand::BindVertexArray(id));
        Ok(())
    }

    fn draw(&mut self, topology: PrimitiveTopology, first_vertex: u32, vertex_count: u32) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.stats.draw_calls += 1;
        state.commands.push(MockCommand::Draw { topology, first_vertex, vertex_count });
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        topology: PrimitiveTopology,
        index_count: u32,
        index_type: IndexType,
    ) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.stats.draw_calls += 1;
        state.commands.push(MockCommand::DrawIndexed { topology, index_count, index_type });
        Ok(())
    }

    fn stats(&self) -> DeviceStats {
        self.state.borrow().stats
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
