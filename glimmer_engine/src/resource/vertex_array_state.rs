/// Vertex array state: which buffer feeds which shader input, plus the
/// optional index buffer.
///
/// A layout is checked as a whole before anything reaches the device, so a
/// rejected `describe_layout` leaves the state and the vertex array
/// untouched. Locations are recorded only once every attribute of the
/// layout was accepted by the device; after a device failure the vertex
/// array may hold some of the attributes, and the next layout claiming
/// those locations overwrites them.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::graphics_device::{BufferKind, GraphicsDevice, VertexArray};
use crate::resource::{BufferKey, BufferManager, GpuBuffer, VertexLayout};
use crate::{engine_bail, engine_debug};

/// Index buffer attached to a vertex array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBinding {
    pub buffer: BufferKey,
    pub index_count: u32,
}

/// Owns a vertex array object and remembers what was bound to it
pub struct VertexArrayState {
    vertex_array: Box<dyn VertexArray>,
    bindings: Vec<(BufferKey, VertexLayout)>,
    /// Attribute location -> buffer that feeds it
    used_locations: FxHashMap<u32, BufferKey>,
    index_binding: Option<IndexBinding>,
}

impl VertexArrayState {
    /// Create an empty vertex array
    pub fn new(device: &mut dyn GraphicsDevice) -> Result<Self> {
        let vertex_array = device.create_vertex_array()?;
        Ok(Self {
            vertex_array,
            bindings: Vec::new(),
            used_locations: FxHashMap::default(),
            index_binding: None,
        })
    }

    /// Bind `key` as the source of every attribute in `layout`, in order
    ///
    /// # Errors
    ///
    /// - `Error::InvalidResource` if the key is stale or not a vertex buffer
    /// - `Error::InvalidLayout` if the layout is empty, or a location is
    ///   repeated within it or already fed by an earlier binding
    pub fn describe_layout(
        &mut self,
        device: &mut dyn GraphicsDevice,
        buffers: &BufferManager,
        key: BufferKey,
        layout: &VertexLayout,
    ) -> Result<()> {
        let buffer = lookup(buffers, key, BufferKind::Vertex)?;

        if layout.is_empty() {
            return Err(Error::InvalidLayout("layout has no attributes".to_string()));
        }

        let mut pending: Vec<u32> = Vec::with_capacity(layout.attributes().len());
        for attribute in layout.attributes() {
            if self.used_locations.contains_key(&attribute.location)
                || pending.contains(&attribute.location)
            {
                engine_bail!(InvalidLayout => "glimmer::vertex_array",
                    "attribute location {} is already bound", attribute.location);
            }
            pending.push(attribute.location);
        }

        for attribute in layout.attributes() {
            device.set_vertex_attribute(self.vertex_array.as_ref(), buffer.handle(), attribute)?;
        }
        for &location in &pending {
            self.used_locations.insert(location, key);
        }
        self.bindings.push((key, layout.clone()));

        engine_debug!(
            "glimmer::vertex_array",
            "Bound {} attribute(s) at locations {:?}",
            pending.len(), pending
        );
        Ok(())
    }

    /// Attach an index buffer; its u32 index count is `size / 4`
    ///
    /// Replaces any previously attached index buffer.
    pub fn bind_index_buffer(
        &mut self,
        device: &mut dyn GraphicsDevice,
        buffers: &BufferManager,
        key: BufferKey,
    ) -> Result<()> {
        let buffer = lookup(buffers, key, BufferKind::Index)?;
        device.set_index_buffer(self.vertex_array.as_ref(), buffer.handle())?;
        self.index_binding = Some(IndexBinding {
            buffer: key,
            index_count: buffer.element_count(),
        });
        Ok(())
    }

    /// Backend vertex array handle
    pub fn vertex_array(&self) -> &dyn VertexArray {
        self.vertex_array.as_ref()
    }

    /// Number of indices in the attached index buffer
    pub fn index_count(&self) -> Option<u32> {
        self.index_binding.map(|b| b.index_count)
    }

    pub fn index_binding(&self) -> Option<IndexBinding> {
        self.index_binding
    }

    /// Buffers bound so far with their layouts, in binding order
    pub fn bindings(&self) -> &[(BufferKey, VertexLayout)] {
        &self.bindings
    }

    /// Buffer feeding `location`, if any
    pub fn source_of(&self, location: u32) -> Option<BufferKey> {
        self.used_locations.get(&location).copied()
    }
}

fn lookup(buffers: &BufferManager, key: BufferKey, kind: BufferKind) -> Result<&GpuBuffer> {
    let buffer = buffers
        .buffer(key)
        .ok_or_else(|| Error::InvalidResource(format!("buffer {:?} was released", key)))?;
    if buffer.kind() != kind {
        return Err(Error::InvalidResource(format!(
            "expected a {:?} buffer, got {:?}", kind, buffer.kind())));
    }
    Ok(buffer)
}

#[cfg(test)]
#[path = "vertex_array_state_tests.rs"]
mod tests;
