/// VertexArray trait, vertex attribute description and primitive topology

use std::any::Any;
use crate::graphics_device::ComponentType;

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Triangle list
    TriangleList,
    /// Triangle strip
    TriangleStrip,
    /// Line list
    LineList,
    /// Point list
    PointList,
}

/// How one shader input slot reads from a buffer
///
/// `stride` and `offset` are in bytes. A stride of 0 means tightly packed
/// (the attribute's own footprint). Nothing here is checked against the
/// buffer contents: an inconsistent attribute renders garbage, it does not
/// fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute location in the vertex shader
    pub location: u32,
    /// Number of components (1..=4)
    pub components: u32,
    /// Component scalar type
    pub component_type: ComponentType,
    /// Map integer components to [0, 1] / [-1, 1]
    pub normalized: bool,
    /// Distance between consecutive vertices
    pub stride: u32,
    /// Offset of the first component from the start of the vertex
    pub offset: u32,
}

impl VertexAttribute {
    /// Bytes one vertex of this attribute occupies
    pub fn size_bytes(&self) -> u32 {
        self.components * self.component_type.size_bytes()
    }

    /// Stride with the tightly-packed default resolved
    pub fn effective_stride(&self) -> u32 {
        if self.stride == 0 {
            self.size_bytes()
        } else {
            self.stride
        }
    }

    /// Byte range `[start, end)` this attribute reads for `vertex`
    pub fn byte_range(&self, vertex: u32) -> std::ops::Range<u64> {
        let start = self.offset as u64 + vertex as u64 * self.effective_stride() as u64;
        start..start + self.size_bytes() as u64
    }
}

/// Vertex array object
///
/// Holds attribute-to-buffer bindings and the optional index buffer.
/// Released when dropped.
pub trait VertexArray {
    /// Downcast hook for the owning backend
    fn as_any(&self) -> &dyn Any;
}
