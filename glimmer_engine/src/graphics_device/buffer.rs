/// Buffer trait, buffer descriptor and element types

use std::any::Any;

/// What a buffer holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Vertex attribute data
    Vertex,
    /// Vertex order for indexed draws (u32 elements)
    Index,
}

/// Descriptor for creating a buffer
///
/// Buffers are written once at creation and read many times (static usage).
/// There is no update path.
#[derive(Debug, Clone, Copy)]
pub struct BufferDesc<'a> {
    /// Buffer kind
    pub kind: BufferKind,
    /// Initial contents; the buffer size is `data.len()`
    pub data: &'a [u8],
}

/// Scalar type of one vertex attribute component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    F32,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
}

impl ComponentType {
    /// Size in bytes of one component
    pub fn size_bytes(&self) -> u32 {
        match self {
            ComponentType::I8 | ComponentType::U8 => 1,
            ComponentType::I16 | ComponentType::U16 => 2,
            ComponentType::F32 | ComponentType::I32 | ComponentType::U32 => 4,
        }
    }
}

/// Index buffer element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// 16-bit indices
    U16,
    /// 32-bit indices
    U32,
}

impl IndexType {
    /// Size in bytes of one index element
    pub fn size_bytes(&self) -> u32 {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types (e.g., GlBuffer).
/// The buffer is released when dropped.
pub trait Buffer {
    /// Buffer kind
    fn kind(&self) -> BufferKind;

    /// Size in bytes
    fn size(&self) -> u64;

    /// Downcast hook for the owning backend
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
