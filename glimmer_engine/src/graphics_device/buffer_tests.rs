//! Unit tests for Buffer module
//!
//! Tests ComponentType::size_bytes() and IndexType::size_bytes().

use crate::graphics_device::{ComponentType, IndexType};

#[test]
fn test_component_type_size_bytes() {
    assert_eq!(ComponentType::F32.size_bytes(), 4);
    assert_eq!(ComponentType::I32.size_bytes(), 4);
    assert_eq!(ComponentType::U32.size_bytes(), 4);
    assert_eq!(ComponentType::I16.size_bytes(), 2);
    assert_eq!(ComponentType::U16.size_bytes(), 2);
    assert_eq!(ComponentType::I8.size_bytes(), 1);
    assert_eq!(ComponentType::U8.size_bytes(), 1);
}

#[test]
fn test_index_type_size_bytes() {
    assert_eq!(IndexType::U16.size_bytes(), 2);
    assert_eq!(IndexType::U32.size_bytes(), 4);
}
