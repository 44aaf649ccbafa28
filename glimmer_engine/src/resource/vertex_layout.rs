/// Vertex layout: how the bytes of one buffer map onto shader inputs.
///
/// Two composition policies are provided:
/// - `packed`: one attribute per buffer, tightly packed
/// - `interleaved`: several attributes per vertex, stride and offsets
///   computed from the attribute list in order
///
/// Layouts are plain data. Nothing is checked against the buffer until it is
/// bound, and stride/offset consistency is only checked by `validate()`.

use crate::error::{Error, Result};
use crate::graphics_device::{ComponentType, VertexAttribute};

/// One entry of an interleaved layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeFormat {
    pub location: u32,
    pub components: u32,
    pub component_type: ComponentType,
    pub normalized: bool,
}

impl AttributeFormat {
    /// Float attribute (the common case)
    pub fn float(location: u32, components: u32) -> Self {
        Self {
            location,
            components,
            component_type: ComponentType::F32,
            normalized: false,
        }
    }

    fn size_bytes(&self) -> u32 {
        self.components * self.component_type.size_bytes()
    }
}

/// Ordered attribute list for one buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Empty layout, filled with `with_attribute`
    pub fn new() -> Self {
        Self::default()
    }

    /// Single tightly packed attribute
    pub fn packed(location: u32, components: u32, component_type: ComponentType) -> Self {
        Self {
            attributes: vec![VertexAttribute {
                location,
                components,
                component_type,
                normalized: false,
                stride: components * component_type.size_bytes(),
                offset: 0,
            }],
        }
    }

    /// Interleaved attributes in the given order
    ///
    /// Offsets are the running sum of previous attribute sizes; the stride
    /// is the total.
    pub fn interleaved(formats: &[AttributeFormat]) -> Self {
        let stride: u32 = formats.iter().map(AttributeFormat::size_bytes).sum();
        let mut offset = 0;
        let attributes = formats
            .iter()
            .map(|f| {
                let attribute = VertexAttribute {
                    location: f.location,
                    components: f.components,
                    component_type: f.component_type,
                    normalized: f.normalized,
                    stride,
                    offset,
                };
                offset += f.size_bytes();
                attribute
            })
            .collect();
        Self { attributes }
    }

    /// Append an explicit attribute (builder style)
    pub fn with_attribute(mut self, attribute: VertexAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Check stride/offset consistency of every attribute
    ///
    /// # Errors
    ///
    /// `Error::InvalidLayout` if a component count is outside 1..=4, a
    /// stride is smaller than its attribute, or an attribute extends past
    /// its stride.
    pub fn validate(&self) -> Result<()> {
        for attribute in &self.attributes {
            if !(1..=4).contains(&attribute.components) {
                return Err(Error::InvalidLayout(format!(
                    "location {}: {} components (expected 1..=4)",
                    attribute.location, attribute.components)));
            }
            let stride = attribute.effective_stride();
            if stride < attribute.size_bytes() {
                return Err(Error::InvalidLayout(format!(
                    "location {}: stride {} smaller than attribute size {}",
                    attribute.location, stride, attribute.size_bytes())));
            }
            if attribute.offset + attribute.size_bytes() > stride {
                return Err(Error::InvalidLayout(format!(
                    "location {}: offset {} + size {} exceeds stride {}",
                    attribute.location, attribute.offset, attribute.size_bytes(), stride)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "vertex_layout_tests.rs"]
mod tests;
