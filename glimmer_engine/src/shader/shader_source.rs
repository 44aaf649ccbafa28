//! Combined shader file splitting.
//!
//! A shader file holds both stages. A line containing the marker token
//! (`#shader` by default) and the word `vertex` or `fragment` starts that
//! stage; every other line belongs to the stage started last.
//!
//! ```text
//! #shader vertex
//! #version 330 core
//! layout(location = 0) in vec4 position;
//! void main() { gl_Position = position; }
//!
//! #shader fragment
//! #version 330 core
//! out vec4 color;
//! void main() { color = vec4(1.0, 0.0, 0.0, 1.0); }
//! ```

use std::borrow::Cow;
use std::path::Path;

use crate::error::{Error, Result};
use crate::graphics_device::ShaderStage;
use crate::{engine_debug, engine_warn};

/// Marker token that switches the active stage
pub const DEFAULT_STAGE_MARKER: &str = "#shader";

/// Per-stage source text of one shader file
///
/// A stage that never appeared in the file has empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    vertex: String,
    fragment: String,
}

impl ShaderSource {
    /// Build directly from stage texts
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Split `text` using the default `#shader` marker
    pub fn parse(text: &str) -> Self {
        Self::parse_with_marker(text, DEFAULT_STAGE_MARKER)
    }

    /// Split `text` using a custom marker token
    ///
    /// Lines before the first recognized marker are dropped. A marker line
    /// naming neither stage keeps the current stage and is not stored.
    pub fn parse_with_marker(text: &str, marker: &str) -> Self {
        let mut source = ShaderSource::default();
        let mut active: Option<ShaderStage> = None;

        for line in text.split_inclusive('\n') {
            if line.contains(marker) {
                if line.contains(ShaderStage::Vertex.name()) {
                    active = Some(ShaderStage::Vertex);
                } else if line.contains(ShaderStage::Fragment.name()) {
                    active = Some(ShaderStage::Fragment);
                }
                continue;
            }

            let Some(stage) = active else {
                continue;
            };

            let target = source.stage_mut(stage);
            target.push_str(line);
            if !line.ends_with('\n') {
                target.push('\n');
            }
        }

        source
    }

    /// Read and split a shader file
    ///
    /// # Errors
    ///
    /// `Error::ResourceNotFound` if the file is missing or unreadable. An
    /// empty stage in a readable file is not an error. Bytes that are not
    /// valid UTF-8 are replaced with U+FFFD and a warning is logged; the
    /// shader compiler reports them if they end up in a stage.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| Error::ResourceNotFound(format!("{}: {}", path.display(), e)))?;

        let text = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = text {
            engine_warn!("glimmer::shader", "'{}' is not valid UTF-8, invalid bytes replaced",
                path.display());
        }

        let source = Self::parse(&text);
        engine_debug!("glimmer::shader", "Loaded '{}'\n[vertex]\n{}[fragment]\n{}",
            path.display(), source.vertex, source.fragment);
        Ok(source)
    }

    /// Text of one stage
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    fn stage_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }
}

#[cfg(test)]
#[path = "shader_source_tests.rs"]
mod tests;
