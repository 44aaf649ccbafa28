/*!
# Glimmer Engine

Core traits and types for the Glimmer immediate-mode rendering harness.

The crate loads combined shader source files, compiles and links a two-stage
program, uploads vertex/index/texture data, describes how vertex buffers feed
shader inputs and issues one draw per frame. The GPU is reached only through
the [`GraphicsDevice`](graphics_device::GraphicsDevice) trait; backends
(OpenGL via `glow`, ...) live in their own crates.

## Architecture

- **ShaderSource**: splits a combined shader file into vertex and fragment text
- **CompiledStage / ShaderProgram**: compile, link, bind and tear down a program
- **BufferManager**: owns every vertex, index and texture handle
- **VertexLayout / VertexArrayState**: attribute-to-buffer bindings plus index buffer
- **FrameRenderer**: clear, bind, draw once

Window creation, event polling and buffer swaps belong to the caller.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod shader;
pub mod resource;
pub mod renderer;

// Main glimmer namespace module
pub mod glimmer {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging entry point
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Device sub-module with all backend-facing types
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Shader sub-module
    pub mod shader {
        pub use crate::shader::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Renderer sub-module
    pub mod renderer {
        pub use crate::renderer::*;
    }
}

// Byte casting for vertex/index data
pub use bytemuck;
