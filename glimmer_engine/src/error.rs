//! Error types for the Glimmer engine
//!
//! One error enum covers file loading, shader compilation and linking, vertex
//! layout description and backend failures. Nothing in the engine retries:
//! every failure is handed straight back to the caller.

use std::fmt;
use crate::graphics_device::ShaderStage;

/// Result type for Glimmer engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Glimmer engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A shader or texture file is missing or could not be read/decoded
    ResourceNotFound(String),

    /// The driver rejected the source of a shader stage
    CompileError {
        /// Stage that failed to compile
        stage: ShaderStage,
        /// Driver-provided info log
        diagnostic: String,
    },

    /// Attaching, linking or validating a program failed
    LinkError(String),

    /// A vertex layout breaks a structural rule (overlapping slots, bad counts)
    InvalidLayout(String),

    /// Invalid resource (unknown key, wrong buffer kind, bad pixel data, ...)
    InvalidResource(String),

    /// Backend-specific error (OpenGL, mock device, ...)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Initialization failed (device, context, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ResourceNotFound(msg) => write!(f, "Resource not found: {}", msg),
            Error::CompileError { stage, diagnostic } => {
                write!(f, "Failed to compile {} shader: {}", stage, diagnostic)
            }
            Error::LinkError(msg) => write!(f, "Failed to link program: {}", msg),
            Error::InvalidLayout(msg) => write!(f, "Invalid vertex layout: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
