//! Error types for the Galaxy3D GL layer
//!
//! This module defines the error types used throughout the crate, covering
//! object construction (shader preprocessing, reflection, texture formats)
//! and render passes (draw-state validation, uniform dispatch).

use std::fmt;

/// Result type for Galaxy3D GL operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D GL errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (object creation failure, driver message, etc.)
    BackendError(String),

    /// Initialization failed (buffer, texture, program construction)
    InitializationFailed(String),

    /// Invalid resource (deleted object, malformed data)
    InvalidResource(String),

    /// Malformed conditional directive in shader source
    Preprocessor(String),

    /// `#ifdef` / `#ifndef` block still open at end of shader source
    UnterminatedConditional {
        /// Symbol tested by the innermost unterminated block
        symbol: String,
    },

    /// Shader source requires a newer API generation than the context provides
    GenerationMismatch(String),

    /// Program link failed (carries the linker log)
    LinkFailed(String),

    /// A uniform declared in source has no location in the linked program
    UnresolvedUniform {
        /// Stage the declaration was found in ("vertex" or "fragment")
        stage: &'static str,
        /// Uniform name
        name: String,
    },

    /// An attribute buffer disagrees with the draw state established in this pass
    DrawStateMismatch {
        /// Attribute the offending buffer was provided for
        attribute: String,
        /// Property that disagrees ("draw mode", "number of vertices", ...)
        property: &'static str,
        /// Value established by the first buffer of the pass
        expected: String,
        /// Value carried by the offending buffer
        actual: String,
    },

    /// `draw()` called before any per-vertex attribute buffer was bound
    NoBoundAttributes,

    /// No uniform setter exists for this declared type and value shape
    UnsupportedUniform {
        /// Uniform name
        name: String,
        /// Declared GLSL type
        glsl_type: String,
        /// Shape of the supplied value
        value: String,
    },

    /// Sequence length is not a whole number of vectors/matrices
    UniformLength {
        /// Uniform name
        name: String,
        /// Components per element (2, 3, 4, 16)
        components: usize,
        /// Supplied sequence length
        len: usize,
    },

    /// Pixel data type unknown to the format resolver
    UnknownFormat(String),

    /// Internal format not valid for the given pixel data type
    InvalidFormatCombination {
        /// Internal (storage) format
        internal_format: String,
        /// Pixel data type
        data_type: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::Preprocessor(msg) => write!(f, "Shader preprocessor error: {}", msg),
            Error::UnterminatedConditional { symbol } => {
                write!(f, "Unterminated #ifdef/#ifndef block in shader (symbol '{}')", symbol)
            }
            Error::GenerationMismatch(msg) => write!(f, "Generation mismatch: {}", msg),
            Error::LinkFailed(log) => write!(f, "Program link failed: {}", log),
            Error::UnresolvedUniform { stage, name } => {
                write!(f, "Could not get {} shader uniform location for '{}'", stage, name)
            }
            Error::DrawStateMismatch { attribute, property, expected, actual } => write!(
                f,
                "Unexpected {} for attribute buffer {} (expected {}, got {})",
                property, attribute, expected, actual
            ),
            Error::NoBoundAttributes => write!(f, "Cannot draw without bound attributes"),
            Error::UnsupportedUniform { name, glsl_type, value } => write!(
                f,
                "Cannot determine uniform setter for '{}' (type '{}', value {})",
                name, glsl_type, value
            ),
            Error::UniformLength { name, components, len } => write!(
                f,
                "Uniform '{}' expects a multiple of {} components, got {}",
                name, components, len
            ),
            Error::UnknownFormat(data_type) => {
                write!(f, "Unknown format: no transfer formats for data type {}", data_type)
            }
            Error::InvalidFormatCombination { internal_format, data_type } => write!(
                f,
                "Invalid combination of internal format and data type ({} / {})",
                internal_format, data_type
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
