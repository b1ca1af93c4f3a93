/*!
# Galaxy 3D GL

Resource and reflection layer for OpenGL ES 2.0 / 3.0 (WebGL 1 / WebGL 2)
contexts.

This crate is backend-agnostic: every native call goes through the
`GraphicsContext` trait, implemented by a backend crate
(`galaxy_3d_gl_glow` on top of `glow`).

## Architecture

- **GraphicsContext**: Native GL capability trait (objects, uniforms, draws)
- **FormatResolver**: Internal format / data type to upload format mapping
- **DataBuffer / IndexBuffer**: Vertex attribute and index data
- **Texture**: 2D texture with unit tracking
- **Framebuffer / PingPong**: Render-to-texture and multi-pass chains
- **ShaderProgram**: Preprocessing, reflection, per-pass binding and draw validation
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod context;
pub mod format;
pub mod resource;
pub mod shader;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logging)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Native context capability trait and handle types
    pub mod context {
        pub use crate::context::*;
    }

    // Texture formats and upload format resolution
    pub mod format {
        pub use crate::format::*;
    }

    // Buffers, textures and framebuffers
    pub mod resource {
        pub use crate::resource::*;
    }

    // Preprocessor, reflection and shader programs
    pub mod shader {
        pub use crate::shader::*;
    }
}

// Re-export math library at crate root
pub use glam;
