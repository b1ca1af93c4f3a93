//! GL resource wrappers
//!
//! Owned wrappers around native buffers, textures and framebuffers.

pub mod buffer;
pub mod texture;
pub mod framebuffer;

pub use buffer::{DataBuffer, IndexBuffer, VertexScalar, IndexScalar};
pub use texture::{Texture, TextureDesc};
pub use framebuffer::{Framebuffer, PingPong, flip_flop_buffers};
