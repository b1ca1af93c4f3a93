/// Context module - the graphics API capability trait and its shared types

pub mod graphics_context;
pub mod types;

pub use graphics_context::*;
pub use types::*;

// Mock graphics context for tests (no GPU required)
#[cfg(test)]
pub mod mock_context;
