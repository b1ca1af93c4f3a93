/*!
# Galaxy 3D GL - glow Backend

`GraphicsContext` implementation for the Galaxy 3D GL layer on top of the
`glow` crate, covering desktop GL, GLES 2/3 and WebGL 1/2.

The windowing layer creates the `glow::Context`; `GlowContext` wraps it and
is shared with every resource as `Rc<dyn GraphicsContext>`.
*/

use std::rc::Rc;

use galaxy_3d_gl::galaxy3d::context::GraphicsContext;

mod glow_context;
mod glow_format;
mod glow_instancing;

pub use glow_context::{GlowContext, Config};
pub use glow_instancing::GlowInstancing;

/// Wrap a live glow context for the GL layer
///
/// # Example
///
/// ```no_run
/// use std::rc::Rc;
/// use galaxy_3d_gl::galaxy3d::context::GraphicsContext;
/// use galaxy_3d_gl_glow::{Config, create_context};
///
/// fn setup(gl: glow::Context) -> Rc<dyn GraphicsContext> {
///     create_context(gl, Config::default())
/// }
/// ```
pub fn create_context(gl: glow::Context, config: Config) -> Rc<dyn GraphicsContext> {
    Rc::new(GlowContext::new(gl, config))
}
