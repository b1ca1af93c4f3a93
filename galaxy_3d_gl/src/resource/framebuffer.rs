/// Framebuffers and multi-pass (ping-pong) rendering
///
/// A `Framebuffer` either renders into an owned texture or targets the
/// default framebuffer (`Framebuffer::screen`). Iterative effects alternate
/// between two texture-backed framebuffers, each pass reading the texture the
/// previous pass wrote.

use std::rc::Rc;

use crate::context::{GraphicsContext, FramebufferId};
use crate::error::{Error, Result};
use crate::resource::{Texture, TextureDesc};
use crate::{engine_err, engine_trace};

const SOURCE: &str = "galaxy3d::gl::Framebuffer";

// ===== FRAMEBUFFER =====

/// Render target
pub struct Framebuffer {
    context: Rc<dyn GraphicsContext>,
    framebuffer: Option<FramebufferId>,
    texture: Option<Texture>,
    deleted: bool,
}

impl Framebuffer {
    /// Create a framebuffer rendering into `texture` (colour attachment 0)
    pub fn new(context: Rc<dyn GraphicsContext>, texture: Texture) -> Result<Self> {
        let texture_id = texture.id().ok_or_else(|| engine_err!(SOURCE, Error::InvalidResource(
            "Cannot attach a deleted texture to a framebuffer".to_string()
        )))?;

        let framebuffer = context.create_framebuffer()
            .map_err(|e| engine_err!(SOURCE, "Could not create framebuffer: {}", e))?;
        context.bind_framebuffer(Some(framebuffer));
        context.framebuffer_texture_2d(Some(texture_id));
        context.bind_framebuffer(None);

        Ok(Self {
            context,
            framebuffer: Some(framebuffer),
            texture: Some(texture),
            deleted: false,
        })
    }

    /// The default framebuffer (the screen)
    pub fn screen(context: Rc<dyn GraphicsContext>) -> Self {
        Self {
            context,
            framebuffer: None,
            texture: None,
            deleted: false,
        }
    }

    /// Make this framebuffer the current render target
    pub fn bind(&self) -> Result<()> {
        if self.deleted {
            return Err(engine_err!(SOURCE, Error::InvalidResource(
                "Framebuffer has been deleted".to_string()
            )));
        }
        self.context.bind_framebuffer(self.framebuffer);
        Ok(())
    }

    /// Clear the colour buffer to `color`
    pub fn clear(&self, color: [f32; 4]) -> Result<()> {
        self.bind()?;
        self.context.clear_color(color);
        Ok(())
    }

    /// Bind, set the viewport and run `pass`
    pub fn render_to<F>(&self, x: i32, y: i32, width: i32, height: i32, pass: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        self.bind()?;
        self.context.viewport(x, y, width, height);
        pass()
    }

    /// Attached texture (None for the screen)
    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Whether this is the default framebuffer
    pub fn is_screen(&self) -> bool {
        self.framebuffer.is_none() && !self.deleted
    }

    /// Release the framebuffer and its texture (no-op when already deleted)
    pub fn delete(&mut self) {
        if let Some(framebuffer) = self.framebuffer.take() {
            self.context.delete_framebuffer(framebuffer);
        }
        if let Some(mut texture) = self.texture.take() {
            texture.delete();
        }
        self.deleted = true;
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        self.delete();
    }
}

fn target_texture(framebuffer: &Framebuffer) -> Result<&Texture> {
    framebuffer.texture().ok_or_else(|| engine_err!(SOURCE, Error::InvalidResource(
        "Ping-pong target has no texture".to_string()
    )))
}

// ===== FLIP-FLOP PASSES =====

/// Run `n_passes` passes alternating between two targets
///
/// Pass 0 reads `source` and writes `targets[0]`; pass `i` reads the texture
/// written by pass `i - 1` and writes `targets[i % 2]`.
///
/// # Returns
///
/// The texture written by the last pass, or `source` when `n_passes` is 0
pub fn flip_flop_buffers<'a, F>(
    n_passes: u32,
    source: &'a Texture,
    targets: [&'a Framebuffer; 2],
    mut pass: F,
) -> Result<&'a Texture>
where
    F: FnMut(&Texture, &Framebuffer) -> Result<()>,
{
    let mut input = source;
    for i in 0..n_passes {
        let target = targets[(i % 2) as usize];
        pass(input, target)?;
        input = target_texture(target)?;
    }
    Ok(input)
}

// ===== PING-PONG PAIR =====

/// Two texture-backed framebuffers of identical description
pub struct PingPong {
    framebuffers: [Framebuffer; 2],
    front: usize,
}

impl PingPong {
    /// Create both textures and framebuffers from `desc`
    pub fn new(context: Rc<dyn GraphicsContext>, desc: &TextureDesc) -> Result<Self> {
        let first = Framebuffer::new(context.clone(), Texture::new(context.clone(), desc)?)?;
        let second = Framebuffer::new(context.clone(), Texture::new(context, desc)?)?;

        engine_trace!(SOURCE, "Created ping-pong pair {}x{}", desc.width, desc.height);

        Ok(Self {
            framebuffers: [first, second],
            front: 0,
        })
    }

    /// Framebuffer holding the latest result
    pub fn front(&self) -> &Framebuffer {
        &self.framebuffers[self.front]
    }

    /// Framebuffer the next pass writes to
    pub fn back(&self) -> &Framebuffer {
        &self.framebuffers[1 - self.front]
    }

    /// Exchange front and back
    pub fn swap(&mut self) {
        self.front = 1 - self.front;
    }

    /// Run `n_passes` passes, the first reading `source`
    ///
    /// Each pass writes the back framebuffer, then the pair is swapped, so
    /// after the call `front()` holds the result of the last pass.
    pub fn run<F>(&mut self, n_passes: u32, source: &Texture, mut pass: F) -> Result<()>
    where
        F: FnMut(&Texture, &Framebuffer) -> Result<()>,
    {
        for i in 0..n_passes {
            let back = 1 - self.front;
            let input = if i == 0 {
                source
            } else {
                target_texture(&self.framebuffers[self.front])?
            };
            pass(input, &self.framebuffers[back])?;
            self.front = back;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "framebuffer_tests.rs"]
mod tests;
