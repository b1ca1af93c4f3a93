/// 2D texture resource
///
/// Wraps one native 2D texture. Uploads go through the transfer format
/// resolver, so the same `TextureDesc` works on both API generations as long
/// as the internal format is valid for the generation in use.

use std::cell::Cell;
use std::rc::Rc;

use crate::context::{
    GraphicsContext, GlGeneration, TextureId, UniformLocation,
    TextureFilter, TextureParameter, TextureWrap,
};
use crate::error::{Error, Result};
use crate::format::{resolve_transfer_format, InternalFormat, PixelType};
use crate::{engine_debug, engine_err, engine_error};

const SOURCE: &str = "galaxy3d::gl::Texture";

// ===== DESCRIPTOR =====

/// Texture creation / upload descriptor
#[derive(Debug, Clone, Copy)]
pub struct TextureDesc<'a> {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Storage format
    pub internal_format: InternalFormat,
    /// Data type of `pixels`
    pub data_type: PixelType,
    /// Pixel data, row-major from the bottom row (None allocates without filling)
    pub pixels: Option<&'a [u8]>,
    /// Magnification filter (minification is always linear)
    pub mag_filter: TextureFilter,
    /// Row alignment of `pixels` in bytes (1, 2, 4 or 8)
    pub unpack_alignment: i32,
}

impl Default for TextureDesc<'_> {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            internal_format: InternalFormat::RGBA,
            data_type: PixelType::UNSIGNED_BYTE,
            pixels: None,
            mag_filter: TextureFilter::Linear,
            unpack_alignment: 4,
        }
    }
}

// ===== TEXTURE =====

/// 2D texture
pub struct Texture {
    context: Rc<dyn GraphicsContext>,
    generation: GlGeneration,
    texture: Option<TextureId>,
    width: u32,
    height: u32,
    internal_format: InternalFormat,
    data_type: PixelType,
    active_slot: Cell<Option<u32>>,
}

impl Texture {
    /// Create a texture and upload its initial image
    ///
    /// Wrapping is clamped to edge on both axes and minification is linear.
    ///
    /// # Errors
    ///
    /// - `Error::BackendError` if the native texture cannot be created
    /// - `Error::UnknownFormat` / `Error::InvalidFormatCombination` if the
    ///   format pair cannot be uploaded on this context (the native texture
    ///   is released before returning)
    pub fn new(context: Rc<dyn GraphicsContext>, desc: &TextureDesc) -> Result<Self> {
        let id = context.create_texture()
            .map_err(|e| engine_err!(SOURCE, "Could not create texture: {}", e))?;

        let mut texture = Self {
            generation: context.generation(),
            context,
            texture: Some(id),
            width: desc.width,
            height: desc.height,
            internal_format: desc.internal_format,
            data_type: desc.data_type,
            active_slot: Cell::new(None),
        };

        // Drop releases the native texture on the error path
        texture.set_image_data(desc)?;

        let ctx = &texture.context;
        ctx.tex_parameter(TextureParameter::WrapS(TextureWrap::ClampToEdge));
        ctx.tex_parameter(TextureParameter::WrapT(TextureWrap::ClampToEdge));
        ctx.tex_parameter(TextureParameter::MinFilter(TextureFilter::Linear));
        ctx.tex_parameter(TextureParameter::MagFilter(desc.mag_filter));

        engine_debug!(SOURCE, "Created {}x{} texture ({:?} / {:?})",
            desc.width, desc.height, desc.internal_format, desc.data_type);

        Ok(texture)
    }

    /// Replace the image of this texture
    ///
    /// # Errors
    ///
    /// - `Error::InvalidResource` if the texture has been deleted
    /// - `Error::UnknownFormat` / `Error::InvalidFormatCombination` from format resolution
    pub fn set_image_data(&mut self, desc: &TextureDesc) -> Result<()> {
        let id = self.handle()?;
        let ctx = &self.context;

        ctx.bind_texture(Some(id));

        let format = resolve_transfer_format(self.generation, desc.internal_format, desc.data_type)
            .map_err(|e| {
                engine_error!(SOURCE, "Cannot upload texture: {}", e);
                e
            })?;

        ctx.pixel_unpack_alignment(desc.unpack_alignment);
        ctx.tex_image_2d(
            desc.internal_format,
            desc.width as i32,
            desc.height as i32,
            format,
            desc.data_type,
            desc.pixels,
        );

        self.width = desc.width;
        self.height = desc.height;
        self.internal_format = desc.internal_format;
        self.data_type = desc.data_type;
        Ok(())
    }

    /// Bind this texture to texture unit `unit`
    pub fn activate(&self, unit: u32) -> Result<()> {
        let id = self.handle()?;
        self.active_slot.set(Some(unit));
        self.context.active_texture(unit);
        self.context.bind_texture(Some(id));
        Ok(())
    }

    /// Bind to `unit` and point the sampler uniform at `location` to it
    pub fn bind_to_uniform(&self, location: UniformLocation, unit: u32) -> Result<()> {
        self.activate(unit)?;
        self.context.uniform_1_i32(location, unit as i32);
        Ok(())
    }

    /// Unbind from the unit this texture was last activated on (no-op if none)
    pub fn deactivate(&self) {
        if let Some(unit) = self.active_slot.take() {
            self.context.active_texture(unit);
            self.context.bind_texture(None);
        }
    }

    /// Release the native texture (no-op when already deleted)
    pub fn delete(&mut self) {
        if let Some(id) = self.texture.take() {
            self.context.delete_texture(id);
        }
        self.active_slot.set(None);
    }

    fn handle(&self) -> Result<TextureId> {
        self.texture.ok_or_else(|| engine_err!(SOURCE, Error::InvalidResource(
            "Texture has been deleted".to_string()
        )))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn internal_format(&self) -> InternalFormat {
        self.internal_format
    }

    pub fn data_type(&self) -> PixelType {
        self.data_type
    }

    /// Unit this texture is currently activated on
    pub fn active_slot(&self) -> Option<u32> {
        self.active_slot.get()
    }

    /// Native handle (None once deleted)
    pub fn id(&self) -> Option<TextureId> {
        self.texture
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.delete();
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
