/// Transfer format resolution for texture uploads
///
/// `Es2` contexts infer everything from the unsized internal format, so the
/// transfer format is the internal format itself. `Es3` contexts require an
/// explicit transfer format that is compatible with both the sized internal
/// format and the pixel data type; the table below is the documented
/// compatibility matrix, keyed by data type first.

use crate::context::GlGeneration;
use crate::error::{Error, Result};
use crate::format::{InternalFormat, PixelType, TransferFormat};

/// Resolve the transfer format for an upload
///
/// # Arguments
///
/// * `generation` - API generation of the context performing the upload
/// * `internal_format` - Storage format of the texture
/// * `data_type` - Data type of the client pixels
///
/// # Errors
///
/// On `Es3` only:
/// - `Error::UnknownFormat` if `data_type` has no row in the matrix
/// - `Error::InvalidFormatCombination` if `internal_format` is not valid for `data_type`
pub fn resolve_transfer_format(
    generation: GlGeneration,
    internal_format: InternalFormat,
    data_type: PixelType,
) -> Result<TransferFormat> {
    match generation {
        GlGeneration::Es2 => Ok(TransferFormat::MatchInternal(internal_format)),
        GlGeneration::Es3 => resolve_es3(internal_format, data_type),
    }
}

fn resolve_es3(internal_format: InternalFormat, data_type: PixelType) -> Result<TransferFormat> {
    use InternalFormat as I;
    use TransferFormat as T;

    let format = match data_type {
        PixelType::UNSIGNED_BYTE => match internal_format {
            I::RGBA8 | I::RGB5_A1 | I::RGBA4 | I::SRGB8_ALPHA8 => Some(T::RGBA),
            I::RGBA8UI => Some(T::RGBA_INTEGER),
            I::RGB8 | I::RGB565 | I::SRGB8 => Some(T::RGB),
            I::RGB8UI => Some(T::RGB_INTEGER),
            I::RG8 => Some(T::RG),
            I::RG8UI => Some(T::RG_INTEGER),
            I::R8 => Some(T::RED),
            I::R8UI => Some(T::RED_INTEGER),
            I::RGBA => Some(T::RGBA),
            I::RGB => Some(T::RGB),
            I::LUMINANCE_ALPHA => Some(T::LUMINANCE_ALPHA),
            I::LUMINANCE => Some(T::LUMINANCE),
            I::ALPHA => Some(T::ALPHA),
            _ => None,
        },
        PixelType::BYTE => match internal_format {
            I::RGBA8_SNORM => Some(T::RGBA),
            I::RGBA8I => Some(T::RGBA_INTEGER),
            I::RGB8_SNORM => Some(T::RGB),
            I::RGB8I => Some(T::RGB_INTEGER),
            I::RG8_SNORM => Some(T::RG),
            I::RG8I => Some(T::RG_INTEGER),
            I::R8_SNORM => Some(T::RED),
            I::R8I => Some(T::RED_INTEGER),
            _ => None,
        },
        PixelType::UNSIGNED_SHORT_4_4_4_4 => match internal_format {
            I::RGBA4 | I::RGBA => Some(T::RGBA),
            _ => None,
        },
        PixelType::UNSIGNED_SHORT_5_5_5_1 => match internal_format {
            I::RGB5_A1 | I::RGBA => Some(T::RGBA),
            _ => None,
        },
        PixelType::UNSIGNED_INT_2_10_10_10_REV => match internal_format {
            I::RGB10_A2 | I::RGB5_A1 => Some(T::RGBA),
            I::RGB10_A2UI => Some(T::RGBA_INTEGER),
            _ => None,
        },
        PixelType::HALF_FLOAT => match internal_format {
            I::RGBA16F => Some(T::RGBA),
            I::RGB16F | I::R11F_G11F_B10F | I::RGB9_E5 => Some(T::RGB),
            I::RG16F => Some(T::RG),
            I::R16F => Some(T::RED),
            _ => None,
        },
        PixelType::FLOAT => match internal_format {
            I::RGBA32F | I::RGBA16F => Some(T::RGBA),
            I::RGB32F | I::RGB16F | I::R11F_G11F_B10F | I::RGB9_E5 => Some(T::RGB),
            I::RG32F | I::RG16F => Some(T::RG),
            I::R32F | I::R16F => Some(T::RED),
            I::DEPTH_COMPONENT32F => Some(T::DEPTH_COMPONENT),
            _ => None,
        },
        PixelType::UNSIGNED_SHORT => match internal_format {
            I::RGBA16UI => Some(T::RGBA_INTEGER),
            I::RGB16UI => Some(T::RGB_INTEGER),
            I::RG16UI => Some(T::RG_INTEGER),
            I::R16UI => Some(T::RED_INTEGER),
            I::DEPTH_COMPONENT16 => Some(T::DEPTH_COMPONENT),
            _ => None,
        },
        PixelType::SHORT => match internal_format {
            I::RGBA16I => Some(T::RGBA_INTEGER),
            I::RGB16I => Some(T::RGB_INTEGER),
            I::RG16I => Some(T::RG_INTEGER),
            I::R16I => Some(T::RED_INTEGER),
            _ => None,
        },
        PixelType::UNSIGNED_INT => match internal_format {
            I::RGBA32UI => Some(T::RGBA_INTEGER),
            I::RGB32UI => Some(T::RGB_INTEGER),
            I::RG32UI => Some(T::RG_INTEGER),
            I::R32UI => Some(T::RED_INTEGER),
            I::DEPTH_COMPONENT24 | I::DEPTH_COMPONENT16 => Some(T::DEPTH_COMPONENT),
            _ => None,
        },
        PixelType::INT => match internal_format {
            I::RGBA32I => Some(T::RGBA_INTEGER),
            I::RGB32I => Some(T::RGB_INTEGER),
            I::RG32I => Some(T::RG_INTEGER),
            I::R32I => Some(T::RED_INTEGER),
            _ => None,
        },
        PixelType::UNSIGNED_SHORT_5_6_5 => match internal_format {
            I::RGB565 | I::RGB => Some(T::RGB),
            _ => None,
        },
        PixelType::UNSIGNED_INT_10F_11F_11F_REV => match internal_format {
            I::R11F_G11F_B10F => Some(T::RGB),
            _ => None,
        },
        PixelType::UNSIGNED_INT_5_9_9_9_REV => match internal_format {
            I::RGB9_E5 => Some(T::RGB),
            _ => None,
        },
        PixelType::UNSIGNED_INT_24_8 => match internal_format {
            I::DEPTH24_STENCIL8 => Some(T::DEPTH_STENCIL),
            _ => None,
        },
        PixelType::FLOAT_32_UNSIGNED_INT_24_8_REV => match internal_format {
            I::DEPTH32F_STENCIL8 => Some(T::DEPTH_STENCIL),
            _ => None,
        },
        PixelType::Other(_) => {
            return Err(Error::UnknownFormat(format!("{:?}", data_type)));
        }
    };

    format.ok_or_else(|| Error::InvalidFormatCombination {
        internal_format: format!("{:?}", internal_format),
        data_type: format!("{:?}", data_type),
    })
}

#[cfg(test)]
#[path = "format_resolver_tests.rs"]
mod tests;
