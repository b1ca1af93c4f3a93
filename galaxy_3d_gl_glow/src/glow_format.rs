/// Conversions from the GL layer's enums to raw GL enums

use galaxy_3d_gl::galaxy3d::context::{
    BufferTarget, BufferUsage, ScalarType, ShaderStage, TextureFilter, TextureParameter,
    TextureWrap, Topology,
};
use galaxy_3d_gl::galaxy3d::format::{InternalFormat, PixelType, TransferFormat};

// Legacy unsized formats absent from core profile headers
const ALPHA: u32 = 0x1906;
const LUMINANCE: u32 = 0x1909;
const LUMINANCE_ALPHA: u32 = 0x190A;

pub(crate) fn buffer_target_to_gl(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

pub(crate) fn buffer_usage_to_gl(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::StaticDraw => glow::STATIC_DRAW,
        BufferUsage::DynamicDraw => glow::DYNAMIC_DRAW,
        BufferUsage::StreamDraw => glow::STREAM_DRAW,
    }
}

pub(crate) fn scalar_type_to_gl(scalar_type: ScalarType) -> u32 {
    match scalar_type {
        ScalarType::Byte => glow::BYTE,
        ScalarType::UnsignedByte => glow::UNSIGNED_BYTE,
        ScalarType::Short => glow::SHORT,
        ScalarType::UnsignedShort => glow::UNSIGNED_SHORT,
        ScalarType::Int => glow::INT,
        ScalarType::UnsignedInt => glow::UNSIGNED_INT,
        ScalarType::Float => glow::FLOAT,
    }
}

pub(crate) fn topology_to_gl(topology: Topology) -> u32 {
    match topology {
        Topology::Points => glow::POINTS,
        Topology::Lines => glow::LINES,
        Topology::LineStrip => glow::LINE_STRIP,
        Topology::LineLoop => glow::LINE_LOOP,
        Topology::Triangles => glow::TRIANGLES,
        Topology::TriangleStrip => glow::TRIANGLE_STRIP,
        Topology::TriangleFan => glow::TRIANGLE_FAN,
    }
}

pub(crate) fn shader_stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn filter_to_gl(filter: TextureFilter) -> i32 {
    match filter {
        TextureFilter::Nearest => glow::NEAREST as i32,
        TextureFilter::Linear => glow::LINEAR as i32,
    }
}

fn wrap_to_gl(wrap: TextureWrap) -> i32 {
    match wrap {
        TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE as i32,
        TextureWrap::Repeat => glow::REPEAT as i32,
        TextureWrap::MirroredRepeat => glow::MIRRORED_REPEAT as i32,
    }
}

/// (parameter name, value) pair for `tex_parameter_i32`
pub(crate) fn texture_parameter_to_gl(parameter: TextureParameter) -> (u32, i32) {
    match parameter {
        TextureParameter::WrapS(wrap) => (glow::TEXTURE_WRAP_S, wrap_to_gl(wrap)),
        TextureParameter::WrapT(wrap) => (glow::TEXTURE_WRAP_T, wrap_to_gl(wrap)),
        TextureParameter::MinFilter(filter) => (glow::TEXTURE_MIN_FILTER, filter_to_gl(filter)),
        TextureParameter::MagFilter(filter) => (glow::TEXTURE_MAG_FILTER, filter_to_gl(filter)),
    }
}

pub(crate) fn internal_format_to_gl(format: InternalFormat) -> u32 {
    use InternalFormat as I;
    match format {
        // Unsized
        I::RGBA => glow::RGBA,
        I::RGB => glow::RGB,
        I::LUMINANCE_ALPHA => LUMINANCE_ALPHA,
        I::LUMINANCE => LUMINANCE,
        I::ALPHA => ALPHA,
        // 8-bit normalized
        I::R8 => glow::R8,
        I::RG8 => glow::RG8,
        I::RGB8 => glow::RGB8,
        I::RGBA8 => glow::RGBA8,
        I::SRGB8 => glow::SRGB8,
        I::SRGB8_ALPHA8 => glow::SRGB8_ALPHA8,
        I::R8_SNORM => glow::R8_SNORM,
        I::RG8_SNORM => glow::RG8_SNORM,
        I::RGB8_SNORM => glow::RGB8_SNORM,
        I::RGBA8_SNORM => glow::RGBA8_SNORM,
        // Packed
        I::RGB565 => glow::RGB565,
        I::RGB5_A1 => glow::RGB5_A1,
        I::RGBA4 => glow::RGBA4,
        I::RGB10_A2 => glow::RGB10_A2,
        I::RGB10_A2UI => glow::RGB10_A2UI,
        I::R11F_G11F_B10F => glow::R11F_G11F_B10F,
        I::RGB9_E5 => glow::RGB9_E5,
        // Float
        I::R16F => glow::R16F,
        I::RG16F => glow::RG16F,
        I::RGB16F => glow::RGB16F,
        I::RGBA16F => glow::RGBA16F,
        I::R32F => glow::R32F,
        I::RG32F => glow::RG32F,
        I::RGB32F => glow::RGB32F,
        I::RGBA32F => glow::RGBA32F,
        // Unsigned integer
        I::R8UI => glow::R8UI,
        I::RG8UI => glow::RG8UI,
        I::RGB8UI => glow::RGB8UI,
        I::RGBA8UI => glow::RGBA8UI,
        I::R16UI => glow::R16UI,
        I::RG16UI => glow::RG16UI,
        I::RGB16UI => glow::RGB16UI,
        I::RGBA16UI => glow::RGBA16UI,
        I::R32UI => glow::R32UI,
        I::RG32UI => glow::RG32UI,
        I::RGB32UI => glow::RGB32UI,
        I::RGBA32UI => glow::RGBA32UI,
        // Signed integer
        I::R8I => glow::R8I,
        I::RG8I => glow::RG8I,
        I::RGB8I => glow::RGB8I,
        I::RGBA8I => glow::RGBA8I,
        I::R16I => glow::R16I,
        I::RG16I => glow::RG16I,
        I::RGB16I => glow::RGB16I,
        I::RGBA16I => glow::RGBA16I,
        I::R32I => glow::R32I,
        I::RG32I => glow::RG32I,
        I::RGB32I => glow::RGB32I,
        I::RGBA32I => glow::RGBA32I,
        // Depth / stencil
        I::DEPTH_COMPONENT16 => glow::DEPTH_COMPONENT16,
        I::DEPTH_COMPONENT24 => glow::DEPTH_COMPONENT24,
        I::DEPTH_COMPONENT32F => glow::DEPTH_COMPONENT32F,
        I::DEPTH24_STENCIL8 => glow::DEPTH24_STENCIL8,
        I::DEPTH32F_STENCIL8 => glow::DEPTH32F_STENCIL8,
        I::Other(raw) => raw,
    }
}

pub(crate) fn pixel_type_to_gl(data_type: PixelType) -> u32 {
    match data_type {
        PixelType::UNSIGNED_BYTE => glow::UNSIGNED_BYTE,
        PixelType::BYTE => glow::BYTE,
        PixelType::UNSIGNED_SHORT => glow::UNSIGNED_SHORT,
        PixelType::SHORT => glow::SHORT,
        PixelType::UNSIGNED_INT => glow::UNSIGNED_INT,
        PixelType::INT => glow::INT,
        PixelType::HALF_FLOAT => glow::HALF_FLOAT,
        PixelType::FLOAT => glow::FLOAT,
        PixelType::UNSIGNED_SHORT_5_6_5 => glow::UNSIGNED_SHORT_5_6_5,
        PixelType::UNSIGNED_SHORT_4_4_4_4 => glow::UNSIGNED_SHORT_4_4_4_4,
        PixelType::UNSIGNED_SHORT_5_5_5_1 => glow::UNSIGNED_SHORT_5_5_5_1,
        PixelType::UNSIGNED_INT_2_10_10_10_REV => glow::UNSIGNED_INT_2_10_10_10_REV,
        PixelType::UNSIGNED_INT_10F_11F_11F_REV => glow::UNSIGNED_INT_10F_11F_11F_REV,
        PixelType::UNSIGNED_INT_5_9_9_9_REV => glow::UNSIGNED_INT_5_9_9_9_REV,
        PixelType::UNSIGNED_INT_24_8 => glow::UNSIGNED_INT_24_8,
        PixelType::FLOAT_32_UNSIGNED_INT_24_8_REV => glow::FLOAT_32_UNSIGNED_INT_24_8_REV,
        PixelType::Other(raw) => raw,
    }
}

pub(crate) fn transfer_format_to_gl(format: TransferFormat) -> u32 {
    match format {
        TransferFormat::RED => glow::RED,
        TransferFormat::RED_INTEGER => glow::RED_INTEGER,
        TransferFormat::RG => glow::RG,
        TransferFormat::RG_INTEGER => glow::RG_INTEGER,
        TransferFormat::RGB => glow::RGB,
        TransferFormat::RGB_INTEGER => glow::RGB_INTEGER,
        TransferFormat::RGBA => glow::RGBA,
        TransferFormat::RGBA_INTEGER => glow::RGBA_INTEGER,
        TransferFormat::ALPHA => ALPHA,
        TransferFormat::LUMINANCE => LUMINANCE,
        TransferFormat::LUMINANCE_ALPHA => LUMINANCE_ALPHA,
        TransferFormat::DEPTH_COMPONENT => glow::DEPTH_COMPONENT,
        TransferFormat::DEPTH_STENCIL => glow::DEPTH_STENCIL,
        TransferFormat::MatchInternal(internal) => internal_format_to_gl(internal),
    }
}

#[cfg(test)]
#[path = "glow_format_tests.rs"]
mod tests;
