/// Texture storage formats, pixel data types and transfer formats

/// Internal (storage) format of a texture
///
/// Unsized formats (`RGBA`, `RGB`, `LUMINANCE_ALPHA`, `LUMINANCE`, `ALPHA`)
/// are the only ones available on `Es2` contexts. Formats the enum does not
/// name (vendor or extension enums) are carried raw in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum InternalFormat {
    // Unsized formats
    RGBA,
    RGB,
    LUMINANCE_ALPHA,
    LUMINANCE,
    ALPHA,

    // 8-bit normalized
    R8,
    RG8,
    RGB8,
    RGBA8,
    SRGB8,
    SRGB8_ALPHA8,
    R8_SNORM,
    RG8_SNORM,
    RGB8_SNORM,
    RGBA8_SNORM,

    // Packed
    RGB565,
    RGB5_A1,
    RGBA4,
    RGB10_A2,
    RGB10_A2UI,
    R11F_G11F_B10F,
    RGB9_E5,

    // Float
    R16F,
    RG16F,
    RGB16F,
    RGBA16F,
    R32F,
    RG32F,
    RGB32F,
    RGBA32F,

    // Unsigned integer
    R8UI,
    RG8UI,
    RGB8UI,
    RGBA8UI,
    R16UI,
    RG16UI,
    RGB16UI,
    RGBA16UI,
    R32UI,
    RG32UI,
    RGB32UI,
    RGBA32UI,

    // Signed integer
    R8I,
    RG8I,
    RGB8I,
    RGBA8I,
    R16I,
    RG16I,
    RGB16I,
    RGBA16I,
    R32I,
    RG32I,
    RGB32I,
    RGBA32I,

    // Depth / stencil
    DEPTH_COMPONENT16,
    DEPTH_COMPONENT24,
    DEPTH_COMPONENT32F,
    DEPTH24_STENCIL8,
    DEPTH32F_STENCIL8,

    /// Raw API enum not covered above
    Other(u32),
}

/// Data type of client pixel data
///
/// `Other` carries raw enums such as the `HALF_FLOAT_OES` extension type of
/// `Es2` contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum PixelType {
    UNSIGNED_BYTE,
    BYTE,
    UNSIGNED_SHORT,
    SHORT,
    UNSIGNED_INT,
    INT,
    HALF_FLOAT,
    FLOAT,
    UNSIGNED_SHORT_5_6_5,
    UNSIGNED_SHORT_4_4_4_4,
    UNSIGNED_SHORT_5_5_5_1,
    UNSIGNED_INT_2_10_10_10_REV,
    UNSIGNED_INT_10F_11F_11F_REV,
    UNSIGNED_INT_5_9_9_9_REV,
    UNSIGNED_INT_24_8,
    FLOAT_32_UNSIGNED_INT_24_8_REV,

    /// Raw API enum not covered above
    Other(u32),
}

/// Channel layout of client pixel data (the `format` argument of an upload)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TransferFormat {
    RED,
    RED_INTEGER,
    RG,
    RG_INTEGER,
    RGB,
    RGB_INTEGER,
    RGBA,
    RGBA_INTEGER,
    ALPHA,
    LUMINANCE,
    LUMINANCE_ALPHA,
    DEPTH_COMPONENT,
    DEPTH_STENCIL,

    /// Same enum as the internal format (`Es2` rule)
    MatchInternal(InternalFormat),
}
