/// Enums and handle types shared by the context trait and the resource wrappers

use bitflags::bitflags;
use slotmap::new_key_type;

// ===== HANDLES =====

new_key_type! {
    /// Native buffer object
    pub struct BufferId;
    /// Native texture object
    pub struct TextureId;
    /// Native shader object (one compiled stage)
    pub struct ShaderId;
    /// Native program object (linked stages)
    pub struct ProgramId;
    /// Native framebuffer object
    pub struct FramebufferId;
    /// Location of a uniform inside a linked program
    pub struct UniformLocation;
}

// ===== GENERATION =====

/// Graphics API generation of a context
///
/// The two generations disagree on texture format inference, on the
/// attribute qualifier keyword, and on where instancing entry points live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlGeneration {
    /// GLES 2 / WebGL 1 / GLSL ES 1.00
    Es2,
    /// GLES 3 / WebGL 2 / GLSL ES 3.00
    Es3,
}

// ===== SHADER STAGES =====

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    /// Lowercase stage name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }

    /// Single-stage flag
    pub fn flag(&self) -> ShaderStageFlags {
        match self {
            ShaderStage::Vertex => ShaderStageFlags::VERTEX,
            ShaderStage::Fragment => ShaderStageFlags::FRAGMENT,
        }
    }
}

bitflags! {
    /// Set of stages a reflected variable is declared in
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStageFlags: u32 {
        const VERTEX = 0b01;
        const FRAGMENT = 0b10;
    }
}

// ===== BUFFERS =====

/// Buffer binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data (ARRAY_BUFFER)
    Array,
    /// Index data (ELEMENT_ARRAY_BUFFER)
    ElementArray,
}

/// Buffer data usage hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times
    StaticDraw,
    /// Updated repeatedly, drawn many times
    DynamicDraw,
    /// Uploaded once, drawn a few times
    StreamDraw,
}

/// Scalar type of buffer elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
}

impl ScalarType {
    /// Size in bytes of one element
    pub fn size_bytes(&self) -> u32 {
        match self {
            ScalarType::Byte | ScalarType::UnsignedByte => 1,
            ScalarType::Short | ScalarType::UnsignedShort => 2,
            ScalarType::Int | ScalarType::UnsignedInt | ScalarType::Float => 4,
        }
    }
}

/// Primitive topology (draw mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

// ===== TEXTURES =====

/// Texture sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Texture coordinate wrap mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureWrap {
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

/// Sampler parameter of the currently bound 2D texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureParameter {
    WrapS(TextureWrap),
    WrapT(TextureWrap),
    MinFilter(TextureFilter),
    MagFilter(TextureFilter),
}
