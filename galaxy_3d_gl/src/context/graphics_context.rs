/// GraphicsContext trait - capability provider for the GL layer
///
/// Every wrapper in this crate (buffers, textures, framebuffers, programs)
/// talks to the graphics API exclusively through this trait. Backends
/// (e.g., the glow plugin) implement it on top of a live context; tests use
/// the mock context.

use std::rc::Rc;

use crate::error::Result;
use crate::context::{
    BufferId, TextureId, ShaderId, ProgramId, FramebufferId, UniformLocation,
    GlGeneration, ShaderStage, BufferTarget, BufferUsage, ScalarType, Topology,
    TextureParameter,
};
use crate::format::{InternalFormat, PixelType, TransferFormat};

/// Per-instance stepping and instanced draws
///
/// Resolved once through `GraphicsContext::instanced_arrays()` and stored by
/// the objects that need it. Newer contexts hand out their native entry
/// points; legacy contexts hand out the instanced-arrays extension.
pub trait InstancedArrays {
    /// Set how many instances pass before the attribute at `location` advances
    /// (0 = advance per vertex)
    fn vertex_attrib_divisor(&self, location: u32, divisor: u32);

    /// Instanced non-indexed draw
    fn draw_arrays_instanced(&self, topology: Topology, first: i32, count: i32, instance_count: i32);

    /// Instanced indexed draw
    fn draw_elements_instanced(
        &self,
        topology: Topology,
        count: i32,
        index_type: ScalarType,
        offset: i32,
        instance_count: i32,
    );
}

/// Graphics context trait
///
/// Mirrors the stateful GL object model: objects are created, bound to a
/// target, then configured through the binding. Implementations are
/// single-threaded and shared as `Rc<dyn GraphicsContext>`.
pub trait GraphicsContext {
    /// API generation of this context (queried once by consumers and cached)
    fn generation(&self) -> GlGeneration;

    /// Resolve the instancing capability
    ///
    /// # Returns
    ///
    /// The native implementation on `Es3`, the extension on `Es2` when it is
    /// exposed, `None` otherwise
    fn instanced_arrays(&self) -> Option<Rc<dyn InstancedArrays>>;

    // ===== BUFFERS =====

    /// Create a buffer object
    fn create_buffer(&self) -> Result<BufferId>;

    /// Bind a buffer to a target (None unbinds)
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>);

    /// Upload data to the buffer bound to `target`
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);

    /// Delete a buffer object
    fn delete_buffer(&self, buffer: BufferId);

    // ===== VERTEX ATTRIBUTES =====

    /// Enable the vertex attribute array at `location`
    fn enable_vertex_attrib_array(&self, location: u32);

    /// Describe the layout of the buffer bound to ARRAY_BUFFER for `location`
    ///
    /// # Arguments
    ///
    /// * `location` - Attribute location
    /// * `size` - Components per vertex
    /// * `scalar_type` - Component type
    /// * `normalized` - Normalize integer data to [0, 1] / [-1, 1]
    /// * `stride` - Bytes between consecutive vertices
    /// * `offset` - Byte offset of the first component
    fn vertex_attrib_pointer(
        &self,
        location: u32,
        size: i32,
        scalar_type: ScalarType,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    // ===== TEXTURES =====

    /// Create a texture object
    fn create_texture(&self) -> Result<TextureId>;

    /// Select the active texture unit (0-based, added to TEXTURE0)
    fn active_texture(&self, unit: u32);

    /// Bind a 2D texture to the active unit (None unbinds)
    fn bind_texture(&self, texture: Option<TextureId>);

    /// Set a sampler parameter on the bound 2D texture
    fn tex_parameter(&self, parameter: TextureParameter);

    /// Set the row alignment used when reading client pixel data
    fn pixel_unpack_alignment(&self, alignment: i32);

    /// Specify the image of the bound 2D texture (level 0)
    ///
    /// `pixels` of `None` allocates storage without filling it.
    fn tex_image_2d(
        &self,
        internal_format: InternalFormat,
        width: i32,
        height: i32,
        format: TransferFormat,
        data_type: PixelType,
        pixels: Option<&[u8]>,
    );

    /// Delete a texture object
    fn delete_texture(&self, texture: TextureId);

    // ===== SHADERS AND PROGRAMS =====

    /// Create a shader object for one stage
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId>;

    /// Replace the source of a shader
    fn shader_source(&self, shader: ShaderId, source: &str);

    /// Compile a shader
    fn compile_shader(&self, shader: ShaderId);

    /// Whether the last compilation succeeded
    fn shader_compile_status(&self, shader: ShaderId) -> bool;

    /// Compiler log of a shader
    fn shader_info_log(&self, shader: ShaderId) -> String;

    /// Delete a shader object
    fn delete_shader(&self, shader: ShaderId);

    /// Create a program object
    fn create_program(&self) -> Result<ProgramId>;

    /// Attach a compiled shader to a program
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);

    /// Link a program
    fn link_program(&self, program: ProgramId);

    /// Whether the last link succeeded
    fn program_link_status(&self, program: ProgramId) -> bool;

    /// Linker log of a program
    fn program_info_log(&self, program: ProgramId) -> String;

    /// Make a program current (None clears)
    fn use_program(&self, program: Option<ProgramId>);

    /// Delete a program object
    fn delete_program(&self, program: ProgramId);

    /// Location of an active attribute (None if inactive or unknown)
    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32>;

    /// Location of an active uniform (None if inactive or unknown)
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    // ===== UNIFORMS (current program) =====

    fn uniform_1_i32(&self, location: UniformLocation, value: i32);

    fn uniform_1_f32(&self, location: UniformLocation, value: f32);

    fn uniform_1_f32_slice(&self, location: UniformLocation, values: &[f32]);

    fn uniform_2_f32_slice(&self, location: UniformLocation, values: &[f32]);

    fn uniform_3_f32_slice(&self, location: UniformLocation, values: &[f32]);

    fn uniform_4_f32_slice(&self, location: UniformLocation, values: &[f32]);

    fn uniform_matrix_4_f32_slice(&self, location: UniformLocation, transpose: bool, values: &[f32]);

    // ===== DRAWING =====

    /// Non-indexed draw
    fn draw_arrays(&self, topology: Topology, first: i32, count: i32);

    /// Indexed draw from the buffer bound to ELEMENT_ARRAY_BUFFER
    fn draw_elements(&self, topology: Topology, count: i32, index_type: ScalarType, offset: i32);

    // ===== FRAMEBUFFERS =====

    /// Create a framebuffer object
    fn create_framebuffer(&self) -> Result<FramebufferId>;

    /// Bind a framebuffer (None binds the default framebuffer)
    fn bind_framebuffer(&self, framebuffer: Option<FramebufferId>);

    /// Attach a 2D texture as colour attachment 0 of the bound framebuffer
    fn framebuffer_texture_2d(&self, texture: Option<TextureId>);

    /// Delete a framebuffer object
    fn delete_framebuffer(&self, framebuffer: FramebufferId);

    /// Set the viewport rectangle
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    /// Clear the colour buffer of the bound framebuffer to `color`
    fn clear_color(&self, color: [f32; 4]);
}
