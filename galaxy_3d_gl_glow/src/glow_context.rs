/// GlowContext - GraphicsContext implementation over a glow context
///
/// Native objects live in slotmap tables keyed by the GL layer's handle
/// types, so wrappers only ever see opaque ids. The API generation and the
/// instancing capability are resolved once at construction.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use galaxy_3d_gl::galaxy3d::Result;
use galaxy_3d_gl::galaxy3d::context::{
    GraphicsContext, InstancedArrays,
    BufferId, TextureId, ShaderId, ProgramId, FramebufferId, UniformLocation,
    GlGeneration, ShaderStage, BufferTarget, BufferUsage, ScalarType, Topology,
    TextureParameter,
};
use galaxy_3d_gl::galaxy3d::format::{InternalFormat, PixelType, TransferFormat};
use galaxy_3d_gl::{engine_debug, engine_err, engine_info, engine_warn};
use glow::HasContext;
use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};

use crate::glow_format::{
    buffer_target_to_gl, buffer_usage_to_gl, internal_format_to_gl, pixel_type_to_gl,
    scalar_type_to_gl, shader_stage_to_gl, texture_parameter_to_gl, topology_to_gl,
    transfer_format_to_gl,
};
use crate::glow_instancing::{GlowInstancing, INSTANCING_EXTENSIONS};

const SOURCE: &str = "galaxy3d::glow";

// ===== CONFIG =====

/// Context configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Force a generation instead of detecting it from the version string
    pub generation: Option<GlGeneration>,
    /// Log every supported extension at DEBUG severity on creation
    pub log_extensions: bool,
}

// ===== OBJECT TABLES =====

#[derive(Default)]
struct Objects {
    buffers: SlotMap<BufferId, glow::Buffer>,
    textures: SlotMap<TextureId, glow::Texture>,
    shaders: SlotMap<ShaderId, glow::Shader>,
    programs: SlotMap<ProgramId, glow::Program>,
    framebuffers: SlotMap<FramebufferId, glow::Framebuffer>,
    uniform_locations: SlotMap<UniformLocation, glow::UniformLocation>,
    /// Locations handed out per program, released with the program
    program_uniforms: FxHashMap<ProgramId, Vec<UniformLocation>>,
}

/// Look up a native object, warning on stale handles
fn lookup<K: Key, V: Copy>(table: &SlotMap<K, V>, id: K, kind: &str) -> Option<V> {
    let object = table.get(id).copied();
    if object.is_none() {
        engine_warn!(SOURCE, "Ignoring unknown {} handle {:?}", kind, id);
    }
    object
}

// ===== CONTEXT =====

/// GraphicsContext backed by glow (desktop GL, GLES, WebGL 1/2)
pub struct GlowContext {
    gl: Rc<glow::Context>,
    generation: GlGeneration,
    instancing: Option<Rc<GlowInstancing>>,
    objects: RefCell<Objects>,
}

impl GlowContext {
    /// Wrap a live glow context
    ///
    /// # Arguments
    ///
    /// * `gl` - Context created by the windowing layer (glutin, sdl2, web-sys, ...)
    /// * `config` - Generation override and extension logging
    pub fn new(gl: glow::Context, config: Config) -> Self {
        let gl = Rc::new(gl);

        let (major, minor, is_embedded) = {
            let version = gl.version();
            (version.major, version.minor, version.is_embedded)
        };
        let generation = config.generation
            .unwrap_or_else(|| detect_generation(major, minor, is_embedded));

        engine_info!(SOURCE, "Context {}.{} ({}), using {:?}",
            major, minor, if is_embedded { "embedded" } else { "desktop" }, generation);

        let extensions = gl.supported_extensions();
        if config.log_extensions {
            let mut sorted: Vec<&String> = extensions.iter().collect();
            sorted.sort();
            for extension in sorted {
                engine_debug!(SOURCE, "Extension: {}", extension);
            }
        }

        let instancing = match generation {
            GlGeneration::Es3 => Some(Rc::new(GlowInstancing::native(gl.clone()))),
            GlGeneration::Es2 => match find_instancing_extension(extensions) {
                Some(name) => {
                    engine_debug!(SOURCE, "Instanced arrays through {}", name);
                    Some(Rc::new(GlowInstancing::extension(gl.clone(), name)))
                }
                None => {
                    engine_warn!(SOURCE, "Instanced arrays unavailable, per-instance buffers will be rejected");
                    None
                }
            },
        };

        Self {
            gl,
            generation,
            instancing,
            objects: RefCell::new(Objects::default()),
        }
    }

    /// Underlying glow context
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    fn buffer(&self, id: BufferId) -> Option<glow::Buffer> {
        lookup(&self.objects.borrow().buffers, id, "buffer")
    }

    fn texture(&self, id: TextureId) -> Option<glow::Texture> {
        lookup(&self.objects.borrow().textures, id, "texture")
    }

    fn shader(&self, id: ShaderId) -> Option<glow::Shader> {
        lookup(&self.objects.borrow().shaders, id, "shader")
    }

    fn program(&self, id: ProgramId) -> Option<glow::Program> {
        lookup(&self.objects.borrow().programs, id, "program")
    }

    fn framebuffer(&self, id: FramebufferId) -> Option<glow::Framebuffer> {
        lookup(&self.objects.borrow().framebuffers, id, "framebuffer")
    }

    fn uniform(&self, location: UniformLocation) -> Option<glow::UniformLocation> {
        self.objects.borrow().uniform_locations.get(location).cloned()
    }
}

/// Generation from the context version
///
/// Embedded contexts (GLES, WebGL) are `Es3` from 3.0 on. Desktop contexts
/// accept `#version 300 es` sources from 4.3 on.
pub(crate) fn detect_generation(major: u32, minor: u32, is_embedded: bool) -> GlGeneration {
    let es3 = if is_embedded {
        major >= 3
    } else {
        major > 4 || (major == 4 && minor >= 3)
    };
    if es3 { GlGeneration::Es3 } else { GlGeneration::Es2 }
}

/// First instancing extension exposed by a legacy context
pub(crate) fn find_instancing_extension(supported: &HashSet<String>) -> Option<&'static str> {
    INSTANCING_EXTENSIONS.iter().copied().find(|name| supported.contains(*name))
}

impl GraphicsContext for GlowContext {
    fn generation(&self) -> GlGeneration {
        self.generation
    }

    fn instanced_arrays(&self) -> Option<Rc<dyn InstancedArrays>> {
        self.instancing.clone().map(|i| i as Rc<dyn InstancedArrays>)
    }

    // ===== BUFFERS =====

    fn create_buffer(&self) -> Result<BufferId> {
        let buffer = unsafe { self.gl.create_buffer() }
            .map_err(|e| engine_err!(SOURCE, "Failed to create buffer: {}", e))?;
        Ok(self.objects.borrow_mut().buffers.insert(buffer))
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        let buffer = buffer.and_then(|id| self.buffer(id));
        unsafe { self.gl.bind_buffer(buffer_target_to_gl(target), buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe {
            self.gl.buffer_data_u8_slice(buffer_target_to_gl(target), data, buffer_usage_to_gl(usage))
        }
    }

    fn delete_buffer(&self, buffer: BufferId) {
        if let Some(buffer) = self.objects.borrow_mut().buffers.remove(buffer) {
            unsafe { self.gl.delete_buffer(buffer) }
        }
    }

    // ===== VERTEX ATTRIBUTES =====

    fn enable_vertex_attrib_array(&self, location: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(location) }
    }

    fn vertex_attrib_pointer(
        &self,
        location: u32,
        size: i32,
        scalar_type: ScalarType,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                location,
                size,
                scalar_type_to_gl(scalar_type),
                normalized,
                stride,
                offset,
            )
        }
    }

    // ===== TEXTURES =====

    fn create_texture(&self) -> Result<TextureId> {
        let texture = unsafe { self.gl.create_texture() }
            .map_err(|e| engine_err!(SOURCE, "Failed to create texture: {}", e))?;
        Ok(self.objects.borrow_mut().textures.insert(texture))
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&self, texture: Option<TextureId>) {
        let texture = texture.and_then(|id| self.texture(id));
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture) }
    }

    fn tex_parameter(&self, parameter: TextureParameter) {
        let (name, value) = texture_parameter_to_gl(parameter);
        unsafe { self.gl.tex_parameter_i32(glow::TEXTURE_2D, name, value) }
    }

    fn pixel_unpack_alignment(&self, alignment: i32) {
        unsafe { self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, alignment) }
    }

    fn tex_image_2d(
        &self,
        internal_format: InternalFormat,
        width: i32,
        height: i32,
        format: TransferFormat,
        data_type: PixelType,
        pixels: Option<&[u8]>,
    ) {
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format_to_gl(internal_format) as i32,
                width,
                height,
                0,
                transfer_format_to_gl(format),
                pixel_type_to_gl(data_type),
                pixels,
            )
        }
    }

    fn delete_texture(&self, texture: TextureId) {
        if let Some(texture) = self.objects.borrow_mut().textures.remove(texture) {
            unsafe { self.gl.delete_texture(texture) }
        }
    }

    // ===== SHADERS AND PROGRAMS =====

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId> {
        let shader = unsafe { self.gl.create_shader(shader_stage_to_gl(stage)) }
            .map_err(|e| engine_err!(SOURCE, "Failed to create {} shader: {}", stage.name(), e))?;
        Ok(self.objects.borrow_mut().shaders.insert(shader))
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        if let Some(shader) = self.shader(shader) {
            unsafe { self.gl.shader_source(shader, source) }
        }
    }

    fn compile_shader(&self, shader: ShaderId) {
        if let Some(shader) = self.shader(shader) {
            unsafe { self.gl.compile_shader(shader) }
        }
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        self.shader(shader)
            .map(|shader| unsafe { self.gl.get_shader_compile_status(shader) })
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        self.shader(shader)
            .map(|shader| unsafe { self.gl.get_shader_info_log(shader) })
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderId) {
        if let Some(shader) = self.objects.borrow_mut().shaders.remove(shader) {
            unsafe { self.gl.delete_shader(shader) }
        }
    }

    fn create_program(&self) -> Result<ProgramId> {
        let program = unsafe { self.gl.create_program() }
            .map_err(|e| engine_err!(SOURCE, "Failed to create program: {}", e))?;
        Ok(self.objects.borrow_mut().programs.insert(program))
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        if let (Some(program), Some(shader)) = (self.program(program), self.shader(shader)) {
            unsafe { self.gl.attach_shader(program, shader) }
        }
    }

    fn link_program(&self, program: ProgramId) {
        if let Some(program) = self.program(program) {
            unsafe { self.gl.link_program(program) }
        }
    }

    fn program_link_status(&self, program: ProgramId) -> bool {
        self.program(program)
            .map(|program| unsafe { self.gl.get_program_link_status(program) })
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        self.program(program)
            .map(|program| unsafe { self.gl.get_program_info_log(program) })
            .unwrap_or_default()
    }

    fn use_program(&self, program: Option<ProgramId>) {
        let program = program.and_then(|id| self.program(id));
        unsafe { self.gl.use_program(program) }
    }

    fn delete_program(&self, program: ProgramId) {
        let mut objects = self.objects.borrow_mut();
        if let Some(locations) = objects.program_uniforms.remove(&program) {
            for location in locations {
                objects.uniform_locations.remove(location);
            }
        }
        if let Some(native) = objects.programs.remove(program) {
            unsafe { self.gl.delete_program(native) }
        }
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        let program = self.program(program)?;
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let native = self.program(program)?;
        let location = unsafe { self.gl.get_uniform_location(native, name) }?;

        let mut objects = self.objects.borrow_mut();
        let id = objects.uniform_locations.insert(location);
        objects.program_uniforms.entry(program).or_default().push(id);
        Some(id)
    }

    // ===== UNIFORMS =====

    fn uniform_1_i32(&self, location: UniformLocation, value: i32) {
        let location = self.uniform(location);
        unsafe { self.gl.uniform_1_i32(location.as_ref(), value) }
    }

    fn uniform_1_f32(&self, location: UniformLocation, value: f32) {
        let location = self.uniform(location);
        unsafe { self.gl.uniform_1_f32(location.as_ref(), value) }
    }

    fn uniform_1_f32_slice(&self, location: UniformLocation, values: &[f32]) {
        let location = self.uniform(location);
        unsafe { self.gl.uniform_1_f32_slice(location.as_ref(), values) }
    }

    fn uniform_2_f32_slice(&self, location: UniformLocation, values: &[f32]) {
        let location = self.uniform(location);
        unsafe { self.gl.uniform_2_f32_slice(location.as_ref(), values) }
    }

    fn uniform_3_f32_slice(&self, location: UniformLocation, values: &[f32]) {
        let location = self.uniform(location);
        unsafe { self.gl.uniform_3_f32_slice(location.as_ref(), values) }
    }

    fn uniform_4_f32_slice(&self, location: UniformLocation, values: &[f32]) {
        let location = self.uniform(location);
        unsafe { self.gl.uniform_4_f32_slice(location.as_ref(), values) }
    }

    fn uniform_matrix_4_f32_slice(&self, location: UniformLocation, transpose: bool, values: &[f32]) {
        let location = self.uniform(location);
        unsafe { self.gl.uniform_matrix_4_f32_slice(location.as_ref(), transpose, values) }
    }

    // ===== DRAWING =====

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(topology_to_gl(topology), first, count) }
    }

    fn draw_elements(&self, topology: Topology, count: i32, index_type: ScalarType, offset: i32) {
        unsafe {
            self.gl.draw_elements(topology_to_gl(topology), count, scalar_type_to_gl(index_type), offset)
        }
    }

    // ===== FRAMEBUFFERS =====

    fn create_framebuffer(&self) -> Result<FramebufferId> {
        let framebuffer = unsafe { self.gl.create_framebuffer() }
            .map_err(|e| engine_err!(SOURCE, "Failed to create framebuffer: {}", e))?;
        Ok(self.objects.borrow_mut().framebuffers.insert(framebuffer))
    }

    fn bind_framebuffer(&self, framebuffer: Option<FramebufferId>) {
        let framebuffer = framebuffer.and_then(|id| self.framebuffer(id));
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, framebuffer) }
    }

    fn framebuffer_texture_2d(&self, texture: Option<TextureId>) {
        let texture = texture.and_then(|id| self.texture(id));
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                texture,
                0,
            )
        }
    }

    fn delete_framebuffer(&self, framebuffer: FramebufferId) {
        if let Some(framebuffer) = self.objects.borrow_mut().framebuffers.remove(framebuffer) {
            unsafe { self.gl.delete_framebuffer(framebuffer) }
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear_color(&self, color: [f32; 4]) {
        unsafe {
            self.gl.clear_color(color[0], color[1], color[2], color[3]);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }
}

#[cfg(test)]
#[path = "glow_context_tests.rs"]
mod tests;
