/// Mock GraphicsContext for unit tests (no GPU required)
///
/// Allocates handles like a real context, records every call as a `GlCall`
/// so tests can assert on the exact command stream, and can be configured to
/// simulate the situations the wrappers must handle (legacy generation,
/// missing instancing extension, inactive uniforms, link failure).

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use crate::context::{
    GraphicsContext, InstancedArrays,
    BufferId, TextureId, ShaderId, ProgramId, FramebufferId, UniformLocation,
    GlGeneration, ShaderStage, BufferTarget, BufferUsage, ScalarType, Topology,
    TextureParameter,
};
use crate::error::{Error, Result};
use crate::format::{InternalFormat, PixelType, TransferFormat};

// ============================================================================
// Recorded calls
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateBuffer(BufferId),
    BindBuffer(BufferTarget, Option<BufferId>),
    BufferData { target: BufferTarget, len: usize, usage: BufferUsage },
    DeleteBuffer(BufferId),
    EnableVertexAttribArray(u32),
    VertexAttribPointer {
        location: u32,
        size: i32,
        scalar_type: ScalarType,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    VertexAttribDivisor { location: u32, divisor: u32, extension: bool },
    CreateTexture(TextureId),
    ActiveTexture(u32),
    BindTexture(Option<TextureId>),
    TexParameter(TextureParameter),
    PixelUnpackAlignment(i32),
    TexImage2D {
        internal_format: InternalFormat,
        width: i32,
        height: i32,
        format: TransferFormat,
        data_type: PixelType,
        pixel_bytes: Option<usize>,
    },
    DeleteTexture(TextureId),
    CreateShader(ShaderStage, ShaderId),
    ShaderSource(ShaderId, String),
    CompileShader(ShaderId),
    DeleteShader(ShaderId),
    CreateProgram(ProgramId),
    AttachShader(ProgramId, ShaderId),
    LinkProgram(ProgramId),
    UseProgram(Option<ProgramId>),
    DeleteProgram(ProgramId),
    Uniform1i(UniformLocation, i32),
    Uniform1f(UniformLocation, f32),
    UniformFloats { location: UniformLocation, components: usize, values: Vec<f32> },
    UniformMatrix4 { location: UniformLocation, transpose: bool, values: Vec<f32> },
    DrawArrays { topology: Topology, first: i32, count: i32 },
    DrawElements { topology: Topology, count: i32, index_type: ScalarType, offset: i32 },
    DrawArraysInstanced {
        topology: Topology,
        first: i32,
        count: i32,
        instance_count: i32,
        extension: bool,
    },
    DrawElementsInstanced {
        topology: Topology,
        count: i32,
        index_type: ScalarType,
        offset: i32,
        instance_count: i32,
        extension: bool,
    },
    CreateFramebuffer(FramebufferId),
    BindFramebuffer(Option<FramebufferId>),
    FramebufferTexture2D(Option<TextureId>),
    DeleteFramebuffer(FramebufferId),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
}

// ============================================================================
// Mock state
// ============================================================================

#[derive(Default)]
struct MockProgram {
    attrib_locations: FxHashMap<String, u32>,
    uniform_locations: FxHashMap<String, UniformLocation>,
}

#[derive(Default)]
pub struct MockState {
    pub calls: Vec<GlCall>,
    pub instancing_queries: u32,
    buffers: SlotMap<BufferId, ()>,
    textures: SlotMap<TextureId, ()>,
    shaders: SlotMap<ShaderId, ShaderStage>,
    programs: SlotMap<ProgramId, MockProgram>,
    framebuffers: SlotMap<FramebufferId, ()>,
    uniform_locations: SlotMap<UniformLocation, String>,
}

// ============================================================================
// Mock InstancedArrays
// ============================================================================

pub struct MockInstancing {
    state: Rc<RefCell<MockState>>,
    extension: bool,
}

impl InstancedArrays for MockInstancing {
    fn vertex_attrib_divisor(&self, location: u32, divisor: u32) {
        self.state.borrow_mut().calls.push(GlCall::VertexAttribDivisor {
            location,
            divisor,
            extension: self.extension,
        });
    }

    fn draw_arrays_instanced(&self, topology: Topology, first: i32, count: i32, instance_count: i32) {
        self.state.borrow_mut().calls.push(GlCall::DrawArraysInstanced {
            topology,
            first,
            count,
            instance_count,
            extension: self.extension,
        });
    }

    fn draw_elements_instanced(
        &self,
        topology: Topology,
        count: i32,
        index_type: ScalarType,
        offset: i32,
        instance_count: i32,
    ) {
        self.state.borrow_mut().calls.push(GlCall::DrawElementsInstanced {
            topology,
            count,
            index_type,
            offset,
            instance_count,
            extension: self.extension,
        });
    }
}

// ============================================================================
// Mock GraphicsContext
// ============================================================================

pub struct MockContext {
    state: Rc<RefCell<MockState>>,
    generation: GlGeneration,
    instancing_extension: bool,
    inactive_uniforms: FxHashSet<String>,
    inactive_attributes: FxHashSet<String>,
    fail_compile: bool,
    fail_link: bool,
    fail_create: bool,
}

impl MockContext {
    /// New mock context; `Es2` contexts expose the instancing extension by default
    pub fn new(generation: GlGeneration) -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::default())),
            generation,
            instancing_extension: true,
            inactive_uniforms: FxHashSet::default(),
            inactive_attributes: FxHashSet::default(),
            fail_compile: false,
            fail_link: false,
            fail_create: false,
        }
    }

    pub fn without_instancing_extension(mut self) -> Self {
        self.instancing_extension = false;
        self
    }

    pub fn with_inactive_uniform(mut self, name: &str) -> Self {
        self.inactive_uniforms.insert(name.to_string());
        self
    }

    pub fn with_inactive_attribute(mut self, name: &str) -> Self {
        self.inactive_attributes.insert(name.to_string());
        self
    }

    pub fn with_compile_failure(mut self) -> Self {
        self.fail_compile = true;
        self
    }

    pub fn with_link_failure(mut self) -> Self {
        self.fail_link = true;
        self
    }

    pub fn with_creation_failure(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Snapshot of every recorded call
    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    /// Forget recorded calls (handles stay alive)
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// How many times `instanced_arrays()` was queried
    pub fn instancing_queries(&self) -> u32 {
        self.state.borrow().instancing_queries
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn live_textures(&self) -> usize {
        self.state.borrow().textures.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_framebuffers(&self) -> usize {
        self.state.borrow().framebuffers.len()
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn check_create(&self, what: &str) -> Result<()> {
        if self.fail_create {
            return Err(Error::BackendError(format!("Could not create {}", what)));
        }
        Ok(())
    }
}

impl GraphicsContext for MockContext {
    fn generation(&self) -> GlGeneration {
        self.generation
    }

    fn instanced_arrays(&self) -> Option<Rc<dyn InstancedArrays>> {
        self.state.borrow_mut().instancing_queries += 1;
        let extension = match self.generation {
            GlGeneration::Es3 => false,
            GlGeneration::Es2 if self.instancing_extension => true,
            GlGeneration::Es2 => return None,
        };
        Some(Rc::new(MockInstancing { state: self.state.clone(), extension }))
    }

    // ===== BUFFERS =====

    fn create_buffer(&self) -> Result<BufferId> {
        self.check_create("buffer")?;
        let id = self.state.borrow_mut().buffers.insert(());
        self.record(GlCall::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        self.record(GlCall::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        self.record(GlCall::BufferData { target, len: data.len(), usage });
    }

    fn delete_buffer(&self, buffer: BufferId) {
        self.state.borrow_mut().buffers.remove(buffer);
        self.record(GlCall::DeleteBuffer(buffer));
    }

    // ===== VERTEX ATTRIBUTES =====

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.record(GlCall::EnableVertexAttribArray(location));
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
        self.record(GlCall::VertexAttribPointer {
            location,
            size,
            scalar_type,
            normalized,
            stride,
            offset,
        });
    }

    // ===== TEXTURES =====

    fn create_texture(&self) -> Result<TextureId> {
        self.check_create("texture")?;
        let id = self.state.borrow_mut().textures.insert(());
        self.record(GlCall::CreateTexture(id));
        Ok(id)
    }

    fn active_texture(&self, unit: u32) {
        self.record(GlCall::ActiveTexture(unit));
    }

    fn bind_texture(&self, texture: Option<TextureId>) {
        self.record(GlCall::BindTexture(texture));
    }

    fn tex_parameter(&self, parameter: TextureParameter) {
        self.record(GlCall::TexParameter(parameter));
    }

    fn pixel_unpack_alignment(&self, alignment: i32) {
        self.record(GlCall::PixelUnpackAlignment(alignment));
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
        self.record(GlCall::TexImage2D {
            internal_format,
            width,
            height,
            format,
            data_type,
            pixel_bytes: pixels.map(|p| p.len()),
        });
    }

    fn delete_texture(&self, texture: TextureId) {
        self.state.borrow_mut().textures.remove(texture);
        self.record(GlCall::DeleteTexture(texture));
    }

    // ===== SHADERS AND PROGRAMS =====

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId> {
        self.check_create("shader")?;
        let id = self.state.borrow_mut().shaders.insert(stage);
        self.record(GlCall::CreateShader(stage, id));
        Ok(id)
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        self.record(GlCall::ShaderSource(shader, source.to_string()));
    }

    fn compile_shader(&self, shader: ShaderId) {
        self.record(GlCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, _shader: ShaderId) -> bool {
        !self.fail_compile
    }

    fn shader_info_log(&self, _shader: ShaderId) -> String {
        if self.fail_compile {
            "ERROR: 0:1: mock compile error".to_string()
        } else {
            String::new()
        }
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.state.borrow_mut().shaders.remove(shader);
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<ProgramId> {
        self.check_create("program")?;
        let id = self.state.borrow_mut().programs.insert(MockProgram::default());
        self.record(GlCall::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.record(GlCall::AttachShader(program, shader));
    }

    fn link_program(&self, program: ProgramId) {
        self.record(GlCall::LinkProgram(program));
    }

    fn program_link_status(&self, _program: ProgramId) -> bool {
        !self.fail_link && !self.fail_compile
    }

    fn program_info_log(&self, _program: ProgramId) -> String {
        if self.fail_link || self.fail_compile {
            "mock link error".to_string()
        } else {
            String::new()
        }
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.record(GlCall::UseProgram(program));
    }

    fn delete_program(&self, program: ProgramId) {
        self.state.borrow_mut().programs.remove(program);
        self.record(GlCall::DeleteProgram(program));
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        if self.inactive_attributes.contains(name) {
            return None;
        }
        let mut state = self.state.borrow_mut();
        let entry = state.programs.get_mut(program)?;
        let next = entry.attrib_locations.len() as u32;
        Some(*entry.attrib_locations.entry(name.to_string()).or_insert(next))
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        if self.inactive_uniforms.contains(name) {
            return None;
        }
        let mut state = self.state.borrow_mut();
        if let Some(location) = state.programs.get(program)?.uniform_locations.get(name) {
            return Some(*location);
        }
        let location = state.uniform_locations.insert(name.to_string());
        state.programs.get_mut(program)?.uniform_locations.insert(name.to_string(), location);
        Some(location)
    }

    // ===== UNIFORMS =====

    fn uniform_1_i32(&self, location: UniformLocation, value: i32) {
        self.record(GlCall::Uniform1i(location, value));
    }

    fn uniform_1_f32(&self, location: UniformLocation, value: f32) {
        self.record(GlCall::Uniform1f(location, value));
    }

    fn uniform_1_f32_slice(&self, location: UniformLocation, values: &[f32]) {
        self.record(GlCall::UniformFloats { location, components: 1, values: values.to_vec() });
    }

    fn uniform_2_f32_slice(&self, location: UniformLocation, values: &[f32]) {
        self.record(GlCall::UniformFloats { location, components: 2, values: values.to_vec() });
    }

    fn uniform_3_f32_slice(&self, location: UniformLocation, values: &[f32]) {
        self.record(GlCall::UniformFloats { location, components: 3, values: values.to_vec() });
    }

    fn uniform_4_f32_slice(&self, location: UniformLocation, values: &[f32]) {
        self.record(GlCall::UniformFloats { location, components: 4, values: values.to_vec() });
    }

    fn uniform_matrix_4_f32_slice(&self, location: UniformLocation, transpose: bool, values: &[f32]) {
        self.record(GlCall::UniformMatrix4 { location, transpose, values: values.to_vec() });
    }

    // ===== DRAWING =====

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        self.record(GlCall::DrawArrays { topology, first, count });
    }

    fn draw_elements(&self, topology: Topology, count: i32, index_type: ScalarType, offset: i32) {
        self.record(GlCall::DrawElements { topology, count, index_type, offset });
    }

    // ===== FRAMEBUFFERS =====

    fn create_framebuffer(&self) -> Result<FramebufferId> {
        self.check_create("framebuffer")?;
        let id = self.state.borrow_mut().framebuffers.insert(());
        self.record(GlCall::CreateFramebuffer(id));
        Ok(id)
    }

    fn bind_framebuffer(&self, framebuffer: Option<FramebufferId>) {
        self.record(GlCall::BindFramebuffer(framebuffer));
    }

    fn framebuffer_texture_2d(&self, texture: Option<TextureId>) {
        self.record(GlCall::FramebufferTexture2D(texture));
    }

    fn delete_framebuffer(&self, framebuffer: FramebufferId) {
        self.state.borrow_mut().framebuffers.remove(framebuffer);
        self.record(GlCall::DeleteFramebuffer(framebuffer));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn clear_color(&self, color: [f32; 4]) {
        self.record(GlCall::ClearColor(color));
    }
}
