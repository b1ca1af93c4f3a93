/// Shader program: compilation, reflection, per-pass binding and draw
///
/// A rendering pass always follows the same sequence:
///
/// 1. `use_program()` activates the program and resets the draw state
/// 2. `bind_attributes()` / `set_uniforms()` / `bind_textures()` (or all of
///    them at once through `PassBindings`)
/// 3. `draw()` validates the accumulated state and issues the draw call
///
/// Every per-vertex attribute buffer bound in a pass must agree on topology
/// and vertex count; per-instance buffers must agree on topology and
/// instance count.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::context::{
    GraphicsContext, InstancedArrays, ProgramId, ShaderId, ShaderStage,
    ScalarType, Topology,
};
use crate::error::{Error, Result};
use crate::resource::{DataBuffer, IndexBuffer, Texture};
use crate::shader::{
    preprocess, reflect, strip_comments, check_generation,
    AttributeInfo, UniformInfo, ProgramReflection, UniformSetter, UniformValue,
};
use crate::{engine_bail, engine_debug, engine_err, engine_error, engine_warn};

const SOURCE: &str = "galaxy3d::gl::ShaderProgram";

// ===== DESCRIPTORS =====

/// Shader program descriptor
#[derive(Debug, Clone, Default)]
pub struct ProgramDesc {
    /// Vertex shader source
    pub vertex_source: String,
    /// Fragment shader source
    pub fragment_source: String,
    /// Symbols defined for the conditional-compilation pass
    pub defines: Vec<String>,
}

/// Everything bound for one pass
#[derive(Clone, Copy, Default)]
pub struct PassBindings<'a> {
    pub attributes: &'a [(&'a str, &'a DataBuffer)],
    pub uniforms: &'a [(&'a str, UniformValue)],
    pub textures: &'a [(&'a str, &'a Texture)],
    pub index_buffer: Option<&'a IndexBuffer>,
}

// ===== DRAW STATE =====

/// Index buffer recorded for the current pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBinding {
    pub element_count: u32,
    pub index_type: ScalarType,
}

/// State accumulated between `use_program()` and `draw()`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawState {
    /// Established by the first bound buffer
    pub topology: Option<Topology>,
    /// Established by the first per-vertex buffer
    pub vertex_count: Option<u32>,
    /// Established by the first per-instance buffer
    pub instance_count: Option<u32>,
    pub index_binding: Option<IndexBinding>,
}

// ===== SHADER PROGRAM =====

/// Linked shader program with reflected attribute and uniform tables
pub struct ShaderProgram {
    context: Rc<dyn GraphicsContext>,
    program: Option<ProgramId>,
    reflection: ProgramReflection,
    draw_state: DrawState,
    instancing: Option<Rc<dyn InstancedArrays>>,
}

impl ShaderProgram {
    /// Preprocess, compile, link and reflect a program
    ///
    /// # Errors
    ///
    /// - `Error::Preprocessor` / `Error::UnterminatedConditional` from the conditional pass
    /// - `Error::GenerationMismatch` for `#version 300 es` sources on an `Es2` context
    /// - `Error::BackendError` if a native object cannot be created
    /// - `Error::LinkFailed` with the linker log
    /// - `Error::UnresolvedUniform` if a declared uniform has no location
    pub fn new(context: Rc<dyn GraphicsContext>, desc: &ProgramDesc) -> Result<Self> {
        let generation = context.generation();

        let vertex_source = preprocess(&desc.vertex_source, &desc.defines)?;
        let fragment_source = preprocess(&desc.fragment_source, &desc.defines)?;

        let vertex_stripped = strip_comments(&vertex_source);
        let fragment_stripped = strip_comments(&fragment_source);
        check_generation(generation, &vertex_stripped, &fragment_stripped)?;

        let program = compile_and_link(context.as_ref(), &vertex_source, &fragment_source)?;

        let reflection = match reflect(
            context.as_ref(),
            program,
            generation,
            &vertex_stripped,
            &fragment_stripped,
        ) {
            Ok(reflection) => reflection,
            Err(e) => {
                context.delete_program(program);
                return Err(e);
            }
        };

        let instancing = context.instanced_arrays();

        engine_debug!(SOURCE, "Program linked ({:?}, {} attributes, {} uniforms)",
            generation, reflection.attributes.len(), reflection.uniforms.len());

        Ok(Self {
            context,
            program: Some(program),
            reflection,
            draw_state: DrawState::default(),
            instancing,
        })
    }

    /// Start a pass: activate the program, reset the draw state, then bind
    /// whatever `bindings` supplies (attributes, uniforms, textures, in that order)
    pub fn use_program(&mut self, bindings: PassBindings) -> Result<()> {
        let program = self.handle()?;
        self.context.use_program(Some(program));

        self.draw_state = DrawState::default();
        if let Some(index_buffer) = bindings.index_buffer {
            index_buffer.bind()?;
            self.draw_state.index_binding = Some(IndexBinding {
                element_count: index_buffer.element_count(),
                index_type: index_buffer.index_type(),
            });
        }

        if !bindings.attributes.is_empty() {
            self.bind_attributes(bindings.attributes)?;
        }
        if !bindings.uniforms.is_empty() {
            self.set_uniforms(bindings.uniforms)?;
        }
        if !bindings.textures.is_empty() {
            self.bind_textures(bindings.textures)?;
        }
        Ok(())
    }

    /// Attach buffers to attributes by name
    ///
    /// Unknown names are skipped with a warning. A buffer for an attribute the
    /// linker optimised out still sets the pass topology and count, without
    /// any native attribute call.
    ///
    /// # Errors
    ///
    /// `Error::DrawStateMismatch` if a buffer disagrees with the pass on
    /// topology or vertex (instance) count
    pub fn bind_attributes(&mut self, attributes: &[(&str, &DataBuffer)]) -> Result<()> {
        for (name, buffer) in attributes {
            let Some(attribute) = self.reflection.attributes.get(*name) else {
                engine_warn!(SOURCE,
                    "Skipping attribute buffer provided for '{}' because the attribute was not found in the program",
                    name);
                continue;
            };

            let state = &mut self.draw_state;
            let topology = *state.topology.get_or_insert(buffer.topology());
            if topology != buffer.topology() {
                engine_bail!(SOURCE, Error::DrawStateMismatch {
                    attribute: name.to_string(),
                    property: "draw mode",
                    expected: format!("{:?}", topology),
                    actual: format!("{:?}", buffer.topology()),
                });
            }

            let (count, property) = if buffer.is_per_instance() {
                (&mut state.instance_count, "number of instances")
            } else {
                (&mut state.vertex_count, "number of vertices")
            };
            let expected = *count.get_or_insert(buffer.vertex_count());
            if expected != buffer.vertex_count() {
                engine_bail!(SOURCE, Error::DrawStateMismatch {
                    attribute: name.to_string(),
                    property,
                    expected: expected.to_string(),
                    actual: buffer.vertex_count().to_string(),
                });
            }

            // inactive attributes still drive the pass state
            if let Some(location) = attribute.location {
                buffer.bind_to_attribute(location)?;
            }
        }
        Ok(())
    }

    /// Set uniform values by name
    ///
    /// Unknown names are skipped with a warning.
    ///
    /// # Errors
    ///
    /// `Error::UnsupportedUniform` / `Error::UniformLength` if the value does
    /// not fit the declared type
    pub fn set_uniforms(&mut self, uniforms: &[(&str, UniformValue)]) -> Result<()> {
        for (name, value) in uniforms {
            let Some(uniform) = self.reflection.uniforms.get(*name) else {
                engine_warn!(SOURCE,
                    "Skipping uniform value provided for '{}' because the uniform was not found in the program",
                    name);
                continue;
            };

            let setter = UniformSetter::select(name, &uniform.declared_type, value)
                .map_err(|e| engine_err!(SOURCE, e))?;
            setter.apply(self.context.as_ref(), uniform.location);
        }
        Ok(())
    }

    /// Bind textures to samplers by name
    ///
    /// The texture unit of a sampler is its position among the program's
    /// `sampler2D` uniforms. Unknown names are skipped with a warning.
    ///
    /// # Errors
    ///
    /// `Error::UnsupportedUniform` if the named uniform is not a `sampler2D`
    pub fn bind_textures(&mut self, textures: &[(&str, &Texture)]) -> Result<()> {
        for (name, texture) in textures {
            let Some(uniform) = self.reflection.uniforms.get(*name) else {
                engine_warn!(SOURCE,
                    "Skipping texture provided for sampler '{}' because the sampler was not found in the program",
                    name);
                continue;
            };

            let Some(unit) = self.reflection.sampler_names.iter().position(|s| s == name) else {
                engine_bail!(SOURCE, Error::UnsupportedUniform {
                    name: name.to_string(),
                    glsl_type: uniform.declared_type.as_str().to_string(),
                    value: "texture".to_string(),
                });
            };

            texture.bind_to_uniform(uniform.location, unit as u32)?;
        }
        Ok(())
    }

    /// Issue the draw call for the current pass
    ///
    /// Indexed when an index buffer was supplied to `use_program()`,
    /// instanced when a per-instance buffer was bound.
    ///
    /// # Errors
    ///
    /// `Error::NoBoundAttributes` if no per-vertex attribute buffer was bound
    pub fn draw(&self) -> Result<()> {
        self.handle()?;
        let state = &self.draw_state;
        let (Some(topology), Some(vertex_count)) = (state.topology, state.vertex_count) else {
            engine_bail!(SOURCE, Error::NoBoundAttributes);
        };

        let ctx = &self.context;
        let vertex_count = draw_count(vertex_count, "vertex")?;
        let element_count = state.index_binding
            .map(|index| draw_count(index.element_count, "element"))
            .transpose()?;
        let instance_count = state.instance_count
            .map(|instances| draw_count(instances, "instance"))
            .transpose()?;

        match (instance_count, &self.instancing, state.index_binding.zip(element_count)) {
            (None, _, None) => ctx.draw_arrays(topology, 0, vertex_count),
            (None, _, Some((index, elements))) => {
                ctx.draw_elements(topology, elements, index.index_type, 0)
            }
            (Some(instances), Some(instancing), None) => {
                instancing.draw_arrays_instanced(topology, 0, vertex_count, instances)
            }
            (Some(instances), Some(instancing), Some((index, elements))) => instancing.draw_elements_instanced(
                topology,
                elements,
                index.index_type,
                0,
                instances,
            ),
            (Some(_), None, _) => {
                engine_bail!(SOURCE, Error::InitializationFailed(
                    "Instanced draw requires instanced arrays support".to_string()
                ));
            }
        }
        Ok(())
    }

    /// Release the native program (no-op when already deleted)
    pub fn delete(&mut self) {
        if let Some(program) = self.program.take() {
            self.context.delete_program(program);
        }
    }

    fn handle(&self) -> Result<ProgramId> {
        self.program.ok_or_else(|| engine_err!(SOURCE, Error::InvalidResource(
            "Shader program has been deleted".to_string()
        )))
    }

    /// Reflected attributes by name
    pub fn attributes(&self) -> &FxHashMap<String, AttributeInfo> {
        &self.reflection.attributes
    }

    /// Reflected uniforms by name
    pub fn uniforms(&self) -> &FxHashMap<String, UniformInfo> {
        &self.reflection.uniforms
    }

    /// `sampler2D` uniforms, indexed by texture unit
    pub fn sampler_names(&self) -> &[String] {
        &self.reflection.sampler_names
    }

    pub fn draw_state(&self) -> &DrawState {
        &self.draw_state
    }

    /// Native handle (None once deleted)
    pub fn id(&self) -> Option<ProgramId> {
        self.program
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.delete();
    }
}

// ===== COMPILATION =====

fn compile_stage(context: &dyn GraphicsContext, stage: ShaderStage, source: &str) -> Result<ShaderId> {
    let shader = context.create_shader(stage)
        .map_err(|e| engine_err!(SOURCE, "Could not create {} shader: {}", stage.name(), e))?;
    context.shader_source(shader, source);
    context.compile_shader(shader);

    if !context.shader_compile_status(shader) {
        engine_error!(SOURCE, "{} shader compiler log: {}",
            stage.name(), context.shader_info_log(shader));
    }
    Ok(shader)
}

/// Compile both stages and link them
///
/// A stage that fails to compile is only logged; the link then fails and
/// carries the driver's log.
fn compile_and_link(context: &dyn GraphicsContext, vertex_source: &str, fragment_source: &str) -> Result<ProgramId> {
    let vertex = compile_stage(context, ShaderStage::Vertex, vertex_source)?;
    let fragment = match compile_stage(context, ShaderStage::Fragment, fragment_source) {
        Ok(fragment) => fragment,
        Err(e) => {
            context.delete_shader(vertex);
            return Err(e);
        }
    };

    let program = match context.create_program() {
        Ok(program) => program,
        Err(e) => {
            context.delete_shader(vertex);
            context.delete_shader(fragment);
            return Err(engine_err!(SOURCE, "Could not create shader program: {}", e));
        }
    };

    context.attach_shader(program, vertex);
    context.attach_shader(program, fragment);
    context.link_program(program);

    // the program keeps attached shaders alive
    context.delete_shader(vertex);
    context.delete_shader(fragment);

    if !context.program_link_status(program) {
        let log = context.program_info_log(program);
        context.delete_program(program);
        engine_bail!(SOURCE, Error::LinkFailed(log));
    }
    Ok(program)
}

/// Narrow a draw count to the native `GLsizei`
fn draw_count(count: u32, what: &str) -> Result<i32> {
    i32::try_from(count).map_err(|_| engine_err!(SOURCE, Error::InvalidResource(
        format!("{} count {} exceeds the native draw limit", what, count)
    )))
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
