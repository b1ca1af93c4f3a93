/// Shader reflection from source text
///
/// Attribute and uniform declarations are found by scanning the
/// (preprocessed, comment-stripped) source statement by statement, then
/// their locations are queried from the linked program.
///
/// Declarations are recognised in the single-declarator form
/// `[layout(...)] <qualifier> [precision] <type> <name>[ [size] ];`.
/// Multi-declarator statements and interface blocks are not reflected.

use rustc_hash::FxHashMap;

use crate::context::{
    GraphicsContext, GlGeneration, ProgramId, ShaderStage, ShaderStageFlags, UniformLocation,
};
use crate::error::{Error, Result};
use crate::{engine_bail, engine_debug, engine_err};

const SOURCE: &str = "galaxy3d::gl::reflection";

// ===== TYPES =====

/// Declared type of a shader variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GlslType {
    Int,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
    Sampler2D,
    /// Any other type word, kept verbatim
    Other(String),
}

impl GlslType {
    /// Parse a declared type word
    pub fn from_glsl(word: &str) -> Self {
        match word {
            "int" => GlslType::Int,
            "float" => GlslType::Float,
            "vec2" => GlslType::Vec2,
            "vec3" => GlslType::Vec3,
            "vec4" => GlslType::Vec4,
            "mat4" => GlslType::Mat4,
            w if w.eq_ignore_ascii_case("sampler2d") => GlslType::Sampler2D,
            other => GlslType::Other(other.to_string()),
        }
    }

    /// Type word as written in GLSL
    pub fn as_str(&self) -> &str {
        match self {
            GlslType::Int => "int",
            GlslType::Float => "float",
            GlslType::Vec2 => "vec2",
            GlslType::Vec3 => "vec3",
            GlslType::Vec4 => "vec4",
            GlslType::Mat4 => "mat4",
            GlslType::Sampler2D => "sampler2D",
            GlslType::Other(word) => word,
        }
    }
}

/// Reflected attribute or uniform
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderVariable<L> {
    pub name: String,
    pub declared_type: GlslType,
    pub location: L,
    /// Stages that declare this variable
    pub stages: ShaderStageFlags,
}

/// Reflected vertex attribute
///
/// `location` is `None` when the linker optimised the attribute out.
pub type AttributeInfo = ShaderVariable<Option<u32>>;

/// Reflected uniform
pub type UniformInfo = ShaderVariable<UniformLocation>;

/// Declaration found in source (before location lookup)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub type_word: String,
    pub name: String,
}

/// Reflection result for one linked program
#[derive(Debug, Clone, Default)]
pub struct ProgramReflection {
    pub attributes: FxHashMap<String, AttributeInfo>,
    pub uniforms: FxHashMap<String, UniformInfo>,
    /// `sampler2D` uniforms in first-declaration order (index = texture unit)
    pub sampler_names: Vec<String>,
}

// ===== SOURCE HELPERS =====

/// Truncate every line at its first `//`
///
/// Block comments are not handled.
pub fn strip_comments(source: &str) -> String {
    source
        .split('\n')
        .map(|line| match line.find("//") {
            Some(index) => &line[..index],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reject `#version 300 es` sources on an `Es2` context
pub fn check_generation(generation: GlGeneration, vertex_source: &str, fragment_source: &str) -> Result<()> {
    const ES3_VERSION: &str = "#version 300 es";

    if generation == GlGeneration::Es2
        && (vertex_source.contains(ES3_VERSION) || fragment_source.contains(ES3_VERSION))
    {
        engine_bail!(SOURCE, Error::GenerationMismatch(format!(
            "Es3 context required for shader source containing '{}'", ES3_VERSION
        )));
    }
    Ok(())
}

/// Split `source` into statements terminated by `;`
///
/// Directive lines are dropped. Text ending at `{` or `}` (function headers,
/// block openers, block tails) is not a statement.
fn statements(source: &str) -> Vec<&str> {
    let mut result = Vec::new();
    for chunk in source.split(|c| c == '{' || c == '}') {
        let mut parts: Vec<&str> = chunk.split(';').collect();
        // the tail of a chunk was terminated by a brace
        parts.pop();
        result.extend(parts);
    }
    result
}

fn drop_directives(source: &str) -> String {
    source
        .split('\n')
        .map(|line| if line.trim_start().starts_with('#') { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse one statement qualified by one of `qualifiers`
///
/// The qualifier may follow any other text of the statement (block comment
/// remnants, bare macros, `layout(...)`); the type and name are the last two
/// words after it.
fn parse_declaration(statement: &str, qualifiers: &[&str]) -> Option<Declaration> {
    let words: Vec<&str> = statement.split_whitespace().collect();
    let start = words.iter().rposition(|word| qualifiers.contains(word))?;
    let body = words[start + 1..].join(" ");
    if body.contains(',') {
        return None;
    }
    // array size is not part of the name
    let body = match body.find('[') {
        Some(index) => &body[..index],
        None => body.as_str(),
    };

    let words: Vec<&str> = body.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }

    let name = words[words.len() - 1];
    let type_word = words[words.len() - 2];
    if !is_identifier(name) || !is_identifier(type_word) {
        return None;
    }

    Some(Declaration {
        type_word: type_word.to_string(),
        name: name.to_string(),
    })
}

/// Attribute declarations of a vertex shader
///
/// `Es2` accepts `attribute`; `Es3` accepts `in` and `attribute`.
pub fn scan_attributes(source: &str, generation: GlGeneration) -> Vec<Declaration> {
    let qualifiers: &[&str] = match generation {
        GlGeneration::Es2 => &["attribute"],
        GlGeneration::Es3 => &["in", "attribute"],
    };
    let source = drop_directives(source);
    statements(&source)
        .into_iter()
        .filter_map(|statement| parse_declaration(statement, qualifiers))
        .collect()
}

/// Uniform declarations of any stage
pub fn scan_uniforms(source: &str) -> Vec<Declaration> {
    let source = drop_directives(source);
    statements(&source)
        .into_iter()
        .filter_map(|statement| parse_declaration(statement, &["uniform"]))
        .collect()
}

// ===== REFLECTION =====

/// Reflect the attributes and uniforms of a linked program
///
/// # Arguments
///
/// * `context` - Graphics context owning `program`
/// * `program` - Linked program
/// * `generation` - Generation the sources target
/// * `vertex_source` / `fragment_source` - Preprocessed, comment-stripped sources
///
/// # Errors
///
/// `Error::UnresolvedUniform` if a declared uniform has no location
pub fn reflect(
    context: &dyn GraphicsContext,
    program: ProgramId,
    generation: GlGeneration,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ProgramReflection> {
    let mut reflection = ProgramReflection::default();

    for declaration in scan_attributes(vertex_source, generation) {
        let location = context.attrib_location(program, &declaration.name);
        if location.is_none() {
            engine_debug!(SOURCE, "Attribute '{}' is inactive, it will not be bound", declaration.name);
        }
        reflection.attributes.insert(declaration.name.clone(), ShaderVariable {
            name: declaration.name,
            declared_type: GlslType::from_glsl(&declaration.type_word),
            location,
            stages: ShaderStageFlags::VERTEX,
        });
    }

    let mut uniform_order: Vec<String> = Vec::new();
    for (stage, source) in [(ShaderStage::Vertex, vertex_source), (ShaderStage::Fragment, fragment_source)] {
        for declaration in scan_uniforms(source) {
            let location = context.uniform_location(program, &declaration.name)
                .ok_or_else(|| engine_err!(SOURCE, Error::UnresolvedUniform {
                    stage: stage.name(),
                    name: declaration.name.clone(),
                }))?;

            let stages = match reflection.uniforms.get(&declaration.name) {
                Some(previous) => previous.stages | stage.flag(),
                None => {
                    uniform_order.push(declaration.name.clone());
                    stage.flag()
                }
            };

            // last declaration wins
            reflection.uniforms.insert(declaration.name.clone(), ShaderVariable {
                name: declaration.name,
                declared_type: GlslType::from_glsl(&declaration.type_word),
                location,
                stages,
            });
        }
    }

    reflection.sampler_names = uniform_order
        .into_iter()
        .filter(|name| {
            reflection.uniforms.get(name)
                .is_some_and(|u| u.declared_type == GlslType::Sampler2D)
        })
        .collect();

    engine_debug!(SOURCE, "Reflected {} attributes, {} uniforms, {} samplers",
        reflection.attributes.len(), reflection.uniforms.len(), reflection.sampler_names.len());

    Ok(reflection)
}

#[cfg(test)]
#[path = "reflection_tests.rs"]
mod tests;
