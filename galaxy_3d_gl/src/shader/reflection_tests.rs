use super::*;
use std::rc::Rc;
use crate::context::mock_context::MockContext;

// ============================================================================
// Helpers
// ============================================================================

const ES2_VERTEX: &str = "
attribute vec3 position; // model space
attribute vec2 uv;
uniform mat4 u_mvp;
uniform float u_scale;
varying vec2 v_uv;
void main() {
    v_uv = uv;
    gl_Position = u_mvp * vec4(position * u_scale, 1.0);
}";

const ES2_FRAGMENT: &str = "
precision mediump float;
uniform sampler2D u_color;
uniform sampler2D u_mask;
uniform vec4 u_tint;
varying vec2 v_uv;
void main() {
    gl_FragColor = texture2D(u_color, v_uv) * texture2D(u_mask, v_uv).a * u_tint;
}";

fn create_mock_context(generation: GlGeneration) -> Rc<MockContext> {
    Rc::new(MockContext::new(generation))
}

fn decl(type_word: &str, name: &str) -> Declaration {
    Declaration { type_word: type_word.to_string(), name: name.to_string() }
}

fn reflect_sources(ctx: &Rc<MockContext>, generation: GlGeneration, vertex: &str, fragment: &str) -> Result<ProgramReflection> {
    let program = ctx.create_program().unwrap();
    reflect(&**ctx, program, generation, &strip_comments(vertex), &strip_comments(fragment))
}

// ============================================================================
// GlslType tests
// ============================================================================

#[test]
fn test_glsl_type_from_word() {
    assert_eq!(GlslType::from_glsl("int"), GlslType::Int);
    assert_eq!(GlslType::from_glsl("float"), GlslType::Float);
    assert_eq!(GlslType::from_glsl("vec2"), GlslType::Vec2);
    assert_eq!(GlslType::from_glsl("vec3"), GlslType::Vec3);
    assert_eq!(GlslType::from_glsl("vec4"), GlslType::Vec4);
    assert_eq!(GlslType::from_glsl("mat4"), GlslType::Mat4);
    assert_eq!(GlslType::from_glsl("sampler2D"), GlslType::Sampler2D);
    assert_eq!(GlslType::from_glsl("SAMPLER2D"), GlslType::Sampler2D);
    assert_eq!(GlslType::from_glsl("mat3"), GlslType::Other("mat3".to_string()));
}

#[test]
fn test_glsl_type_as_str() {
    assert_eq!(GlslType::Mat4.as_str(), "mat4");
    assert_eq!(GlslType::Sampler2D.as_str(), "sampler2D");
    assert_eq!(GlslType::Other("ivec2".to_string()).as_str(), "ivec2");
}

// ============================================================================
// Source helper tests
// ============================================================================

#[test]
fn test_strip_comments() {
    let src = "uniform float a; // trailing\n// whole line\nfloat b;";
    assert_eq!(strip_comments(src), "uniform float a; \n\nfloat b;");
}

#[test]
fn test_check_generation() {
    let es3 = "#version 300 es\nin vec3 p;";
    assert!(check_generation(GlGeneration::Es3, es3, es3).is_ok());
    assert!(check_generation(GlGeneration::Es2, "attribute vec3 p;", "void main() {}").is_ok());
    assert!(matches!(
        check_generation(GlGeneration::Es2, "void main() {}", es3),
        Err(Error::GenerationMismatch(_))
    ));
}

#[test]
fn test_check_generation_ignores_commented_version() {
    let src = strip_comments("// #version 300 es\nattribute vec3 p;");
    assert!(check_generation(GlGeneration::Es2, &src, &src).is_ok());
}

// ============================================================================
// Declaration scanning tests
// ============================================================================

#[test]
fn test_scan_es2_attributes() {
    let found = scan_attributes(ES2_VERTEX, GlGeneration::Es2);
    assert_eq!(found, vec![decl("vec3", "position"), decl("vec2", "uv")]);
}

#[test]
fn test_scan_after_leading_text() {
    let src = "MY_MACRO\nuniform float u_time;\n/* header; with */ uniform /* note */ vec2 u_size;";
    assert_eq!(scan_uniforms(src), vec![decl("float", "u_time"), decl("vec2", "u_size")]);
}

#[test]
fn test_scan_es2_ignores_in_qualifier() {
    let found = scan_attributes("in vec3 position;", GlGeneration::Es2);
    assert!(found.is_empty());
}

#[test]
fn test_scan_es3_attributes() {
    let src = "#version 300 es
layout(location = 0) in vec3 position;
in highp vec2 uv;
attribute float legacy;
out vec2 v_uv;
void helper(in vec3 x) { }
void main() { v_uv = uv; }";
    let found = scan_attributes(src, GlGeneration::Es3);
    assert_eq!(found, vec![
        decl("vec3", "position"),
        decl("vec2", "uv"),
        decl("float", "legacy"),
    ]);
}

#[test]
fn test_scan_uniforms_precision_and_arrays() {
    let src = "uniform highp mat4 u_bones[32];\nuniform lowp vec4 u_colors [4];\nuniform float u_time;";
    assert_eq!(scan_uniforms(src), vec![
        decl("mat4", "u_bones"),
        decl("vec4", "u_colors"),
        decl("float", "u_time"),
    ]);
}

#[test]
fn test_scan_skips_multi_declarators_and_blocks() {
    let src = "uniform float a, b;
uniform Lights { vec4 color; } lights;
layout(std140) uniform Camera { mat4 view; };
uniform vec2 u_ok;";
    assert_eq!(scan_uniforms(src), vec![decl("vec2", "u_ok")]);
}

#[test]
fn test_scan_ignores_directive_lines() {
    let src = "#define uniform\n#pragma uniform float x;\nuniform float u_real;";
    assert_eq!(scan_uniforms(src), vec![decl("float", "u_real")]);
}

#[test]
fn test_scan_declaration_spanning_lines() {
    let src = "uniform\n    mat4\n    u_model;";
    assert_eq!(scan_uniforms(src), vec![decl("mat4", "u_model")]);
}

// ============================================================================
// Reflection tests
// ============================================================================

#[test]
fn test_reflect_legacy_attribute() {
    let ctx = create_mock_context(GlGeneration::Es2);
    let reflection = reflect_sources(&ctx, GlGeneration::Es2,
        "attribute vec3 position;\nvoid main() {}", "void main() {}").unwrap();

    assert_eq!(reflection.attributes.len(), 1);
    let position = &reflection.attributes["position"];
    assert_eq!(position.name, "position");
    assert_eq!(position.declared_type, GlslType::Vec3);
    assert_eq!(position.stages, ShaderStageFlags::VERTEX);
}

#[test]
fn test_reflect_after_block_comment_headers() {
    let ctx = create_mock_context(GlGeneration::Es2);
    let vertex = "/* Copyright (c) Example */\nattribute vec3 position;\nvoid main() {}";
    let fragment = "/* fragment stage */\nuniform mat4 proj;\nvoid main() {}";
    let reflection = reflect_sources(&ctx, GlGeneration::Es2, vertex, fragment).unwrap();

    assert_eq!(reflection.attributes["position"].declared_type, GlslType::Vec3);
    assert_eq!(reflection.uniforms["proj"].declared_type, GlslType::Mat4);
    assert_eq!(reflection.uniforms["proj"].stages, ShaderStageFlags::FRAGMENT);
}

#[test]
fn test_reflect_tables() {
    let ctx = create_mock_context(GlGeneration::Es2);
    let reflection = reflect_sources(&ctx, GlGeneration::Es2, ES2_VERTEX, ES2_FRAGMENT).unwrap();

    assert_eq!(reflection.attributes.len(), 2);
    assert_eq!(reflection.attributes["uv"].declared_type, GlslType::Vec2);
    assert_ne!(reflection.attributes["uv"].location, reflection.attributes["position"].location);

    assert_eq!(reflection.uniforms.len(), 5);
    assert_eq!(reflection.uniforms["u_mvp"].declared_type, GlslType::Mat4);
    assert_eq!(reflection.uniforms["u_mvp"].stages, ShaderStageFlags::VERTEX);
    assert_eq!(reflection.uniforms["u_tint"].declared_type, GlslType::Vec4);
    assert_eq!(reflection.uniforms["u_tint"].stages, ShaderStageFlags::FRAGMENT);
    assert_eq!(reflection.sampler_names, vec!["u_color".to_string(), "u_mask".to_string()]);
}

#[test]
fn test_reflect_is_deterministic() {
    let ctx = create_mock_context(GlGeneration::Es2);
    let first = reflect_sources(&ctx, GlGeneration::Es2, ES2_VERTEX, ES2_FRAGMENT).unwrap();
    let second = reflect_sources(&ctx, GlGeneration::Es2, ES2_VERTEX, ES2_FRAGMENT).unwrap();

    let summary = |r: &ProgramReflection| {
        let mut attributes: Vec<_> = r.attributes.values()
            .map(|a| (a.name.clone(), a.declared_type.clone(), a.location))
            .collect();
        attributes.sort_by(|a, b| a.0.cmp(&b.0));
        let mut uniforms: Vec<_> = r.uniforms.values()
            .map(|u| (u.name.clone(), u.declared_type.clone()))
            .collect();
        uniforms.sort_by(|a, b| a.0.cmp(&b.0));
        (attributes, uniforms, r.sampler_names.clone())
    };
    assert_eq!(summary(&first), summary(&second));
}

#[test]
fn test_reflect_uniform_shared_between_stages() {
    let ctx = create_mock_context(GlGeneration::Es2);
    let vertex = "uniform float u_time;\nvoid main() {}";
    let fragment = "uniform int u_time;\nvoid main() {}";
    let reflection = reflect_sources(&ctx, GlGeneration::Es2, vertex, fragment).unwrap();

    let time = &reflection.uniforms["u_time"];
    // last declaration wins
    assert_eq!(time.declared_type, GlslType::Int);
    assert_eq!(time.stages, ShaderStageFlags::VERTEX | ShaderStageFlags::FRAGMENT);
}

#[test]
fn test_reflect_sampler_order_follows_first_declaration() {
    let ctx = create_mock_context(GlGeneration::Es2);
    let vertex = "uniform sampler2D u_height;\nvoid main() {}";
    let fragment = "uniform sampler2D u_albedo;\nuniform sampler2D u_height;\nvoid main() {}";
    let reflection = reflect_sources(&ctx, GlGeneration::Es2, vertex, fragment).unwrap();

    assert_eq!(reflection.sampler_names, vec!["u_height".to_string(), "u_albedo".to_string()]);
}

#[test]
fn test_reflect_ignores_commented_declarations() {
    let ctx = create_mock_context(GlGeneration::Es2);
    let vertex = "// uniform float u_old;\nattribute vec3 position;\nvoid main() {}";
    let reflection = reflect_sources(&ctx, GlGeneration::Es2, vertex, "void main() {}").unwrap();
    assert!(reflection.uniforms.is_empty());
}

#[test]
fn test_reflect_unresolved_uniform_fails() {
    let ctx = Rc::new(MockContext::new(GlGeneration::Es2).with_inactive_uniform("u_unused"));
    let fragment = "uniform float u_unused;\nvoid main() {}";
    let result = reflect_sources(&ctx, GlGeneration::Es2, "void main() {}", fragment);

    assert_eq!(result.unwrap_err(), Error::UnresolvedUniform {
        stage: "fragment",
        name: "u_unused".to_string(),
    });
}

#[test]
fn test_reflect_records_inactive_attribute() {
    let ctx = Rc::new(MockContext::new(GlGeneration::Es3).with_inactive_attribute("unused"));
    let vertex = "#version 300 es\nin vec3 position;\nin vec4 unused;\nvoid main() {}";
    let reflection = reflect_sources(&ctx, GlGeneration::Es3, vertex, "void main() {}").unwrap();

    assert!(reflection.attributes["position"].location.is_some());
    assert_eq!(reflection.attributes["unused"].location, None);
    assert_eq!(reflection.attributes["unused"].declared_type, GlslType::Vec4);
}
