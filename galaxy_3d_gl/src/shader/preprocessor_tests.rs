use super::*;

const NO_DEFINES: [&str; 0] = [];

// ============================================================================
// Pass-through tests
// ============================================================================

#[test]
fn test_source_without_directives_is_unchanged() {
    let src = "precision mediump float;\nvoid main() {\n    gl_FragColor = vec4(1.0);\n}";
    assert_eq!(preprocess(src, &NO_DEFINES).unwrap(), src);
}

#[test]
fn test_other_directives_pass_through() {
    let src = "#version 300 es\n#extension GL_OES_standard_derivatives : enable\nx;";
    assert_eq!(preprocess(src, &NO_DEFINES).unwrap(), src);
}

#[test]
fn test_native_if_blocks_pass_through() {
    let src = "#if __VERSION__ >= 300\nin vec3 a;\n#elif 1\nb;\n#else\nattribute vec3 a;\n#endif";
    assert_eq!(preprocess(src, &NO_DEFINES).unwrap(), src);
}

#[test]
fn test_native_if_inside_skipped_block_is_blanked() {
    let src = "#ifdef A\n#if 1\nx\n#else\ny\n#endif\n#endif\nz";
    assert_eq!(preprocess(src, &NO_DEFINES).unwrap(), "\n\n\n\n\n\n\nz");
}

#[test]
fn test_ifdef_inside_native_if() {
    let src = "#if 1\n#ifdef A\na\n#else\nnot_a\n#endif\n#endif";
    assert_eq!(preprocess(src, &NO_DEFINES).unwrap(), "#if 1\n\n\n\nnot_a\n\n#endif");
}

#[test]
fn test_line_count_preserved() {
    let src = "a\n#ifdef X\nb\nc\n#else\nd\n#endif\ne\n";
    let out = preprocess(src, &NO_DEFINES).unwrap();
    assert_eq!(out.split('\n').count(), src.split('\n').count());
    assert_eq!(out, "a\n\n\n\n\nd\n\ne\n");
}

// ============================================================================
// Branch selection tests
// ============================================================================

#[test]
fn test_ifdef_else_with_define() {
    let src = "#ifdef A\nfirst\n#else\nsecond\n#endif";
    assert_eq!(preprocess(src, &["A"]).unwrap(), "\nfirst\n\n\n");
}

#[test]
fn test_ifdef_else_without_define() {
    let src = "#ifdef A\nfirst\n#else\nsecond\n#endif";
    assert_eq!(preprocess(src, &NO_DEFINES).unwrap(), "\n\n\nsecond\n");
}

#[test]
fn test_ifndef() {
    let src = "#ifndef A\nfallback\n#endif";
    assert_eq!(preprocess(src, &NO_DEFINES).unwrap(), "\nfallback\n");
    assert_eq!(preprocess(src, &["A"]).unwrap(), "\n\n");
}

#[test]
fn test_nested_blocks() {
    let src = "#ifdef A\n#ifdef B\nab\n#else\na_only\n#endif\n#endif";

    assert_eq!(preprocess(src, &["A", "B"]).unwrap(), "\n\nab\n\n\n\n");
    assert_eq!(preprocess(src, &["A"]).unwrap(), "\n\n\n\na_only\n\n");
    assert_eq!(preprocess(src, &["B"]).unwrap(), "\n\n\n\n\n\n");
}

#[test]
fn test_nested_same_symbol() {
    let src = "#ifdef A\n#ifndef A\nnever\n#endif\nalways\n#endif";
    assert_eq!(preprocess(src, &["A"]).unwrap(), "\n\n\n\nalways\n");
}

#[test]
fn test_in_source_define() {
    let src = "#define USE_FOG\n#ifdef USE_FOG\nfog\n#endif";
    assert_eq!(preprocess(src, &NO_DEFINES).unwrap(), "#define USE_FOG\n\nfog\n");
}

#[test]
fn test_define_inside_skipped_block_is_blanked() {
    let src = "#ifdef A\n#define B 1\n#endif\n#ifdef B\nb\n#endif";
    let out = preprocess(src, &NO_DEFINES).unwrap();
    assert_eq!(out.split('\n').nth(1), Some(""));
    // the symbol is still recorded
    assert_eq!(out.split('\n').nth(4), Some("b"));
}

#[test]
fn test_directives_are_case_insensitive_and_indented() {
    let src = "  #IFDEF A\nx\n  #Else\ny\n\t#ENDIF";
    assert_eq!(preprocess(src, &["A"]).unwrap(), "\nx\n\n\n");
}

#[test]
fn test_owned_defines() {
    let defines = vec!["A".to_string()];
    let src = "#ifdef A\nx\n#endif";
    assert_eq!(preprocess(src, &defines).unwrap(), "\nx\n");
}

// ============================================================================
// Error tests
// ============================================================================

#[test]
fn test_unterminated_block_fails() {
    let result = preprocess("#ifdef A\nx\n", &NO_DEFINES);
    assert_eq!(result, Err(Error::UnterminatedConditional { symbol: "A".to_string() }));
}

#[test]
fn test_unterminated_reports_innermost_symbol() {
    let result = preprocess("#ifdef A\n#ifndef B\nx\n#endif", &NO_DEFINES);
    assert_eq!(result, Err(Error::UnterminatedConditional { symbol: "A".to_string() }));

    let result = preprocess("#ifdef A\n#ifndef B\nx", &NO_DEFINES);
    assert_eq!(result, Err(Error::UnterminatedConditional { symbol: "B".to_string() }));
}

#[test]
fn test_stray_else_fails() {
    assert!(matches!(preprocess("x\n#else\ny", &NO_DEFINES), Err(Error::Preprocessor(_))));
}

#[test]
fn test_stray_endif_fails() {
    assert!(matches!(preprocess("#endif", &NO_DEFINES), Err(Error::Preprocessor(_))));
}

#[test]
fn test_ifdef_without_symbol_fails() {
    assert!(matches!(preprocess("#ifdef\nx\n#endif", &NO_DEFINES), Err(Error::Preprocessor(_))));
    assert!(matches!(preprocess("#ifndef   \nx\n#endif", &NO_DEFINES), Err(Error::Preprocessor(_))));
}

// ============================================================================
// Directive parsing tests
// ============================================================================

#[test]
fn test_parse_directive() {
    assert_eq!(parse_directive("#define FOO 1", 1).unwrap(), Directive::Define("FOO"));
    assert_eq!(parse_directive("# ifdef BAR_2", 1).unwrap(), Directive::IfDef("BAR_2"));
    assert_eq!(parse_directive("#ifndef X // comment", 1).unwrap(), Directive::IfNDef("X"));
    assert_eq!(parse_directive("#else", 1).unwrap(), Directive::Else);
    assert_eq!(parse_directive("#endif // FOO", 1).unwrap(), Directive::EndIf);
    assert_eq!(parse_directive("#define", 1).unwrap(), Directive::Text);
    assert_eq!(parse_directive("#if defined(A)", 1).unwrap(), Directive::If);
    assert_eq!(parse_directive("#version 300 es", 1).unwrap(), Directive::Text);
    assert_eq!(parse_directive("float x = 1.0; // #ifdef A", 1).unwrap(), Directive::Text);
}

#[test]
fn test_directive_keyword_ends_at_punctuation() {
    assert_eq!(parse_directive("#endif//c", 1).unwrap(), Directive::EndIf);
    assert_eq!(parse_directive("#else/* other */", 1).unwrap(), Directive::Else);
    assert_eq!(parse_directive("#if(A)", 1).unwrap(), Directive::If);
    assert_eq!(parse_directive("#endifx", 1).unwrap(), Directive::Text);
}

#[test]
fn test_comment_glued_to_directive() {
    let out = preprocess("#ifdef A\nx\n#else//c\ny\n#endif//c", &NO_DEFINES).unwrap();
    assert_eq!(out, "\n\n\ny\n");
}
