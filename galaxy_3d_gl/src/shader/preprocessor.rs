/// Conditional-compilation pass run on shader source before native compilation
///
/// Handles `#define`, `#ifdef`, `#ifndef`, `#else` and `#endif`. Conditional
/// directives are replaced by empty lines and lines inside a branch that is
/// not taken are blanked, so the output has exactly as many lines as the
/// input and driver error messages keep pointing at the right line. Every
/// other directive (`#version`, `#extension`, ...) is left to the native
/// compiler. `#if` blocks are tracked only so that their `#else`/`#endif`
/// reach the native compiler untouched.

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::engine_err;

const SOURCE: &str = "galaxy3d::gl::preprocess";

/// One open `#ifdef` / `#ifndef` block
#[derive(Debug)]
struct OpenBlock<'a> {
    symbol: &'a str,
    branch_taken: bool,
    /// Opened by `#if`, resolved by the native compiler
    native: bool,
}

#[derive(Debug, PartialEq)]
enum Directive<'a> {
    Define(&'a str),
    IfDef(&'a str),
    IfNDef(&'a str),
    If,
    Else,
    EndIf,
    Text,
}

/// Resolve conditional blocks in `source`
///
/// # Arguments
///
/// * `source` - Shader source text
/// * `defines` - Symbols defined before the first line (like `-D` on a C compiler)
///
/// # Errors
///
/// - `Error::UnterminatedConditional` if a block is still open at the end of input
/// - `Error::Preprocessor` for `#else`/`#endif` without an open block, or
///   `#ifdef`/`#ifndef` without a symbol
///
/// # Example
///
/// ```
/// use galaxy_3d_gl::galaxy3d::shader::preprocess;
///
/// let src = "#ifdef FOG\nfog();\n#else\nnofog();\n#endif";
/// let out = preprocess(src, &["FOG"]).unwrap();
/// assert_eq!(out, "\nfog();\n\n\n");
/// ```
pub fn preprocess<S: AsRef<str>>(source: &str, defines: &[S]) -> Result<String> {
    let mut symbols: FxHashSet<&str> = defines.iter().map(|d| d.as_ref()).collect();
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut output: Vec<&str> = Vec::new();

    for (index, line) in source.split('\n').enumerate() {
        let line_number = index + 1;
        match parse_directive(line, line_number)? {
            Directive::IfDef(symbol) => {
                stack.push(OpenBlock { symbol, branch_taken: symbols.contains(symbol), native: false });
                output.push("");
            }
            Directive::IfNDef(symbol) => {
                stack.push(OpenBlock { symbol, branch_taken: !symbols.contains(symbol), native: false });
                output.push("");
            }
            Directive::If => {
                output.push(if all_taken(&stack) { line } else { "" });
                stack.push(OpenBlock { symbol: "#if", branch_taken: true, native: true });
            }
            Directive::Else => {
                let block = stack.last_mut().ok_or_else(|| engine_err!(SOURCE, Error::Preprocessor(
                    format!("line {}: #else without #ifdef/#ifndef", line_number)
                )))?;
                if block.native {
                    output.push(if all_taken(&stack) { line } else { "" });
                } else {
                    block.branch_taken = !block.branch_taken;
                    output.push("");
                }
            }
            Directive::EndIf => {
                let block = stack.pop().ok_or_else(|| engine_err!(SOURCE, Error::Preprocessor(
                    format!("line {}: #endif without #ifdef/#ifndef", line_number)
                )))?;
                let keep = block.native && all_taken(&stack);
                output.push(if keep { line } else { "" });
            }
            Directive::Define(symbol) => {
                symbols.insert(symbol);
                output.push(if all_taken(&stack) { line } else { "" });
            }
            Directive::Text => {
                output.push(if all_taken(&stack) { line } else { "" });
            }
        }
    }

    if let Some(block) = stack.iter().rev().find(|block| !block.native) {
        return Err(engine_err!(SOURCE, Error::UnterminatedConditional {
            symbol: block.symbol.to_string(),
        }));
    }

    Ok(output.join("\n"))
}

fn all_taken(stack: &[OpenBlock]) -> bool {
    stack.iter().all(|block| block.branch_taken)
}

fn parse_directive(line: &str, line_number: usize) -> Result<Directive<'_>> {
    let Some(rest) = line.trim_start().strip_prefix('#') else {
        return Ok(Directive::Text);
    };
    let rest = rest.trim_start();
    let keyword_end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let (keyword, tail) = rest.split_at(keyword_end);

    let directive = match keyword.to_ascii_lowercase().as_str() {
        // A #define without a name is left for the native compiler to reject
        "define" => symbol_of(tail).map_or(Directive::Text, Directive::Define),
        "ifdef" => Directive::IfDef(require_symbol(tail, "#ifdef", line_number)?),
        "ifndef" => Directive::IfNDef(require_symbol(tail, "#ifndef", line_number)?),
        "if" => Directive::If,
        "else" => Directive::Else,
        "endif" => Directive::EndIf,
        _ => Directive::Text,
    };
    Ok(directive)
}

fn symbol_of(tail: &str) -> Option<&str> {
    let tail = tail.trim_start();
    let end = tail
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(tail.len());
    if end == 0 {
        None
    } else {
        Some(&tail[..end])
    }
}

fn require_symbol<'a>(tail: &'a str, directive: &str, line_number: usize) -> Result<&'a str> {
    symbol_of(tail).ok_or_else(|| engine_err!(SOURCE, Error::Preprocessor(
        format!("line {}: {} without a symbol", line_number, directive)
    )))
}

#[cfg(test)]
#[path = "preprocessor_tests.rs"]
mod tests;
