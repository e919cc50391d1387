//! TypeScript and plain JavaScript previews.

use crate::document::{render, DocumentContext};
use crate::escape::{escape_script_close, js_string_literal};
use crate::strategy::{CompileError, GenerateContext};

/// Generate a document that transpiles the snippet with the in-browser
/// TypeScript compiler and evaluates the output.
///
/// The source is embedded as a string literal, so nothing in it can end the
/// surrounding script element.
pub fn generate_typescript(ctx: &GenerateContext<'_>) -> Result<String, CompileError> {
    let context = DocumentContext::runtime("TypeScript Preview", "TypeScript", "output", ctx)
        .with_code(js_string_literal(ctx.code)?);

    render("typescript.html", &context)
}

/// Generate a document that runs the snippet as a classic script.
pub fn generate_javascript(ctx: &GenerateContext<'_>) -> Result<String, CompileError> {
    let context = DocumentContext::runtime("JavaScript Preview", "JavaScript", "output", ctx)
        .with_code(escape_script_close(ctx.code));

    render("javascript.html", &context)
}
