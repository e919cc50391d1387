//! Snippet to preview document compilation.

use tracing::{debug, warn};

use snipview_detect::{detect, Classification, CompilationType};

use crate::document::{render, DocumentContext, FALLBACK_ERROR_DOCUMENT};
use crate::escape::html_escape;
use crate::strategy::{Generator, GenerateContext, Preview};
use crate::{markup, react, script, unsupported, vue};

/// The generator responsible for a compilation type.
pub fn generator_for(compilation_type: CompilationType) -> Generator {
    match compilation_type {
        CompilationType::BabelReact => react::generate,
        CompilationType::VueCompiler => vue::generate,
        CompilationType::TypeScript => script::generate_typescript,
        CompilationType::JavaScript => script::generate_javascript,
        CompilationType::Html => markup::generate_html,
        CompilationType::Css | CompilationType::Scss | CompilationType::Less => {
            markup::generate_stylesheet
        }
        CompilationType::SvelteCompiler => unsupported::generate_svelte,
        CompilationType::TypeScriptAngular => unsupported::generate_angular,
    }
}

/// Compile a snippet into a self-contained preview document.
///
/// Detects the classification when none is given. Never fails: assembly
/// errors are rendered as an error document.
pub fn compile(code: &str, classification: Option<&Classification>) -> String {
    compile_preview(code, classification).html
}

/// Compile a snippet and report what was used to build the document.
pub fn compile_preview(code: &str, classification: Option<&Classification>) -> Preview {
    let classification = classification.copied().unwrap_or_else(|| detect(code));

    debug!(
        compilation_type = %classification.compilation_type,
        bytes = code.len(),
        "Compiling snippet"
    );

    preview_with(code, classification, generator_for(classification.compilation_type))
}

/// Run one generator, turning a failure into an error document.
fn preview_with(code: &str, classification: Classification, generate: Generator) -> Preview {
    let ctx = GenerateContext::new(code, classification);

    let (html, failed) = match generate(&ctx) {
        Ok(html) => (html, false),
        Err(e) => {
            warn!(compilation_type = %ctx.compilation_type(), "Preview generation failed: {}", e);
            (error_document(&e.to_string()), true)
        }
    };

    let component_name = (ctx.compilation_type() == CompilationType::BabelReact)
        .then(|| react::detect_component_name(code));

    Preview {
        classification,
        html,
        dependencies: ctx.dependencies.iter().map(|d| d.to_string()).collect(),
        component_name,
        failed,
    }
}

/// Render an error document for a message.
pub fn error_document(message: &str) -> String {
    let context = DocumentContext::new("Preview error", "Preview error").with_message(html_escape(message));

    render("error.html", &context).unwrap_or_else(|e| {
        warn!("Error document failed to render: {}", e);
        FALLBACK_ERROR_DOCUMENT.to_string()
    })
}
