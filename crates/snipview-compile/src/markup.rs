//! HTML and stylesheet previews.

use regex::Regex;
use std::sync::LazyLock;

use crate::document::{render, DocumentContext};
use crate::escape::escape_style_close;
use crate::strategy::{CompileError, GenerateContext};

static FULL_DOCUMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!doctype|<html").expect("Invalid document regex"));

/// Whether markup is already a complete document.
pub fn is_full_document(code: &str) -> bool {
    FULL_DOCUMENT_RE.is_match(code)
}

/// Complete documents pass through untouched; fragments get the envelope.
pub fn generate_html(ctx: &GenerateContext<'_>) -> Result<String, CompileError> {
    if is_full_document(ctx.code) {
        return Ok(ctx.code.to_string());
    }

    let context = DocumentContext::new("HTML Preview", "HTML").with_code(ctx.code);
    render("fragment.html", &context)
}

/// Apply the stylesheet to a fixed demo page.
///
/// Preprocessor compilers are loaded for SCSS and Less, but the source is
/// placed in the page as written.
pub fn generate_stylesheet(ctx: &GenerateContext<'_>) -> Result<String, CompileError> {
    let context = DocumentContext::new("CSS Preview", "CSS")
        .with_dependencies(ctx)
        .with_style(escape_style_close(ctx.code));

    render("stylesheet.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use snipview_detect::{Classification, Dialect};

    #[test]
    fn full_documents_pass_through() {
        let code = "<!DOCTYPE html><html><body><p>Hi</p></body></html>";
        let ctx = GenerateContext::new(code, Classification::HTML);

        assert_eq!(generate_html(&ctx).unwrap(), code);

        let code = "<html lang=\"en\"><body></body></html>";
        let ctx = GenerateContext::new(code, Classification::HTML);
        assert_eq!(generate_html(&ctx).unwrap(), code);
    }

    #[test]
    fn fragments_are_wrapped_verbatim() {
        let ctx = GenerateContext::new("<div>Hi</div>", Classification::HTML);

        let html = generate_html(&ctx).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>HTML Preview</title>"));
        assert!(html.contains("\n<div>Hi</div>\n"));
    }

    #[test]
    fn stylesheet_lands_in_head_of_demo_page() {
        let ctx = GenerateContext::new(".btn { color: red; }", Classification::stylesheet(Dialect::Css));

        let html = generate_stylesheet(&ctx).unwrap();

        assert!(html.contains("<style>\n.btn { color: red; }"));
        assert!(html.contains(r#"<button class="btn">"#));
        assert!(html.contains("my-component"));
    }

    #[test]
    fn preprocessor_dialects_load_their_compiler() {
        let ctx = GenerateContext::new(
            "$primary: #333;\n.btn { color: $primary; }",
            Classification::stylesheet(Dialect::Scss),
        );

        let html = generate_stylesheet(&ctx).unwrap();

        assert!(html.contains("sass@latest/sass.js"));
        assert!(html.contains("$primary: #333;"));
    }

    #[test]
    fn stylesheet_cannot_close_its_style() {
        let ctx = GenerateContext::new("a{}</style><script>x()</script>", Classification::stylesheet(Dialect::Css));

        let html = generate_stylesheet(&ctx).unwrap();

        assert!(html.contains(r"a{}<\/style><script>x()</script>"));
    }
}
