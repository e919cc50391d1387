//! Frameworks that need an ahead-of-time build step.
//!
//! These previews show an informational notice with the escaped source instead
//! of executing anything.

use crate::document::{render, DocumentContext};
use crate::escape::html_escape;
use crate::strategy::{CompileError, GenerateContext};

pub const SVELTE_NOTICE: &str = "Svelte compilation requires a dedicated build step. \
     Showing the component source instead of a live preview.";

pub const ANGULAR_NOTICE: &str = "Angular compilation requires the Angular CLI build step. \
     Showing the component source instead of a live preview.";

fn notice(title: &str, label: &str, message: &str, code: &str) -> Result<String, CompileError> {
    let context = DocumentContext::new(title, label)
        .with_message(message)
        .with_code(html_escape(code));

    render("unsupported.html", &context)
}

pub fn generate_svelte(ctx: &GenerateContext<'_>) -> Result<String, CompileError> {
    notice("Svelte Preview", "Svelte", SVELTE_NOTICE, ctx.code)
}

pub fn generate_angular(ctx: &GenerateContext<'_>) -> Result<String, CompileError> {
    notice("Angular Preview", "Angular", ANGULAR_NOTICE, ctx.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipview_detect::Classification;

    #[test]
    fn svelte_source_is_escaped() {
        let code = "<script>\n  let count = 0;\n</script>\n<button on:click={() => count++}>{count}</button>";
        let ctx = GenerateContext::new(code, Classification::SVELTE);

        let html = generate_svelte(&ctx).unwrap();

        assert!(html.contains(SVELTE_NOTICE));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;button on:click={() =&gt; count++}&gt;"));
        assert!(!html.contains("let count = 0;\n</script>"));
        assert!(!html.contains("svelte@3/compiler.js"));
    }

    #[test]
    fn angular_shows_notice() {
        let code = "@Component({ selector: 'app-root', template: '<h1>Hi</h1>' })\nexport class AppComponent {}";
        let ctx = GenerateContext::new(code, Classification::ANGULAR);

        let html = generate_angular(&ctx).unwrap();

        assert!(html.contains("<title>Angular Preview</title>"));
        assert!(html.contains(ANGULAR_NOTICE));
        assert!(html.contains("template: &#x27;&lt;h1&gt;Hi&lt;/h1&gt;&#x27;"));
    }
}
