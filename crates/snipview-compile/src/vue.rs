//! Vue previews mounted with the Vue 3 global build.

use regex::Regex;
use std::sync::LazyLock;

use crate::document::{render, DocumentContext};
use crate::escape::{escape_script_close, escape_style_close, js_string_literal};
use crate::source::{strip_imports, terminate_statement};
use crate::strategy::{CompileError, GenerateContext};

/// Template used when a single-file component has no `<template>` block.
pub const PLACEHOLDER_TEMPLATE: &str = "<div>No template found</div>";

/// The parts of a single-file component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcParts {
    pub template: String,
    pub script: String,
    pub style: Option<String>,
}

// The root template spans to the last closing tag so nested templates stay inside it.
static TEMPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<template[^>]*>(.*)</template>").expect("Invalid template regex")
});

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<script[^>]*>(.*?)</script>").expect("Invalid script regex")
});

static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<style[^>]*>(.*?)</style>").expect("Invalid style regex"));

static DEFAULT_EXPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+default\s*").expect("Invalid default export regex"));

static OBJECT_EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s*\{").expect("Invalid object export regex")
});

static VUE_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s*\{([^}]*)\}\s*from\s*['"]vue['"];?[ \t]*$"#)
        .expect("Invalid vue import regex")
});

/// Split a single-file component into its blocks.
pub fn parse_sfc(code: &str) -> SfcParts {
    let block = |re: &Regex| {
        re.captures(code)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    };

    SfcParts {
        template: block(&TEMPLATE_RE).unwrap_or_else(|| PLACEHOLDER_TEMPLATE.to_string()),
        script: block(&SCRIPT_RE).unwrap_or_else(|| "export default {}".to_string()),
        style: block(&STYLE_RE).filter(|s| !s.is_empty()),
    }
}

/// Turn a component script into a `componentConfig` declaration.
///
/// Named imports from `vue` become destructurings of the global build; other
/// imports are dropped.
pub fn component_config(script: &str) -> String {
    let script = VUE_IMPORT_RE.replace_all(script, "const {$1} = Vue;");
    let script = strip_imports(&script);

    if DEFAULT_EXPORT_RE.is_match(&script) {
        let config = DEFAULT_EXPORT_RE.replace(&script, "const componentConfig = ");
        terminate_statement(config.trim())
    } else {
        format!("{}\nconst componentConfig = {{}};", script.trim())
    }
}

/// Build the mount script for a snippet.
pub fn mount_script(code: &str) -> Result<(String, Option<String>), CompileError> {
    if code.contains("<template") {
        let parts = parse_sfc(code);
        let script = format!(
            "{}\ncomponentConfig.template = {};\nVue.createApp(componentConfig).mount('#app');",
            component_config(&parts.script),
            js_string_literal(&parts.template)?
        );
        return Ok((script, parts.style));
    }

    if OBJECT_EXPORT_RE.is_match(code) {
        let script = format!(
            "{}\nVue.createApp(componentConfig).mount('#app');",
            component_config(code)
        );
        return Ok((script, None));
    }

    Ok((code.to_string(), None))
}

/// Generate a Vue preview document.
pub fn generate(ctx: &GenerateContext<'_>) -> Result<String, CompileError> {
    let (script, style) = mount_script(ctx.code)?;

    let mut context = DocumentContext::runtime("Vue Preview", "Vue", "app", ctx)
        .with_code(escape_script_close(&script));
    if let Some(style) = style {
        context = context.with_style(escape_style_close(&style));
    }

    render("vue.html", &context)
}
