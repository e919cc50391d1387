//! React/JSX previews rendered in the browser with Babel.

use regex::Regex;
use std::sync::LazyLock;

use crate::document::{render, DocumentContext};
use crate::escape::escape_script_close;
use crate::source::{collapse_blank_lines, strip_imports};
use crate::strategy::{CompileError, GenerateContext};

/// Identifier used when no component declaration is recognized.
pub const PLACEHOLDER_COMPONENT: &str = "Component";

/// Conventional component names tried when the detected one is not defined.
pub const FALLBACK_COMPONENTS: &[&str] = &["App", "MyComponent", "Component", "Main", "Index"];

/// A React snippet prepared for in-browser transpilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactSource {
    /// Cleaned code with the component exposed as a global
    pub code: String,

    /// Best-guess name of the component to render
    pub component_name: String,
}

// Ordered name rules. Best effort: unconventional code can pick the wrong name.
static COMPONENT_NAME_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"function\s+([A-Z]\w*)\s*\(",
        r"const\s+([A-Z]\w*)\s*=\s*(?:async\s*)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*=>",
        r"export\s+default\s+function\s+([A-Z]\w*)",
        r"export\s+default\s+([A-Z]\w*)",
        r"class\s+([A-Z]\w*)\s+extends\s+(?:React\.)?(?:Pure)?Component\b",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid component name regex"))
    .collect()
});

static DEFAULT_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s+(async\s+)?function\s+(\w+)")
        .expect("Invalid default function regex")
});

static DEFAULT_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s+class\s+(\w+)").expect("Invalid default class regex")
});

static DEFAULT_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+default\s+\w+\s*;?[ \t]*$").expect("Invalid default export regex")
});

static EXPORT_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*export\s*\{[^}]*\}\s*(?:from\s*['"][^'"]*['"])?\s*;?[ \t]*$"#)
        .expect("Invalid export list regex")
});

// The UMD builds expose hooks and helpers only on the `React` and `ReactDOM` globals
static RUNTIME_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*import\s+(?:[\w$]+\s*,\s*)?\{([^}]*)\}\s*from\s*['"](react|react-dom|react-dom/client)['"];?[ \t]*$"#,
    )
    .expect("Invalid react import regex")
});

static NAMED_EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)export\s+((?:async\s+)?function|const|let|var|class)\b")
        .expect("Invalid named export regex")
});

/// Best-guess name of the top-level component in a React snippet.
///
/// Tries, in order: a capitalized function declaration, a capitalized arrow
/// function constant, a default-exported function, a default-exported
/// identifier and a class component. Falls back to [`PLACEHOLDER_COMPONENT`].
pub fn detect_component_name(code: &str) -> String {
    COMPONENT_NAME_RULES
        .iter()
        .find_map(|rule| rule.captures(code).and_then(|c| c.get(1)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| PLACEHOLDER_COMPONENT.to_string())
}

/// Rewrite named imports from the React packages into destructurings of
/// the runtime globals, so `import { useState } from 'react'` keeps working
/// once the other imports are stripped.
pub fn bind_runtime_imports(code: &str) -> String {
    RUNTIME_IMPORT_RE
        .replace_all(code, |caps: &regex::Captures<'_>| {
            let global = if &caps[2] == "react" { "React" } else { "ReactDOM" };
            let bindings: Vec<String> = caps[1]
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| match name.split_once(" as ") {
                    Some((imported, local)) => format!("{}: {}", imported.trim(), local.trim()),
                    None => name.to_string(),
                })
                .collect();

            if bindings.is_empty() {
                String::new()
            } else {
                format!("const {{ {} }} = {};", bindings.join(", "), global)
            }
        })
        .into_owned()
}

/// Strip module syntax from a React snippet so it can run as a plain script.
pub fn prepare(code: &str) -> ReactSource {
    let cleaned = collapse_blank_lines(&strip_imports(&bind_runtime_imports(code)));
    let cleaned = cleaned.trim();

    let component_name = detect_component_name(cleaned);

    let code = DEFAULT_FUNCTION_RE.replace_all(cleaned, "${1}function $2");
    let code = DEFAULT_CLASS_RE.replace_all(&code, "class $1");
    let code = DEFAULT_IDENT_RE.replace_all(&code, "");
    let code = EXPORT_LIST_RE.replace_all(&code, "");
    let code = NAMED_EXPORT_RE.replace_all(&code, "$1$2");

    let code = format!(
        "{}\n\nif (typeof {name} !== 'undefined') {{\n  window.{name} = {name};\n}}",
        code.trim_end(),
        name = component_name
    );

    ReactSource {
        code,
        component_name,
    }
}

/// Names tried at render time: the detected one first, then the fallbacks.
pub fn render_candidates(component_name: &str) -> Vec<String> {
    let mut names = vec![component_name.to_string()];
    for fallback in FALLBACK_COMPONENTS {
        if !names.iter().any(|n| n == fallback) {
            names.push(fallback.to_string());
        }
    }
    names
}

/// Generate a Babel + React preview document.
pub fn generate(ctx: &GenerateContext<'_>) -> Result<String, CompileError> {
    let source = prepare(ctx.code);

    let context = DocumentContext {
        component_names: render_candidates(&source.component_name),
        ..DocumentContext::runtime("React Preview", "React", "root", ctx)
    }
    .with_code(escape_script_close(&source.code));

    render("react.html", &context)
}
