//! Line-level cleanup applied to snippets before embedding them in scripts.

use regex::Regex;
use std::sync::LazyLock;

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").expect("Invalid blank run regex"));

/// Remove import statements line by line.
///
/// A line is an import when its trimmed text starts with `import` followed by
/// whitespace. Continuation lines of a multi-line `import { ... }` are removed
/// with it. Dynamic `import(...)` calls are kept.
pub fn strip_imports(code: &str) -> String {
    let mut kept = Vec::new();
    let mut in_import = false;

    for line in code.lines() {
        let trimmed = line.trim_start();

        if in_import {
            if trimmed.contains('}') {
                in_import = false;
            }
            continue;
        }

        if trimmed.starts_with("import ") || trimmed.starts_with("import\t") {
            in_import = trimmed.contains('{') && !trimmed.contains('}');
            continue;
        }

        kept.push(line);
    }

    kept.join("\n")
}

/// Collapse runs of blank lines into a single blank line.
pub fn collapse_blank_lines(code: &str) -> String {
    BLANK_RUN_RE.replace_all(code, "\n\n").into_owned()
}

/// Make sure a statement list ends with a semicolon.
pub fn terminate_statement(code: &str) -> String {
    let trimmed = code.trim_end();
    if trimmed.ends_with(';') || trimmed.is_empty() {
        trimmed.to_string()
    } else {
        format!("{trimmed};")
    }
}
