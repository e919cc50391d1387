//! Escaping helpers for embedding snippets in generated documents.

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(script)").expect("Invalid script close regex"));

static STYLE_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(style)").expect("Invalid style close regex"));

/// Escape HTML special characters including single quotes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Keep code from closing its host `<script>` element early.
///
/// `<\/script` reads the same as `</script` inside JS strings, regexes and comments.
pub fn escape_script_close(code: &str) -> String {
    SCRIPT_CLOSE_RE.replace_all(code, r"<\/$1").into_owned()
}

/// Keep a stylesheet from closing its host `<style>` element early.
pub fn escape_style_close(css: &str) -> String {
    STYLE_CLOSE_RE.replace_all(css, r"<\/$1").into_owned()
}

/// Encode text as a JavaScript string literal safe to place inside a `<script>`.
pub fn js_string_literal(s: &str) -> Result<String, serde_json::Error> {
    let literal = serde_json::to_string(s)?;
    Ok(escape_script_close(&literal).replace("<!--", "<\\!--"))
}
