//! Gallery stylesheet.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// The gallery stylesheet.
    pub fn generate_css() -> String {
        GALLERY_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const GALLERY_CSS: &str = r#"/* Snippet gallery */

:root {
  --gallery-bg: #f8fafc;
  --card-bg: #ffffff;
  --card-border: #e2e8f0;
  --text: #0f172a;
  --muted: #64748b;
  --accent: #4f46e5;
  --card-min-width: 320px;
  --preview-height: 260px;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--gallery-bg);
  color: var(--text);
  line-height: 1.5;
}

.gallery-header {
  padding: 2rem 2rem 1rem;
  border-bottom: 1px solid var(--card-border);
  background: var(--card-bg);
}

.gallery-header h1 {
  margin: 0;
  font-size: 1.75rem;
}

.gallery-count {
  margin: 0.25rem 0 0;
  color: var(--muted);
}

.gallery {
  padding: 1.5rem 2rem 3rem;
}

.category h2 {
  font-size: 1.25rem;
  margin: 1.5rem 0 1rem;
}

.grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(var(--card-min-width), 1fr));
  gap: 1.25rem;
}

.card {
  display: flex;
  flex-direction: column;
  background: var(--card-bg);
  border: 1px solid var(--card-border);
  border-radius: 0.5rem;
  overflow: hidden;
}

.card-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 0.5rem;
  padding: 0.75rem 1rem;
}

.card-header h3 {
  margin: 0;
  font-size: 1rem;
}

.badge {
  font-size: 0.75rem;
  font-family: ui-monospace, monospace;
  color: var(--accent);
  background: #eef2ff;
  border-radius: 9999px;
  padding: 0.125rem 0.5rem;
  white-space: nowrap;
}

.description {
  padding: 0 1rem;
  color: var(--muted);
  font-size: 0.875rem;
}

.description p {
  margin: 0 0 0.5rem;
}

.preview {
  width: 100%;
  height: var(--preview-height);
  border: 0;
  border-top: 1px solid var(--card-border);
  border-bottom: 1px solid var(--card-border);
  background: #ffffff;
}

.card-footer {
  display: flex;
  flex-wrap: wrap;
  align-items: center;
  gap: 0.5rem;
  padding: 0.5rem 1rem;
  font-size: 0.75rem;
  color: var(--muted);
}

.card-footer a {
  margin-left: auto;
  color: var(--accent);
  text-decoration: none;
}

.tag {
  background: var(--gallery-bg);
  border: 1px solid var(--card-border);
  border-radius: 0.25rem;
  padding: 0 0.375rem;
}

.empty {
  color: var(--muted);
}
"#;
