//! Static gallery builder.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use snipview_compile::{compile_preview, Preview};
use snipview_detect::Classification;

use crate::assets::AssetPipeline;
use crate::metadata::{discover_snippets, Snippet};
use crate::templates::{CategoryGroup, IndexContext, SnippetCard, TemplateEngine};

/// Configuration for building a gallery.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source snippets directory
    pub snippets_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify the gallery stylesheet
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Gallery title
    pub title: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            snippets_dir: PathBuf::from("snippets"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "Snippet Gallery".to_string(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of preview documents written
    pub snippets: usize,

    /// Previews that were replaced by an error document
    pub failed: usize,

    /// Number of gallery sections
    pub categories: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read snippets directory: {0}")]
    ReadError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A snippet entry in `snippets.json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub title: String,
    pub slug: String,
    pub path: String,
    pub category: String,
    pub tags: Vec<String>,
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub classification: Classification,
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    pub preview: String,
}

/// A snippet with its compiled preview.
#[derive(Debug)]
struct BuiltSnippet {
    snippet: Snippet,
    preview: Preview,
}

impl BuiltSnippet {
    fn preview_url(&self) -> String {
        format!("previews/{}.html", self.snippet.slug)
    }
}

/// Static gallery builder.
pub struct GalleryBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl GalleryBuilder {
    /// Create a new gallery builder.
    pub fn new(config: BuildConfig) -> Result<Self, BuildError> {
        let templates =
            TemplateEngine::new().map_err(|e| BuildError::TemplateError(e.to_string()))?;

        Ok(Self { config, templates })
    }

    /// Build the gallery.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let previews_dir = self.config.output_dir.join("previews");
        fs::create_dir_all(&previews_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let snippets = self.discover()?;

        // Compile and write previews in parallel
        let built: Vec<Result<BuiltSnippet, BuildError>> = snippets
            .into_par_iter()
            .map(|snippet| self.build_preview(snippet))
            .collect();
        let built = built.into_iter().collect::<Result<Vec<_>, _>>()?;

        let failed = built.iter().filter(|b| b.preview.failed).count();
        if failed > 0 {
            tracing::warn!("{} previews could not be generated", failed);
        }

        let categories = self.render_index(&built)?;
        self.generate_manifest(&built)?;
        self.generate_assets()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            snippets: built.len(),
            failed,
            categories,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Load every snippet under the snippets directory in display order.
    fn discover(&self) -> Result<Vec<Snippet>, BuildError> {
        let dir = &self.config.snippets_dir;

        if !dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Snippets directory not found: {}",
                dir.display()
            )));
        }

        let mut snippets = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for path in discover_snippets(dir) {
            let mut snippet = match Snippet::load(dir, &path) {
                Ok(snippet) => snippet,
                Err(e) => {
                    tracing::warn!("Skipping snippet: {}", e);
                    continue;
                }
            };

            // Distinct paths can collapse to the same slug
            let count = seen.entry(snippet.slug.clone()).or_insert(0);
            *count += 1;
            if *count > 1 {
                tracing::warn!(
                    "Duplicate slug '{}' for {}, using suffix {}",
                    snippet.slug,
                    path.display(),
                    count
                );
                snippet.slug = format!("{}-{}", snippet.slug, count);
            }

            snippets.push(snippet);
        }

        snippets.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(a.order.cmp(&b.order))
                .then_with(|| a.title.cmp(&b.title))
        });

        Ok(snippets)
    }

    /// Compile one snippet and write its preview document.
    fn build_preview(&self, snippet: Snippet) -> Result<BuiltSnippet, BuildError> {
        let preview = compile_preview(&snippet.code, None);

        tracing::debug!(
            "{} -> {} ({})",
            snippet.path.display(),
            snippet.slug,
            preview.classification.compilation_type
        );

        let built = BuiltSnippet { snippet, preview };
        let output_path = self.config.output_dir.join(built.preview_url());

        fs::write(&output_path, &built.preview.html)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", output_path.display(), e)))?;

        Ok(built)
    }

    /// Render `index.html`. Returns the number of categories.
    fn render_index(&self, built: &[BuiltSnippet]) -> Result<usize, BuildError> {
        // Snippets are already sorted by category, order and title
        let mut groups: BTreeMap<&str, Vec<SnippetCard>> = BTreeMap::new();

        for entry in built {
            let snippet = &entry.snippet;
            groups.entry(&snippet.category).or_default().push(SnippetCard {
                title: snippet.title.clone(),
                slug: snippet.slug.clone(),
                description_html: snippet.description.as_deref().map(render_markdown),
                tags: snippet.tags.clone(),
                kind: entry.preview.classification.compilation_type.to_string(),
                preview_url: entry.preview_url(),
                source_path: snippet.path.display().to_string(),
            });
        }

        let categories: Vec<CategoryGroup> = groups
            .into_iter()
            .map(|(name, snippets)| CategoryGroup {
                name: name.to_string(),
                snippets,
            })
            .collect();
        let count = categories.len();

        let html = self
            .templates
            .render_index(&IndexContext {
                title: self.config.title.clone(),
                base_url: self.config.base_url.clone(),
                categories,
                total: built.len(),
            })
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        fs::write(self.config.output_dir.join("index.html"), html)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(count)
    }

    /// Generate `snippets.json`.
    fn generate_manifest(&self, built: &[BuiltSnippet]) -> Result<(), BuildError> {
        let manifest: Vec<ManifestEntry> = built
            .iter()
            .map(|entry| ManifestEntry {
                title: entry.snippet.title.clone(),
                slug: entry.snippet.slug.clone(),
                path: entry.snippet.path.display().to_string(),
                category: entry.snippet.category.clone(),
                tags: entry.snippet.tags.clone(),
                order: entry.snippet.order,
                description: entry.snippet.description.clone(),
                classification: entry.preview.classification,
                dependencies: entry.preview.dependencies.clone(),
                component_name: entry.preview.component_name.clone(),
                preview: format!("{}{}", self.config.base_url, entry.preview_url()),
            })
            .collect();

        let json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join("snippets.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Generate the gallery stylesheet.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Keeping unminified stylesheet: {}", e);
                css
            })
        } else {
            css
        };

        fs::write(assets_dir.join("gallery.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Render a markdown description to HTML.
fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write_snippets(root: &std::path::Path) {
        fs::create_dir_all(root.join("react")).unwrap();
        fs::create_dir_all(root.join("styles")).unwrap();

        fs::write(
            root.join("react/Counter.jsx"),
            r#"---
title: Counter
description: A *stateful* counter
tags: [hooks]
order: 1
---
import { useState } from 'react';

export default function Counter() {
  const [n, setN] = useState(0);
  return (<button onClick={() => setN(n + 1)}>{n}</button>);
}
"#,
        )
        .unwrap();

        fs::write(root.join("styles/buttons.css"), ".btn { color: red; }").unwrap();
        fs::write(root.join("hello.html"), "<div>Hi</div>").unwrap();
        fs::write(root.join("README.txt"), "not a snippet").unwrap();
    }

    fn config(root: &std::path::Path) -> BuildConfig {
        BuildConfig {
            snippets_dir: root.join("snippets"),
            output_dir: root.join("dist"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn builds_gallery() {
        let temp = tempdir().unwrap();
        write_snippets(&temp.path().join("snippets"));
        let config = config(temp.path());
        let out = config.output_dir.clone();

        let result = GalleryBuilder::new(config).unwrap().build().await.unwrap();

        assert_eq!(result.snippets, 3);
        assert_eq!(result.failed, 0);
        assert_eq!(result.categories, 3);
        assert!(out.join("index.html").exists());
        assert!(out.join("snippets.json").exists());
        assert!(out.join("assets/gallery.css").exists());

        let preview = fs::read_to_string(out.join("previews/react-counter-jsx.html")).unwrap();
        assert!(preview.contains("babel.min.js"));
        assert!(!preview.contains("title: Counter"));

        let fragment = fs::read_to_string(out.join("previews/hello-html.html")).unwrap();
        assert!(fragment.contains("<div>Hi</div>"));
    }

    #[tokio::test]
    async fn index_groups_cards_by_category() {
        let temp = tempdir().unwrap();
        write_snippets(&temp.path().join("snippets"));
        let config = config(temp.path());
        let out = config.output_dir.clone();

        GalleryBuilder::new(config).unwrap().build().await.unwrap();

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        let general = index.find(">General</h2>").unwrap();
        let react = index.find(">react</h2>").unwrap();
        let styles = index.find(">styles</h2>").unwrap();
        assert!(general < react && react < styles);
        assert!(index.contains("<p>A <em>stateful</em> counter</p>"));
        assert!(index.contains("babel-react"));
        assert!(index.contains(r#"sandbox="allow-scripts""#));
    }

    #[tokio::test]
    async fn writes_manifest() {
        let temp = tempdir().unwrap();
        write_snippets(&temp.path().join("snippets"));
        let config = config(temp.path());
        let out = config.output_dir.clone();

        GalleryBuilder::new(config).unwrap().build().await.unwrap();

        let json = fs::read_to_string(out.join("snippets.json")).unwrap();
        let manifest: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

        assert_eq!(manifest.len(), 3);
        let counter = manifest.iter().find(|e| e["slug"] == "react-counter-jsx").unwrap();
        assert_eq!(counter["title"], "Counter");
        assert_eq!(counter["classification"]["framework"], "react");
        assert_eq!(counter["componentName"], "Counter");
        assert_eq!(counter["preview"], "/previews/react-counter-jsx.html");
        assert_eq!(counter["tags"][0], "hooks");
    }

    #[tokio::test]
    async fn minify_toggle_controls_stylesheet() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("snippets")).unwrap();
        let config = BuildConfig {
            minify: false,
            ..config(temp.path())
        };
        let out = config.output_dir.clone();

        let result = GalleryBuilder::new(config).unwrap().build().await.unwrap();

        assert_eq!(result.snippets, 0);
        let css = fs::read_to_string(out.join("assets/gallery.css")).unwrap();
        assert!(css.contains('\n'));
    }

    #[tokio::test]
    async fn duplicate_slugs_get_suffixes() {
        let temp = tempdir().unwrap();
        let snippets = temp.path().join("snippets");
        fs::create_dir_all(snippets.join("a")).unwrap();
        fs::write(snippets.join("a/b.js"), "console.log(1);").unwrap();
        fs::write(snippets.join("a-b.js"), "console.log(2);").unwrap();
        let config = config(temp.path());
        let out = config.output_dir.clone();

        GalleryBuilder::new(config).unwrap().build().await.unwrap();

        assert!(out.join("previews/a-b-js.html").exists());
        assert!(out.join("previews/a-b-js-2.html").exists());
    }

    #[tokio::test]
    async fn missing_snippets_dir_is_an_error() {
        let temp = tempdir().unwrap();

        let result = GalleryBuilder::new(config(temp.path())).unwrap().build().await;

        assert!(matches!(result, Err(BuildError::ReadError(_))));
    }

    #[tokio::test]
    async fn invalid_frontmatter_is_skipped() {
        let temp = tempdir().unwrap();
        let snippets = temp.path().join("snippets");
        fs::create_dir_all(&snippets).unwrap();
        fs::write(snippets.join("bad.js"), "---\ntitle: [oops\n---\nconsole.log(1);").unwrap();
        fs::write(snippets.join("good.js"), "console.log(2);").unwrap();
        let config = config(temp.path());
        let out = config.output_dir.clone();

        let result = GalleryBuilder::new(config).unwrap().build().await.unwrap();

        assert_eq!(result.snippets, 1);
        assert!(out.join("previews/good-js.html").exists());
        assert!(!out.join("previews/bad-js.html").exists());
    }

    #[test]
    fn renders_markdown() {
        assert_eq!(render_markdown("Some **bold** text"), "<p>Some <strong>bold</strong> text</p>\n");
    }
}
