//! Snippet files and their frontmatter.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// Extensions recognized as snippet files.
pub const SNIPPET_EXTENSIONS: &[&str] = &[
    "jsx", "tsx", "js", "mjs", "ts", "vue", "svelte", "html", "htm", "css", "scss", "less",
];

/// Category used when a snippet sits directly in the snippets directory.
pub const DEFAULT_CATEGORY: &str = "General";

/// Sort position used when frontmatter gives none.
pub const DEFAULT_ORDER: i32 = 999;

/// Parsed frontmatter from a snippet file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SnippetMeta {
    /// Display title
    pub title: Option<String>,

    /// Markdown description
    pub description: Option<String>,

    /// Gallery section
    pub category: Option<String>,

    /// Free-form labels
    pub tags: Vec<String>,

    /// Order within the category (lower = first)
    pub order: Option<i32>,
}

/// A snippet loaded from disk with frontmatter resolved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Snippet {
    /// Path relative to the snippets directory
    pub path: PathBuf,

    /// URL-safe identifier derived from the path
    pub slug: String,

    pub title: String,

    pub description: Option<String>,

    pub category: String,

    pub tags: Vec<String>,

    pub order: i32,

    /// Snippet source with the frontmatter removed
    pub code: String,
}

impl Snippet {
    /// Build a snippet from its source text and path relative to the snippets directory.
    pub fn parse(relative: &Path, source: &str) -> Result<Self, FrontmatterError> {
        let (meta, code) = extract_frontmatter(source)?;
        let meta = meta.unwrap_or_default();

        let title = meta.title.unwrap_or_else(|| {
            relative
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let category = meta.category.unwrap_or_else(|| {
            relative
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|s| s.to_str())
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string()
        });

        Ok(Self {
            path: relative.to_path_buf(),
            slug: slugify(relative),
            title,
            description: meta.description,
            category,
            tags: meta.tags,
            order: meta.order.unwrap_or(DEFAULT_ORDER),
            code: code.to_string(),
        })
    }

    /// Read and parse a snippet file under `root`.
    pub fn load(root: &Path, path: &Path) -> Result<Self, SnippetError> {
        let source = fs::read_to_string(path).map_err(|e| SnippetError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        let relative = path.strip_prefix(root).unwrap_or(path);

        Self::parse(relative, &source).map_err(|e| SnippetError::Frontmatter {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// Extract a `---` delimited YAML block from the start of a snippet.
///
/// Returns the parsed metadata and the code after the block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<SnippetMeta>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let meta = if yaml.is_empty() {
        SnippetMeta::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    Ok((Some(meta), remaining.trim_start()))
}

/// Lowercased path with every run of non-alphanumerics turned into one dash.
///
/// `react/Counter Button.jsx` becomes `react-counter-button-jsx`.
pub fn slugify(relative: &Path) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for c in relative.to_string_lossy().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "snippet".to_string()
    } else {
        slug
    }
}

/// Whether a path names a snippet file by extension.
pub fn is_snippet_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SNIPPET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// All snippet files under `dir`, skipping hidden files and directories.
pub fn discover_snippets(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !e.file_name().to_str().is_some_and(|n| n.starts_with('.'))
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_snippet_file(e.path()))
        .map(|e| e.into_path())
        .collect();

    paths.sort();
    paths
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}

/// Errors that can occur when loading a snippet file.
#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Frontmatter {
        path: String,
        source: FrontmatterError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn extracts_frontmatter_and_code() {
        let source = r#"---
title: Counter
description: A **stateful** counter
tags: [hooks, state]
order: 2
---

function Counter() { return (<button>0</button>); }
"#;

        let (meta, code) = extract_frontmatter(source).unwrap();
        let meta = meta.unwrap();

        assert_eq!(meta.title.as_deref(), Some("Counter"));
        assert_eq!(meta.tags, vec!["hooks", "state"]);
        assert_eq!(meta.order, Some(2));
        assert!(code.starts_with("function Counter()"));
    }

    #[test]
    fn snippets_without_frontmatter_are_untouched() {
        let source = ".btn { color: red; }";

        let (meta, code) = extract_frontmatter(source).unwrap();

        assert!(meta.is_none());
        assert_eq!(code, source);
    }

    #[test]
    fn empty_frontmatter_is_allowed() {
        let (meta, code) = extract_frontmatter("---\n---\n<p>Hi</p>").unwrap();

        assert_eq!(meta, Some(SnippetMeta::default()));
        assert_eq!(code, "<p>Hi</p>");
    }

    #[test]
    fn errors_on_unclosed_or_invalid_frontmatter() {
        assert!(matches!(
            extract_frontmatter("---\ntitle: Test\nconst a = 1;"),
            Err(FrontmatterError::Unclosed)
        ));
        assert!(matches!(
            extract_frontmatter("---\ntitle: [broken\n---\n"),
            Err(FrontmatterError::InvalidYaml(_))
        ));
    }

    #[test]
    fn defaults_come_from_the_path() {
        let snippet = Snippet::parse(Path::new("forms/Login Form.jsx"), "const a = 1;").unwrap();

        assert_eq!(snippet.title, "Login Form");
        assert_eq!(snippet.category, "forms");
        assert_eq!(snippet.order, DEFAULT_ORDER);
        assert_eq!(snippet.slug, "forms-login-form-jsx");

        let snippet = Snippet::parse(Path::new("card.html"), "<div></div>").unwrap();
        assert_eq!(snippet.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn frontmatter_overrides_defaults() {
        let source = "---\ntitle: Fancy Card\ncategory: Layout\norder: 1\n---\n<div class=\"card\"></div>";

        let snippet = Snippet::parse(Path::new("misc/card.html"), source).unwrap();

        assert_eq!(snippet.title, "Fancy Card");
        assert_eq!(snippet.category, "Layout");
        assert_eq!(snippet.order, 1);
        assert_eq!(snippet.code, "<div class=\"card\"></div>");
    }

    #[test]
    fn slugs_are_lowercase_dashed() {
        assert_eq!(slugify(Path::new("Button.tsx")), "button-tsx");
        assert_eq!(slugify(Path::new("a//b__c.vue")), "a-b-c-vue");
        assert_eq!(slugify(Path::new("---")), "snippet");
    }

    #[test]
    fn discovers_snippet_files() {
        let temp = tempdir().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("react")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join("react/Counter.jsx"), "").unwrap();
        fs::write(root.join("styles.scss"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join(".hidden.js"), "").unwrap();
        fs::write(root.join(".cache/cached.js"), "").unwrap();

        let found: Vec<PathBuf> = discover_snippets(root)
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            found,
            vec![PathBuf::from("react/Counter.jsx"), PathBuf::from("styles.scss")]
        );
    }

    #[test]
    fn loads_relative_to_root() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("vue")).unwrap();
        let path = root.join("vue/Hello.vue");
        fs::write(&path, "<template><p>Hello</p></template>").unwrap();

        let snippet = Snippet::load(root, &path).unwrap();

        assert_eq!(snippet.path, PathBuf::from("vue/Hello.vue"));
        assert_eq!(snippet.category, "vue");
        assert_eq!(snippet.slug, "vue-hello-vue");
    }
}
