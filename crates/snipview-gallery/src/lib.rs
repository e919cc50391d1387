//! Static gallery generator for snippet collections.
//!
//! Builds a browsable gallery from a directory of snippet files, with one
//! sandboxed preview document per snippet.

pub mod assets;
pub mod builder;
pub mod metadata;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, GalleryBuilder, ManifestEntry};
pub use metadata::{
    discover_snippets, extract_frontmatter, is_snippet_file, slugify, FrontmatterError, Snippet,
    SnippetError, SnippetMeta,
};
