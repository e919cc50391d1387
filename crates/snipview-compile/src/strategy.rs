//! Strategy table types shared by the document generators.

use serde::Serialize;

use snipview_detect::{resolve_dependencies, Classification, CompilationType};

/// Input handed to a generator.
#[derive(Debug, Clone, Copy)]
pub struct GenerateContext<'a> {
    /// Raw snippet text
    pub code: &'a str,

    /// Classification driving the dispatch
    pub classification: Classification,

    /// Runtime scripts for the classification's compilation type
    pub dependencies: &'static [&'static str],
}

impl<'a> GenerateContext<'a> {
    pub fn new(code: &'a str, classification: Classification) -> Self {
        Self {
            code,
            classification,
            dependencies: resolve_dependencies(classification.compilation_type),
        }
    }

    pub fn compilation_type(&self) -> CompilationType {
        self.classification.compilation_type
    }
}

/// A document generator. Stateless; one per compilation strategy.
pub type Generator = fn(&GenerateContext<'_>) -> Result<String, CompileError>;

/// Result of compiling a snippet for preview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    /// Classification used for dispatch
    pub classification: Classification,

    /// Complete renderable document
    pub html: String,

    /// Runtime scripts the document loads
    pub dependencies: Vec<String>,

    /// Component rendered by React previews
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,

    /// Whether document assembly failed and `html` is an error document
    pub failed: bool,
}

/// Errors raised while assembling a preview document.
///
/// These never leave [`crate::compile`]; they are rendered as error documents.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Template setup failed: {0}")]
    Template(String),

    #[error("Template render failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Failed to encode snippet: {0}")]
    Encode(#[from] serde_json::Error),
}
