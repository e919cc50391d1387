//! Code snippet classification.
//!
//! This crate sniffs which language, UI framework and dialect a pasted snippet is
//! written in, using ordered pattern batteries rather than parsing, and maps each
//! classification to the runtime scripts its preview needs.

pub mod classification;
pub mod dependencies;
pub mod detector;
pub mod rules;

pub use classification::{
    Classification, CompilationType, Dialect, Framework, Language, ParseTypeError,
};
pub use dependencies::{editor_language, resolve_dependencies, BASELINE_STYLESHEET};
pub use detector::{detect, matching_rule};
pub use rules::{stylesheet_dialect, RuleKind};
