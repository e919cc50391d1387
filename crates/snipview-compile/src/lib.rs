//! Preview document generation for code snippets.
//!
//! This crate turns a classified snippet into a self-contained HTML document that
//! loads its runtime from a CDN and renders the snippet in a browser frame.

pub mod compiler;
pub mod document;
pub mod escape;
pub mod markup;
pub mod react;
pub mod script;
pub mod source;
pub mod strategy;
pub mod unsupported;
pub mod vue;

pub use compiler::{compile, compile_preview, error_document, generator_for};
pub use react::detect_component_name;
pub use strategy::{CompileError, GenerateContext, Generator, Preview};
