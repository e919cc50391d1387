//! Preview compilation command.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use snipview_compile::compile_preview;
use snipview_detect::{Classification, CompilationType};

use super::read_snippet;

/// Run the compile command.
pub fn run(input: &Path, output: Option<PathBuf>, as_type: Option<String>) -> Result<()> {
    let code = read_snippet(input)?;

    let classification = as_type
        .map(|tag| {
            tag.parse::<CompilationType>()
                .map(Classification::for_compilation_type)
                .with_context(|| format!("Valid types: {}", valid_types()))
        })
        .transpose()?;

    let preview = compile_preview(&code, classification.as_ref());

    tracing::info!(
        "Compiled as {}{}",
        preview.classification.compilation_type,
        preview
            .component_name
            .as_deref()
            .map(|name| format!(" (component {})", name))
            .unwrap_or_default()
    );
    if preview.failed {
        tracing::warn!("Preview generation failed, wrote an error document");
    }

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&path, &preview.html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            std::io::stdout()
                .write_all(preview.html.as_bytes())
                .context("Failed to write preview to stdout")?;
        }
    }

    Ok(())
}

fn valid_types() -> String {
    CompilationType::ALL
        .iter()
        .map(|ct| ct.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
