//! Runtime dependency listing command.

use anyhow::{Context, Result};
use snipview_detect::{resolve_dependencies, CompilationType};

/// Run the deps command.
pub fn run(compilation_type: &str) -> Result<()> {
    let compilation_type: CompilationType = compilation_type
        .parse()
        .context("Cannot list dependencies")?;

    let deps = resolve_dependencies(compilation_type);
    if deps.is_empty() {
        tracing::info!("{} previews need no runtime scripts", compilation_type);
    }

    for url in deps {
        println!("{}", url);
    }

    Ok(())
}
