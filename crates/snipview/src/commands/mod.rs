pub mod build;
pub mod compile;
pub mod deps;
pub mod detect;
pub mod dev;
pub mod init;
pub mod serve;

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use snipview_gallery::extract_frontmatter;

/// Read a snippet from a file, or from stdin when the path is `-`.
///
/// A leading frontmatter block is removed.
pub fn read_snippet(input: &Path) -> Result<String> {
    let source = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read snippet from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?
    };

    let (_, code) = extract_frontmatter(&source)
        .with_context(|| format!("Invalid frontmatter in {}", input.display()))?;

    Ok(code.to_string())
}
