//! Static gallery build command.

use std::path::PathBuf;

use anyhow::Result;
use snipview_gallery::{BuildConfig, GalleryBuilder};

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(config: &ConfigFile, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building snippet gallery...");

    let result = GalleryBuilder::new(build_config(config, output, minify))?
        .build()
        .await?;

    tracing::info!(
        "Built {} previews in {} categories in {}ms",
        result.snippets,
        result.categories,
        result.duration_ms
    );

    if result.failed > 0 {
        tracing::warn!("{} previews failed to compile", result.failed);
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

fn build_config(config: &ConfigFile, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
    BuildConfig {
        snippets_dir: PathBuf::from(&config.snippets.dir),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&config.build.output)),
        minify: minify.unwrap_or(config.build.minify),
        base_url: config.build.base_url.clone(),
        title: config.build.title.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn flags_override_config() {
        let config = ConfigFile::parse("[build]\noutput = \"site\"\ntitle = \"UI Kit\"\n").unwrap();

        let from_config = build_config(&config, None, None);
        let from_flags = build_config(&config, Some(PathBuf::from("out")), Some(false));

        assert_eq!(from_config.output_dir, PathBuf::from("site"));
        assert_eq!(from_config.title, "UI Kit");
        assert!(from_config.minify);
        assert_eq!(from_flags.output_dir, PathBuf::from("out"));
        assert!(!from_flags.minify);
    }

    #[tokio::test]
    async fn builds_gallery_from_config() {
        let temp = tempdir().unwrap();
        let snippets = temp.path().join("snippets");
        fs::create_dir_all(&snippets).unwrap();
        fs::write(snippets.join("hello.html"), "<h1>Hello</h1>").unwrap();

        let toml = format!(
            "[snippets]\ndir = {:?}\n\n[build]\noutput = {:?}\n",
            snippets.display().to_string(),
            temp.path().join("dist").display().to_string()
        );
        let config = ConfigFile::parse(&toml).unwrap();

        run(&config, None, Some(false)).await.unwrap();

        assert!(temp.path().join("dist/index.html").exists());
        assert!(temp.path().join("dist/previews/hello-html.html").exists());
    }
}
