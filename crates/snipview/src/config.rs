//! Configuration file (snipview.toml).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub snippets: SnippetsConfig,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct SnippetsConfig {
    #[serde(default = "default_snippets_dir")]
    pub dir: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    /// Quiet period before recompiling, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct BuildSettings {
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_minify")]
    pub minify: bool,
}

fn default_snippets_dir() -> String {
    "snippets".to_string()
}
fn default_port() -> u16 {
    7777
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_debounce_ms() -> u64 {
    300
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Snippet Gallery".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_minify() -> bool {
    true
}

impl Default for SnippetsConfig {
    fn default() -> Self {
        Self {
            dir: default_snippets_dir(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            title: default_title(),
            base_url: default_base_url(),
            minify: default_minify(),
        }
    }
}

impl ConfigFile {
    /// Parse configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid configuration")
    }

    /// Load configuration if the file exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = ConfigFile::load(&temp.path().join("snipview.toml")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.snippets.dir, "snippets");
        assert_eq!(config.server.port, 7777);
        assert_eq!(config.server.debounce_ms, 300);
        assert_eq!(config.build.output, "dist");
        assert!(config.build.minify);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = ConfigFile::parse("[server]\nport = 8080\n\n[build]\nminify = false\n").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.build.minify);
        assert_eq!(config.build.title, "Snippet Gallery");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("snipview.toml");
        fs::write(&path, "[server\nport = ").unwrap();

        assert!(ConfigFile::load(&path).is_err());
    }

    #[test]
    fn scaffolded_config_parses() {
        let config = ConfigFile::parse(crate::commands::init::DEFAULT_CONFIG).unwrap();

        assert_eq!(config, ConfigFile::default());
    }
}
