//! Live preview server command.

use std::path::PathBuf;

use anyhow::Result;
use snipview_server::{DevServer, DevServerConfig};

use crate::config::ConfigFile;

/// Run the dev server.
pub async fn run(config: &ConfigFile, port: Option<u16>, open: bool) -> Result<()> {
    let server_config = server_config(config, port, open);

    tracing::info!(
        "Starting live preview server on port {} for {}",
        server_config.port,
        server_config.snippets_dir.display()
    );

    DevServer::new(server_config).start().await?;

    Ok(())
}

fn server_config(config: &ConfigFile, port: Option<u16>, open: bool) -> DevServerConfig {
    DevServerConfig {
        snippets_dir: PathBuf::from(&config.snippets.dir),
        port: port.unwrap_or(config.server.port),
        host: config.server.host.clone(),
        open,
        debounce_ms: config.server.debounce_ms,
    }
}
