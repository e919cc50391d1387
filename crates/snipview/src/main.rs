//! Snipview CLI - detect, compile and preview front-end snippets.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::ConfigFile;

#[derive(Parser)]
#[command(name = "snipview")]
#[command(about = "Detect, compile and preview front-end code snippets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to snipview.toml config file
    #[arg(short, long, default_value = "snipview.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a config file and sample snippets
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Classify a snippet
    Detect {
        /// Snippet file, or "-" for stdin
        input: PathBuf,

        /// Print the classification as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compile a snippet into a standalone preview document
    Compile {
        /// Snippet file, or "-" for stdin
        input: PathBuf,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip detection and compile as this type (e.g. babel-react)
        #[arg(long = "as")]
        as_type: Option<String>,
    },

    /// List the runtime scripts a compilation type needs
    Deps {
        /// Compilation type (e.g. vue-compiler)
        compilation_type: String,
    },

    /// Start the live preview server
    Dev {
        /// Port to listen on (defaults to config or 7777)
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Build the static snippet gallery
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Preview a built gallery
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to the build output)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Detect { input, json } => {
            commands::detect::run(&input, json)?;
        }
        Commands::Compile {
            input,
            output,
            as_type,
        } => {
            commands::compile::run(&input, output, as_type)?;
        }
        Commands::Deps { compilation_type } => {
            commands::deps::run(&compilation_type)?;
        }
        Commands::Dev { port, no_open } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::dev::run(&config, port, !no_open).await?;
        }
        Commands::Build { output, no_minify } => {
            let config = ConfigFile::load(&cli.config)?;
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&config, output, minify).await?;
        }
        Commands::Serve { port, dir } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::serve::run(&config, port, dir).await?;
        }
    }

    Ok(())
}
