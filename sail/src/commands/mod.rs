mod completions;
mod create;
mod list;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use create::CreateCommand;
use eyre::Result;
use gosail_config::Registry;
use list::ListCommand;
use tracing::debug;

/// Registry file looked up in the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "config.yml";

/// Extension trait for exiting on configuration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for gosail_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Load the registry from `path`, else `./config.yml`, else the bundled one.
pub(crate) fn load_registry(path: Option<&Path>) -> gosail_config::Result<Registry> {
    match path {
        Some(path) => Registry::from_file(path),
        None if Path::new(DEFAULT_CONFIG).is_file() => Registry::from_file(DEFAULT_CONFIG),
        None => {
            debug!("using bundled registry");
            Registry::bundled()
        }
    }
}

#[derive(Parser)]
#[command(name = "go-sail")]
#[command(version)]
#[command(about = "Scaffold Go web projects with database wiring")]
pub(crate) struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Create(cmd) => cmd.run(self.verbose).await,
            Commands::List(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Go project from a framework template
    Create(CreateCommand),

    /// List frameworks, databases, ORMs and supported combinations
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Shared `--config` flag.
#[derive(clap::Args)]
pub(crate) struct ConfigArg {
    /// Path to the registry file (defaults to ./config.yml, then the bundled registry)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ConfigArg {
    pub fn load(&self) -> Registry {
        load_registry(self.config.as_deref()).unwrap_or_exit()
    }
}
