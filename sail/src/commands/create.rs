use std::time::Duration;

use clap::Args;
use eyre::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use super::ConfigArg;
use crate::{
    ops::{self, CreateError, CreateOptions},
    prompts::{self, Preset},
    reports::{Report, TerminalOutput},
    signal,
};

/// Exit status after an interrupt, as a shell reports SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Args)]
pub struct CreateCommand {
    /// Project name, also the directory to create
    pub name: String,

    /// Framework template (prompted if omitted)
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Database, or "None" (prompted if omitted)
    #[arg(short, long)]
    pub database: Option<String>,

    /// ORM, or "None" (prompted if omitted and a database is chosen)
    #[arg(long)]
    pub orm: Option<String>,

    /// Skip go mod tidy, go get and goimports
    #[arg(long)]
    pub skip_tidy: bool,

    #[command(flatten)]
    config: ConfigArg,
}

impl CreateCommand {
    pub async fn run(&self, verbose: bool) -> Result<()> {
        let registry = self.config.load();

        let preset = Preset {
            framework: self.framework.as_deref(),
            database: self.database.as_deref(),
            orm: self.orm.as_deref(),
        };
        let Some(selection) = prompts::select(&registry, preset)? else {
            interrupted();
        };
        debug!(?selection, "selected options");

        let parent = std::env::current_dir().wrap_err("Failed to get current directory")?;
        let token = signal::cancel_on_signal();
        let spinner = spinner(verbose)?;
        spinner.set_message(format!("Creating {}...", self.name));

        let result = ops::create(
            &token,
            &registry,
            CreateOptions {
                name: &self.name,
                parent: &parent,
                framework: &selection.framework,
                database: &selection.database,
                orm: &selection.orm,
                skip_tidy: self.skip_tidy,
            },
        )
        .await;
        spinner.finish_and_clear();

        match result {
            Ok(report) => {
                report.render(&mut TerminalOutput::new());
                Ok(())
            }
            Err(CreateError::Cancelled) => interrupted(),
            Err(err) => Err(err).wrap_err("Failed to create project"),
        }
    }
}

fn spinner(verbose: bool) -> Result<ProgressBar> {
    // Log lines and the spinner share stderr.
    if verbose {
        return Ok(ProgressBar::hidden());
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .wrap_err("Failed to set progress style")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn interrupted() -> ! {
    println!("interrupted");
    std::process::exit(INTERRUPTED_EXIT_CODE);
}
