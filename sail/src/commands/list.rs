use clap::Args;
use eyre::Result;

use super::ConfigArg;
use crate::reports::{ListReport, Report, TerminalOutput};

#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    config: ConfigArg,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let registry = self.config.load();
        ListReport::from_registry(&registry).render(&mut TerminalOutput::new());
        Ok(())
    }
}
