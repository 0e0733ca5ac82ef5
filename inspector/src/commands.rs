pub mod deepen;
pub mod solve;

use clap::Subcommand;
use color_eyre::eyre::Result;

use deepen::Deepen;
use solve::Solve;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Search a layout to a fixed depth and show every option at the root
    Solve(Solve),
    /// Search a layout with iterative deepening, as deep as a time budget allows
    Deepen(Deepen),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Solve(s) => s.run()?,
            Command::Deepen(d) => d.run()?,
        }

        Ok(())
    }
}
