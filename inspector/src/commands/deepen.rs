use std::time::Duration;

use color_eyre::eyre::Result;

use crate::search_args::SearchArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Deepen {
    #[clap(flatten)]
    search: SearchArgs,

    /// How long to keep deepening for, in milliseconds
    #[clap(short, long, value_parser, default_value_t = 1000)]
    budget_ms: u64,
}

impl Deepen {
    pub(crate) fn run(self) -> Result<()> {
        let state = self.search.load_state()?;
        let mut selector = self.search.selector()?;

        println!("{state}");

        let (action, depth) =
            selector.choose_action_within(&state, Duration::from_millis(self.budget_ms))?;

        println!("Chose {action} after searching {depth} rounds deep");

        Ok(())
    }
}
