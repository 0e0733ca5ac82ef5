use std::{fs, path::PathBuf};

use adversarial_search::{GameState, MoveSelector, SearchOptions, Variant};
use color_eyre::eyre::{Result, WrapErr};
use grid_world::{evaluation_by_name, GridEvaluation, GridState};
use tracing::info;

/// Everything needed to set up a search over a layout file
#[derive(clap::Args, Debug)]
pub(crate) struct SearchArgs {
    /// Path to the layout file to load
    #[clap(value_parser)]
    layout: PathBuf,

    /// How many full rounds of play to look ahead
    #[clap(short, long, value_parser, default_value_t = 1)]
    depth: usize,

    /// How to model the ghosts, `minimax` or `expectimax`
    #[clap(short, long, value_parser, default_value_t = Variant::Minimax)]
    variant: Variant,

    /// Which evaluation function to score leaves with, `score` or `distance`
    #[clap(short, long, value_parser, default_value = "score")]
    evaluation: String,

    /// Seed for breaking ties. Picks a random seed if not specified
    #[clap(short, long, value_parser)]
    seed: Option<u64>,

    /// Print the whole search tree
    #[clap(long)]
    pub(crate) tree: bool,
}

impl SearchArgs {
    pub(crate) fn load_state(&self) -> Result<GridState> {
        let text = fs::read_to_string(&self.layout)
            .wrap_err_with(|| format!("Couldn't read layout {}", self.layout.display()))?;

        let state = text
            .parse::<GridState>()
            .wrap_err_with(|| format!("Couldn't parse layout {}", self.layout.display()))?;

        info!(
            layout = %self.layout.display(),
            agents = state.num_agents(),
            food = state.food_left(),
            "Loaded layout"
        );

        Ok(state)
    }

    pub(crate) fn selector(&self) -> Result<MoveSelector<GridEvaluation>> {
        let evaluation = evaluation_by_name(&self.evaluation)?;
        let options = SearchOptions {
            depth: self.depth,
            variant: self.variant,
        };

        let selector = match self.seed {
            Some(seed) => MoveSelector::with_seed(evaluation, options, seed)?,
            None => MoveSelector::new(evaluation, options)?,
        };

        Ok(selector.named("inspector"))
    }
}
