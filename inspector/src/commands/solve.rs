use std::collections::BTreeMap;

use adversarial_search::{AgentIndex, SearchTree, TracingObserver, TreeRecorder};
use color_eyre::eyre::{eyre, Result};
use grid_world::Direction;
use itertools::Itertools;
use tracing::Level;

use crate::search_args::SearchArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    #[clap(flatten)]
    search: SearchArgs,

    /// Search each of the root's options on its own thread. Skips the per option breakdown
    #[clap(short, long)]
    parallel: bool,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let state = self.search.load_state()?;
        let mut selector = self.search.selector()?;

        println!("{state}");

        if self.parallel {
            let action = selector.choose_action_parallel(&state)?;
            println!("Chose {action}");

            return Ok(());
        }

        let mut recorder = TreeRecorder::default();
        // RUST_LOG=trace also logs every node as it is backed up
        let action = if tracing::enabled!(Level::TRACE) {
            selector.choose_action_observed(&state, &mut (&mut recorder, TracingObserver))?
        } else {
            selector.choose_action_observed(&state, &mut recorder)?
        };
        let tree = recorder
            .into_tree()
            .ok_or_else(|| eyre!("The search didn't record any nodes"))?;

        if let SearchTree::Node { options, .. } = &tree {
            for (option, subtree) in options {
                println!("{option}: {}", subtree.value());
            }
        }
        println!("Chose {action}, worth {}", tree.value());
        println!();

        print_route(&tree);

        if self.search.tree {
            println!("{}", tree.to_text_tree());
        }

        Ok(())
    }
}

fn print_route(tree: &SearchTree<Direction>) {
    let route = tree.chosen_route();
    let mut paths_per_agent: BTreeMap<AgentIndex, Vec<Direction>> = BTreeMap::new();
    for (agent, direction) in &route {
        paths_per_agent.entry(*agent).or_default().push(*direction);
    }

    println!("The expected line of play takes {} moves:", route.len());
    for (agent, path) in paths_per_agent {
        println!("Agent {agent}: {}", path.iter().join(", "));
    }
    println!()
}
