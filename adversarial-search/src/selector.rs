use std::{
    cmp::Ordering,
    fmt::Debug,
    time::{Duration, Instant},
};

use derivative::Derivative;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use crate::{
    search::{pick_action, Limits},
    state::searchable_actions,
    ConfigurationError, Evaluator, GameState, MultiAgentSearch, NodeKind, NodeVisit,
    NoopObserver, SearchError, SearchObserver, SearchOptions, MAXIMIZER,
};

#[derive(Derivative)]
#[derivative(Debug)]
/// Picks the controlled agent's next action
///
/// This is the entry point a game loop calls once per turn. It owns the random number generator
/// used for tie-breaking, so seeding it (see [MoveSelector::with_seed]) makes every decision
/// reproducible.
///
/// It also outputs traces using the [tracing] crate.
pub struct MoveSelector<EvaluatorType, R = StdRng> {
    search: MultiAgentSearch<EvaluatorType>,
    #[derivative(Debug = "ignore")]
    rng: R,
    /// Used to label the traces of each decision
    pub name: &'static str,
}

impl<EvaluatorType> MoveSelector<EvaluatorType, StdRng> {
    /// Construct a new `MoveSelector` with a randomly seeded tie-breaker
    pub fn new(evaluator: EvaluatorType, options: SearchOptions) -> Result<Self, ConfigurationError> {
        Ok(Self::from_search(
            MultiAgentSearch::new(evaluator, options)?,
            StdRng::from_entropy(),
        ))
    }

    /// Construct a new `MoveSelector` whose ties are broken by an rng seeded with `seed`
    pub fn with_seed(
        evaluator: EvaluatorType,
        options: SearchOptions,
        seed: u64,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self::from_search(
            MultiAgentSearch::new(evaluator, options)?,
            StdRng::seed_from_u64(seed),
        ))
    }
}

impl<EvaluatorType, R: Rng> MoveSelector<EvaluatorType, R> {
    /// Wrap an already configured search
    pub fn from_search(search: MultiAgentSearch<EvaluatorType>, rng: R) -> Self {
        Self {
            search,
            rng,
            name: "move-selector",
        }
    }

    /// Set the name used to label the traces of each decision
    pub fn named(self, name: &'static str) -> Self {
        Self { name, ..self }
    }

    #[allow(missing_docs)]
    pub fn search(&self) -> &MultiAgentSearch<EvaluatorType> {
        &self.search
    }

    /// Pick the next action for the maximizer
    ///
    /// Searches the tree rooted at `(state, 0, 0)` and returns the action picked there. Fails
    /// with [SearchError::NoLegalAction] if the maximizer has nothing to do besides no-ops, or
    /// if the game is already over.
    pub fn choose_action<GameType>(
        &mut self,
        state: &GameType,
    ) -> Result<GameType::Action, SearchError>
    where
        GameType: GameState,
        EvaluatorType: Evaluator<GameType>,
    {
        self.choose_action_observed(state, &mut NoopObserver)
    }

    /// Same as [MoveSelector::choose_action], reporting every node searched to `observer`
    pub fn choose_action_observed<GameType, Observer>(
        &mut self,
        state: &GameType,
        observer: &mut Observer,
    ) -> Result<GameType::Action, SearchError>
    where
        GameType: GameState,
        EvaluatorType: Evaluator<GameType>,
        Observer: SearchObserver<GameType::Action> + ?Sized,
    {
        let options = *self.search.options();

        info_span!(
            "choose_action",
            selector = self.name,
            variant = %options.variant,
            depth = options.depth,
            chosen_action = tracing::field::Empty,
            chosen_value = tracing::field::Empty,
        )
        .in_scope(|| {
            check_root(state)?;

            let result = self.search.search_observed(
                state,
                MAXIMIZER,
                0,
                &mut self.rng,
                &mut RootOptionLogger(&mut *observer),
            )?;
            let action = result
                .action
                .ok_or(SearchError::NoLegalAction { agent: MAXIMIZER })?;

            record_choice(&action, result.value);

            Ok(action)
        })
    }

    /// Pick the next action for the maximizer, searching the root's children in parallel
    ///
    /// Each child of the root is searched sequentially on its own [rayon] task, with a tie-breaker
    /// seeded from this selector's rng. The results are merged with the same tie-break as
    /// [MoveSelector::choose_action], so a seeded selector stays reproducible.
    pub fn choose_action_parallel<GameType>(
        &mut self,
        state: &GameType,
    ) -> Result<GameType::Action, SearchError>
    where
        GameType: GameState + Sync,
        GameType::Action: Send,
        EvaluatorType: Evaluator<GameType> + Sync,
    {
        let options = *self.search.options();

        info_span!(
            "choose_action_parallel",
            selector = self.name,
            variant = %options.variant,
            depth = options.depth,
            chosen_action = tracing::field::Empty,
            chosen_value = tracing::field::Empty,
        )
        .in_scope(|| {
            let actions = check_root(state)?;
            if state.is_terminal() {
                return Err(SearchError::NoLegalAction { agent: MAXIMIZER });
            }

            let (next_agent, next_depth) = crate::next_turn(MAXIMIZER, 0, state.num_agents());
            let seeded: Vec<_> = actions
                .into_iter()
                .map(|action| (action, self.rng.gen::<u64>()))
                .collect();

            let search = &self.search;
            let children = seeded
                .into_par_iter()
                .map(|(action, seed)| -> Result<(GameType::Action, f64), SearchError> {
                    let successor = state.generate_successor(MAXIMIZER, action)?;
                    let mut rng = StdRng::seed_from_u64(seed);
                    let result = search.search(&successor, next_agent, next_depth, &mut rng)?;

                    Ok((action, result.value))
                })
                .collect::<Result<Vec<_>, SearchError>>()?;

            for (action, value) in &children {
                debug!(?action, value, "searched root option");
            }

            let result = pick_action(&children, Ordering::Greater, &mut self.rng);
            let action = result
                .action
                .ok_or(SearchError::NoLegalAction { agent: MAXIMIZER })?;

            record_choice(&action, result.value);

            Ok(action)
        })
    }

    /// This will do an iterative deepening search until `budget` runs out. Iterative deepening
    /// means it will first search one ply deep, then two, and so on up to the configured depth,
    /// keeping the decision of the deepest search that finished in time.
    ///
    /// The deadline is checked at every node, so a search that runs out of time unwinds straight
    /// away. Returns the chosen action and the depth it was chosen at. Fails with
    /// [SearchError::DeadlineExceeded] if not even a single ply could be searched.
    pub fn choose_action_within<GameType>(
        &mut self,
        state: &GameType,
        budget: Duration,
    ) -> Result<(GameType::Action, usize), SearchError>
    where
        GameType: GameState,
        EvaluatorType: Evaluator<GameType>,
    {
        let deadline = Instant::now() + budget;
        let options = *self.search.options();

        info_span!(
            "deepened_choose_action",
            selector = self.name,
            variant = %options.variant,
            max_depth = options.depth,
            chosen_action = tracing::field::Empty,
            chosen_value = tracing::field::Empty,
            depth = tracing::field::Empty,
        )
        .in_scope(|| {
            check_root(state)?;

            let mut current = None;

            for max_depth in 1..=options.depth {
                let limits = Limits {
                    max_depth,
                    deadline: Some(deadline),
                };
                let mut cutoffs = CutoffCounter::default();

                let result = match self.search.walk(
                    state,
                    MAXIMIZER,
                    0,
                    limits,
                    &mut self.rng,
                    &mut RootOptionLogger(&mut cutoffs),
                ) {
                    Ok(result) => result,
                    Err(SearchError::DeadlineExceeded) => break,
                    Err(e) => return Err(e),
                };

                let action = result
                    .action
                    .ok_or(SearchError::NoLegalAction { agent: MAXIMIZER })?;
                current = Some((action, result.value, max_depth));

                if cutoffs.0 == 0 {
                    info!(max_depth, "Every line ended before the cutoff, no need to keep going");
                    break;
                }
            }

            match current {
                Some((action, value, depth)) => {
                    record_choice(&action, value);
                    tracing::Span::current().record("depth", depth);

                    Ok((action, depth))
                }
                None => {
                    warn!("We weren't able to search even a single ply before the deadline");

                    Err(SearchError::DeadlineExceeded)
                }
            }
        })
    }
}

/// The maximizer's searchable actions at the root, which must not be empty
fn check_root<GameType: GameState>(state: &GameType) -> Result<Vec<GameType::Action>, SearchError> {
    let num_agents = state.num_agents();
    if num_agents == 0 {
        return Err(SearchError::InvalidAgent {
            agent: MAXIMIZER,
            num_agents,
        });
    }

    let actions = searchable_actions(state, MAXIMIZER);
    if actions.is_empty() {
        return Err(SearchError::NoLegalAction { agent: MAXIMIZER });
    }

    Ok(actions)
}

fn record_choice<Action: Debug>(action: &Action, value: f64) {
    let current_span = tracing::Span::current();
    current_span.record("chosen_action", format!("{:?}", action).as_str());
    current_span.record("chosen_value", value);
}

/// Passes every visit on, logging the value of each of the root's options along the way
struct RootOptionLogger<'a, Observer: ?Sized>(&'a mut Observer);

impl<'a, Action, Observer> SearchObserver<Action> for RootOptionLogger<'a, Observer>
where
    Action: Debug,
    Observer: SearchObserver<Action> + ?Sized,
{
    fn visit(&mut self, visit: &NodeVisit<'_, Action>) {
        if visit.agent == MAXIMIZER && visit.depth == 0 {
            for (action, value) in visit.children {
                debug!(?action, value, "searched root option");
            }
        }

        self.0.visit(visit);
    }
}

/// Counts the leaves that were cut off by the depth limit
#[derive(Default)]
struct CutoffCounter(usize);

impl<Action> SearchObserver<Action> for CutoffCounter {
    fn visit(&mut self, visit: &NodeVisit<'_, Action>) {
        if visit.kind == NodeKind::Cutoff {
            self.0 += 1;
        }
    }
}
