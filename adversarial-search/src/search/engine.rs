use std::{cmp::Ordering, time::Instant};

use derivative::Derivative;
use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};

use crate::{
    score::terminal_value,
    state::searchable_actions,
    AgentIndex, ConfigurationError, Evaluator, GameState, SearchError,
};

use super::{NodeKind, NodeVisit, NoopObserver, SearchObserver, SearchOptions, Variant};

/// The result of searching one node: the value backed up to it and, when the moving agent got to
/// pick, the action it picked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult<Action> {
    /// `None` at leaves and chance nodes
    pub action: Option<Action>,
    #[allow(missing_docs)]
    pub value: f64,
}

impl<Action> SearchResult<Action> {
    fn leaf(value: f64) -> Self {
        Self {
            action: None,
            value,
        }
    }
}

/// Which agent moves after `agent`, and at what depth
///
/// Agents move in index order. The depth only goes up once every agent has moved and the turn
/// wraps back around to the maximizer.
///
/// ```
/// use adversarial_search::next_turn;
///
/// assert_eq!(next_turn(0, 0, 3), (1, 0));
/// assert_eq!(next_turn(1, 0, 3), (2, 0));
/// assert_eq!(next_turn(2, 0, 3), (0, 1));
/// ```
pub fn next_turn(agent: AgentIndex, depth: usize, num_agents: usize) -> (AgentIndex, usize) {
    let next_agent = (agent + 1) % num_agents;

    if next_agent == 0 {
        (next_agent, depth + 1)
    } else {
        (next_agent, depth)
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// This is the struct that wraps an evaluation function and a set of [SearchOptions] and can be
/// used to search game states
///
/// The configuration is fixed at construction. Every search borrows it immutably, so one
/// `MultiAgentSearch` can run any number of searches, including at the same time from different
/// threads.
pub struct MultiAgentSearch<EvaluatorType> {
    #[derivative(Debug = "ignore")]
    evaluator: EvaluatorType,
    options: SearchOptions,
}

/// The limits a single walk of the tree runs under
#[derive(Debug, Clone, Copy)]
pub(crate) struct Limits {
    pub(crate) max_depth: usize,
    pub(crate) deadline: Option<Instant>,
}

impl<EvaluatorType> MultiAgentSearch<EvaluatorType> {
    /// Construct a new `MultiAgentSearch`
    ///
    /// Fails if the options are invalid, so a search that was built can always run
    pub fn new(
        evaluator: EvaluatorType,
        options: SearchOptions,
    ) -> Result<Self, ConfigurationError> {
        options.validate()?;

        Ok(Self { evaluator, options })
    }

    #[allow(missing_docs)]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    #[allow(missing_docs)]
    pub fn evaluator(&self) -> &EvaluatorType {
        &self.evaluator
    }

    /// Search the tree below `(state, agent, depth)` down to the configured depth
    ///
    /// `depth` counts plies already played, so a root search starts at `depth = 0` with
    /// `agent = 0`. Ties are broken with `rng`.
    ///
    /// Any error from the game state aborts the whole search.
    pub fn search<GameType, R>(
        &self,
        state: &GameType,
        agent: AgentIndex,
        depth: usize,
        rng: &mut R,
    ) -> Result<SearchResult<GameType::Action>, SearchError>
    where
        GameType: GameState,
        EvaluatorType: Evaluator<GameType>,
        R: Rng + ?Sized,
    {
        self.search_observed(state, agent, depth, rng, &mut NoopObserver)
    }

    /// Same as [MultiAgentSearch::search], reporting every node to `observer` once its value is
    /// known
    pub fn search_observed<GameType, R, Observer>(
        &self,
        state: &GameType,
        agent: AgentIndex,
        depth: usize,
        rng: &mut R,
        observer: &mut Observer,
    ) -> Result<SearchResult<GameType::Action>, SearchError>
    where
        GameType: GameState,
        EvaluatorType: Evaluator<GameType>,
        R: Rng + ?Sized,
        Observer: SearchObserver<GameType::Action> + ?Sized,
    {
        let limits = Limits {
            max_depth: self.options.depth,
            deadline: None,
        };

        self.walk(state, agent, depth, limits, rng, observer)
    }

    pub(crate) fn walk<GameType, R, Observer>(
        &self,
        state: &GameType,
        agent: AgentIndex,
        depth: usize,
        limits: Limits,
        rng: &mut R,
        observer: &mut Observer,
    ) -> Result<SearchResult<GameType::Action>, SearchError>
    where
        GameType: GameState,
        EvaluatorType: Evaluator<GameType>,
        R: Rng + ?Sized,
        Observer: SearchObserver<GameType::Action> + ?Sized,
    {
        let num_agents = state.num_agents();
        if agent >= num_agents {
            return Err(SearchError::InvalidAgent { agent, num_agents });
        }

        let mut walk = Walk {
            evaluator: &self.evaluator,
            variant: self.options.variant,
            limits,
            rng,
            observer,
        };

        walk.node(state, agent, depth)
    }
}

/// One walk of the tree. Holds everything the recursion needs so that none of it has to be read
/// from shared state along the way
struct Walk<'a, EvaluatorType, R: ?Sized, Observer: ?Sized> {
    evaluator: &'a EvaluatorType,
    variant: Variant,
    limits: Limits,
    rng: &'a mut R,
    observer: &'a mut Observer,
}

impl<'a, EvaluatorType, R, Observer> Walk<'a, EvaluatorType, R, Observer>
where
    R: Rng + ?Sized,
    Observer: ?Sized,
{
    fn node<GameType>(
        &mut self,
        state: &GameType,
        agent: AgentIndex,
        depth: usize,
    ) -> Result<SearchResult<GameType::Action>, SearchError>
    where
        GameType: GameState,
        EvaluatorType: Evaluator<GameType>,
        Observer: SearchObserver<GameType::Action>,
    {
        if let Some(deadline) = self.limits.deadline {
            if Instant::now() >= deadline {
                return Err(SearchError::DeadlineExceeded);
            }
        }

        if let Some((kind, value)) = self.leaf_value(state, depth) {
            return Ok(self.leaf(agent, depth, kind, value));
        }

        let actions = searchable_actions(state, agent);
        if actions.is_empty() {
            let value = self.evaluator.evaluate(state);
            return Ok(self.leaf(agent, depth, NodeKind::Exhausted, value));
        }

        let (next_agent, next_depth) = next_turn(agent, depth, state.num_agents());

        let children = actions
            .into_iter()
            .map(|action| -> Result<(GameType::Action, f64), SearchError> {
                let successor = state.generate_successor(agent, action)?;
                let result = self.node(&successor, next_agent, next_depth)?;

                Ok((action, result.value))
            })
            .collect::<Result<Vec<_>, SearchError>>()?;

        let (kind, result) = match (agent, self.variant) {
            (0, _) => (
                NodeKind::Max,
                pick_action(&children, Ordering::Greater, &mut *self.rng),
            ),
            (_, Variant::Minimax) => (
                NodeKind::Min,
                pick_action(&children, Ordering::Less, &mut *self.rng),
            ),
            (_, Variant::Expectimax) => (NodeKind::Chance, SearchResult::leaf(mean(&children))),
        };

        self.observer.visit(&NodeVisit {
            agent,
            depth,
            kind,
            action: result.action,
            value: result.value,
            children: &children,
        });

        Ok(result)
    }

    /// Terminal states take precedence over the depth cutoff, a win or loss is scored as such at
    /// any depth
    fn leaf_value<GameType>(&self, state: &GameType, depth: usize) -> Option<(NodeKind, f64)>
    where
        GameType: GameState,
        EvaluatorType: Evaluator<GameType>,
    {
        terminal_value(self.evaluator, state).or_else(|| {
            (depth >= self.limits.max_depth)
                .then(|| (NodeKind::Cutoff, self.evaluator.evaluate(state)))
        })
    }

    fn leaf<Action>(
        &mut self,
        agent: AgentIndex,
        depth: usize,
        kind: NodeKind,
        value: f64,
    ) -> SearchResult<Action>
    where
        Observer: SearchObserver<Action>,
    {
        self.observer.visit(&NodeVisit {
            agent,
            depth,
            kind,
            action: None,
            value,
            children: &[],
        });

        SearchResult::leaf(value)
    }
}

/// Picks the action whose value is furthest in the `preferred` direction, choosing uniformly at
/// random between every action tied for that value
///
/// Values are ordered with [f64::total_cmp], apart from `0.0` and `-0.0` which tie.
pub(crate) fn pick_action<Action, R>(
    children: &[(Action, f64)],
    preferred: Ordering,
    rng: &mut R,
) -> SearchResult<Action>
where
    Action: Copy,
    R: Rng + ?Sized,
{
    let best = children
        .iter()
        .map(|(_, value)| *value)
        .reduce(|best, value| {
            if value.total_cmp(&best) == preferred {
                value
            } else {
                best
            }
        });

    let Some(best) = best else {
        return SearchResult::leaf(f64::NAN);
    };

    let tied = children
        .iter()
        .filter(|(_, value)| *value == best || value.total_cmp(&best) == Ordering::Equal)
        .map(|(action, _)| *action)
        .collect_vec();

    SearchResult {
        action: tied.choose(rng).copied(),
        value: best,
    }
}

fn mean<Action>(children: &[(Action, f64)]) -> f64 {
    children.iter().map(|(_, value)| value).sum::<f64>() / children.len() as f64
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        test_game::{CountingGame, Spec, TreeGame},
        ScoreEvaluation, TreeRecorder, LOSE_PENALTY, WIN_BONUS,
    };

    use super::*;

    fn searcher(depth: usize, variant: Variant) -> MultiAgentSearch<ScoreEvaluation> {
        MultiAgentSearch::new(ScoreEvaluation, SearchOptions { depth, variant }).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Two plies of a two agent game, values picked so minimax and expectimax disagree
    fn two_ply_game() -> TreeGame {
        TreeGame::new(
            2,
            Spec::branch(
                0.0,
                vec![
                    (
                        'a',
                        Spec::branch(0.0, vec![('x', Spec::leaf(3.0)), ('y', Spec::leaf(12.0))]),
                    ),
                    (
                        'b',
                        Spec::branch(0.0, vec![('x', Spec::leaf(2.0)), ('y', Spec::leaf(4.0))]),
                    ),
                    (
                        'c',
                        Spec::branch(
                            0.0,
                            vec![
                                ('x', Spec::leaf(14.0)),
                                ('y', Spec::leaf(5.0)),
                                ('z', Spec::leaf(2.0)),
                            ],
                        ),
                    ),
                ],
            ),
        )
    }

    #[test]
    fn test_zero_depth_is_a_configuration_error() {
        let result = MultiAgentSearch::new(
            ScoreEvaluation,
            SearchOptions {
                depth: 0,
                variant: Variant::Minimax,
            },
        );

        assert_eq!(result.err(), Some(ConfigurationError::ZeroDepth));
    }

    #[test]
    fn test_win_is_scored_before_anything_else() {
        let game = TreeGame::new(2, Spec::win_with(7.0, vec![('a', Spec::leaf(0.0))]));
        let search = searcher(2, Variant::Minimax);

        for (agent, depth) in [(0, 0), (1, 0), (0, 1), (1, 2), (0, 5)] {
            let result = search.search(&game, agent, depth, &mut rng()).unwrap();

            assert_eq!(result, SearchResult::leaf(7.0 + WIN_BONUS));
        }
    }

    #[test]
    fn test_lose_is_scored_before_anything_else() {
        let game = TreeGame::new(2, Spec::lose_with(7.0, vec![('a', Spec::leaf(0.0))]));
        let search = searcher(2, Variant::Expectimax);

        for (agent, depth) in [(0, 0), (1, 0), (0, 2), (1, 9)] {
            let result = search.search(&game, agent, depth, &mut rng()).unwrap();

            assert_eq!(result, SearchResult::leaf(7.0 - LOSE_PENALTY));
        }
    }

    #[test]
    fn test_cutoff_returns_the_evaluation() {
        let game = two_ply_game();
        let search = searcher(2, Variant::Minimax);

        let result = search.search(&game, 0, 2, &mut rng()).unwrap();

        assert_eq!(result, SearchResult::leaf(0.0));
    }

    #[test]
    fn test_minimax_backs_up_the_minimum() {
        let game = two_ply_game();
        let search = searcher(1, Variant::Minimax);

        let result = search.search(&game, 0, 0, &mut rng()).unwrap();

        // a -> min(3, 12) = 3, b -> 2, c -> 2
        assert_eq!(result.action, Some('a'));
        assert_eq!(result.value, 3.0);
    }

    #[test]
    fn test_minimizer_reports_its_action() {
        let game = two_ply_game().successor('a');
        let search = searcher(1, Variant::Minimax);

        let result = search.search(&game, 1, 0, &mut rng()).unwrap();

        assert_eq!(result.action, Some('x'));
        assert_eq!(result.value, 3.0);
    }

    #[test]
    fn test_expectimax_backs_up_the_average() {
        let game = two_ply_game();
        let search = searcher(1, Variant::Expectimax);

        let result = search.search(&game, 0, 0, &mut rng()).unwrap();

        // a -> 7.5, b -> 3, c -> 7
        assert_eq!(result.action, Some('a'));
        assert!((result.value - 7.5).abs() < 1e-9);

        let chance = search
            .search(&game.successor('c'), 1, 0, &mut rng())
            .unwrap();

        assert_eq!(chance.action, None);
        assert!((chance.value - (14.0 + 5.0 + 2.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_maximizer_never_returns_a_lower_value() {
        let game = TreeGame::new(
            2,
            Spec::branch(
                0.0,
                vec![
                    ('a', Spec::branch(1.0, vec![('x', Spec::leaf(1.0))])),
                    ('b', Spec::branch(2.0, vec![('x', Spec::leaf(2.0))])),
                ],
            ),
        );
        let search = searcher(1, Variant::Minimax);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = search.search(&game, 0, 0, &mut rng).unwrap();

            assert_eq!(result.action, Some('b'));
            assert_eq!(result.value, 2.0);
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let game = two_ply_game();
        let before = game.clone();
        let search = searcher(1, Variant::Minimax);

        let first = search.search(&game, 0, 0, &mut rng()).unwrap();
        let second = search.search(&game, 0, 0, &mut rng()).unwrap();

        assert_eq!(first, second);
        assert_eq!(game, before);
    }

    #[test]
    fn test_terminal_found_mid_tree_gets_the_bonus() {
        let game = TreeGame::new(
            2,
            Spec::branch(
                0.0,
                vec![
                    ('a', Spec::branch(0.0, vec![('x', Spec::win(1.0))])),
                    ('b', Spec::branch(0.0, vec![('x', Spec::leaf(50.0))])),
                ],
            ),
        );
        let search = searcher(3, Variant::Minimax);

        let result = search.search(&game, 0, 0, &mut rng()).unwrap();

        assert_eq!(result.action, Some('a'));
        assert_eq!(result.value, 1.0 + WIN_BONUS);
    }

    #[test]
    fn test_noops_are_never_expanded() {
        let game = TreeGame::new(
            2,
            Spec::branch(
                0.0,
                vec![('.', Spec::leaf(100.0)), ('a', Spec::leaf(1.0))],
            ),
        );
        let search = searcher(1, Variant::Minimax);

        let result = search.search(&game, 0, 0, &mut rng()).unwrap();

        assert_eq!(result.action, Some('a'));
    }

    #[test]
    fn test_no_actions_mid_tree_is_evaluated_as_a_leaf() {
        let game = TreeGame::new(
            2,
            Spec::branch(0.0, vec![('a', Spec::leaf(6.0)), ('b', Spec::leaf(4.0))]),
        );
        let mut recorder = TreeRecorder::default();
        let search = searcher(3, Variant::Minimax);

        let result = search
            .search_observed(&game, 0, 0, &mut rng(), &mut recorder)
            .unwrap();

        assert_eq!(result.action, Some('a'));
        assert_eq!(result.value, 6.0);

        let tree = recorder.into_tree().unwrap();
        assert_eq!(tree.child('a').map(|c| c.kind()), Some(NodeKind::Exhausted));
    }

    #[test]
    fn test_depth_increments_after_every_agent_moved() {
        let leaves = RefCell::new(vec![]);
        let evaluate = |game: &CountingGame| {
            leaves.borrow_mut().push(game.moves);
            0.0
        };
        let search = MultiAgentSearch::new(
            evaluate,
            SearchOptions {
                depth: 2,
                variant: Variant::Minimax,
            },
        )
        .unwrap();

        search
            .search(&CountingGame::new(3), 0, 0, &mut rng())
            .unwrap();

        // 2 actions per agent, 3 agents, 2 plies
        let leaves = leaves.into_inner();
        assert_eq!(leaves.len(), 2usize.pow(6));
        assert!(leaves.iter().all(|moves| *moves == 6));
    }

    #[test]
    fn test_every_node_is_observed_with_its_ply() {
        #[derive(Default)]
        struct Turns(Vec<(AgentIndex, usize, NodeKind)>);

        impl<A> SearchObserver<A> for Turns {
            fn visit(&mut self, visit: &NodeVisit<'_, A>) {
                self.0.push((visit.agent, visit.depth, visit.kind));
            }
        }

        let search = searcher(1, Variant::Minimax);
        let mut turns = Turns::default();

        search
            .search_observed(&CountingGame::new(3), 0, 0, &mut rng(), &mut turns)
            .unwrap();

        let turns = turns.0;
        // 8 leaves, 4 + 2 + 1 inner nodes
        assert_eq!(turns.len(), 15);
        assert_eq!(turns.last(), Some(&(0, 0, NodeKind::Max)));
        assert!(turns.contains(&(1, 0, NodeKind::Min)));
        assert!(turns.contains(&(2, 0, NodeKind::Min)));
        assert!(turns
            .iter()
            .filter(|(_, _, kind)| kind.is_leaf())
            .all(|turn| *turn == (0, 1, NodeKind::Cutoff)));
    }

    #[test]
    fn test_illegal_successor_aborts_the_search() {
        let game = TreeGame::new(
            2,
            Spec::branch(
                0.0,
                vec![('a', Spec::leaf(1.0)), ('!', Spec::leaf(2.0))],
            ),
        );
        let search = searcher(1, Variant::Minimax);

        let result = search.search(&game, 0, 0, &mut rng());

        assert!(matches!(result, Err(SearchError::IllegalAction(_))));
    }

    #[test]
    fn test_agent_out_of_range() {
        let search = searcher(1, Variant::Minimax);

        let result = search.search(&two_ply_game(), 2, 0, &mut rng());

        assert_eq!(
            result,
            Err(SearchError::InvalidAgent {
                agent: 2,
                num_agents: 2
            })
        );
    }

    #[test]
    fn test_expired_deadline_aborts() {
        let search = searcher(1, Variant::Minimax);
        let limits = Limits {
            max_depth: 1,
            deadline: Some(Instant::now()),
        };

        let result = search.walk(
            &two_ply_game(),
            0,
            0,
            limits,
            &mut rng(),
            &mut NoopObserver,
        );

        assert_eq!(result, Err(SearchError::DeadlineExceeded));
    }

    #[test]
    fn test_pick_action_breaks_ties_at_random() {
        let children = [('a', 1.0), ('b', 3.0), ('c', 3.0), ('d', -0.0), ('e', 0.0)];
        let mut rng = rng();

        let mut picked = vec![];
        for _ in 0..100 {
            picked.push(pick_action(&children, Ordering::Greater, &mut rng).action);
        }
        assert!(picked.contains(&Some('b')));
        assert!(picked.contains(&Some('c')));
        assert!(picked.iter().all(|a| *a == Some('b') || *a == Some('c')));

        let mut picked = vec![];
        for _ in 0..100 {
            picked.push(pick_action(&children, Ordering::Less, &mut rng).action);
        }
        assert!(picked.contains(&Some('d')));
        assert!(picked.contains(&Some('e')));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[('a', 1.0), ('b', 2.0), ('c', 6.0)]), 3.0);
    }
}
