use dashmap::DashMap;
use derivative::Derivative;

use super::Evaluator;

use std::hash::Hash;

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = ""))]
/// Cache the evaluation of each state
///
/// The cache is a [DashMap] borrowed from the caller, so one cache can be shared between several
/// searches and across threads. Only leaves are ever evaluated, so the cache pays off when the
/// same state is reachable along different move orders.
///
/// Entries are keyed by the state alone, so a cache must only be shared between wrappers of the
/// same evaluator. A wrapper around a different evaluator would be handed the first one's values.
pub struct CachedEvaluation<'cache, EvaluatorType, GameType> {
    #[derivative(Debug = "ignore")]
    evaluator: EvaluatorType,
    #[derivative(Debug = "ignore")]
    cache: &'cache DashMap<GameType, f64>,
}

impl<'cache, EvaluatorType, GameType> CachedEvaluation<'cache, EvaluatorType, GameType>
where
    GameType: Eq + Hash,
{
    /// Wrap `evaluator`, remembering its results in `cache`
    pub fn new(evaluator: EvaluatorType, cache: &'cache DashMap<GameType, f64>) -> Self {
        Self { evaluator, cache }
    }

    /// How many distinct states have been evaluated so far
    pub fn cached_states(&self) -> usize {
        self.cache.len()
    }
}

impl<'cache, EvaluatorType, GameType> Evaluator<GameType>
    for CachedEvaluation<'cache, EvaluatorType, GameType>
where
    EvaluatorType: Evaluator<GameType>,
    GameType: Eq + Hash + Clone,
{
    fn evaluate(&self, state: &GameType) -> f64 {
        if let Some(value) = self.cache.get(state) {
            return *value;
        }

        *self
            .cache
            .entry(state.clone())
            .or_insert_with(|| self.evaluator.evaluate(state))
    }
}
