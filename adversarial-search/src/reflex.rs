use std::cmp::Ordering;

use derivative::Derivative;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::{
    score::terminal_value, search::pick_action, state::searchable_actions, Evaluator, GameState,
    SearchError, MAXIMIZER,
};

#[derive(Derivative)]
#[derivative(Debug)]
/// Looks a single move ahead: every successor of the maximizer's actions is evaluated and the best
/// one is picked, without considering what the other agents do afterwards
///
/// Useful as a baseline opponent for the full search.
pub struct ReflexSelector<EvaluatorType, R = StdRng> {
    #[derivative(Debug = "ignore")]
    evaluator: EvaluatorType,
    #[derivative(Debug = "ignore")]
    rng: R,
}

impl<EvaluatorType> ReflexSelector<EvaluatorType, StdRng> {
    #[allow(missing_docs)]
    pub fn new(evaluator: EvaluatorType) -> Self {
        Self::from_rng(evaluator, StdRng::from_entropy())
    }

    #[allow(missing_docs)]
    pub fn with_seed(evaluator: EvaluatorType, seed: u64) -> Self {
        Self::from_rng(evaluator, StdRng::seed_from_u64(seed))
    }
}

impl<EvaluatorType, R: Rng> ReflexSelector<EvaluatorType, R> {
    #[allow(missing_docs)]
    pub fn from_rng(evaluator: EvaluatorType, rng: R) -> Self {
        Self { evaluator, rng }
    }

    /// Pick the maximizer's action whose successor evaluates the highest
    ///
    /// Successors that end the game get the same win bonus and lose penalty the full search uses.
    pub fn choose_action<GameType>(
        &mut self,
        state: &GameType,
    ) -> Result<GameType::Action, SearchError>
    where
        GameType: GameState,
        EvaluatorType: Evaluator<GameType>,
    {
        if state.is_terminal() {
            return Err(SearchError::NoLegalAction { agent: MAXIMIZER });
        }

        let children = searchable_actions(state, MAXIMIZER)
            .into_iter()
            .map(|action| -> Result<(GameType::Action, f64), SearchError> {
                let successor = state.generate_successor(MAXIMIZER, action)?;
                let value = terminal_value(&self.evaluator, &successor)
                    .map(|(_, value)| value)
                    .unwrap_or_else(|| self.evaluator.evaluate(&successor));

                debug!(?action, value, "reflex option");

                Ok((action, value))
            })
            .collect::<Result<Vec<_>, SearchError>>()?;

        pick_action(&children, Ordering::Greater, &mut self.rng)
            .action
            .ok_or(SearchError::NoLegalAction { agent: MAXIMIZER })
    }
}
