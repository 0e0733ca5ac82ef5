use std::{fmt, str::FromStr};

use adversarial_search::{ConfigurationError, Evaluator, GameState, ScoreEvaluation, MAXIMIZER};

use crate::GridState;

/// Pacman's score, pulled towards the closest food and pushed away from the closest ghost
///
/// `score - 2 * nearest food + 3 * nearest ghost`, using manhattan distances. A missing food or
/// ghost contributes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceEvaluation;

impl Evaluator<GridState> for DistanceEvaluation {
    fn evaluate(&self, state: &GridState) -> f64 {
        let pacman = state.pacman();

        let nearest_food = state
            .food()
            .map(|food| pacman.distance(food))
            .min()
            .unwrap_or(0);
        let nearest_ghost = state
            .ghosts()
            .iter()
            .map(|ghost| pacman.distance(*ghost))
            .min()
            .unwrap_or(0);

        state.score(MAXIMIZER) - 2.0 * nearest_food as f64 + 3.0 * nearest_ghost as f64
    }
}

/// The evaluations that can be picked by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridEvaluation {
    /// [ScoreEvaluation]
    #[default]
    Score,
    /// [DistanceEvaluation]
    Distance,
}

impl Evaluator<GridState> for GridEvaluation {
    fn evaluate(&self, state: &GridState) -> f64 {
        match self {
            GridEvaluation::Score => ScoreEvaluation.evaluate(state),
            GridEvaluation::Distance => DistanceEvaluation.evaluate(state),
        }
    }
}

impl FromStr for GridEvaluation {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(GridEvaluation::Score),
            "distance" => Ok(GridEvaluation::Distance),
            _ => Err(ConfigurationError::UnknownEvaluation(s.to_owned())),
        }
    }
}

impl fmt::Display for GridEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridEvaluation::Score => write!(f, "score"),
            GridEvaluation::Distance => write!(f, "distance"),
        }
    }
}

/// Look up an evaluation by the name a user typed
pub fn evaluation_by_name(name: &str) -> Result<GridEvaluation, ConfigurationError> {
    name.parse()
}
