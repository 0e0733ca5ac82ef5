use crate::{search::NodeKind, GameState, MAXIMIZER};

/// Added on top of the evaluation of any state the maximizer has won
///
/// This is large enough that a win outranks any heuristic difference, no matter how deep in the
/// tree the win was found.
pub const WIN_BONUS: f64 = 1000.0;

/// Subtracted from the evaluation of any state the maximizer has lost
pub const LOSE_PENALTY: f64 = 1000.0;

/// This trait is used to control something that can return a score from a game state
///
/// Higher is better for the maximizer. We use this trait to be able to layer in different
/// scoring approaches, such as caching.
pub trait Evaluator<GameType> {
    /// Score the given state from the maximizer's point of view
    fn evaluate(&self, state: &GameType) -> f64;
}

impl<GameType, FnLike: Fn(&GameType) -> f64> Evaluator<GameType> for FnLike {
    fn evaluate(&self, state: &GameType) -> f64 {
        (self)(state)
    }
}

/// The maximizer's raw game score
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluation;

impl<GameType: GameState> Evaluator<GameType> for ScoreEvaluation {
    fn evaluate(&self, state: &GameType) -> f64 {
        state.score(MAXIMIZER)
    }
}

/// Scores end states. Returns `None` if the game is still going
///
/// Wins and losses layer the fixed bonus or penalty on top of the evaluation, so the underlying
/// evaluators don't need to know about end states.
pub(crate) fn terminal_value<G, E>(evaluator: &E, state: &G) -> Option<(NodeKind, f64)>
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
{
    if state.is_win() {
        Some((NodeKind::Win, evaluator.evaluate(state) + WIN_BONUS))
    } else if state.is_lose() {
        Some((NodeKind::Lose, evaluator.evaluate(state) - LOSE_PENALTY))
    } else {
        None
    }
}
