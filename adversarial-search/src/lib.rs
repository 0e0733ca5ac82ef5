#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements depth-limited multi-agent adversarial search. You provide a game that
//! implements [GameState] and an evaluation function that turns a given state into an `f64`,
//! where higher is better for the controlled agent.
//!
//! Agent `0` is always the maximizer. Every other agent is either an adversary that minimizes
//! (the [Variant::Minimax] variant) or a uniformly random opponent whose moves are averaged
//! (the [Variant::Expectimax] variant). Depth is counted in full rounds of play, so with three
//! agents three moves are made before the depth goes up by one.
//!
//! ```rust
//! use adversarial_search::{
//!     GameState, IllegalActionError, MoveSelector, SearchOptions, Variant,
//! };
//!
//! // A race to ten: the maximizer adds, the opponent subtracts
//! #[derive(Debug, Clone, Copy)]
//! struct Race(i32);
//!
//! impl GameState for Race {
//!     type Action = i32;
//!
//!     fn num_agents(&self) -> usize {
//!         2
//!     }
//!
//!     fn legal_actions(&self, _agent: usize) -> Vec<i32> {
//!         vec![1, 2]
//!     }
//!
//!     fn generate_successor(&self, agent: usize, action: i32) -> Result<Self, IllegalActionError> {
//!         match (agent, action) {
//!             (0, 1 | 2) => Ok(Race(self.0 + action)),
//!             (1, 1 | 2) => Ok(Race(self.0 - action)),
//!             _ => Err(IllegalActionError::new(agent, &action)),
//!         }
//!     }
//!
//!     fn is_win(&self) -> bool {
//!         self.0 >= 10
//!     }
//!
//!     fn is_lose(&self) -> bool {
//!         self.0 <= -10
//!     }
//!
//!     fn score(&self, agent: usize) -> f64 {
//!         if agent == 0 { self.0 as f64 } else { -self.0 as f64 }
//!     }
//! }
//!
//! let options = SearchOptions { depth: 2, variant: Variant::Minimax };
//! let mut selector = MoveSelector::with_seed(|race: &Race| race.0 as f64, options, 7).unwrap();
//!
//! assert_eq!(selector.choose_action(&Race(0)).unwrap(), 2);
//! ```

mod cached_score;
pub use cached_score::CachedEvaluation;

mod error;
pub use error::{ConfigurationError, IllegalActionError, SearchError};

mod reflex;
pub use reflex::ReflexSelector;

mod score;
pub use score::{Evaluator, ScoreEvaluation, LOSE_PENALTY, WIN_BONUS};

pub mod search;
pub use search::{
    next_turn, MultiAgentSearch, NodeKind, NodeVisit, NoopObserver, SearchObserver,
    SearchOptions, SearchResult, SearchTree, TracingObserver, TreeRecorder, Variant,
};

mod selector;
pub use selector::MoveSelector;

mod state;
pub use state::{AgentIndex, GameState, MAXIMIZER};

#[cfg(test)]
mod test_game;
#[cfg(test)]
mod test_tracing;
