//! The recursive search itself, and everything needed to configure and watch it.
//!
//! The search walks the game tree depth first. Each node is a `(state, agent, depth)` triple and
//! each step down the tree moves exactly one agent: either the next agent at the same depth, or
//! back to the maximizer one ply deeper. See [next_turn].
//!
//! The maximizer always picks the highest valued action. The other agents depend on the
//! [Variant]:
//!
//! * [Variant::Minimax] assumes every opponent is working to minimize your score, and picks the
//!   lowest valued action for them
//! * [Variant::Expectimax] assumes every opponent picks uniformly at random, and backs up the
//!   average of their actions
//!
//! Ties between equally valued actions are broken uniformly at random, using the random number
//! generator handed to the search. Seed it to get reproducible decisions.
//!
//! ```rust
//! use adversarial_search::{
//!     GameState, IllegalActionError, MultiAgentSearch, SearchOptions, TreeRecorder, Variant,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Each agent picks a digit, the maximizer wants the running total to be high
//! #[derive(Debug, Clone, Copy)]
//! struct Digits {
//!     total: u32,
//! }
//!
//! impl GameState for Digits {
//!     type Action = u32;
//!
//!     fn num_agents(&self) -> usize {
//!         2
//!     }
//!
//!     fn legal_actions(&self, _agent: usize) -> Vec<u32> {
//!         vec![1, 5]
//!     }
//!
//!     fn generate_successor(&self, agent: usize, digit: u32) -> Result<Self, IllegalActionError> {
//!         if digit != 1 && digit != 5 {
//!             return Err(IllegalActionError::new(agent, &digit));
//!         }
//!
//!         Ok(Digits { total: self.total + digit })
//!     }
//!
//!     fn is_win(&self) -> bool {
//!         false
//!     }
//!
//!     fn is_lose(&self) -> bool {
//!         false
//!     }
//!
//!     fn score(&self, _agent: usize) -> f64 {
//!         self.total as f64
//!     }
//! }
//!
//! let evaluate = |digits: &Digits| digits.total as f64;
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! // The opponent always adds 1 when it is trying to hurt us
//! let minimax = MultiAgentSearch::new(evaluate, SearchOptions { depth: 1, variant: Variant::Minimax }).unwrap();
//! let result = minimax.search(&Digits { total: 0 }, 0, 0, &mut rng).unwrap();
//! assert_eq!(result.action, Some(5));
//! assert_eq!(result.value, 6.0);
//!
//! // And adds 3 on average when it moves at random
//! let expectimax = MultiAgentSearch::new(evaluate, SearchOptions { depth: 1, variant: Variant::Expectimax }).unwrap();
//! let mut recorder = TreeRecorder::default();
//! let result = expectimax
//!     .search_observed(&Digits { total: 0 }, 0, 0, &mut rng, &mut recorder)
//!     .unwrap();
//! assert_eq!(result.value, 8.0);
//!
//! let tree = recorder.into_tree().unwrap();
//! assert_eq!(tree.chosen_route(), vec![(0, 5)]);
//! ```

mod engine;
pub use engine::{next_turn, MultiAgentSearch, SearchResult};
pub(crate) use engine::{pick_action, Limits};

mod observer;
pub use observer::{NodeKind, NodeVisit, NoopObserver, SearchObserver, TracingObserver};

mod options;
pub use options::{SearchOptions, Variant};

mod search_tree;
pub use search_tree::{SearchTree, TreeRecorder};
