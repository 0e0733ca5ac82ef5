#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! A small pacman style grid game, used to drive the [adversarial_search] engine end to end.
//!
//! Layouts are plain text, one character per cell:
//!
//! * `%` a wall
//! * `.` a food pellet
//! * `P` pacman, the maximizer
//! * `G` a ghost. Ghosts are numbered `1..` in reading order
//! * ` ` an empty cell
//!
//! ```rust
//! use adversarial_search::{GameState, MoveSelector, SearchOptions};
//! use grid_world::{Direction, DistanceEvaluation, GridState};
//!
//! let state: GridState = "%%%%%%%\n%G P.%%\n%%%%%%%".parse().unwrap();
//! assert_eq!(state.num_agents(), 2);
//!
//! let mut selector = MoveSelector::with_seed(DistanceEvaluation, SearchOptions::default(), 1).unwrap();
//! assert_eq!(selector.choose_action(&state).unwrap(), Direction::East);
//! ```

mod direction;
pub use direction::{Direction, Position};

mod evaluation;
pub use evaluation::{evaluation_by_name, DistanceEvaluation, GridEvaluation};

mod layout;
pub use layout::{Layout, LayoutError};

mod state;
pub use state::{GridState, Outcome, FOOD_POINTS, LOSE_POINTS, TIME_PENALTY, WIN_POINTS};
