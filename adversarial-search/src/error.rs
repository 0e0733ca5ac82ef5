use std::fmt::Debug;

use thiserror::Error;

use crate::AgentIndex;

/// An action was applied to a state where it isn't currently legal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("action {action} is not legal for agent {agent}")]
pub struct IllegalActionError {
    /// The agent that tried to move
    pub agent: AgentIndex,
    /// The `Debug` rendering of the rejected action
    pub action: String,
}

impl IllegalActionError {
    /// Build the error for `agent` attempting `action`
    pub fn new<A: Debug>(agent: AgentIndex, action: &A) -> Self {
        Self {
            agent,
            action: format!("{action:?}"),
        }
    }
}

/// Failures that abort a search
///
/// None of these are recovered from inside the search. Whatever was computed for sibling
/// branches before the failure is thrown away.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The game state rejected an action while generating a successor
    #[error(transparent)]
    IllegalAction(#[from] IllegalActionError),

    /// The root offered nothing to search, either it has no legal actions or the game is
    /// already decided
    #[error("agent {agent} has no legal actions")]
    NoLegalAction {
        #[allow(missing_docs)]
        agent: AgentIndex,
    },

    /// The search was started for an agent the game doesn't have
    #[error("agent {agent} is out of range for a game with {num_agents} agents")]
    InvalidAgent {
        #[allow(missing_docs)]
        agent: AgentIndex,
        #[allow(missing_docs)]
        num_agents: usize,
    },

    /// The deadline passed before the search finished
    #[error("the search deadline passed before the search finished")]
    DeadlineExceeded,
}

/// Invalid search configuration. These are raised when building a search, never mid-search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The search needs at least one ply
    #[error("search depth must be at least 1")]
    ZeroDepth,

    /// The variant name isn't one we know
    #[error("unknown search variant `{0}`, expected `minimax` or `expectimax`")]
    UnknownVariant(String),

    /// The evaluation function name isn't one we know
    #[error("unknown evaluation function `{0}`")]
    UnknownEvaluation(String),
}
