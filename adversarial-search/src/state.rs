use std::fmt::Debug;

use crate::IllegalActionError;

/// Index of an agent within a game. Agents move in index order, starting from [MAXIMIZER]
pub type AgentIndex = usize;

/// The controlled agent. The search always maximizes from this agent's point of view
pub const MAXIMIZER: AgentIndex = 0;

/// A read-only view of a game configuration
///
/// Every node in the search tree is its own snapshot: [GameState::generate_successor] returns a
/// new state and must never change the state it was called on.
pub trait GameState: Sized {
    /// A move an agent can make
    type Action: Copy + Eq + Debug;

    /// The number of agents taking turns in this game, including the maximizer
    fn num_agents(&self) -> usize;

    /// All the actions the given agent may currently take
    ///
    /// This may include a no-op action, see [GameState::is_noop]
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// Whether `action` leaves the game unchanged when `agent` takes it
    ///
    /// The search never expands these, a self-transition doesn't get the game any closer to an
    /// end state. An agent that can only wait should get an action that isn't a no-op, otherwise
    /// the search stops at it.
    fn is_noop(&self, _agent: AgentIndex, _action: &Self::Action) -> bool {
        false
    }

    /// Build the state that results from `agent` taking `action`
    ///
    /// Fails when `action` is not currently legal for `agent`
    fn generate_successor(
        &self,
        agent: AgentIndex,
        action: Self::Action,
    ) -> Result<Self, IllegalActionError>;

    /// The maximizer has won
    fn is_win(&self) -> bool;

    /// The maximizer has lost
    fn is_lose(&self) -> bool;

    /// The current score for the given agent
    fn score(&self, agent: AgentIndex) -> f64;

    /// Whether the game is over, either way
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// The legal actions for `agent` with the no-op actions filtered out
pub(crate) fn searchable_actions<G: GameState>(state: &G, agent: AgentIndex) -> Vec<G::Action> {
    state
        .legal_actions(agent)
        .into_iter()
        .filter(|action| !state.is_noop(agent, action))
        .collect()
}
