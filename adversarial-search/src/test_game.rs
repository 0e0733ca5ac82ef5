//! Small games with hand picked values, only used by the tests

use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::{AgentIndex, GameState, IllegalActionError, MAXIMIZER};

/// The shape of a [TreeGame]
///
/// `'.'` is the no-op action, and `'!'` is listed as legal but always rejected when a successor
/// is generated for it.
#[derive(Debug, Clone)]
pub(crate) struct Spec {
    value: f64,
    outcome: Option<Outcome>,
    children: Vec<(char, Spec)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Win,
    Lose,
}

impl Spec {
    pub(crate) fn leaf(value: f64) -> Self {
        Self::branch(value, vec![])
    }

    pub(crate) fn branch(value: f64, children: Vec<(char, Spec)>) -> Self {
        Spec {
            value,
            outcome: None,
            children,
        }
    }

    pub(crate) fn win(value: f64) -> Self {
        Self::win_with(value, vec![])
    }

    pub(crate) fn lose(value: f64) -> Self {
        Self::lose_with(value, vec![])
    }

    pub(crate) fn win_with(value: f64, children: Vec<(char, Spec)>) -> Self {
        Spec {
            value,
            outcome: Some(Outcome::Win),
            children,
        }
    }

    pub(crate) fn lose_with(value: f64, children: Vec<(char, Spec)>) -> Self {
        Spec {
            value,
            outcome: Some(Outcome::Lose),
            children,
        }
    }
}

#[derive(Debug)]
struct FlatNode {
    value: f64,
    outcome: Option<Outcome>,
    children: Vec<(char, usize)>,
}

/// An explicit game tree. The tree itself encodes whose turn it is, every agent just picks one
/// of the children of the current node
#[derive(Debug, Clone)]
pub(crate) struct TreeGame {
    num_agents: usize,
    nodes: Arc<Vec<FlatNode>>,
    current: usize,
}

impl TreeGame {
    pub(crate) fn new(num_agents: usize, spec: Spec) -> Self {
        let mut nodes = vec![];
        flatten(spec, &mut nodes);

        Self {
            num_agents,
            nodes: Arc::new(nodes),
            current: 0,
        }
    }

    fn node(&self) -> &FlatNode {
        &self.nodes[self.current]
    }

    pub(crate) fn value(&self) -> f64 {
        self.node().value
    }

    pub(crate) fn successor(&self, action: char) -> Self {
        self.generate_successor(MAXIMIZER, action).unwrap()
    }
}

fn flatten(spec: Spec, nodes: &mut Vec<FlatNode>) -> usize {
    let Spec {
        value,
        outcome,
        children,
    } = spec;

    let index = nodes.len();
    nodes.push(FlatNode {
        value,
        outcome,
        children: vec![],
    });

    let children = children
        .into_iter()
        .map(|(action, child)| (action, flatten(child, nodes)))
        .collect();
    nodes[index].children = children;

    index
}

impl PartialEq for TreeGame {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes) && self.current == other.current
    }
}

impl Eq for TreeGame {}

impl Hash for TreeGame {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.current.hash(state);
    }
}

impl GameState for TreeGame {
    type Action = char;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<char> {
        self.node().children.iter().map(|(action, _)| *action).collect()
    }

    fn is_noop(&self, _agent: AgentIndex, action: &char) -> bool {
        *action == '.'
    }

    fn generate_successor(
        &self,
        agent: AgentIndex,
        action: char,
    ) -> Result<Self, IllegalActionError> {
        if action == '!' {
            return Err(IllegalActionError::new(agent, &action));
        }

        let (_, child) = self
            .node()
            .children
            .iter()
            .find(|(a, _)| *a == action)
            .ok_or_else(|| IllegalActionError::new(agent, &action))?;

        Ok(Self {
            current: *child,
            ..self.clone()
        })
    }

    fn is_win(&self) -> bool {
        self.node().outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.node().outcome == Some(Outcome::Lose)
    }

    fn score(&self, agent: AgentIndex) -> f64 {
        if agent == MAXIMIZER {
            self.value()
        } else {
            -self.value()
        }
    }
}

/// Every agent always has the same two actions and the game never ends. Counts the moves made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CountingGame {
    num_agents: usize,
    pub(crate) moves: u32,
}

impl CountingGame {
    pub(crate) fn new(num_agents: usize) -> Self {
        Self {
            num_agents,
            moves: 0,
        }
    }
}

impl GameState for CountingGame {
    type Action = bool;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<bool> {
        vec![false, true]
    }

    fn generate_successor(
        &self,
        _agent: AgentIndex,
        _action: bool,
    ) -> Result<Self, IllegalActionError> {
        Ok(Self {
            moves: self.moves + 1,
            ..*self
        })
    }

    fn is_win(&self) -> bool {
        false
    }

    fn is_lose(&self) -> bool {
        false
    }

    fn score(&self, _agent: AgentIndex) -> f64 {
        self.moves as f64
    }
}
