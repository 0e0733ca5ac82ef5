use std::fmt::Debug;
use text_trees::StringTreeNode;

use crate::AgentIndex;

use super::{NodeKind, NodeVisit, SearchObserver};

#[derive(Debug, Clone, PartialEq)]
/// A recorded search tree
/// It contains all the information the search generated about the game tree
pub enum SearchTree<Action> {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen value
    Node {
        /// Which agent was moving at this node
        agent: AgentIndex,
        /// The ply this node was in
        depth: usize,
        /// [NodeKind::Max], [NodeKind::Min] or [NodeKind::Chance]
        kind: NodeKind,
        /// The chosen action, chance nodes don't have one
        action: Option<Action>,
        /// The backed up value
        value: f64,
        /// A 'recursive' look at all the actions under us, in the order they were expanded
        options: Vec<(Action, Self)>,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach a terminal state (win/lose), the maximum depth, or an agent
    /// has no moves
    Leaf {
        #[allow(missing_docs)]
        agent: AgentIndex,
        #[allow(missing_docs)]
        depth: usize,
        #[allow(missing_docs)]
        kind: NodeKind,
        #[allow(missing_docs)]
        value: f64,
    },
}

impl<Action> SearchTree<Action>
where
    Action: Copy + Debug + PartialEq,
{
    /// Returns the value for this node
    pub fn value(&self) -> f64 {
        match self {
            SearchTree::Node { value, .. } => *value,
            SearchTree::Leaf { value, .. } => *value,
        }
    }

    /// Returns the kind of this node
    pub fn kind(&self) -> NodeKind {
        match self {
            SearchTree::Node { kind, .. } => *kind,
            SearchTree::Leaf { kind, .. } => *kind,
        }
    }

    /// Returns the action picked at this node
    /// If we are a leaf or chance node, this will return None
    pub fn chosen_action(&self) -> Option<Action> {
        match self {
            SearchTree::Node { action, .. } => *action,
            SearchTree::Leaf { .. } => None,
        }
    }

    /// Returns the subtree reached by the given action at this node
    pub fn child(&self, action: Action) -> Option<&Self> {
        match self {
            SearchTree::Node { options, .. } => options
                .iter()
                .find(|(option, _)| *option == action)
                .map(|(_, child)| child),
            SearchTree::Leaf { .. } => None,
        }
    }

    /// Returns all the moves in the 'route' through the game tree that the search took
    /// This is useful for debugging as it shows each of the moves we and our opponents made during
    /// the simulation
    ///
    /// The route stops at the first leaf or chance node, since nobody picks an action there
    pub fn chosen_route(&self) -> Vec<(AgentIndex, Action)> {
        match self {
            SearchTree::Leaf { .. } => vec![],
            SearchTree::Node { agent, action, .. } => match action.and_then(|a| {
                self.child(a).map(|child| (a, child))
            }) {
                Some((a, child)) => {
                    let mut tail = child.chosen_route();
                    tail.insert(0, (*agent, a));
                    tail
                }
                None => vec![],
            },
        }
    }

    /// This returns a visual representation of the game tree that the search generated
    /// It shows the value, the moving agent and the chosen action at each level
    pub fn to_text_tree(&self) -> String {
        let tree_node = self.to_text_tree_node("root".to_owned());
        format!("{}", tree_node)
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            SearchTree::Leaf { kind, value, .. } => {
                StringTreeNode::new(format!("{label} {kind:?} {value}"))
            }
            SearchTree::Node {
                agent,
                depth,
                kind,
                action,
                value,
                options,
            } => {
                let chosen = match action {
                    Some(a) => format!(" -> {a:?}"),
                    None => String::new(),
                };
                let mut node = StringTreeNode::new(format!(
                    "{label} {kind:?} agent {agent} depth {depth} value {value}{chosen}"
                ));
                for (a, child) in options {
                    node.push_node(child.to_text_tree_node(format!("{a:?}")));
                }

                node
            }
        }
    }
}

/// A [SearchObserver] that rebuilds the [SearchTree] from the visits it sees
///
/// Visits arrive children first, so the subtrees of a node are always the last ones recorded
/// when the node itself is visited.
#[derive(Debug, Clone)]
pub struct TreeRecorder<Action> {
    pending: Vec<SearchTree<Action>>,
}

impl<Action> Default for TreeRecorder<Action> {
    fn default() -> Self {
        Self { pending: vec![] }
    }
}

impl<Action> TreeRecorder<Action> {
    /// The recorded tree, rooted at the last node visited
    pub fn into_tree(mut self) -> Option<SearchTree<Action>> {
        self.pending.pop()
    }
}

impl<Action: Copy> SearchObserver<Action> for TreeRecorder<Action> {
    fn visit(&mut self, visit: &NodeVisit<'_, Action>) {
        if visit.kind.is_leaf() {
            self.pending.push(SearchTree::Leaf {
                agent: visit.agent,
                depth: visit.depth,
                kind: visit.kind,
                value: visit.value,
            });
            return;
        }

        let first_child = self.pending.len().saturating_sub(visit.children.len());
        let subtrees = self.pending.split_off(first_child);
        let options = visit
            .children
            .iter()
            .map(|(a, _)| *a)
            .zip(subtrees)
            .collect();

        self.pending.push(SearchTree::Node {
            agent: visit.agent,
            depth: visit.depth,
            kind: visit.kind,
            action: visit.action,
            value: visit.value,
            options,
        });
    }
}
