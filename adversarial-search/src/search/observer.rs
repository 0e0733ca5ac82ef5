use std::fmt::Debug;

use tracing::trace;

use crate::AgentIndex;

/// What kind of node was backed up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Leaf: the maximizer has won
    Win,
    /// Leaf: the maximizer has lost
    Lose,
    /// Leaf: the maximum depth was reached
    Cutoff,
    /// Leaf: the moving agent had nothing to do besides no-ops
    Exhausted,
    /// The maximizer picked its best child
    Max,
    /// An opponent picked the child worst for the maximizer
    Min,
    /// An opponent moving at random, the children were averaged
    Chance,
}

impl NodeKind {
    /// Whether the search stopped at this node
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeKind::Win | NodeKind::Lose | NodeKind::Cutoff | NodeKind::Exhausted
        )
    }
}

/// A node of the search tree, reported once its value is known
///
/// Nodes are reported in post-order, every child is reported before its parent.
#[derive(Debug, Clone, Copy)]
pub struct NodeVisit<'a, Action> {
    /// The agent moving at this node
    pub agent: AgentIndex,
    /// The ply this node is in
    pub depth: usize,
    #[allow(missing_docs)]
    pub kind: NodeKind,
    /// The action picked at this node. Leaves and chance nodes don't pick one
    pub action: Option<Action>,
    /// The backed up value
    pub value: f64,
    /// Every action expanded at this node along with the value it led to, in expansion order
    pub children: &'a [(Action, f64)],
}

/// Watches the search as it backs up values
///
/// This is how to instrument a search without touching the algorithm. It is called once per node
/// visited.
pub trait SearchObserver<Action> {
    #[allow(missing_docs)]
    fn visit(&mut self, visit: &NodeVisit<'_, Action>);
}

#[derive(Debug, Clone, Copy, Default)]
/// Any empty struct that implements `SearchObserver` as a no-op which can be used when you don't
/// want to watch the search
pub struct NoopObserver;

impl<Action> SearchObserver<Action> for NoopObserver {
    fn visit(&mut self, _visit: &NodeVisit<'_, Action>) {}
}

#[derive(Debug, Clone, Copy, Default)]
/// Emits a `trace` level [tracing] event for every node visited
pub struct TracingObserver;

impl<Action: Debug> SearchObserver<Action> for TracingObserver {
    fn visit(&mut self, visit: &NodeVisit<'_, Action>) {
        trace!(
            agent = visit.agent,
            depth = visit.depth,
            kind = ?visit.kind,
            action = ?visit.action,
            value = visit.value,
            children = visit.children.len(),
            "backed up node"
        );
    }
}

impl<Action, Observer: SearchObserver<Action> + ?Sized> SearchObserver<Action> for &mut Observer {
    fn visit(&mut self, visit: &NodeVisit<'_, Action>) {
        (**self).visit(visit)
    }
}

/// Both observers see every node, the first one first
impl<Action, First, Second> SearchObserver<Action> for (First, Second)
where
    First: SearchObserver<Action>,
    Second: SearchObserver<Action>,
{
    fn visit(&mut self, visit: &NodeVisit<'_, Action>) {
        self.0.visit(visit);
        self.1.visit(visit);
    }
}
