use crate::game::GameState;
use ego_tree::NodeId;
use std::collections::BTreeMap;

/// Represents a single node in the Monte Carlo search tree.
///
/// Nodes live in an `ego_tree::Tree`, which owns them and provides the parent link used
/// during backpropagation. Visit and score statistics only change through
/// [`SearchNode::record`], called by the backpropagator.
#[derive(Debug, Clone)]
pub struct SearchNode<G: GameState> {
    state: G,
    children: BTreeMap<u128, NodeId>,
    visits: u32,
    total_score: i64,
    is_terminal: bool,
    is_fully_expanded: bool,
}

impl<G: GameState> SearchNode<G> {
    /// Creates an unvisited node wrapping `state`. Terminal nodes start out fully expanded.
    pub fn new(state: G) -> Self {
        let is_terminal = state.is_terminal();
        Self {
            state,
            children: BTreeMap::new(),
            visits: 0,
            total_score: 0,
            is_terminal,
            is_fully_expanded: is_terminal,
        }
    }

    /// The game state this node represents.
    pub fn state(&self) -> &G {
        &self.state
    }

    /// Children keyed by the canonical key of their state.
    pub fn children(&self) -> &BTreeMap<u128, NodeId> {
        &self.children
    }

    /// Number of rollouts whose backpropagation passed through this node.
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Sum of all rollout outcomes that passed through this node, from the reference
    /// player's perspective.
    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    /// Whether the wrapped state was won or drawn when the node was created.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Whether every legal successor already has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.is_fully_expanded
    }

    /// Average outcome seen by the player who made the move leading to this node.
    /// Zero for unvisited nodes.
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        let sign = self.state.turn_owner().opponent().sign() as f64;
        sign * self.total_score as f64 / self.visits as f64
    }

    pub(crate) fn has_child(&self, key: u128) -> bool {
        self.children.contains_key(&key)
    }

    pub(crate) fn add_child(&mut self, key: u128, id: NodeId) {
        self.children.insert(key, id);
    }

    pub(crate) fn mark_fully_expanded(&mut self) {
        self.is_fully_expanded = true;
    }

    pub(crate) fn record(&mut self, score: i32) {
        self.visits += 1;
        self.total_score += i64::from(score);
    }
}
