use crate::error::SearchError;
use crate::game::GameState;
use crate::search_node::SearchNode;
use ego_tree::{NodeId, Tree};
use log::warn;
use std::collections::HashSet;

/// Adds one new child under `node_id` and returns its id.
///
/// Legal successors are scanned in the order the game enumerates them and the first one
/// without a child is materialised. The node is marked fully expanded once that was the
/// last missing successor. Successors sharing a canonical key count as one.
///
/// A non-terminal state without any successor is a dead end: the node is marked fully
/// expanded and its own id is returned, so it is rolled out (as a draw) in place.
pub fn expand<G: GameState>(
    tree: &mut Tree<SearchNode<G>>,
    node_id: NodeId,
) -> Result<NodeId, SearchError> {
    let (mut missing, dead_end) = {
        let node = tree.get(node_id).ok_or(SearchError::MissingNode)?;
        let data = node.value();
        if data.is_terminal() || data.is_fully_expanded() {
            return Err(SearchError::NothingToExpand);
        }
        let successors = data.state().legal_successors();
        let dead_end = successors.is_empty();
        let mut seen = HashSet::new();
        let missing: Vec<G> = successors
            .into_iter()
            .filter(|s| {
                let key = s.canonical_key();
                !data.has_child(key) && seen.insert(key)
            })
            .collect();
        (missing, dead_end)
    };

    let mut node = tree.get_mut(node_id).ok_or(SearchError::MissingNode)?;
    if dead_end {
        warn!("non-terminal state without legal successors, treating it as a draw");
        node.value().mark_fully_expanded();
        return Ok(node_id);
    }
    if missing.is_empty() {
        return Err(SearchError::ExhaustedSuccessors);
    }

    let was_last = missing.len() == 1;
    let state = missing.swap_remove(0);
    let key = state.canonical_key();
    let child_id = node.append(SearchNode::new(state)).id();
    node.value().add_child(key, child_id);
    if was_last {
        node.value().mark_fully_expanded();
    }
    Ok(child_id)
}
