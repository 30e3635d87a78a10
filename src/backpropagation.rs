use crate::error::SearchError;
use crate::game::GameState;
use crate::search_node::SearchNode;
use ego_tree::{NodeId, Tree};

/// Propagates the result of a rollout from `node_id` back up to the root, adding one visit
/// and `score` to every node on the way, the starting node included.
pub fn backpropagate<G: GameState>(
    tree: &mut Tree<SearchNode<G>>,
    node_id: NodeId,
    score: i32,
) -> Result<(), SearchError> {
    let mut current = Some(node_id);
    while let Some(id) = current {
        let mut node = tree.get_mut(id).ok_or(SearchError::MissingNode)?;
        node.value().record(score);
        current = node.parent().map(|parent| parent.id());
    }
    Ok(())
}
