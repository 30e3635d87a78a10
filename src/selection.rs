//! UCT move selection.

use crate::error::SearchError;
use crate::game::GameState;
use crate::random::RandomGenerator;
use crate::search_node::SearchNode;
use ego_tree::{NodeId, Tree};

/// Calculates the UCT value of `child` under a parent visited `parent_visits` times.
///
/// The exploitation term is the child's mean outcome re-oriented to the player who made
/// the move leading to it. With `exploration == 0.0` this is the robust-child value used
/// for the final move choice.
pub fn uct_value<G: GameState>(
    parent_visits: u32,
    child: &SearchNode<G>,
    exploration: f64,
) -> Result<f64, SearchError> {
    if child.visits() == 0 {
        return Err(SearchError::UnvisitedChild);
    }

    let child_visits = child.visits() as f64;
    let exploration_term = if exploration == 0.0 {
        0.0
    } else {
        exploration * f64::sqrt(f64::ln(parent_visits as f64) / child_visits)
    };
    Ok(child.mean_score() + exploration_term)
}

/// Picks the child of `node_id` with the highest UCT value.
///
/// Children sharing the maximal value are tied and one of them is picked uniformly at
/// random. Returns `Ok(None)` when the node has no children.
pub fn best_child<G: GameState, R: RandomGenerator>(
    tree: &Tree<SearchNode<G>>,
    node_id: NodeId,
    exploration: f64,
    random: &mut R,
) -> Result<Option<NodeId>, SearchError> {
    let node = tree.get(node_id).ok_or(SearchError::MissingNode)?;
    let parent_visits = node.value().visits();

    let mut best_value = f64::NEG_INFINITY;
    let mut best_children = Vec::new();
    for &child_id in node.value().children().values() {
        let child = tree.get(child_id).ok_or(SearchError::MissingNode)?;
        let value = uct_value(parent_visits, child.value(), exploration)?;
        if value > best_value {
            best_value = value;
            best_children.clear();
            best_children.push(child_id);
        } else if value == best_value {
            best_children.push(child_id);
        }
    }

    Ok(random.take_random(best_children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backpropagation::backpropagate;
    use crate::expansion::expand;
    use crate::games::tic_tac_toe::TicTacToeBoard;
    use crate::random::SeededRandomGenerator;
    use assert_approx_eq::assert_approx_eq;
    use std::collections::HashSet;

    /// Root with every child expanded and rolled out once with the given scores.
    fn expanded_root(scores: &[i32]) -> (Tree<SearchNode<TicTacToeBoard>>, Vec<NodeId>) {
        let mut tree = Tree::new(SearchNode::new(TicTacToeBoard::default()));
        let root_id = tree.root().id();
        let mut children = Vec::new();
        for &score in scores {
            let child = expand(&mut tree, root_id).unwrap();
            backpropagate(&mut tree, child, score).unwrap();
            children.push(child);
        }
        (tree, children)
    }

    #[test]
    fn uct_value_combines_mean_and_bonus() {
        // arrange
        let board = TicTacToeBoard::default().make_move(1, 1).unwrap();
        let mut child = SearchNode::new(board);
        child.record(1);
        child.record(1);
        child.record(-1);
        child.record(0);

        // act
        let value = uct_value(16, &child, 2.0).unwrap();

        // assert
        let expected = 0.25 + 2.0 * (16f64.ln() / 4.0).sqrt();
        assert_approx_eq!(value, expected);
        assert_approx_eq!(uct_value(16, &child, 0.0).unwrap(), 0.25);
    }

    #[test]
    fn uct_value_rejects_unvisited_child() {
        let child = SearchNode::new(TicTacToeBoard::default().make_move(0, 0).unwrap());
        assert_eq!(uct_value(10, &child, 1.0), Err(SearchError::UnvisitedChild));
    }

    #[test]
    fn best_child_prefers_highest_mean_for_the_mover() {
        // x is to move at the root, so +1 outcomes are good for every child's mover
        let mut scores = vec![-1; 9];
        scores[5] = 1;
        let (tree, children) = expanded_root(&scores);
        let mut random = SeededRandomGenerator::new(1);

        let best = best_child(&tree, tree.root().id(), 0.0, &mut random).unwrap();

        assert_eq!(best, Some(children[5]));
    }

    #[test]
    fn best_child_errors_on_unvisited_child() {
        let mut tree = Tree::new(SearchNode::new(TicTacToeBoard::default()));
        let root_id = tree.root().id();
        expand(&mut tree, root_id).unwrap();
        let mut random = SeededRandomGenerator::new(1);

        let result = best_child(&tree, root_id, 1.0, &mut random);

        assert_eq!(result, Err(SearchError::UnvisitedChild));
    }

    #[test]
    fn best_child_of_leaf_is_none() {
        let tree = Tree::new(SearchNode::new(TicTacToeBoard::default()));
        let mut random = SeededRandomGenerator::new(1);
        assert_eq!(best_child(&tree, tree.root().id(), 0.0, &mut random), Ok(None));
    }

    #[test]
    fn ties_are_broken_randomly() {
        let (tree, children) = expanded_root(&[0, 0, 0, -1, -1, -1, -1, -1, -1]);
        let mut picked = HashSet::new();
        for seed in 0..64 {
            let mut random = SeededRandomGenerator::new(seed);
            let best = best_child(&tree, tree.root().id(), 0.0, &mut random)
                .unwrap()
                .unwrap();
            picked.insert(best);
        }

        let expected: HashSet<NodeId> = children[..3].iter().copied().collect();
        assert_eq!(picked, expected);
    }
}
