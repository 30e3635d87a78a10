use crate::backpropagation::backpropagate;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::expansion::expand;
use crate::game::GameState;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::rollout::rollout;
use crate::search_node::SearchNode;
use crate::selection::best_child;
use ego_tree::{NodeId, NodeRef, Tree};
use log::{debug, trace};

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// Every call to [`SearchEngine::search`] builds a fresh tree rooted at the given state,
/// runs the configured number of select, expand, rollout and backpropagate iterations,
/// and returns the robust child of the root. The tree of the latest search is kept for
/// inspection until the next call discards it.
pub struct SearchEngine<G: GameState, R: RandomGenerator> {
    config: SearchConfig,
    random: R,
    tree: Option<Tree<SearchNode<G>>>,
}

impl<G: GameState, R: RandomGenerator> Default for SearchEngine<G, R> {
    fn default() -> Self {
        SearchEngineBuilder::new().build()
    }
}

/// A builder for creating instances of `SearchEngine`.
pub struct SearchEngineBuilder<G: GameState, R: RandomGenerator> {
    config: SearchConfig,
    random_generator: R,
    _game: std::marker::PhantomData<G>,
}

impl<G: GameState, R: RandomGenerator> Default for SearchEngineBuilder<G, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GameState, R: RandomGenerator> SearchEngineBuilder<G, R> {
    /// Creates a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
            random_generator: R::default(),
            _game: std::marker::PhantomData,
        }
    }

    /// Sets the random number generator used for tie-breaks and rollouts.
    pub fn with_random_generator(mut self, rg: R) -> Self {
        self.random_generator = rg;
        self
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the number of iterations run per search.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.config.iterations = iterations;
        self
    }

    /// Sets the exploration constant of the UCT formula.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.config.exploration_constant = c;
        self
    }

    /// Builds the `SearchEngine` instance with the configured parameters.
    pub fn build(self) -> SearchEngine<G, R> {
        SearchEngine {
            config: self.config,
            random: self.random_generator,
            tree: None,
        }
    }
}

/// Statistics of one child of the root after a search.
#[derive(Debug, Clone)]
pub struct ChildStatistics<G> {
    /// The position reached by the move.
    pub state: G,
    /// Number of rollouts that went through the child.
    pub visits: u32,
    /// Sum of those rollouts' outcomes from the reference player's perspective.
    pub total_score: i64,
    /// Average outcome from the perspective of the player who made the move.
    pub mean_score: f64,
}

impl<G: GameState, R: RandomGenerator> SearchEngine<G, R> {
    /// Returns a new builder for `SearchEngine`.
    pub fn builder() -> SearchEngineBuilder<G, R> {
        SearchEngineBuilder::new()
    }

    /// The configuration applied to every search.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches for the best move from `root_state` and returns the resulting state.
    ///
    /// Returns `Ok(None)` when `root_state` is terminal and no move is available. Errors
    /// are reserved for invalid configuration and broken tree invariants.
    pub fn search(&mut self, root_state: &G) -> Result<Option<G>, SearchError> {
        self.config.validate()?;
        self.tree = None;

        let iterations = self.config.iterations;
        let exploration = self.config.exploration_constant;
        debug!("starting search: {iterations} iterations, exploration constant {exploration}");

        let mut tree = Tree::new(SearchNode::new(root_state.clone()));
        let root_id = tree.root().id();
        for iteration in 0..iterations {
            let leaf = self.select(&mut tree, root_id)?;
            let state = tree.get(leaf).ok_or(SearchError::MissingNode)?.value().state();
            let score = rollout(state, &mut self.random);
            trace!("iteration {iteration}: rollout scored {score}");
            backpropagate(&mut tree, leaf, score)?;
        }

        let best = best_child(&tree, root_id, 0.0, &mut self.random)?;
        let result = match best {
            Some(id) => {
                let node = tree.get(id).ok_or(SearchError::MissingNode)?.value();
                debug!(
                    "search finished: {} nodes, best child visited {} times, mean score {:.3}",
                    tree.values().count(),
                    node.visits(),
                    node.mean_score()
                );
                Some(node.state().clone())
            }
            None => {
                debug!("search finished: root is terminal, no move available");
                None
            }
        };

        self.tree = Some(tree);
        Ok(result)
    }

    /// Returns the tree built by the latest search.
    pub fn tree(&self) -> Option<&Tree<SearchNode<G>>> {
        self.tree.as_ref()
    }

    /// Returns the root node of the latest search tree.
    pub fn root(&self) -> Option<NodeRef<'_, SearchNode<G>>> {
        self.tree.as_ref().map(|tree| tree.root())
    }

    /// Returns the statistics of every root child of the latest search, in key order.
    pub fn root_statistics(&self) -> Vec<ChildStatistics<G>> {
        let Some(root) = self.root() else {
            return vec![];
        };
        root.children()
            .map(|child| {
                let node = child.value();
                ChildStatistics {
                    state: node.state().clone(),
                    visits: node.visits(),
                    total_score: node.total_score(),
                    mean_score: node.mean_score(),
                }
            })
            .collect()
    }

    /// Descends from `node_id` through fully expanded nodes using UCT and returns the node
    /// to roll out from: a freshly expanded child, a terminal node, or a dead end.
    fn select(
        &mut self,
        tree: &mut Tree<SearchNode<G>>,
        node_id: NodeId,
    ) -> Result<NodeId, SearchError> {
        let exploration = self.config.exploration_constant;
        let mut current = node_id;
        loop {
            let node = tree.get(current).ok_or(SearchError::MissingNode)?.value();
            if node.is_terminal() {
                return Ok(current);
            }
            if !node.is_fully_expanded() {
                return expand(tree, current);
            }
            match best_child(tree, current, exploration, &mut self.random)? {
                Some(child) => current = child,
                None => return Ok(current),
            }
        }
    }
}

impl<G: GameState> SearchEngine<G, StandardRandomGenerator> {
    /// Creates an engine with the given configuration and an unseeded generator.
    pub fn from_config(config: SearchConfig) -> Self {
        SearchEngineBuilder::new().with_config(config).build()
    }
}
