//! Monte Carlo Tree Search with UCT selection for two-player, zero-sum board games.
//!
//! The engine works over any game implementing [`game::GameState`]: it grows a search
//! tree for a fixed number of iterations, each one selecting a node with the UCT
//! formula, expanding one new child, playing a random game from it and propagating the
//! outcome back to the root. The move finally returned is the root child with the best
//! average outcome for the player making it.
//!
//! # Example
//!
//! ```rust
//! use uct_search::game::Mark;
//! use uct_search::games::tic_tac_toe::TicTacToeBoard;
//! use uct_search::mcts::SearchEngine;
//! use uct_search::random::SeededRandomGenerator;
//!
//! // x has two in a row on top and is to move
//! let board: TicTacToeBoard = "xx. oo. ...".parse().unwrap();
//!
//! let mut engine = SearchEngine::builder()
//!     .with_random_generator(SeededRandomGenerator::new(7))
//!     .with_iterations(1000)
//!     .build();
//!
//! let best = engine.search(&board).unwrap().expect("board is not terminal");
//! assert_eq!(best.cell(0, 2), Some(Mark::X));
//! ```

/// Propagates rollout outcomes up the tree.
pub mod backpropagation;
/// Search configuration and its defaults.
pub mod config;
/// Error types of the engine and the bundled games.
pub mod error;
/// Adds one unexplored child to a node.
pub mod expansion;
/// Contains the `GameState` trait and the `Mark` players that define the interface for a game.
pub mod game;
/// Contains pre-made implementations of the `GameState` trait.
pub mod games;
/// The core module of the library, containing the `SearchEngine` implementation.
pub mod mcts;
/// Contains traits and implementations for random number generation.
pub mod random;
/// Random playouts to the end of the game.
pub mod rollout;
/// Contains the `SearchNode` struct, which represents a node in the search tree.
pub mod search_node;
/// The UCT value and the best-child rule.
pub mod selection;
