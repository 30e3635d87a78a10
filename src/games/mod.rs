//! Ready-made implementations of the `GameState` trait.

/// A `GameState` implementation for the 7×6 gravity-drop game Connect Four.
pub mod connect_four;
/// A `GameState` implementation for the game of Tic-Tac-Toe.
pub mod tic_tac_toe;
