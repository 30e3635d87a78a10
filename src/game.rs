use std::fmt;

/// One of the two players of a game.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Mark {
    /// The player who moves first.
    X,
    /// The player who moves second.
    O,
}

/// The player whose perspective every accumulated score is recorded in.
///
/// A rollout ending in a win for this player scores `+1`, a win for the opponent scores `-1`.
pub const REFERENCE_PLAYER: Mark = Mark::X;

impl Mark {
    /// Returns the other player.
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns `+1` for the reference player and `-1` for its opponent.
    pub fn sign(self) -> i32 {
        if self == REFERENCE_PLAYER { 1 } else { -1 }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "x"),
            Mark::O => write!(f, "o"),
        }
    }
}

/// The central trait of the library, defining the interface for a game position.
///
/// A `GameState` is an immutable value: moves produce new states instead of mutating
/// the existing one. The search engine is generic over this trait and never inspects
/// the concrete game behind it.
pub trait GameState: Clone {
    /// Returns the player who would move next in this state.
    fn turn_owner(&self) -> Mark;

    /// Returns every state reachable with one legal move, in a fixed deterministic order.
    ///
    /// The list must be empty for terminal states.
    fn legal_successors(&self) -> Vec<Self>;

    /// Returns `true` if the player who just moved has won.
    fn is_win(&self) -> bool;

    /// Returns `true` if the game ended without a winner.
    fn is_draw(&self) -> bool;

    /// Returns `true` if the game is over, either won or drawn.
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_draw()
    }

    /// Returns the winning player, which is always the player who made the last move.
    fn winner(&self) -> Option<Mark> {
        self.is_win().then(|| self.turn_owner().opponent())
    }

    /// Returns a value that uniquely identifies the position, used to deduplicate children.
    fn canonical_key(&self) -> u128;
}
