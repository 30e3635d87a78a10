use crate::game::GameState;
use crate::random::RandomGenerator;

/// Plays uniformly random legal moves from `state` until the game is decided and returns
/// the outcome from the reference player's perspective: `1`, `-1`, or `0` for a draw.
///
/// A state that is already won is scored without consulting `random`. Running out of
/// successors without a win is a draw, whether or not the state reports itself drawn.
pub fn rollout<G: GameState, R: RandomGenerator>(state: &G, random: &mut R) -> i32 {
    let mut current = state.clone();
    loop {
        if current.is_win() {
            return current.winner().map_or(0, |mark| mark.sign());
        }
        match random.take_random(current.legal_successors()) {
            Some(next) => current = next,
            None => return 0,
        }
    }
}
