extern crate uct_search;

use log::info;
use uct_search::game::GameState;
use uct_search::games::connect_four::ConnectFourBoard;
use uct_search::games::tic_tac_toe::TicTacToeBoard;
use uct_search::mcts::SearchEngine;
use uct_search::random::SeededRandomGenerator;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Two engines share a board game and alternate moves until it ends
    play_out(TicTacToeBoard::default(), 2000);
    play_out(ConnectFourBoard::default(), 1000);
}

fn play_out<G: GameState + std::fmt::Display>(mut board: G, iterations: u32) {
    let mut engine = SearchEngine::builder()
        .with_iterations(iterations)
        .with_random_generator(SeededRandomGenerator::new(2024))
        .build();

    println!("{board}");
    loop {
        let best = match engine.search(&board) {
            Ok(Some(best)) => best,
            Ok(None) => break,
            Err(e) => {
                eprintln!("search failed: {e}");
                return;
            }
        };

        for stats in engine.root_statistics() {
            info!(
                "candidate visited {} times, mean score {:.2}",
                stats.visits, stats.mean_score
            );
        }

        board = best;
        println!("{board}");
    }

    match board.winner() {
        Some(mark) => println!("Player \"{mark}\" has won!\n"),
        None => println!("The game is drawn!\n"),
    }
}
