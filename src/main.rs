use std::env;
use std::process;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::thread_rng;

use minesweeper_ai::ai::MinesweeperAi;
use minesweeper_ai::board::{Board, BoardSize};
use minesweeper_ai::config::GameConfig;
use minesweeper_ai::error;
use minesweeper_ai::ai_game_loop;

fn run() -> error::Result<()> {
    let config = GameConfig::from_args(env::args().skip(1))?;
    match config.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            let size = BoardSize::new(config.height, config.width);
            let mut board = Board::new_random(size, config.mines, &mut rng)?;
            let mut ai = MinesweeperAi::new(board.size);
            ai_game_loop(&mut board, &mut ai, &mut rng, config.delay)?;
        }
        None => {
            let mut board = Board::new_from_ints(config.height, config.width, config.mines)?;
            let mut ai = MinesweeperAi::new(board.size);
            ai_game_loop(&mut board, &mut ai, &mut thread_rng(), config.delay)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
