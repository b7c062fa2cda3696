pub mod board;
pub mod sentence;
pub mod ai;
pub mod config;
pub mod error;
use std::thread;
use std::time::Duration;
use log::info;
use rand::Rng;

use ai::MinesweeperAi;
use board::{Board, Content, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Won,
    Lost(Point),
    /// No cell is left that isn't played or a known mine.
    Stuck
}

fn flag_known_mines(board: &mut Board, ai: &MinesweeperAi) -> error::Result<()> {
    for mine in ai.mines() {
        board.flag(mine)?;
    }
    Ok(())
}

/// Plays a single move: a known safe cell if there is one, a random
/// unplayed cell otherwise.
pub fn step<R: Rng + ?Sized>(board: &mut Board, ai: &mut MinesweeperAi, rng: &mut R) -> error::Result<GameState> {
    flag_known_mines(board, ai)?;
    if board.won() {
        return Ok(GameState::Won)
    }
    let point = match ai.make_safe_move() {
        Some(point) => {
            info!("AI making safe move {}", point);
            point
        }
        None => match ai.make_random_move_with(rng) {
            Some(point) => {
                info!("no known safe moves, AI making random move {}", point);
                point
            }
            None => return Ok(GameState::Stuck)
        }
    };

    match board.probe(&point)? {
        Content::Mine => return Ok(GameState::Lost(point)),
        Content::Empty => ai.add_knowledge(point, board.nearby_mines(&point))?
    }
    flag_known_mines(board, ai)?;

    if board.won() {
        Ok(GameState::Won)
    } else {
        Ok(GameState::InProgress)
    }
}

/// Plays `step` until the game ends, printing the board between moves.
pub fn ai_game_loop<R: Rng + ?Sized>(board: &mut Board, ai: &mut MinesweeperAi, rng: &mut R, delay: Duration) -> error::Result<GameState>{
    let state = loop {
        println!("{}", board);
        match step(board, ai, rng)? {
            GameState::InProgress => thread::sleep(delay),
            finished => break finished
        }
    };
    println!("{}", board);
    match state {
        GameState::Won => println!("you win!"),
        GameState::Lost(point) => {
            println!("you lose, hit a mine at {}", point);
            println!("{}", board.layout());
        }
        _ => println!("no moves left")
    }
    Ok(state)
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
mod game_tests {
    use super::*;
    use crate::board::BoardSize;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn play(board: &mut Board, ai: &mut MinesweeperAi, rng: &mut StdRng) -> GameState {
        loop {
            match step(board, ai, rng).unwrap() {
                GameState::InProgress => {},
                finished => return finished
            }
        }
    }

    #[test]
    fn mine_free_board_is_won_immediately() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::with_mines(BoardSize::new(3, 3), vec![]).unwrap();
        let mut ai = MinesweeperAi::new(board.size);
        assert_eq!(step(&mut board, &mut ai, &mut rng).unwrap(), GameState::Won);
    }

    #[test]
    fn deduces_without_guessing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::with_mines(BoardSize::new(1, 3), vec![Point(0, 2)]).unwrap();
        let mut ai = MinesweeperAi::new(board.size);
        ai.add_knowledge(Point(0, 0), 0).unwrap();

        assert_eq!(step(&mut board, &mut ai, &mut rng).unwrap(), GameState::Won);
        assert!(ai.mines().contains(&Point(0, 2)));
        assert!(board.mines_found().contains(&Point(0, 2)));
    }

    #[test]
    fn hitting_a_mine_loses() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::with_mines(BoardSize::new(1, 1), vec![Point(0, 0)]).unwrap();
        let mut ai = MinesweeperAi::new(board.size);
        assert_eq!(step(&mut board, &mut ai, &mut rng).unwrap(), GameState::Lost(Point(0, 0)));
    }

    #[test]
    fn won_once_known_mines_are_flagged() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::with_mines(BoardSize::new(2, 2), vec![Point(0, 0), Point(1, 1)]).unwrap();
        let mut ai = MinesweeperAi::new(board.size);
        ai.mark_mine(Point(0, 0)).unwrap();
        ai.add_knowledge(Point(0, 1), 2).unwrap();
        ai.add_knowledge(Point(1, 0), 2).unwrap();
        assert!(ai.mines().contains(&Point(1, 1)));
        assert_eq!(step(&mut board, &mut ai, &mut rng).unwrap(), GameState::Won);
    }

    #[test]
    fn no_candidates_is_stuck() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::with_mines(BoardSize::new(1, 2), vec![]).unwrap();
        let mut ai = MinesweeperAi::new(board.size);
        ai.mark_mine(Point(0, 1)).unwrap();
        ai.add_knowledge(Point(0, 0), 1).unwrap();
        assert_eq!(step(&mut board, &mut ai, &mut rng).unwrap(), GameState::Stuck);
        assert!(!board.won());
    }

    proptest! {
        #[test]
        fn games_end_consistently(seed in any::<u64>(), height in 1..10usize,
                                  width in 1..10usize, density in 0..30usize) {
            let size = BoardSize::new(height, width);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::new_random(size, size.area() * density / 100, &mut rng).unwrap();
            let mut ai = MinesweeperAi::new(size);
            match play(&mut board, &mut ai, &mut rng) {
                GameState::Won => prop_assert!(board.won()),
                GameState::Lost(point) => prop_assert!(board.is_mine(&point)),
                GameState::Stuck => prop_assert!(!board.won()),
                GameState::InProgress => prop_assert!(false)
            }
            prop_assert!(ai.mines().iter().all(|mine| board.is_mine(mine)));
        }
    }
}
