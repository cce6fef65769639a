use anyhow::Result;
use indicatif::ProgressBar;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_lines::{
    board::{Board, GameState},
    piece::PieceKind,
    search::search,
    DEFAULT_DEPTH,
};

/// Asks a y/n question until it gets an answer
fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

/// Asks for the engine's search depth, an empty answer keeps the default
fn ask_depth(stdin: &Stdin) -> Result<usize> {
    loop {
        let mut buffer = String::new();
        print!("Engine search depth [{}]: ", DEFAULT_DEPTH);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        let answer = buffer.trim();
        if answer.is_empty() {
            return Ok(DEFAULT_DEPTH);
        }
        match answer.parse::<usize>() {
            Ok(depth) if depth > 0 => return Ok(depth),
            _ => println!("Invalid depth: {}", answer),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut board = Board::default();
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // the engine only ever plays second, it minimises the board score
    let engine_plays = ask_yes_no(&stdin, "Should player 2 be AI controlled?")?;
    let depth = if engine_plays { ask_depth(&stdin)? } else { DEFAULT_DEPTH };

    // game loop
    loop {
        board.display()?;

        match board.state() {
            GameState::Playing => {
                let piece = board.last_piece().next();
                let next_move =
                    // AI player
                    if engine_plays && piece.kind() == PieceKind::PlayerTwo {
                        let spinner = ProgressBar::new_spinner();
                        spinner.set_message("AI is thinking...");
                        spinner.enable_steady_tick(100);

                        let result = search(&mut board, depth);
                        spinner.finish_and_clear();

                        let column = match result.best_move {
                            Some(column) => column,
                            None => {
                                warn!(value = result.value, "search proposed no move");
                                match (0..board.columns()).find(|&c| !board.is_full(c)) {
                                    Some(column) => column,
                                    None => continue,
                                }
                            }
                        };
                        println!("Best move: {} (score {})", column + 1, result.value);
                        column + 1

                    // human player
                    } else {
                        let player = if piece.kind() == PieceKind::PlayerOne { 1 } else { 2 };
                        print!("Player {} move input > ", player);
                        stdout().flush()?;
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        match input_str.trim().parse::<usize>() {
                            Err(_) => {
                                println!("Invalid number: {}", input_str.trim());
                                continue;
                            }
                            Ok(column) => column,
                        }
                    };

                if next_move < 1 || next_move > board.columns() {
                    println!(
                        "Invalid move, column {} out of range. Columns must be between 1 and {}",
                        next_move,
                        board.columns()
                    );
                    continue;
                }
                if !board.place(piece, next_move - 1) {
                    println!("Invalid move, column {} full", next_move);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::PlayerOneWin => {
                println!("Player 1 wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("Player 2 wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
