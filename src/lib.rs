//! A fixed-depth minimax agent for the board game 'Connect 4'
//!
//! The board tracks every possible four-in-a-row line incrementally, so the
//! evaluation read by the game tree search never has to rescan the grid.
//! The search places hypothetical pieces on the caller's board, recurses, and
//! undoes each of them before returning.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_lines::{board::Board, piece::Piece, search::search};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // the human (player one) has played in the centre column
//! let mut board = Board::from_moves("4")?;
//! let result = search(&mut board, 1);
//!
//! assert_eq!(result.best_move, Some(3));
//! assert!(board.place(Piece::player_two(), 3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod piece;

pub mod line;

pub mod line_handler;

pub mod board;

pub mod search;

mod test;

/// The default width of the game board in tiles
pub const DEFAULT_COLUMNS: usize = 7;

/// The default height of the game board in tiles
pub const DEFAULT_ROWS: usize = 6;

/// The number of tiles in a line needed to win
pub const LINE_LENGTH: usize = 4;

/// The search depth the engine uses unless told otherwise
pub const DEFAULT_DEPTH: usize = 6;

// the default board must have room for lines in every direction
const_assert!(DEFAULT_COLUMNS >= LINE_LENGTH && DEFAULT_ROWS >= LINE_LENGTH);
// move strings address columns with a single digit
const_assert!(DEFAULT_COLUMNS <= 9);
const_assert!(DEFAULT_DEPTH > 0);
