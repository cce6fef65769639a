use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};
use tracing::{trace, warn};

use std::fmt;
use std::io::{stdout, Write};

use crate::{
    line_handler::LineHandler,
    piece::{Piece, PieceKind},
    search::{PLAYER_ONE_WIN, PLAYER_TWO_WIN},
    DEFAULT_COLUMNS, DEFAULT_ROWS,
};

/// How much an open line is worth compared to a single piece in a line
const OPEN_LINE_WEIGHT: i32 = 10000;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

/// A Connect 4 board that can undo its moves
///
/// Player one is the maximising side of [`Board::evaluate`], player two the
/// minimising side.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    columns: usize,
    rows: usize,
    cells: Vec<Piece>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    num_moves: usize,
    won: bool,
    // every piece played, on top of a player two sentinel
    history: Vec<Piece>,
    lines: LineHandler,
}

impl Board {
    /// Creates an empty board with the given dimensions
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut cells = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                let mut empty = Piece::empty();
                empty.set_position(column, row);
                cells.push(empty);
            }
        }

        Self {
            columns,
            rows,
            cells,
            heights: vec![0; columns],
            num_moves: 0,
            won: false,
            history: vec![Piece::player_two()],
            lines: LineHandler::new(columns, rows),
        }
    }

    /// Creates a standard board and plays a sequence of 1-indexed column
    /// digits on it, alternating players starting with player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::default();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 && column <= board.columns => {
                    let column = column - 1;
                    if board.game_won() {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    let piece = board.last_piece().next();
                    if !board.place(piece, column) {
                        return Err(anyhow!("Invalid move, column {} full", column + 1));
                    }
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    fn index(&self, column: usize, row: usize) -> usize {
        column + self.columns * row
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn pieces_played(&self) -> usize {
        self.num_moves
    }

    /// The last piece played, or a player two piece if no move has been made
    pub fn last_piece(&self) -> Piece {
        // the sentinel is never popped
        self.history[self.history.len() - 1]
    }

    /// Whether `column` can take no more pieces; columns off the board are
    /// always full
    pub fn is_full(&self, column: usize) -> bool {
        match self.heights.get(column) {
            Some(&height) => height == self.rows,
            None => true,
        }
    }

    /// Drops `piece` into `column`
    ///
    /// Returns false and leaves the board untouched if the column is full or
    /// off the board, or if the piece does not belong to a player
    pub fn place(&mut self, mut piece: Piece, column: usize) -> bool {
        if !piece.is_player() || self.is_full(column) {
            return false;
        }
        let row = self.heights[column];
        self.heights[column] += 1;
        piece.set_position(column, row);
        let index = self.index(column, row);
        self.cells[index] = piece;
        self.num_moves += 1;
        self.history.push(piece);
        if self.lines.place(piece.kind(), column, row) {
            self.won = true;
        }
        trace!(%piece, column, row, won = self.won, "placed piece");
        true
    }

    /// Takes back the most recent move, returning the piece removed
    ///
    /// Returns `None` without touching the board if no move has been played.
    pub fn undo(&mut self) -> Option<Piece> {
        if self.history.len() <= 1 {
            warn!("undo requested with no moves played");
            return None;
        }
        self.won = false;
        let piece = self.history.pop()?;
        let (column, row) = piece.position()?;

        self.heights[column] -= 1;
        let mut empty = Piece::empty();
        empty.set_position(column, row);
        let index = self.index(column, row);
        self.cells[index] = empty;
        self.lines.remove(piece.kind(), column, row);
        self.num_moves -= 1;
        trace!(%piece, column, row, "undid piece");
        Some(piece)
    }

    /// The piece at (column, row), or an `OutOfBounds` piece for locations
    /// off the board
    pub fn piece_at(&self, column: isize, row: isize) -> Piece {
        if column < 0 || column >= self.columns as isize || row < 0 || row >= self.rows as isize {
            return Piece::out_of_bounds();
        }
        self.cells[self.index(column as usize, row as usize)]
    }

    pub fn game_won(&self) -> bool {
        self.won
    }

    pub fn full_board(&self) -> bool {
        self.num_moves == self.columns * self.rows
    }

    pub fn state(&self) -> GameState {
        if self.won {
            match self.last_piece().kind() {
                PieceKind::PlayerOne => GameState::PlayerOneWin,
                _ => GameState::PlayerTwoWin,
            }
        } else if self.full_board() {
            GameState::Draw
        } else {
            GameState::Playing
        }
    }

    pub fn lines(&self) -> &LineHandler {
        &self.lines
    }

    /// Scores the board, lower values are better for player two
    ///
    /// A won board scores `PLAYER_ONE_WIN` or `PLAYER_TWO_WIN` depending on who
    /// made the last move. Otherwise the difference in lines each player can
    /// still complete dominates, and the difference in pieces sitting in
    /// those lines breaks ties.
    pub fn evaluate(&self) -> i32 {
        if self.won {
            return match self.last_piece().kind() {
                PieceKind::PlayerOne => PLAYER_ONE_WIN,
                _ => PLAYER_TWO_WIN,
            };
        }
        let open = self.lines.open_for(PieceKind::PlayerOne) - self.lines.open_for(PieceKind::PlayerTwo);
        let value =
            self.lines.value_for(PieceKind::PlayerOne) - self.lines.value_for(PieceKind::PlayerTwo);
        open * OPEN_LINE_WEIGHT + value
    }

    /// Draws the board to the terminal, with column numbers above it
    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=self.columns).map(|x| (x % 10).to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..self.rows {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for (idx, cell) in self.cells.iter().enumerate() {
            let (pos_x, pos_y) = (
                origin_x + (idx % self.columns) as u16,
                origin_y - (idx / self.columns) as u16,
            );

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell.kind() {
                            PieceKind::PlayerOne => Color::Red,
                            PieceKind::PlayerTwo => Color::Yellow,
                            _ => Color::DarkBlue,
                        }),
                ))?;
        }
        stdout
            .queue(MoveTo(origin_x + self.columns as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS)
    }
}

/// Prints the board one row per line, highest row first, with a space after
/// every cell
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for column in 0..self.columns {
                write!(f, "{} ", self.cells[self.index(column, row)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
