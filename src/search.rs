//! A fixed-depth game tree search for Connect 4
//!
//! # Notes
//! The search is plain minimax without pruning. Player two (the engine) picks
//! at even plies and wants the lowest [`Board::evaluate`] score, player one
//! picks at odd plies and wants the highest. Hypothetical moves are played on
//! the caller's board and undone again, so the board is never copied.
//!
//! # Tie breaking
//! A later column replaces the best so far when it scores the same, at every
//! ply. Once a column leads to a certain win for the side picking, the
//! remaining columns are not searched.

use rayon::prelude::*;
use tracing::debug;

use crate::{board::Board, piece::PieceKind};

/// The score of a board won by player one
pub const PLAYER_ONE_WIN: i32 = i32::MAX;
/// The score of a board won by player two
pub const PLAYER_TWO_WIN: i32 = i32::MIN;

/// The outcome of searching a position
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    /// The column to play, `None` if the position was not expanded
    pub best_move: Option<usize>,
    /// The score of the position as seen from the search
    pub value: i32,
    /// The number of positions visited (for diagnostics only)
    pub nodes: usize,
}

/// The win score for the side that placed `last`
const fn win_value(last: PieceKind) -> i32 {
    match last {
        PieceKind::PlayerOne => PLAYER_ONE_WIN,
        _ => PLAYER_TWO_WIN,
    }
}

/// Whether `child` should replace `best` as the choice made at `ply`
const fn improves(ply: usize, best: i32, child: i32) -> bool {
    if ply % 2 == 0 {
        best >= child
    } else {
        best <= child
    }
}

/// Whether `value` is a certain win for the side choosing at `ply`
const fn is_decisive(ply: usize, value: i32) -> bool {
    if ply % 2 == 0 {
        value == PLAYER_TWO_WIN
    } else {
        value == PLAYER_ONE_WIN
    }
}

/// One position in the game tree, holding the board while it searches
struct GameTreeNode<'b> {
    board: &'b mut Board,
    ply: usize,
    max_depth: usize,
    best_move: Option<usize>,
    best_value: i32,
    nodes: usize,
}

impl<'b> GameTreeNode<'b> {
    /// Evaluates the position on `board`, searching its children unless it
    /// is won, full or at the maximum depth
    fn new(board: &'b mut Board, ply: usize, max_depth: usize) -> Self {
        let evaluation = board.evaluate();
        let win = win_value(board.last_piece().kind());
        let game_over = evaluation == win;

        let mut node = Self {
            board,
            ply,
            max_depth,
            best_move: None,
            best_value: win,
            nodes: 1,
        };
        if node.ply < node.max_depth && !game_over && !node.board.full_board() {
            node.find_best_move();
        } else {
            node.best_value = evaluation;
        }
        node
    }

    /// Searches every playable column, undoing each move afterwards
    fn find_best_move(&mut self) {
        for column in 0..self.board.columns() {
            if self.board.is_full(column) {
                continue;
            }
            let child = self.make_child(column);
            if improves(self.ply, self.best_value, child) {
                self.best_value = child;
                self.best_move = Some(column);
                if is_decisive(self.ply, self.best_value) {
                    self.board.undo();
                    break;
                }
            }
            self.board.undo();
        }
    }

    /// Plays the next side's piece in `column` and returns the value of the
    /// resulting position, leaving the piece on the board
    fn make_child(&mut self, column: usize) -> i32 {
        let piece = self.board.last_piece().next();
        let placed = self.board.place(piece, column);
        debug_assert!(placed, "searched a full column");

        let child = GameTreeNode::new(&mut *self.board, self.ply + 1, self.max_depth);
        self.nodes += child.nodes;
        child.best_value
    }

    fn result(&self) -> SearchResult {
        SearchResult {
            best_move: self.best_move,
            value: self.best_value,
            nodes: self.nodes,
        }
    }
}

/// Searches the position on `board` as the node at `ply`, `max_depth` being
/// the ply at which positions are no longer expanded
///
/// The board is restored before returning.
pub fn search_from(board: &mut Board, ply: usize, max_depth: usize) -> SearchResult {
    GameTreeNode::new(board, ply, max_depth).result()
}

/// Finds the best column for player two to play, searching `max_depth` moves
/// ahead
pub fn search(board: &mut Board, max_depth: usize) -> SearchResult {
    let result = search_from(board, 0, max_depth);
    debug!(
        max_depth,
        best_move = ?result.best_move,
        value = result.value,
        nodes = result.nodes,
        "search complete"
    );
    result
}

/// Same as [`search`], but searches each root move on its own copy of the
/// board in parallel
///
/// The best move and value always match [`search`]; `nodes` may be higher
/// since columns after a winning one are still searched.
pub fn search_parallel(board: &Board, max_depth: usize) -> SearchResult {
    let mut root = board.clone();
    let evaluation = root.evaluate();
    let win = win_value(root.last_piece().kind());
    if max_depth == 0 || evaluation == win || root.full_board() {
        return search(&mut root, max_depth);
    }

    let piece = root.last_piece().next();
    let children: Vec<(usize, SearchResult)> = (0..root.columns())
        .into_par_iter()
        .filter(|&column| !root.is_full(column))
        .map(|column| {
            let mut branch = root.clone();
            branch.place(piece, column);
            (column, search_from(&mut branch, 1, max_depth))
        })
        .collect();

    let mut result = SearchResult {
        best_move: None,
        value: win,
        nodes: 1,
    };
    for (column, child) in children {
        result.nodes += child.nodes;
        if improves(0, result.value, child.value) {
            result.value = child.value;
            result.best_move = Some(column);
            if is_decisive(0, result.value) {
                break;
            }
        }
    }
    debug!(
        max_depth,
        best_move = ?result.best_move,
        value = result.value,
        nodes = result.nodes,
        "parallel search complete"
    );
    result
}
