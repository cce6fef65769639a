//! Every line on the board, indexed by the cells they cover
//!
//! Keeps running totals of how many lines each player can still complete and
//! how many of their pieces sit in those lines, so evaluating the board and
//! detecting a win are both O(1) per move.

use crate::{line::Line, piece::PieceKind, LINE_LENGTH};

/// The four directions a line can run in, as (column, row) steps
const DIRECTIONS: [(isize, isize); 4] = [
    // horizontal
    (1, 0),
    // vertical
    (0, 1),
    // diagonal /
    (1, 1),
    // diagonal \
    (-1, 1),
];

/// Aggregate line information for both players
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct LineTotals {
    /// pieces player one has in lines they can still complete
    pub value_one: i32,
    /// pieces player two has in lines they can still complete
    pub value_two: i32,
    /// lines player one can still complete
    pub open_one: i32,
    /// lines player two can still complete
    pub open_two: i32,
}

impl LineTotals {
    fn of_lines<'a>(lines: impl Iterator<Item = &'a Line>) -> Self {
        let mut totals = Self::default();
        for line in lines {
            totals.value_one += line.value_for(PieceKind::PlayerOne);
            totals.value_two += line.value_for(PieceKind::PlayerTwo);
            totals.open_one += line.open_for(PieceKind::PlayerOne);
            totals.open_two += line.open_for(PieceKind::PlayerTwo);
        }
        totals
    }

    fn apply_delta(&mut self, before: Self, after: Self) {
        self.value_one += after.value_one - before.value_one;
        self.value_two += after.value_two - before.value_two;
        self.open_one += after.open_one - before.open_one;
        self.open_two += after.open_two - before.open_two;
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LineHandler {
    columns: usize,
    rows: usize,
    lines: Vec<Line>,
    // indices into `lines` for each cell, stored left-to-right, bottom-to-top
    cell_lines: Vec<Vec<usize>>,
    totals: LineTotals,
}

impl LineHandler {
    /// Creates every line that fits on a `columns` x `rows` board, all open
    /// for both players
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut handler = Self {
            columns,
            rows,
            lines: Vec::new(),
            cell_lines: vec![Vec::new(); columns * rows],
            totals: LineTotals::default(),
        };

        for row in 0..rows {
            for column in 0..columns {
                for &direction in DIRECTIONS.iter() {
                    if let Some(cells) = handler.line_cells(column, row, direction) {
                        handler.make_line(cells);
                    }
                }
            }
        }

        handler.totals.open_one = handler.lines.len() as i32;
        handler.totals.open_two = handler.lines.len() as i32;
        handler
    }

    /// Returns the cell indices of the line starting at (column, row) and
    /// running in `direction`, if the whole line fits on the board
    fn line_cells(
        &self,
        column: usize,
        row: usize,
        (step_column, step_row): (isize, isize),
    ) -> Option<[usize; LINE_LENGTH]> {
        let mut cells = [0; LINE_LENGTH];
        for (i, cell) in cells.iter_mut().enumerate() {
            let c = column as isize + step_column * i as isize;
            let r = row as isize + step_row * i as isize;
            if c < 0 || c >= self.columns as isize || r < 0 || r >= self.rows as isize {
                return None;
            }
            *cell = c as usize + self.columns * r as usize;
        }
        Some(cells)
    }

    fn make_line(&mut self, cells: [usize; LINE_LENGTH]) {
        let index = self.lines.len();
        self.lines.push(Line::new());
        for cell in cells.iter() {
            self.cell_lines[*cell].push(index);
        }
    }

    fn cell_index(&self, column: usize, row: usize) -> Option<usize> {
        if column < self.columns && row < self.rows {
            Some(column + self.columns * row)
        } else {
            None
        }
    }

    /// The lines covering (column, row); empty for locations off the board
    fn lines_at(&self, column: usize, row: usize) -> &[usize] {
        match self.cell_index(column, row) {
            Some(cell) => &self.cell_lines[cell],
            None => &[],
        }
    }

    fn totals_at(&self, column: usize, row: usize) -> LineTotals {
        LineTotals::of_lines(self.lines_at(column, row).iter().map(|&i| &self.lines[i]))
    }

    /// Updates every line containing the placed piece and the running totals
    ///
    /// Returns true if the piece completes a line
    pub fn place(&mut self, player: PieceKind, column: usize, row: usize) -> bool {
        let before = self.totals_at(column, row);

        let mut found_win = false;
        if let Some(cell) = self.cell_index(column, row) {
            for &i in self.cell_lines[cell].iter() {
                if self.lines[i].add(player) {
                    found_win = true;
                }
            }
        }

        let after = self.totals_at(column, row);
        self.totals.apply_delta(before, after);
        found_win
    }

    /// Updates every line containing the removed piece and the running totals
    pub fn remove(&mut self, player: PieceKind, column: usize, row: usize) {
        let before = self.totals_at(column, row);

        if let Some(cell) = self.cell_index(column, row) {
            for &i in self.cell_lines[cell].iter() {
                self.lines[i].remove(player);
            }
        }

        let after = self.totals_at(column, row);
        self.totals.apply_delta(before, after);
    }

    /// The number of pieces `player` has in lines they can still complete
    pub fn value_for(&self, player: PieceKind) -> i32 {
        match player {
            PieceKind::PlayerOne => self.totals.value_one,
            PieceKind::PlayerTwo => self.totals.value_two,
            _ => 0,
        }
    }

    /// The number of lines `player` can still complete
    pub fn open_for(&self, player: PieceKind) -> i32 {
        match player {
            PieceKind::PlayerOne => self.totals.open_one,
            PieceKind::PlayerTwo => self.totals.open_two,
            _ => 0,
        }
    }

    /// The incrementally maintained totals
    pub fn totals(&self) -> LineTotals {
        self.totals
    }

    /// Sums every line from scratch (for diagnostics only)
    pub fn recount(&self) -> LineTotals {
        LineTotals::of_lines(self.lines.iter())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The number of lines passing through (column, row)
    pub fn lines_through(&self, column: usize, row: usize) -> usize {
        self.lines_at(column, row).len()
    }
}
