//! The pieces that make up the board

/// What occupies a location on the board
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PieceKind {
    Empty,
    PlayerOne,
    PlayerTwo,
    OutOfBounds,
}

impl PieceKind {
    /// Returns the kind that follows this one in the turn order
    ///
    /// `Empty` and `OutOfBounds` never take a turn and map to themselves
    pub const fn next(self) -> Self {
        match self {
            PieceKind::PlayerOne => PieceKind::PlayerTwo,
            PieceKind::PlayerTwo => PieceKind::PlayerOne,
            other => other,
        }
    }

    pub const fn is_player(self) -> bool {
        matches!(self, PieceKind::PlayerOne | PieceKind::PlayerTwo)
    }

    /// Two character label used when printing the board as text
    pub const fn label(self) -> &'static str {
        match self {
            PieceKind::Empty => "__",
            PieceKind::PlayerOne => "P1",
            PieceKind::PlayerTwo => "P2",
            PieceKind::OutOfBounds => "OB",
        }
    }
}

/// A piece together with the location it was placed at
///
/// Pieces that have not been placed yet, and `OutOfBounds` pieces, have no
/// position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Piece {
    kind: PieceKind,
    position: Option<(usize, usize)>,
}

impl Piece {
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            position: None,
        }
    }

    pub const fn empty() -> Self {
        Self::new(PieceKind::Empty)
    }

    pub const fn player_one() -> Self {
        Self::new(PieceKind::PlayerOne)
    }

    pub const fn player_two() -> Self {
        Self::new(PieceKind::PlayerTwo)
    }

    pub const fn out_of_bounds() -> Self {
        Self::new(PieceKind::OutOfBounds)
    }

    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    pub const fn is_player(&self) -> bool {
        self.kind.is_player()
    }

    /// Returns a fresh, unplaced piece for the side that moves after this one
    pub const fn next(&self) -> Self {
        match self.kind {
            PieceKind::PlayerOne | PieceKind::PlayerTwo => Self::new(self.kind.next()),
            _ => *self,
        }
    }

    /// Records where the piece sits on the board, ignored for `OutOfBounds`
    pub fn set_position(&mut self, column: usize, row: usize) {
        if self.kind != PieceKind::OutOfBounds {
            self.position = Some((column, row));
        }
    }

    /// The `(column, row)` of the piece, if it has been placed
    pub const fn position(&self) -> Option<(usize, usize)> {
        self.position
    }

    pub fn column(&self) -> Option<usize> {
        self.position.map(|(column, _)| column)
    }

    pub fn row(&self) -> Option<usize> {
        self.position.map(|(_, row)| row)
    }
}

impl From<PieceKind> for Piece {
    fn from(kind: PieceKind) -> Self {
        Self::new(kind)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind.label())
    }
}
