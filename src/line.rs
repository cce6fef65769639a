use crate::{piece::PieceKind, LINE_LENGTH};

/// One run of `LINE_LENGTH` cells and how many pieces each player has in it
///
/// A line stops counting for a player as soon as the opponent has a piece in
/// it, since it can no longer be completed by that player.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Line {
    count_one: u8,
    count_two: u8,
}

impl Line {
    pub const fn new() -> Self {
        Self {
            count_one: 0,
            count_two: 0,
        }
    }

    /// Adds a piece to the line, returning true if it completes the line
    pub fn add(&mut self, player: PieceKind) -> bool {
        match player {
            PieceKind::PlayerOne => {
                self.count_one += 1;
                self.count_one as usize == LINE_LENGTH
            }
            PieceKind::PlayerTwo => {
                self.count_two += 1;
                self.count_two as usize == LINE_LENGTH
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, player: PieceKind) {
        match player {
            PieceKind::PlayerOne => self.count_one -= 1,
            PieceKind::PlayerTwo => self.count_two -= 1,
            _ => {}
        }
    }

    /// The number of `player`'s pieces in the line, or 0 if the opponent has
    /// any piece in it
    pub const fn value_for(&self, player: PieceKind) -> i32 {
        match player {
            PieceKind::PlayerOne if self.count_two == 0 => self.count_one as i32,
            PieceKind::PlayerTwo if self.count_one == 0 => self.count_two as i32,
            _ => 0,
        }
    }

    /// 1 if `player` can still complete the line, 0 otherwise
    pub const fn open_for(&self, player: PieceKind) -> i32 {
        match player {
            PieceKind::PlayerOne if self.count_two == 0 => 1,
            PieceKind::PlayerTwo if self.count_one == 0 => 1,
            _ => 0,
        }
    }

    pub const fn count(&self, player: PieceKind) -> u8 {
        match player {
            PieceKind::PlayerOne => self.count_one,
            PieceKind::PlayerTwo => self.count_two,
            _ => 0,
        }
    }
}
