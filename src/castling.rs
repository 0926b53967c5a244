use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{color::Color, position::Position};

pub const KING_ORIGIN_COLUMN: i8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    pub fn rook_origin_column(self) -> i8 {
        match self {
            CastlingSide::Kingside => 8,
            CastlingSide::Queenside => 1,
        }
    }
    pub fn rook_destination_column(self) -> i8 {
        match self {
            CastlingSide::Kingside => 6,
            CastlingSide::Queenside => 4,
        }
    }
    pub fn king_destination_column(self) -> i8 {
        match self {
            CastlingSide::Kingside => 7,
            CastlingSide::Queenside => 3,
        }
    }
    /// Columns strictly between the king and the rook; all must be empty.
    pub fn between_columns(self) -> &'static [i8] {
        match self {
            CastlingSide::Kingside => &[6, 7],
            CastlingSide::Queenside => &[2, 3, 4],
        }
    }
    /// Which side a king move belongs to, if it is a two-file castling move.
    pub fn from_king_move(start: Position, end: Position) -> Option<Self> {
        match i16::from(end.column) - i16::from(start.column) {
            2 => Some(CastlingSide::Kingside),
            -2 => Some(CastlingSide::Queenside),
            _ => None,
        }
    }
    pub fn rook_origin(self, color: Color) -> Position {
        Position::new(color.home_rank(), self.rook_origin_column())
    }
}

/// Records whether each king and each corner rook has ever moved.
/// Flags are only ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CastlingFlags {
    white: u8,
    black: u8,
}
impl CastlingFlags {
    const KING: u8 = 0b_001;
    const KINGSIDE_ROOK: u8 = 0b_010;
    const QUEENSIDE_ROOK: u8 = 0b_100;

    pub fn new() -> Self {
        CastlingFlags::default()
    }
    fn byte(self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
    fn byte_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
    fn rook_bit(side: CastlingSide) -> u8 {
        match side {
            CastlingSide::Kingside => CastlingFlags::KINGSIDE_ROOK,
            CastlingSide::Queenside => CastlingFlags::QUEENSIDE_ROOK,
        }
    }
    pub fn king_moved(self, color: Color) -> bool {
        self.byte(color) & CastlingFlags::KING != 0
    }
    pub fn rook_moved(self, color: Color, side: CastlingSide) -> bool {
        self.byte(color) & CastlingFlags::rook_bit(side) != 0
    }
    pub fn mark_king_moved(&mut self, color: Color) {
        *self.byte_mut(color) |= CastlingFlags::KING;
    }
    pub fn mark_rook_moved(&mut self, color: Color, side: CastlingSide) {
        *self.byte_mut(color) |= CastlingFlags::rook_bit(side);
    }
    /// Neither the king nor that side's rook has moved.
    pub fn may_castle(self, color: Color, side: CastlingSide) -> bool {
        !self.king_moved(color) && !self.rook_moved(color, side)
    }
    /// Marks the rook whose corner is `position`, if any. Called for both the
    /// origin and the destination of every move, so a rook captured at home
    /// also loses its right.
    pub fn touch(&mut self, position: Position) {
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if side.rook_origin(color) == position {
                    self.mark_rook_moved(color, side);
                }
            }
        }
    }
}
/// Lists the rights still open, `KQkq` style, or `-` when none are.
impl Display for CastlingFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if self.may_castle(color, side) {
                    let c = match side {
                        CastlingSide::Kingside => 'K',
                        CastlingSide::Queenside => 'Q',
                    };
                    let c = match color {
                        Color::White => c,
                        Color::Black => c.to_ascii_lowercase(),
                    };
                    written = true;
                    write!(f, "{c}")?;
                }
            }
        }
        if !written {
            write!(f, "-")?;
        }
        Ok(())
    }
}
