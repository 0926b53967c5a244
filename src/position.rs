use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::{Add, Mul},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsePositionError {
    InvalidColumn(char),
    InvalidRow(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParsePositionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParsePositionError::InvalidColumn(column) => write!(
                f,
                "found `{column}`, characters from `a` to `h` were expected instead"
            )?,
            ParsePositionError::InvalidRow(row) => write!(
                f,
                "found `{row}`, characters from `1` to `8` were expected instead"
            )?,
            ParsePositionError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParsePositionError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParsePositionError {}

/// A square, 1-indexed. Row 1 is white's back rank and column 1 is the a-file.
///
/// Out of range values are allowed so rays can step off the board; check
/// [`Position::in_bounds`] before using one against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub column: i8,
}
impl Position {
    pub fn new(row: i8, column: i8) -> Self {
        Position { row, column }
    }
    pub fn in_bounds(self) -> bool {
        (1..=8).contains(&self.row) && (1..=8).contains(&self.column)
    }
    pub fn from_chars(column: char, row: char) -> Result<Self, ParsePositionError> {
        let column = match column {
            'a'..='h' => (column as u8 - b'a') as i8 + 1,
            _ => return Err(ParsePositionError::InvalidColumn(column)),
        };
        let row = match row {
            '1'..='8' => (row as u8 - b'0') as i8,
            _ => return Err(ParsePositionError::InvalidRow(row)),
        };
        Ok(Position::new(row, column))
    }
    /// Steps by `movement`, returning `None` once the result leaves the board.
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Some(self + movement).filter(|position| position.in_bounds())
    }
    /// Every in-bounds square along `direction`, excluding `self`.
    pub fn line(self, direction: Vector) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        (1..).map_while(move |distance| self.move_by(direction * distance))
    }
    pub(crate) fn index(self) -> (usize, usize) {
        assert!(self.in_bounds(), "{self} should be in bounds");
        (
            usize::from(self.row.unsigned_abs() - 1),
            usize::from(self.column.unsigned_abs() - 1),
        )
    }
}
impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            let column = char::from(b'a' + self.column.unsigned_abs() - 1);
            write!(f, "{column}{}", self.row)?;
        } else {
            write!(f, "({}, {})", self.row, self.column)?;
        }
        Ok(())
    }
}
impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(column) = chars.next() else {
            return Err(ParsePositionError::NotEnoughCharacter(0));
        };
        let Some(row) = chars.next() else {
            return Err(ParsePositionError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParsePositionError::Unexpected(c));
        }
        Position::from_chars(column, row)
    }
}
impl Add<Vector> for Position {
    type Output = Position;

    fn add(self, rhs: Vector) -> Self::Output {
        Position {
            row: self.row + rhs.row,
            column: self.column + rhs.column,
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub row: i8,
    pub column: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { row: 0, column: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { row: -2, column: -1 },
        Vector { row: -2, column: 1 },
        Vector { row: 2, column: -1 },
        Vector { row: 2, column: 1 },
        Vector { row: -1, column: -2 },
        Vector { row: -1, column: 2 },
        Vector { row: 1, column: -2 },
        Vector { row: 1, column: 2 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { row: -1, column: -1 },
        Vector { row: -1, column: 0 },
        Vector { row: -1, column: 1 },
        Vector { row: 0, column: -1 },
        Vector { row: 0, column: 1 },
        Vector { row: 1, column: -1 },
        Vector { row: 1, column: 0 },
        Vector { row: 1, column: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { row: 0, column: -1 },
        Vector { row: 0, column: 1 },
        Vector { row: -1, column: 0 },
        Vector { row: 1, column: 0 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { row: -1, column: -1 },
        Vector { row: -1, column: 1 },
        Vector { row: 1, column: -1 },
        Vector { row: 1, column: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub fn pawn_single_move(color: Color) -> Self {
        Vector {
            row: color.pawn_direction(),
            column: 0,
        }
    }
    pub fn pawn_attacks(color: Color) -> [Self; 2] {
        [-1, 1].map(|column| Vector {
            row: color.pawn_direction(),
            column,
        })
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            row: self.row * rhs,
            column: self.column * rhs,
        }
    }
}
