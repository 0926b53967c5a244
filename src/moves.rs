use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    piece::{ParsePieceKindError, PieceKind},
    position::{ParsePositionError, Position},
};

/// A piece relocation from `start` to `end`. Castling is the king's two-square
/// move and en passant is the capturing pawn's diagonal step; neither has a
/// separate representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub start: Position,
    pub end: Position,
    pub promotion: Option<PieceKind>,
}
impl Move {
    pub fn new(start: Position, end: Position, promotion: Option<PieceKind>) -> Self {
        Move {
            start,
            end,
            promotion,
        }
    }
}
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.lowercase())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseMoveError {
    InvalidChar,
    ParsePositionError(ParsePositionError),
    ParsePieceKindError(ParsePieceKindError),
}
impl From<ParsePositionError> for ParseMoveError {
    fn from(value: ParsePositionError) -> Self {
        ParseMoveError::ParsePositionError(value)
    }
}
impl From<ParsePieceKindError> for ParseMoveError {
    fn from(value: ParsePieceKindError) -> Self {
        ParseMoveError::ParsePieceKindError(value)
    }
}
impl Display for ParseMoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoveError::InvalidChar => write!(f, "provided string contains invalid character")?,
            ParseMoveError::ParsePositionError(err) => write!(f, "{err}")?,
            ParseMoveError::ParsePieceKindError(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseMoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseMoveError::ParsePositionError(err) => Some(err),
            ParseMoveError::ParsePieceKindError(err) => Some(err),
            _ => None,
        }
    }
}
/// Accepts long algebraic notation (`e2e4`, `e7e8q`) as well as the spaced form
/// typed at the terminal client (`e2 e4`, `e7 e8 queen`).
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.split_whitespace().collect();
        let start = compact
            .get(0..2)
            .ok_or(ParseMoveError::InvalidChar)?
            .parse()?;
        let end = compact
            .get(2..4)
            .ok_or(ParseMoveError::InvalidChar)?
            .parse()?;
        let rest = compact.get(4..).ok_or(ParseMoveError::InvalidChar)?;
        let promotion = if rest.is_empty() {
            None
        } else {
            Some(rest.parse()?)
        };
        Ok(Move {
            start,
            end,
            promotion,
        })
    }
}
