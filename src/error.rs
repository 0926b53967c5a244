use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{color::Color, end_state::EndState, moves::Move, position::Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MalformedPosition(pub Position);

impl Display for MalformedPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} and column {} must both be within 1 to 8",
            self.0.row, self.0.column
        )?;
        Ok(())
    }
}
impl Error for MalformedPosition {}

/// Reason a move was rejected. The board and game are left untouched in every
/// case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidMove {
    OutOfBounds(MalformedPosition),
    EmptyOrigin(Position),
    WrongTurn { expected: Color, found: Color },
    Illegal(Move),
    GameOver(EndState),
}
impl From<MalformedPosition> for InvalidMove {
    fn from(value: MalformedPosition) -> Self {
        InvalidMove::OutOfBounds(value)
    }
}
impl Display for InvalidMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMove::OutOfBounds(err) => write!(f, "{err}")?,
            InvalidMove::EmptyOrigin(position) => write!(f, "no piece at {position}")?,
            InvalidMove::WrongTurn { expected, found } => {
                write!(f, "cannot move a {found} piece, it is {expected}'s turn")?;
            }
            InvalidMove::Illegal(movement) => {
                write!(f, "{movement} is not allowed or leaves the king in check")?;
            }
            InvalidMove::GameOver(end_state) => write!(f, "game is over, {end_state}")?,
        }
        Ok(())
    }
}
impl Error for InvalidMove {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InvalidMove::OutOfBounds(err) => Some(err),
            _ => None,
        }
    }
}

/// The game already ended with this outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameOver(pub EndState);

impl Display for GameOver {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "game is already over, {}", self.0)?;
        Ok(())
    }
}
impl Error for GameOver {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidBoard {
    ExceededKings(Color),
    InvalidEnPassantTarget(Position),
}
impl Display for InvalidBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidBoard::ExceededKings(color) => write!(f, "found more than 1 {color} king")?,
            InvalidBoard::InvalidEnPassantTarget(position) => {
                write!(f, "{position} is not a valid en passant target")?;
            }
        }
        Ok(())
    }
}
impl Error for InvalidBoard {}
