use std::{
    hash::{Hash, Hasher},
    ops::{Index, IndexMut},
};

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    error::{InvalidBoard, InvalidMove, MalformedPosition},
    movegen,
    moves::Move,
    piece::{Piece, PieceKind},
    position::{Position, Vector},
};

/// Piece placement plus the square skipped by the last double pawn step.
///
/// Equality and hashing only look at placement; compare
/// [`Board::en_passant_target`] separately when it matters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    en_passant_target: Option<Position>,
}
impl Board {
    pub fn new() -> Self {
        Board::default()
    }
    pub fn starting_position() -> Self {
        let mut board = Board::new();
        board.reset_board();
        board
    }
    pub fn reset_board(&mut self) {
        *self = Board::new();
        for color in Color::ALL {
            for (column, kind) in (1..).zip(PieceKind::STARTING_CONFIGURATION) {
                self[Position::new(color.home_rank(), column)] = Some(Piece::new(color, kind));
                self[Position::new(color.pawn_home_rank(), column)] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
    }
    pub fn get_piece(&self, position: Position) -> Result<Option<Piece>, MalformedPosition> {
        if position.in_bounds() {
            Ok(self[position])
        } else {
            Err(MalformedPosition(position))
        }
    }
    pub fn add_piece(&mut self, position: Position, piece: Piece) -> Result<(), MalformedPosition> {
        if !position.in_bounds() {
            return Err(MalformedPosition(position));
        }
        self[position] = Some(piece);
        Ok(())
    }
    pub fn remove_piece(&mut self, position: Position) -> Result<Option<Piece>, MalformedPosition> {
        if !position.in_bounds() {
            return Err(MalformedPosition(position));
        }
        Ok(self[position].take())
    }
    /// Relocates a piece without checking legality.
    ///
    /// A promotion replaces the moving piece with one of the same color. A pawn
    /// stepping diagonally onto the empty en passant target also removes the
    /// pawn it passes behind. The en passant target itself is left for the
    /// caller to update.
    pub fn move_piece(&mut self, movement: &Move) -> Result<(), InvalidMove> {
        let Some(piece) = self.get_piece(movement.start)? else {
            return Err(InvalidMove::EmptyOrigin(movement.start));
        };
        if !movement.end.in_bounds() {
            return Err(MalformedPosition(movement.end).into());
        }
        if piece.kind == PieceKind::Pawn
            && movement.start.column != movement.end.column
            && self[movement.end].is_none()
            && self.en_passant_target == Some(movement.end)
        {
            self[Position::new(movement.start.row, movement.end.column)] = None;
        }
        let piece = match movement.promotion {
            Some(kind) => Piece::new(piece.color, kind),
            None => piece,
        };
        self[movement.start] = None;
        self[movement.end] = Some(piece);
        Ok(())
    }
    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant_target
    }
    pub fn set_en_passant_target(&mut self, target: Option<Position>) {
        self.en_passant_target = target;
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (1..).zip(&self.squares).flat_map(|(row, squares)| {
            (1..).zip(squares).filter_map(move |(column, piece)| {
                piece.map(|piece| (Position::new(row, column), piece))
            })
        })
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }
    pub fn king_of(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(position, _)| position)
    }
    /// Whether any piece of color `by` attacks `square`.
    pub fn is_attacked(&self, square: Position, by: Color) -> bool {
        self.pieces_of(by)
            .any(|(position, _)| movegen::attacks(self, position).any(|target| target == square))
    }
    /// A missing king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_of(color)
            .is_some_and(|king| self.is_attacked(king, !color))
    }
    pub fn validate(&self) -> Result<(), InvalidBoard> {
        for color in Color::ALL {
            if self
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind == PieceKind::King)
                .nth(1)
                .is_some()
            {
                return Err(InvalidBoard::ExceededKings(color));
            }
        }
        if let Some(target) = self.en_passant_target {
            let valid = Color::ALL.into_iter().any(|color| {
                target.in_bounds()
                    && target.row == color.pawn_home_rank() + Vector::pawn_single_move(color).row
                    && self[target].is_none()
                    && target
                        .move_by(Vector::pawn_single_move(color))
                        .is_some_and(|position| {
                            self[position] == Some(Piece::new(color, PieceKind::Pawn))
                        })
            });
            if !valid {
                return Err(InvalidBoard::InvalidEnPassantTarget(target));
            }
        }
        Ok(())
    }
}
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
    }
}
impl Eq for Board {}
impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.squares.hash(state);
    }
}
/// Panics when `position` is out of bounds; use [`Board::get_piece`] for
/// unchecked input.
impl Index<Position> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Position) -> &Self::Output {
        let (row, column) = index.index();
        &self.squares[row][column]
    }
}
impl IndexMut<Position> for Board {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        let (row, column) = index.index();
        &mut self.squares[row][column]
    }
}
