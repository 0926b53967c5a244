use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    castling::{CastlingFlags, CastlingSide, KING_ORIGIN_COLUMN},
    color::Color,
    end_state::{EndState, GameStatus},
    error::{GameOver, InvalidBoard, InvalidMove},
    movegen,
    moves::Move,
    piece::{Piece, PieceKind},
    position::Position,
};

/// Everything a game needs to resume: placement, en passant target, side to
/// move, castling flags and a resignation, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub turn: Color,
    pub castling: CastlingFlags,
    #[serde(default)]
    pub resigned: Option<Color>,
}

/// A two player game, driven through [`Game::make_move`] and [`Game::resign`]. A
/// rejected move leaves the game exactly as it was.
///
/// Not synchronized. Callers sharing a game between threads must hold one
/// exclusive lock around every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
    castling: CastlingFlags,
    resigned: Option<Color>,
}
impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::starting_position(),
            turn: Color::White,
            castling: CastlingFlags::new(),
            resigned: None,
        }
    }
    /// Starts from an arbitrary placement with every castling flag unset.
    pub fn with_board(board: Board, turn: Color) -> Result<Self, InvalidBoard> {
        board.validate()?;
        Ok(Game {
            board,
            turn,
            castling: CastlingFlags::new(),
            resigned: None,
        })
    }
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, InvalidBoard> {
        snapshot.board.validate()?;
        Ok(Game {
            board: snapshot.board,
            turn: snapshot.turn,
            castling: snapshot.castling,
            resigned: snapshot.resigned,
        })
    }
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            turn: self.turn,
            castling: self.castling,
            resigned: self.resigned,
        }
    }
    pub fn team_turn(&self) -> Color {
        self.turn
    }
    pub fn set_team_turn(&mut self, color: Color) {
        self.turn = color;
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn set_board(&mut self, board: Board) -> Result<(), InvalidBoard> {
        board.validate()?;
        self.board = board;
        Ok(())
    }
    pub fn castling_flags(&self) -> CastlingFlags {
        self.castling
    }
    pub fn set_castling_flags(&mut self, flags: CastlingFlags) {
        self.castling = flags;
    }
    /// Legal moves of the piece on `position`, whichever side it belongs to.
    /// Empty for an empty or out of bounds square.
    pub fn valid_moves(&self, position: Position) -> FxHashSet<Move> {
        let Ok(Some(piece)) = self.board.get_piece(position) else {
            return FxHashSet::default();
        };
        let mut moves = movegen::possible_moves(&self.board, position);
        if piece.kind == PieceKind::King && !self.board.is_in_check(piece.color) {
            moves.extend(self.castling_moves(position, piece.color));
        }
        moves.retain(|movement| self.keeps_king_safe(movement, piece.color));
        moves
    }
    /// Castling candidates. The destination square is left for the king
    /// safety filter; the king's own square is covered by the caller's check
    /// test.
    fn castling_moves(&self, king: Position, color: Color) -> impl Iterator<Item = Move> + '_ {
        let rank = color.home_rank();
        CastlingSide::ALL
            .into_iter()
            .filter(move |_| king == Position::new(rank, KING_ORIGIN_COLUMN))
            .filter(move |side| self.castling.may_castle(color, *side))
            .filter(move |side| {
                self.board[side.rook_origin(color)] == Some(Piece::new(color, PieceKind::Rook))
            })
            .filter(move |side| {
                side.between_columns()
                    .iter()
                    .all(|column| self.board[Position::new(rank, *column)].is_none())
            })
            .filter(move |side| {
                !self
                    .board
                    .is_attacked(Position::new(rank, side.rook_destination_column()), !color)
            })
            .map(move |side| {
                Move::new(
                    king,
                    Position::new(rank, side.king_destination_column()),
                    None,
                )
            })
    }
    fn keeps_king_safe(&self, movement: &Move, color: Color) -> bool {
        let mut scratch = self.board;
        apply(&mut scratch, movement).is_ok() && !scratch.is_in_check(color)
    }
    pub fn make_move(&mut self, movement: &Move) -> Result<(), InvalidMove> {
        if let Some(color) = self.resigned {
            return Err(InvalidMove::GameOver(EndState::Win(!color)));
        }
        let Some(piece) = self.board.get_piece(movement.start)? else {
            return Err(InvalidMove::EmptyOrigin(movement.start));
        };
        if piece.color != self.turn {
            return Err(InvalidMove::WrongTurn {
                expected: self.turn,
                found: piece.color,
            });
        }
        if !self.valid_moves(movement.start).contains(movement) {
            return Err(InvalidMove::Illegal(*movement));
        }
        let mut board = self.board;
        apply(&mut board, movement)?;

        board.set_en_passant_target(None);
        if piece.kind == PieceKind::Pawn && (movement.end.row - movement.start.row).abs() == 2 {
            board.set_en_passant_target(Some(Position::new(
                (movement.start.row + movement.end.row) / 2,
                movement.start.column,
            )));
        }
        if piece.kind == PieceKind::King {
            self.castling.mark_king_moved(piece.color);
        }
        self.castling.touch(movement.start);
        self.castling.touch(movement.end);

        self.board = board;
        self.turn = !self.turn;
        Ok(())
    }
    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_valid_moves(color)
    }
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_valid_moves(color)
    }
    pub fn all_valid_moves(&self, color: Color) -> FxHashSet<Move> {
        self.board
            .pieces_of(color)
            .flat_map(|(position, _)| self.valid_moves(position))
            .collect()
    }
    fn has_valid_moves(&self, color: Color) -> bool {
        self.board
            .pieces_of(color)
            .any(|(position, _)| !self.valid_moves(position).is_empty())
    }
    pub fn status(&self, color: Color) -> GameStatus {
        match (self.is_in_check(color), self.has_valid_moves(color)) {
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, true) => GameStatus::Ongoing,
            (false, false) => GameStatus::Stalemate,
        }
    }
    /// Ends the game in favor of `color`'s opponent. Fails once the game is
    /// already over, by resignation or on the board.
    pub fn resign(&mut self, color: Color) -> Result<(), GameOver> {
        if let Some(end_state) = self.end_state() {
            return Err(GameOver(end_state));
        }
        self.resigned = Some(color);
        Ok(())
    }
    pub fn resigned(&self) -> Option<Color> {
        self.resigned
    }
    pub fn is_game_over(&self) -> bool {
        self.end_state().is_some()
    }
    /// Outcome of the game, if it is over: a resignation, or checkmate or
    /// stalemate of the side to move.
    pub fn end_state(&self) -> Option<EndState> {
        if let Some(color) = self.resigned {
            return Some(EndState::Win(!color));
        }
        match self.status(self.turn) {
            GameStatus::Checkmate => Some(EndState::Win(!self.turn)),
            GameStatus::Stalemate => Some(EndState::Draw),
            GameStatus::Ongoing | GameStatus::Check => None,
        }
    }
}
/// Plays `movement` on `board`, moving the rook as well when a king castles.
fn apply(board: &mut Board, movement: &Move) -> Result<(), InvalidMove> {
    let Some(piece) = board.get_piece(movement.start)? else {
        return Err(InvalidMove::EmptyOrigin(movement.start));
    };
    board.move_piece(movement)?;
    if piece.kind == PieceKind::King {
        if let Some(side) = CastlingSide::from_king_move(movement.start, movement.end) {
            let row = movement.start.row;
            board.move_piece(&Move::new(
                Position::new(row, side.rook_origin_column()),
                Position::new(row, side.rook_destination_column()),
                None,
            ))?;
        }
    }
    Ok(())
}
