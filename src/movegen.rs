//! Pseudo-legal move generation: each piece kind's movement pattern against
//! the current occupancy, without regard to the mover's own king.

use rustc_hash::FxHashSet;

use crate::{
    board::Board,
    color::Color,
    moves::Move,
    piece::{Piece, PieceKind},
    position::{Position, Vector},
};

/// Pseudo-legal moves of the piece on `from`. Empty when the square is empty
/// or off the board.
pub fn possible_moves(board: &Board, from: Position) -> FxHashSet<Move> {
    match board.get_piece(from) {
        Ok(Some(piece)) => moves_of(board, from, piece).collect(),
        _ => FxHashSet::default(),
    }
}
/// Squares the piece on `from` attacks. Same as its pseudo-legal destinations,
/// except a pawn attacks both forward diagonals whether or not they hold an
/// enemy, and never the square ahead of it.
pub fn attacks(board: &Board, from: Position) -> Box<dyn Iterator<Item = Position> + '_> {
    match board.get_piece(from) {
        Ok(Some(piece)) if piece.kind == PieceKind::Pawn => Box::new(
            Vector::pawn_attacks(piece.color)
                .into_iter()
                .filter_map(move |movement| from.move_by(movement)),
        ),
        Ok(Some(piece)) => Box::new(moves_of(board, from, piece).map(|movement| movement.end)),
        _ => Box::new(std::iter::empty()),
    }
}
fn moves_of(board: &Board, from: Position, piece: Piece) -> Box<dyn Iterator<Item = Move> + '_> {
    match piece.kind {
        PieceKind::King => Box::new(king_moves(board, from, piece.color)),
        PieceKind::Queen => Box::new(queen_moves(board, from, piece.color)),
        PieceKind::Bishop => Box::new(bishop_moves(board, from, piece.color)),
        PieceKind::Knight => Box::new(knight_moves(board, from, piece.color)),
        PieceKind::Rook => Box::new(rook_moves(board, from, piece.color)),
        PieceKind::Pawn => Box::new(pawn_moves(board, from, piece.color)),
    }
}
pub fn king_moves(board: &Board, from: Position, color: Color) -> impl Iterator<Item = Move> + '_ {
    step_moves(board, from, color, &Vector::KING_MOVES)
}
pub fn knight_moves(
    board: &Board,
    from: Position,
    color: Color,
) -> impl Iterator<Item = Move> + '_ {
    step_moves(board, from, color, &Vector::KNIGHT_MOVES)
}
pub fn bishop_moves(
    board: &Board,
    from: Position,
    color: Color,
) -> impl Iterator<Item = Move> + '_ {
    all_directional_moves(board, from, color, &Vector::BISHOP_DIRECTIONS)
}
pub fn rook_moves(board: &Board, from: Position, color: Color) -> impl Iterator<Item = Move> + '_ {
    all_directional_moves(board, from, color, &Vector::ROOK_DIRECTIONS)
}
pub fn queen_moves(board: &Board, from: Position, color: Color) -> impl Iterator<Item = Move> + '_ {
    all_directional_moves(board, from, color, &Vector::QUEEN_DIRECTIONS)
}
pub fn pawn_moves(board: &Board, from: Position, color: Color) -> impl Iterator<Item = Move> + '_ {
    let forward_jumps = if from.row == color.pawn_home_rank() {
        2
    } else {
        1
    };
    let pushes = from
        .line(Vector::pawn_single_move(color))
        .take(forward_jumps)
        .take_while(move |position| board[*position].is_none());
    let captures = Vector::pawn_attacks(color)
        .into_iter()
        .filter_map(move |movement| from.move_by(movement))
        .filter(move |destination| {
            board[*destination].is_some_and(|piece| piece.color != color)
        });
    let en_passant = board.en_passant_target().filter(|target| {
        target.in_bounds()
            && board[*target].is_none()
            && from.row == color.en_passant_rank()
            && target.row == from.row + Vector::pawn_single_move(color).row
            && (target.column - from.column).abs() == 1
    });
    pushes
        .chain(captures)
        .chain(en_passant)
        .flat_map(move |destination| {
            static PROMOTION_CHOICES: [Option<PieceKind>; 4] = [
                Some(PieceKind::Queen),
                Some(PieceKind::Rook),
                Some(PieceKind::Bishop),
                Some(PieceKind::Knight),
            ];
            static NON_PROMOTION_CHOICES: [Option<PieceKind>; 1] = [None];
            let promotion_choices: &[_] = if destination.row == color.pawn_promotion_rank() {
                &PROMOTION_CHOICES
            } else {
                &NON_PROMOTION_CHOICES
            };
            promotion_choices
                .iter()
                .map(move |promotion| Move::new(from, destination, *promotion))
        })
}
fn step_moves<'a>(
    board: &'a Board,
    from: Position,
    color: Color,
    moves: &'static [Vector],
) -> impl Iterator<Item = Move> + 'a {
    moves
        .iter()
        .filter_map(move |movement| from.move_by(*movement))
        .filter(move |destination| board[*destination].is_none_or(|piece| piece.color != color))
        .map(move |destination| Move::new(from, destination, None))
}
fn directional_moves(
    board: &Board,
    from: Position,
    color: Color,
    direction: Vector,
) -> impl Iterator<Item = Move> + '_ {
    let mut resume = true;
    from.line(direction).map_while(move |destination| {
        if !resume {
            return None;
        }
        match board[destination] {
            Some(piece) => {
                resume = false;
                (piece.color != color).then_some(Move::new(from, destination, None))
            }
            None => Some(Move::new(from, destination, None)),
        }
    })
}
fn all_directional_moves<'a>(
    board: &'a Board,
    from: Position,
    color: Color,
    directions: &'static [Vector],
) -> impl Iterator<Item = Move> + 'a {
    directions
        .iter()
        .flat_map(move |direction| directional_moves(board, from, color, *direction))
}
#[cfg(test)]
mod test {
    use rustc_hash::FxHashSet;

    use crate::{
        board::Board,
        color::Color,
        movegen::{attacks, possible_moves},
        moves::Move,
        piece::{Piece, PieceKind},
        position::Position,
    };

    fn board_with(pieces: &[(Position, Color, PieceKind)]) -> Board {
        let mut board = Board::new();
        for (position, color, kind) in pieces {
            board.add_piece(*position, Piece::new(*color, *kind)).unwrap();
        }
        board
    }
    fn destinations(moves: &FxHashSet<Move>) -> FxHashSet<Position> {
        moves.iter().map(|movement| movement.end).collect()
    }

    #[test]
    fn rook_ray_stops_at_blockers() {
        let board = board_with(&[
            (Position::new(4, 4), Color::White, PieceKind::Rook),
            (Position::new(4, 6), Color::Black, PieceKind::Pawn),
            (Position::new(6, 4), Color::White, PieceKind::Pawn),
        ]);
        let moves = destinations(&possible_moves(&board, Position::new(4, 4)));
        assert!(moves.contains(&Position::new(4, 5)));
        assert!(moves.contains(&Position::new(4, 6)));
        assert!(!moves.contains(&Position::new(4, 7)));
        assert!(moves.contains(&Position::new(5, 4)));
        assert!(!moves.contains(&Position::new(6, 4)));
        // three to the left, one capture and one empty to the right, one up, three down
        assert_eq!(moves.len(), 3 + 2 + 1 + 3);
    }
    #[test]
    fn queen_in_the_corner() {
        let board = board_with(&[(Position::new(1, 1), Color::White, PieceKind::Queen)]);
        assert_eq!(possible_moves(&board, Position::new(1, 1)).len(), 21);
    }
    #[test]
    fn knight_skips_off_board_and_friendly_squares() {
        let board = board_with(&[
            (Position::new(1, 2), Color::White, PieceKind::Knight),
            (Position::new(2, 4), Color::White, PieceKind::Pawn),
            (Position::new(3, 1), Color::Black, PieceKind::Pawn),
        ]);
        let moves = destinations(&possible_moves(&board, Position::new(1, 2)));
        assert_eq!(
            moves,
            [Position::new(3, 1), Position::new(3, 3)].into_iter().collect()
        );
    }
    #[test]
    fn king_has_eight_moves_in_the_open() {
        let board = board_with(&[(Position::new(4, 4), Color::Black, PieceKind::King)]);
        assert_eq!(possible_moves(&board, Position::new(4, 4)).len(), 8);
    }
    #[test]
    fn pawn_double_step_needs_both_squares_empty() {
        let mut board = board_with(&[(Position::new(2, 5), Color::White, PieceKind::Pawn)]);
        assert_eq!(
            destinations(&possible_moves(&board, Position::new(2, 5))),
            [Position::new(3, 5), Position::new(4, 5)].into_iter().collect()
        );
        board
            .add_piece(Position::new(4, 5), Piece::new(Color::Black, PieceKind::Knight))
            .unwrap();
        assert_eq!(
            destinations(&possible_moves(&board, Position::new(2, 5))),
            [Position::new(3, 5)].into_iter().collect()
        );
        board
            .add_piece(Position::new(3, 5), Piece::new(Color::Black, PieceKind::Knight))
            .unwrap();
        assert!(possible_moves(&board, Position::new(2, 5)).is_empty());
    }
    #[test]
    fn black_pawn_moves_down_and_captures_diagonally() {
        let board = board_with(&[
            (Position::new(7, 4), Color::Black, PieceKind::Pawn),
            (Position::new(6, 3), Color::White, PieceKind::Bishop),
            (Position::new(6, 5), Color::Black, PieceKind::Bishop),
        ]);
        assert_eq!(
            destinations(&possible_moves(&board, Position::new(7, 4))),
            [Position::new(6, 4), Position::new(5, 4), Position::new(6, 3)]
                .into_iter()
                .collect()
        );
    }
    #[test]
    fn pawn_promotes_to_four_kinds() {
        let board = board_with(&[
            (Position::new(2, 7), Color::Black, PieceKind::Pawn),
            (Position::new(1, 8), Color::White, PieceKind::Rook),
        ]);
        let moves = possible_moves(&board, Position::new(2, 7));
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|movement| movement.promotion.is_some()));
        assert!(moves.contains(&Move::new(
            Position::new(2, 7),
            Position::new(1, 8),
            Some(PieceKind::Knight)
        )));
    }
    #[test]
    fn en_passant_needs_adjacent_file_and_right_rank() {
        let mut board = board_with(&[
            (Position::new(5, 5), Color::White, PieceKind::Pawn),
            (Position::new(5, 3), Color::White, PieceKind::Pawn),
            (Position::new(5, 4), Color::Black, PieceKind::Pawn),
            (Position::new(4, 4), Color::White, PieceKind::Pawn),
        ]);
        board.set_en_passant_target(Some(Position::new(6, 4)));
        let capture = Move::new(Position::new(5, 5), Position::new(6, 4), None);
        assert!(possible_moves(&board, Position::new(5, 5)).contains(&capture));
        assert!(
            possible_moves(&board, Position::new(5, 3))
                .contains(&Move::new(Position::new(5, 3), Position::new(6, 4), None))
        );
        // a pawn on the wrong rank never captures en passant
        assert!(
            possible_moves(&board, Position::new(4, 4))
                .iter()
                .all(|movement| movement.end != Position::new(6, 4))
        );
        board.set_en_passant_target(None);
        assert!(!possible_moves(&board, Position::new(5, 5)).contains(&capture));
    }
    #[test]
    fn destinations_are_in_bounds_and_never_friendly() {
        let board = Board::starting_position();
        for (position, piece) in board.pieces() {
            for movement in possible_moves(&board, position) {
                assert!(movement.end.in_bounds());
                assert!(board[movement.end].is_none_or(|other| other.color != piece.color));
            }
        }
    }
    #[test]
    fn pawn_attacks_diagonals_only() {
        let board = board_with(&[(Position::new(2, 6), Color::Black, PieceKind::Pawn)]);
        let attacked: FxHashSet<_> = attacks(&board, Position::new(2, 6)).collect();
        assert_eq!(
            attacked,
            [Position::new(1, 5), Position::new(1, 7)].into_iter().collect()
        );
    }
    #[test]
    fn en_passant_ignores_unusable_targets() {
        let mut board = board_with(&[
            (Position::new(5, 1), Color::White, PieceKind::Pawn),
            (Position::new(6, 2), Color::White, PieceKind::Knight),
        ]);
        board.set_en_passant_target(Some(Position::new(6, 0)));
        assert!(
            possible_moves(&board, Position::new(5, 1))
                .iter()
                .all(|movement| movement.end.in_bounds())
        );
        board.set_en_passant_target(Some(Position::new(6, 2)));
        assert!(
            !possible_moves(&board, Position::new(5, 1))
                .contains(&Move::new(Position::new(5, 1), Position::new(6, 2), None))
        );
    }
    #[test]
    fn empty_square_has_no_moves() {
        let board = Board::starting_position();
        assert!(possible_moves(&board, Position::new(4, 4)).is_empty());
        assert!(possible_moves(&board, Position::new(9, 4)).is_empty());
    }
}
