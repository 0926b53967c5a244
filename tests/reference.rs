//! Plays random games and checks every legal move set and terminal status
//! against the `chess` crate.

use std::fmt::Write;

use chess_rules::{
    CastlingSide, Color, Game, GameStatus, Move, PieceKind, Position,
    castling::KING_ORIGIN_COLUMN, piece::Piece,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

fn kind_from(value: chess::Piece) -> PieceKind {
    match value {
        chess::Piece::Pawn => PieceKind::Pawn,
        chess::Piece::Knight => PieceKind::Knight,
        chess::Piece::Bishop => PieceKind::Bishop,
        chess::Piece::Rook => PieceKind::Rook,
        chess::Piece::Queen => PieceKind::Queen,
        chess::Piece::King => PieceKind::King,
    }
}
fn position_from(value: chess::Square) -> Position {
    Position::new(
        i8::try_from(value.get_rank().to_index()).unwrap() + 1,
        i8::try_from(value.get_file().to_index()).unwrap() + 1,
    )
}
fn move_from(value: chess::ChessMove) -> Move {
    Move::new(
        position_from(value.get_source()),
        position_from(value.get_dest()),
        value.get_promotion().map(kind_from),
    )
}
fn castling_rights(game: &Game) -> String {
    let board = game.board();
    let flags = game.castling_flags();
    let mut rights = String::new();
    for color in Color::ALL {
        let king = Position::new(color.home_rank(), KING_ORIGIN_COLUMN);
        for side in CastlingSide::ALL {
            if flags.may_castle(color, side)
                && board[king] == Some(Piece::new(color, PieceKind::King))
                && board[side.rook_origin(color)] == Some(Piece::new(color, PieceKind::Rook))
            {
                let c = match side {
                    CastlingSide::Kingside => 'K',
                    CastlingSide::Queenside => 'Q',
                };
                rights.push(match color {
                    Color::White => c,
                    Color::Black => c.to_ascii_lowercase(),
                });
            }
        }
    }
    if rights.is_empty() {
        rights.push('-');
    }
    rights
}
fn fen(game: &Game) -> String {
    let board = game.board();
    let mut fen = String::new();
    for row in (1..=8).rev() {
        let mut empty = 0;
        for column in 1..=8 {
            match board[Position::new(row, column)] {
                Some(piece) => {
                    if empty > 0 {
                        write!(fen, "{empty}").unwrap();
                        empty = 0;
                    }
                    fen.push(piece.symbol());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            write!(fen, "{empty}").unwrap();
        }
        if row > 1 {
            fen.push('/');
        }
    }
    let en_passant = match board.en_passant_target() {
        Some(target) => target.to_string(),
        None => "-".to_owned(),
    };
    write!(
        fen,
        " {} {} {en_passant} 0 1",
        game.team_turn().lowercase(),
        castling_rights(game),
    )
    .unwrap();
    fen
}
fn play_random_game(seed: u64, max_plies: usize) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = Game::new();
    for _ in 0..max_plies {
        let turn = game.team_turn();
        let fen = fen(&game);
        let reference: chess::Board = fen.parse().unwrap();

        let moves = game.all_valid_moves(turn);
        let expected: FxHashSet<Move> = chess::MoveGen::new_legal(&reference)
            .map(move_from)
            .collect();
        if let Some(movement) = moves.difference(&expected).next() {
            panic!("found {movement} but it's not a legal move\n{fen}");
        }
        if let Some(movement) = expected.difference(&moves).next() {
            panic!("{movement} not found\n{fen}");
        }

        let in_check = reference.checkers().popcnt() > 0;
        assert_eq!(game.is_in_check(turn), in_check, "{fen}");
        let status = game.status(turn);
        match reference.status() {
            chess::BoardStatus::Checkmate => assert_eq!(status, GameStatus::Checkmate, "{fen}"),
            chess::BoardStatus::Stalemate => assert_eq!(status, GameStatus::Stalemate, "{fen}"),
            chess::BoardStatus::Ongoing => assert!(!status.is_over(), "{fen}"),
        }
        if status.is_over() {
            assert!(game.end_state().is_some());
            return;
        }

        let moves: Box<[_]> = moves.into_iter().collect();
        let movement = moves[rng.random_range(0..moves.len())];
        game.make_move(&movement).unwrap();
    }
}

#[test]
fn fen_of_starting_position() {
    assert_eq!(
        fen(&Game::new()),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}
#[test]
fn random_games_match_reference() {
    for seed in 0..16 {
        play_random_game(seed, 200);
    }
}
