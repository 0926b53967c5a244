//! Rules engine for standard two player chess: board representation, move
//! generation, legality filtering, castling, en passant, promotion, and
//! check, checkmate and stalemate detection.
//!
//! The engine does no I/O. A [`Game`] owns all state and is driven one move at
//! a time through [`Game::make_move`].

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    reason = "simple accessors and constructors throughout"
)]

pub mod board;
pub mod castling;
pub mod color;
pub mod end_state;
pub mod error;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;

pub use crate::{
    board::Board,
    castling::{CastlingFlags, CastlingSide},
    color::Color,
    end_state::{EndState, GameStatus},
    error::{GameOver, InvalidBoard, InvalidMove, MalformedPosition},
    game::{Game, GameSnapshot},
    moves::Move,
    piece::{Piece, PieceKind},
    position::Position,
};
