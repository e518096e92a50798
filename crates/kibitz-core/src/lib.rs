//! Core chess types: moves, outcomes, and the position contract the search runs on.

mod chess_move;
mod chess_position;
mod error;
mod fen;
mod outcome;
pub mod perft;
mod position;

pub use chess_move::{Move, MoveHints};
pub use chess_position::ChessPosition;
pub use error::PositionError;
pub use fen::STARTING_FEN;
pub use outcome::{GameResult, Outcome, Termination};
pub use position::{MoveGuard, Position};

pub use shakmaty::{Color, File, Piece, Rank, Role, Square};
