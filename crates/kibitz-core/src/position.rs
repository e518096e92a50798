//! The position contract the search is written against.

use std::ops::{Deref, DerefMut};

use shakmaty::{Color, Piece, Square};

use crate::chess_move::Move;
use crate::error::PositionError;
use crate::outcome::Outcome;

/// A mutable board that applies and retracts moves in stack order.
///
/// Every [`push`](Position::push) must be matched by exactly one
/// [`pop`](Position::pop). Search code goes through
/// [`push_scoped`](Position::push_scoped), whose guard performs the pop on
/// every exit path.
pub trait Position {
    /// Legal moves for the side to move, in generation order.
    fn legal_moves(&self) -> Vec<Move>;

    /// Apply a legal move.
    fn push(&mut self, mv: Move) -> Result<(), PositionError>;

    /// Retract the most recently pushed move, returning it.
    fn pop(&mut self) -> Option<Move>;

    /// Whether `mv` captures a piece (en passant included).
    fn is_capture(&self, mv: Move) -> bool;

    /// Whether playing `mv` gives check.
    fn gives_check(&self, mv: Move) -> bool;

    /// The piece standing on `square`.
    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// The game outcome if the position is terminal.
    fn outcome(&self) -> Option<Outcome>;

    /// Side whose turn it is.
    fn side_to_move(&self) -> Color;

    /// Half-moves played since the start of the game.
    fn ply(&self) -> u32;

    /// Apply `mv` and return a guard that retracts it when dropped.
    fn push_scoped(&mut self, mv: Move) -> Result<MoveGuard<'_, Self>, PositionError>
    where
        Self: Sized,
    {
        self.push(mv)?;
        Ok(MoveGuard { position: self })
    }
}

/// Scoped move: derefs to the position, pops the move on drop.
pub struct MoveGuard<'a, P: Position> {
    position: &'a mut P,
}

impl<P: Position> Deref for MoveGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.position
    }
}

impl<P: Position> DerefMut for MoveGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.position
    }
}

impl<P: Position> Drop for MoveGuard<'_, P> {
    fn drop(&mut self) {
        let _ = self.position.pop();
    }
}
