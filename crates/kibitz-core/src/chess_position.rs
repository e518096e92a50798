//! Standard chess position backed by shakmaty's move generator.

use std::fmt;
use std::str::FromStr;

use shakmaty::fen::Fen;
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, File, FromSetup, Piece, Position as _, Square,
};
use tracing::trace;

use crate::chess_move::Move;
use crate::error::PositionError;
use crate::outcome::{Outcome, Termination};
use crate::position::Position;

/// Half-moves without progress after which the game is drawn.
const FIFTY_MOVE_PLIES: u32 = 100;

/// A chess position with an undo stack.
///
/// Pushing a move stores the previous state, so popping is a restore rather
/// than an unmake.
#[derive(Clone)]
pub struct ChessPosition {
    current: Chess,
    history: Vec<(Chess, Move)>,
}

impl ChessPosition {
    /// The standard starting position.
    pub fn starting_position() -> Self {
        Self::from_chess(Chess::default())
    }

    fn from_chess(current: Chess) -> Self {
        Self {
            current,
            history: Vec::new(),
        }
    }

    /// Serialize the current position as FEN.
    pub fn fen(&self) -> String {
        Fen::from_setup(self.current.clone().into_setup(EnPassantMode::Legal)).to_string()
    }

    /// The colour-flipped twin of this position.
    ///
    /// The board is flipped vertically with piece colours swapped, and so are
    /// the side to move, castling rights and en passant square. Move counters
    /// are kept. The undo stack is not carried over.
    pub fn mirrored(&self) -> Result<Self, PositionError> {
        let mut setup = self.current.clone().into_setup(EnPassantMode::Legal);
        setup.mirror();
        let chess = Chess::from_setup(setup, CastlingMode::Standard).map_err(|e| {
            PositionError::InvalidPosition {
                fen: self.fen(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self::from_chess(chess))
    }

    /// Moves pushed since the position was set up, oldest first.
    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|(_, mv)| *mv)
    }

    /// Find the generator's move matching `mv`.
    fn find_legal(&self, mv: Move) -> Option<shakmaty::Move> {
        self.current
            .legal_moves()
            .into_iter()
            .find(|candidate| convert_move(candidate) == Some(mv))
    }
}

/// Translate a generator move into our representation.
///
/// Castling becomes king-from to king-to on the C or G file.
fn convert_move(mv: &shakmaty::Move) -> Option<Move> {
    match mv {
        shakmaty::Move::Castle { king, rook } => {
            let file = if rook.file() < king.file() {
                File::C
            } else {
                File::G
            };
            Some(Move::new(*king, Square::from_coords(file, king.rank())))
        }
        shakmaty::Move::Put { .. } => None,
        _ => {
            let from = mv.from()?;
            Some(match mv.promotion() {
                Some(role) => Move::new_promotion(from, mv.to(), role),
                None => Move::new(from, mv.to()),
            })
        }
    }
}

impl Position for ChessPosition {
    fn legal_moves(&self) -> Vec<Move> {
        self.current
            .legal_moves()
            .iter()
            .filter_map(convert_move)
            .collect()
    }

    fn push(&mut self, mv: Move) -> Result<(), PositionError> {
        let Some(legal) = self.find_legal(mv) else {
            return Err(PositionError::IllegalMove {
                uci_move: mv.to_uci(),
                fen: self.fen(),
            });
        };
        let previous = self.current.clone();
        self.current.play_unchecked(&legal);
        self.history.push((previous, mv));
        trace!(mv = %mv, depth = self.history.len(), "push");
        Ok(())
    }

    fn pop(&mut self) -> Option<Move> {
        let (previous, mv) = self.history.pop()?;
        self.current = previous;
        Some(mv)
    }

    fn is_capture(&self, mv: Move) -> bool {
        self.find_legal(mv).is_some_and(|legal| legal.is_capture())
    }

    fn gives_check(&self, mv: Move) -> bool {
        let Some(legal) = self.find_legal(mv) else {
            return false;
        };
        let mut after = self.current.clone();
        after.play_unchecked(&legal);
        after.is_check()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.current.board().piece_at(square)
    }

    fn outcome(&self) -> Option<Outcome> {
        if self.current.legal_moves().is_empty() {
            return Some(if self.current.is_check() {
                Outcome::checkmate(self.current.turn())
            } else {
                Outcome::draw(Termination::Stalemate)
            });
        }
        if self.current.is_insufficient_material() {
            return Some(Outcome::draw(Termination::InsufficientMaterial));
        }
        if self.current.halfmoves() >= FIFTY_MOVE_PLIES {
            return Some(Outcome::draw(Termination::FiftyMoves));
        }
        None
    }

    fn side_to_move(&self) -> Color {
        self.current.turn()
    }

    fn ply(&self) -> u32 {
        let full = self.current.fullmoves().get();
        (full - 1) * 2 + u32::from(self.current.turn() == Color::Black)
    }
}

impl FromStr for ChessPosition {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fen: Fen = s.parse().map_err(|e: shakmaty::fen::ParseFenError| {
            PositionError::InvalidFen {
                fen: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        let chess: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| PositionError::InvalidPosition {
                fen: s.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_chess(chess))
    }
}

impl Default for ChessPosition {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl fmt::Display for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}

impl fmt::Debug for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChessPosition({})", self.fen())
    }
}
