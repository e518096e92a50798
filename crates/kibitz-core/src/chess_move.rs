//! Chess move representation and the search-time hints attached to it.

use std::fmt;

use shakmaty::{Role, Square};

use crate::error::PositionError;

/// A move, identified only by its squares and optional promotion piece.
///
/// Castling is written king-from to king-to (`e1g1`), the way UCI spells it.
/// Check and capture facts are not part of a move's identity; they travel
/// separately as [`MoveHints`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Role>,
}

impl Move {
    /// Create a non-promoting move.
    pub const fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Create a pawn move that promotes to `role`.
    pub const fn new_promotion(from: Square, to: Square, role: Role) -> Move {
        Move {
            from,
            to,
            promotion: Some(role),
        }
    }

    /// Origin square.
    pub const fn from(self) -> Square {
        self.from
    }

    /// Destination square.
    pub const fn to(self) -> Square {
        self.to
    }

    /// Promotion piece, if any.
    pub const fn promotion(self) -> Option<Role> {
        self.promotion
    }

    /// Whether the move promotes a pawn.
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Parse UCI long algebraic notation (`e2e4`, `a7a8q`).
    ///
    /// Only the notation is checked here; legality is decided when the move
    /// is pushed onto a position.
    pub fn from_uci(s: &str) -> Result<Move, PositionError> {
        let invalid = || PositionError::InvalidMove {
            uci_move: s.to_string(),
        };

        if !s.is_ascii() || !(s.len() == 4 || s.len() == 5) {
            return Err(invalid());
        }

        let from: Square = s[0..2].parse().map_err(|_| invalid())?;
        let to: Square = s[2..4].parse().map_err(|_| invalid())?;

        let promotion = match s.as_bytes().get(4) {
            None => None,
            Some(b'n') => Some(Role::Knight),
            Some(b'b') => Some(Role::Bishop),
            Some(b'r') => Some(Role::Rook),
            Some(b'q') => Some(Role::Queen),
            Some(_) => return Err(invalid()),
        };

        Ok(Move {
            from,
            to,
            promotion,
        })
    }

    /// Format in UCI long algebraic notation.
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self})")
    }
}

/// Facts about a move in the position it was generated from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveHints {
    /// Playing the move puts the opponent in check.
    pub is_check: bool,
    /// The move removes an enemy piece (en passant included).
    pub is_capture: bool,
}

impl MoveHints {
    /// Whether the move checks or captures.
    pub const fn is_tactical(self) -> bool {
        self.is_check || self.is_capture
    }
}
