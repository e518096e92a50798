//! Material balance evaluation.
//!
//! All scores are returned from White's perspective (positive = White ahead).

use kibitz_core::{Color, Position, Role, Square};

/// Centipawn value of a piece.
///
/// | Piece  | cp  |
/// |--------|-----|
/// | Pawn   | 100 |
/// | Knight | 300 |
/// | Bishop | 300 |
/// | Rook   | 500 |
/// | Queen  | 900 |
/// | King   |   0 |
pub const fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 100,
        Role::Knight => 300,
        Role::Bishop => 300,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 0,
    }
}

/// Evaluate material balance from White's perspective.
pub fn material<P: Position>(position: &P) -> i32 {
    Square::ALL
        .into_iter()
        .filter_map(|sq| position.piece_at(sq))
        .map(|piece| match piece.color {
            Color::White => piece_value(piece.role),
            Color::Black => -piece_value(piece.role),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use kibitz_core::ChessPosition;

    use super::*;

    fn pos(fen: &str) -> ChessPosition {
        fen.parse().unwrap()
    }

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(material(&ChessPosition::starting_position()), 0);
    }

    #[test]
    fn extra_queen_for_white() {
        let p = pos("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
        assert_eq!(material(&p), 900);
    }

    #[test]
    fn black_up_a_rook_and_pawn() {
        let p = pos("r3k3/p7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(material(&p), -600);
    }

    #[test]
    fn kings_are_free() {
        assert_eq!(piece_value(Role::King), 0);
        assert_eq!(material(&pos("4k3/8/8/8/8/8/8/4K3 w - - 0 1")), 0);
    }
}
