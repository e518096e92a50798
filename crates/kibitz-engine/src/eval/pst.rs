//! Piece-square tables (PST) for all six piece types.
//!
//! Tables are written from White's perspective in LERF order:
//! index 0 = A1, index 7 = H1, index 8 = A2, ..., index 63 = H8.
//! Entries are in tenths of a placement point; [`pst_value`] scales them to
//! centipawns and mirrors the square for Black.

use kibitz_core::{Color, Position, Role, Square};

/// Centipawns per table unit for every piece but the king.
const PIECE_WEIGHT: f64 = 0.3;

/// Centipawns per table unit for the king.
const KING_WEIGHT: f64 = 0.4;

/// Pawn PST. Rank 1 never holds a pawn; rank 8 is unreachable too.
#[rustfmt::skip]
const PAWN_PST: [i16; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     10,  10,  10,  10,  10,  10,  10,  10,
     13,  14,  10,  10,  10,  10,  14,  13,
     17,  16,  18,  20,  20,  12,  15,  17,
     20,  23,  25,  30,  30,  20,  20,  22,
     25,  27,  30,  35,  35,  28,  15,  27,
     35,  35,  40,  40,  40,  35,  35,  38,
    100, 100, 100, 100, 100, 100, 100, 100,
];

#[rustfmt::skip]
const KNIGHT_PST: [i16; 64] = [
     10,  20,  30,  30,  10,  10,  10,  10,
     20,  30,  40,  40,  40,  40,  30,  20,
     30,  40,  50,  50,  50,  50,  40,  30,
     40,  50,  60,  60,  60,  60,  50,  40,
     50,  60,  70,  70,  70,  70,  60,  50,
     60,  70,  80,  80,  80,  80,  70,  60,
     50,  60,  70,  70,  70,  70,  60,  50,
     30,  40,  50,  50,  50,  50,  40,  30,
];

#[rustfmt::skip]
const BISHOP_PST: [i16; 64] = [
     40,  30,  20,  10,  10,  10,  10,  10,
     30,  60,  40,  30,  30,  40,  60,  30,
     20,  40,  50,  40,  40,  50,  40,  20,
     10,  40,  40,  30,  30,  40,  40,  10,
     30,  50,  40,  40,  40,  40,  50,  30,
     10,  30,  20,  20,  20,  20,  30,  10,
     10,  20,  20,  20,  20,  20,  20,  10,
     10,  10,  10,  10,  10,  10,  10,  10,
];

/// Rook PST. The first two ranks score highest.
#[rustfmt::skip]
const ROOK_PST: [i16; 64] = [
     70,  80, 100, 100, 100, 100,  80,  70,
     60,  70,  90,  90,  90,  90,  70,  60,
     10,  20,  30,  30,  30,  30,  20,  10,
     10,  20,  30,  30,  30,  30,  20,  10,
     10,  20,  30,  30,  30,  30,  20,  10,
     30,  40,  50,  50,  50,  50,  40,  40,
     40,  40,  40,  40,  40,  40,  40,  40,
     50,  50,  50,  50,  50,  50,  50,  50,
];

#[rustfmt::skip]
const QUEEN_PST: [i16; 64] = [
     10,  20,  30,  40,  40,  50,  20,  10,
     20,  20,  30,  50,  50,  30,  20,  20,
     20,  30,  50,  60,  60,  50,  30,  20,
     50,  60,  80,  80,  80,  80,  60,  50,
     60,  70,  90,  90,  90,  90,  70,  60,
     60,  80, 100, 100, 100, 100,  80,  60,
     40,  50,  70,  70,  70,  70,  40,  50,
     40,  50,  70,  70,  70,  70,  40,  50,
];

/// King PST. Rewards staying castled behind the pawns.
#[rustfmt::skip]
const KING_PST: [i16; 64] = [
     40,  70,  70,  50,  10,  60, 100,  90,
     30,  40,  10,  10,  10,  10,  40,  90,
     10,  10,  10,  10,  10,  10,  10,  10,
     10,  10,  10,  10,  10,  10,  10,  10,
     10,  10,  10,  10,  10,  10,  10,  10,
     10,  10,  10,  10,  10,  10,  10,  10,
     10,  10,  10,  10,  10,  10,  10,  10,
     10,  10,  10,  10,  10,  10,  10,  10,
];

const fn table(role: Role) -> &'static [i16; 64] {
    match role {
        Role::Pawn => &PAWN_PST,
        Role::Knight => &KNIGHT_PST,
        Role::Bishop => &BISHOP_PST,
        Role::Rook => &ROOK_PST,
        Role::Queen => &QUEEN_PST,
        Role::King => &KING_PST,
    }
}

/// Placement bonus in centipawns for a piece of `color` on `sq`.
///
/// Always non-negative; the caller applies the side's sign.
pub fn pst_value(role: Role, color: Color, sq: Square) -> f64 {
    let idx = match color {
        Color::White => usize::from(sq),
        Color::Black => usize::from(sq.flip_vertical()),
    };
    let weight = match role {
        Role::King => KING_WEIGHT,
        _ => PIECE_WEIGHT,
    };
    f64::from(table(role)[idx]) * weight
}

/// Sum of placement bonuses from White's perspective.
pub fn placement<P: Position>(position: &P) -> f64 {
    Square::ALL
        .into_iter()
        .filter_map(|sq| position.piece_at(sq).map(|piece| (sq, piece)))
        .map(|(sq, piece)| {
            let value = pst_value(piece.role, piece.color, sq);
            match piece.color {
                Color::White => value,
                Color::Black => -value,
            }
        })
        .sum()
}
