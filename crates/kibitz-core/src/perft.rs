//! Perft (performance test) for move generation correctness verification.

use crate::error::PositionError;
use crate::position::Position;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves without pushing them.
pub fn perft<P: Position>(position: &mut P, depth: usize) -> Result<u64, PositionError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = position.legal_moves();

    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in moves {
        let mut child = position.push_scoped(mv)?;
        nodes += perft(&mut *child, depth - 1)?;
    }
    Ok(nodes)
}

/// Run perft with a per-move breakdown.
///
/// Returns `(uci_move, node_count)` pairs sorted alphabetically.
pub fn divide<P: Position>(
    position: &mut P,
    depth: usize,
) -> Result<Vec<(String, u64)>, PositionError> {
    let mut results = Vec::new();
    for mv in position.legal_moves() {
        let mut child = position.push_scoped(mv)?;
        let count = if depth <= 1 {
            1
        } else {
            perft(&mut *child, depth - 1)?
        };
        results.push((mv.to_uci(), count));
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_position::ChessPosition;
    use crate::fen::STARTING_FEN;

    fn pos(fen: &str) -> ChessPosition {
        fen.parse().unwrap()
    }

    #[test]
    fn perft_depth_zero_is_one() {
        let mut p = ChessPosition::starting_position();
        assert_eq!(perft(&mut p, 0).unwrap(), 1);
    }

    #[test]
    fn divide_startpos_depth_2() {
        let mut p = ChessPosition::starting_position();
        let results = divide(&mut p, 2).unwrap();
        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|(_, count)| *count == 20));
        assert_eq!(results[0].0, "a2a3");
        assert_eq!(p.fen(), STARTING_FEN);
    }

    #[test]
    fn perft_leaves_position_unchanged() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut p = pos(fen);
        perft(&mut p, 2).unwrap();
        assert_eq!(p.fen(), fen);
    }

    // Position 3: rook and pawn endgame with en passant pins.

    #[test]
    fn perft_position3() {
        let mut p = pos("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
        assert_eq!(perft(&mut p, 1).unwrap(), 14);
        assert_eq!(perft(&mut p, 2).unwrap(), 191);
        assert_eq!(perft(&mut p, 3).unwrap(), 2_812);
    }

    // Position 4: promotions and castling under fire.

    #[test]
    fn perft_position4() {
        let mut p = pos("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
        assert_eq!(perft(&mut p, 1).unwrap(), 6);
        assert_eq!(perft(&mut p, 2).unwrap(), 264);
        assert_eq!(perft(&mut p, 3).unwrap(), 9_467);
    }

    // Position 5

    #[test]
    fn perft_position5() {
        let mut p = pos("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
        assert_eq!(perft(&mut p, 1).unwrap(), 44);
        assert_eq!(perft(&mut p, 2).unwrap(), 1_486);
        assert_eq!(perft(&mut p, 3).unwrap(), 62_379);
    }
}
