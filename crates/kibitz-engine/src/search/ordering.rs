//! Move ordering: principal variation, killers, then MVV-LVA, promotions and checks.
//!
//! Ordering only changes how much work the search does, never its result.

use kibitz_core::{Move, MoveHints, Position, Role};

/// Scores indexed by `[attacker][victim]` for victims pawn through queen.
///
/// Cheaper attackers sort first, then bigger victims.
const LVA_MVV: [[i64; 5]; 6] = [
    // attacker = Pawn
    [60, 61, 62, 63, 64],
    // attacker = Knight
    [50, 51, 52, 53, 54],
    // attacker = Bishop
    [40, 41, 42, 43, 44],
    // attacker = Rook
    [30, 31, 32, 33, 34],
    // attacker = Queen
    [20, 21, 22, 23, 24],
    // attacker = King
    [10, 11, 12, 13, 14],
];

const QUEEN_PROMOTION_OFFSET: i64 = 1 << 30;
const PAWN_CAPTURE_OFFSET: i64 = 1 << 29;
const CAPTURE_OFFSET: i64 = 1 << 28;
const CHECK_OFFSET: i64 = 1 << 27;
const PROMOTION_OFFSET: i64 = 1 << 26;

/// A legal move together with its hints, in search order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedMove {
    pub mv: Move,
    pub hints: MoveHints,
}

impl OrderedMove {
    /// No check, no capture, no promotion: the kind of move a killer may be.
    pub fn is_quiet(self) -> bool {
        !self.hints.is_tactical() && !self.mv.is_promotion()
    }
}

const fn role_index(role: Role) -> usize {
    match role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    }
}

const fn promotion_target(role: Role) -> i64 {
    match role {
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::Pawn | Role::King => 0,
    }
}

/// Attach check and capture facts to a legal move.
fn annotate<P: Position>(position: &P, mv: Move) -> OrderedMove {
    OrderedMove {
        mv,
        hints: MoveHints {
            is_check: position.gives_check(mv),
            is_capture: position.is_capture(mv),
        },
    }
}

/// Score a move for the unhinted band. Higher scores are searched first.
///
/// Score bands (summed when a move falls in several):
/// - Queen promotion: 2^30 + 4
/// - Pawn captures: 2^29 + LVA_MVV
/// - Other captures: 2^28 + LVA_MVV
/// - Checks: 2^27
/// - Under-promotions: 2^26 + 1..3
/// - Everything else: 0
pub fn score_move<P: Position>(position: &P, ordered: OrderedMove) -> i64 {
    let mv = ordered.mv;
    let mut score = 0;

    if ordered.hints.is_capture {
        let attacker = position.piece_at(mv.from()).map_or(Role::Pawn, |p| p.role);
        // En passant leaves the target square empty.
        let victim = position.piece_at(mv.to()).map_or(Role::Pawn, |p| p.role);
        let offset = if attacker == Role::Pawn {
            PAWN_CAPTURE_OFFSET
        } else {
            CAPTURE_OFFSET
        };
        let victim = role_index(victim).min(4);
        score += offset + LVA_MVV[role_index(attacker)][victim];
    }

    match mv.promotion() {
        Some(Role::Queen) => score += QUEEN_PROMOTION_OFFSET + promotion_target(Role::Queen),
        Some(role) => score += PROMOTION_OFFSET + promotion_target(role),
        None => {}
    }

    if ordered.hints.is_check {
        score += CHECK_OFFSET;
    }

    score
}

/// Order the legal moves of `position` for search.
///
/// The PV hint comes first, then the killers most recent first, then every
/// other move by [`score_move`]. Hints that are not legal here are dropped.
/// Equal scores keep generation order, so the result is deterministic.
pub fn order_moves<P: Position>(
    position: &P,
    pv_hint: Option<Move>,
    killers: [Option<Move>; 2],
) -> Vec<OrderedMove> {
    let legal = position.legal_moves();
    let mut ordered: Vec<OrderedMove> = Vec::with_capacity(legal.len());

    for hint in std::iter::once(pv_hint).chain(killers).flatten() {
        if legal.contains(&hint) && ordered.iter().all(|o| o.mv != hint) {
            ordered.push(annotate(position, hint));
        }
    }

    let mut rest: Vec<(i64, OrderedMove)> = legal
        .into_iter()
        .filter(|mv| ordered.iter().all(|o| o.mv != *mv))
        .map(|mv| {
            let annotated = annotate(position, mv);
            (score_move(position, annotated), annotated)
        })
        .collect();
    rest.sort_by(|a, b| b.0.cmp(&a.0));

    ordered.extend(rest.into_iter().map(|(_, annotated)| annotated));
    ordered
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use kibitz_core::ChessPosition;

    use super::*;

    fn pos(fen: &str) -> ChessPosition {
        fen.parse().unwrap()
    }

    fn mv(uci: &str) -> Move {
        Move::from_uci(uci).unwrap()
    }

    fn uci(ordered: &[OrderedMove]) -> Vec<String> {
        ordered.iter().map(|o| o.mv.to_uci()).collect()
    }

    #[test]
    fn quiet_moves_keep_generation_order() {
        let p = ChessPosition::starting_position();
        let ordered = order_moves(&p, None, [None, None]);
        let generated: Vec<Move> = p.legal_moves();
        let moves: Vec<Move> = ordered.iter().map(|o| o.mv).collect();
        assert_eq!(moves, generated);
    }

    #[test]
    fn pv_then_killers_lead() {
        let p = ChessPosition::starting_position();
        let ordered = order_moves(
            &p,
            Some(mv("g1f3")),
            [Some(mv("e2e4")), Some(mv("d2d4"))],
        );
        assert_eq!(&uci(&ordered)[..3], ["g1f3", "e2e4", "d2d4"]);
        assert_eq!(ordered.len(), 20);
    }

    #[test]
    fn stale_hints_are_skipped() {
        let p = ChessPosition::starting_position();
        let ordered = order_moves(
            &p,
            Some(mv("e2e5")),
            [Some(mv("e7e5")), Some(mv("b1c3"))],
        );
        assert_eq!(ordered[0].mv, mv("b1c3"));
        assert_eq!(ordered.len(), 20);
    }

    #[test]
    fn hints_are_not_duplicated() {
        let p = ChessPosition::starting_position();
        let ordered = order_moves(
            &p,
            Some(mv("g1f3")),
            [Some(mv("g1f3")), Some(mv("g1f3"))],
        );
        let unique: HashSet<Move> = ordered.iter().map(|o| o.mv).collect();
        assert_eq!(unique.len(), ordered.len());
        assert_eq!(ordered.len(), 20);
        assert_eq!(ordered[0].mv, mv("g1f3"));
    }

    #[test]
    fn captures_then_checks() {
        // exf5 and exd5 (pawn captures), Qxd5, then the checks Qh5+ and Qa4+.
        let p = pos("4k3/8/8/3n1r2/4P3/8/8/3QK3 w - - 0 1");
        let ordered = order_moves(&p, None, [None, None]);
        let names = uci(&ordered);
        assert_eq!(&names[..3], ["e4f5", "e4d5", "d1d5"]);
        let checks: HashSet<&str> = names[3..5].iter().map(String::as_str).collect();
        assert_eq!(checks, HashSet::from(["d1h5", "d1a4"]));
        assert!(ordered[3..5].iter().all(|o| o.hints.is_check));
        assert!(ordered[5..].iter().all(|o| o.is_quiet()));
    }

    #[test]
    fn promotions_rank_by_piece() {
        let p = pos("8/P6k/8/8/8/8/8/K7 w - - 0 1");
        let ordered = order_moves(&p, None, [None, None]);
        assert_eq!(&uci(&ordered)[..4], ["a7a8q", "a7a8r", "a7a8b", "a7a8n"]);
        assert!(!ordered[0].is_quiet());
    }

    #[test]
    fn en_passant_scores_as_pawn_capture() {
        let p = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let ordered = order_moves(&p, None, [None, None]);
        assert_eq!(ordered[0].mv, mv("e5d6"));
        assert!(ordered[0].hints.is_capture);
        assert_eq!(
            score_move(&p, ordered[0]),
            PAWN_CAPTURE_OFFSET + LVA_MVV[0][0]
        );
    }

    #[test]
    fn hints_match_position_facts() {
        let p = pos("4k3/8/8/3n1r2/4P3/8/8/3QK3 w - - 0 1");
        for o in order_moves(&p, Some(mv("d1h5")), [Some(mv("e4d5")), None]) {
            assert_eq!(o.hints.is_capture, p.is_capture(o.mv), "{}", o.mv);
            assert_eq!(o.hints.is_check, p.gives_check(o.mv), "{}", o.mv);
        }
    }
}
