//! Time management: convert clock parameters to a search budget.
//!
//! The search only checks the clock between deepening passes, so the budget
//! decides whether another pass starts, not when a running one ends.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use kibitz_core::Color;

use crate::search::control::SearchControl;

/// Reserved per move for I/O latency.
const OVERHEAD_MS: f64 = 10.0;

/// Assumed moves left when the GUI does not say.
const DEFAULT_MOVES_TO_GO: f64 = 30.0;

/// Never budget more than this share of the remaining clock.
const MAX_SHARE: f64 = 0.2;

/// Compute the budget for one move from remaining time and increment.
///
/// `usable / moves_to_go + 3/4 of the increment`, capped at a fifth of the
/// usable time so one deep pass cannot flag the clock.
pub fn compute_budget(remaining: Duration, increment: Duration, moves_to_go: Option<u32>) -> Duration {
    let remaining_ms = remaining.as_millis() as f64;

    if remaining_ms < OVERHEAD_MS {
        return Duration::from_millis(1);
    }

    let usable = (remaining_ms - OVERHEAD_MS).max(1.0);
    let inc_ms = increment.as_millis() as f64;
    let mtg = moves_to_go.map_or(DEFAULT_MOVES_TO_GO, |x| f64::from(x.max(1)));

    let budget = (usable / mtg + inc_ms * 0.75)
        .min(usable * MAX_SHARE)
        .max(1.0);

    Duration::from_millis(budget as u64)
}

/// Build a [`SearchControl`] from UCI `go` parameters and the side to move.
///
/// Priority order:
/// 1. `infinite` -> no budget
/// 2. `movetime` -> that budget
/// 3. `wtime/btime` -> [`compute_budget`] for the side to move
/// 4. depth-only or bare `go` -> no budget
#[allow(clippy::too_many_arguments)]
pub fn limits_from_go(
    wtime: Option<Duration>,
    btime: Option<Duration>,
    winc: Option<Duration>,
    binc: Option<Duration>,
    movestogo: Option<u32>,
    movetime: Option<Duration>,
    infinite: bool,
    side: Color,
    stopped: Arc<AtomicBool>,
) -> SearchControl {
    if infinite {
        return SearchControl::new_infinite(stopped);
    }

    if let Some(mt) = movetime {
        return SearchControl::new_timed(stopped, mt);
    }

    let (remaining, increment) = match side {
        Color::White => (wtime, winc),
        Color::Black => (btime, binc),
    };

    if let Some(rem) = remaining {
        let budget = compute_budget(rem, increment.unwrap_or(Duration::ZERO), movestogo);
        return SearchControl::new_timed(stopped, budget);
    }

    SearchControl::new_infinite(stopped)
}
