//! Search control: stop flag and time budget.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Decides, between deepening passes, whether the search should go on.
///
/// The search never looks at this mid-pass, so a started depth always runs
/// to completion. Two modes:
/// - **Infinite**: only the external stop flag ends the search
/// - **Timed**: additionally stops once the soft budget is spent
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    soft_limit: Option<Duration>,
}

impl SearchControl {
    /// Control for `go infinite` and depth-limited searches.
    pub fn new_infinite(stopped: Arc<AtomicBool>) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            soft_limit: None,
        }
    }

    /// Control with a time budget; the clock starts immediately.
    pub fn new_timed(stopped: Arc<AtomicBool>, soft: Duration) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            soft_limit: Some(soft),
        }
    }

    /// Check whether iterative deepening should start another pass.
    ///
    /// Returns `true` once the stop flag is raised or the soft budget has
    /// run out.
    pub fn should_stop_iterating(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        self.soft_limit
            .is_some_and(|soft| self.elapsed() >= soft)
    }

    /// Elapsed time since the control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The soft budget, if any.
    pub fn soft_limit(&self) -> Option<Duration> {
        self.soft_limit
    }
}
