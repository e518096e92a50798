//! Search errors.

use kibitz_core::{Outcome, PositionError};

/// Faults that abort a search.
///
/// A position with no legal move is not an error: the search reports it as
/// an empty result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A terminal outcome that is neither a checkmate nor a recognised draw.
    #[error("unrecognized terminal outcome: {outcome}")]
    UnrecognizedOutcome {
        /// The outcome the position reported.
        outcome: Outcome,
    },

    /// The position refused a move the search generated from it.
    #[error(transparent)]
    Position(#[from] PositionError),
}
