//! Static evaluation.
//!
//! Evaluators score a position from White's point of view. The search
//! multiplies by the side-to-move sign itself.

pub mod material;
pub mod pst;

use kibitz_core::Position;

use crate::error::SearchError;
use crate::score::Score;

/// How much work an evaluation may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Material only.
    Fast,
    /// Material plus piece placement.
    Complete,
}

/// Static evaluation used at leaves and terminal nodes.
pub trait Evaluator {
    /// Score `position` from White's perspective.
    ///
    /// Finished games are scored through [`Score::from_outcome`], so a
    /// checkmate or draw carries its tag.
    fn evaluate<P: Position>(&self, position: &P, tier: Tier) -> Result<Score, SearchError>;
}

/// Material and piece-square evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareEvaluator;

impl Evaluator for PieceSquareEvaluator {
    fn evaluate<P: Position>(&self, position: &P, tier: Tier) -> Result<Score, SearchError> {
        if let Some(outcome) = position.outcome() {
            return Score::from_outcome(outcome);
        }

        let mut total = f64::from(material::material(position));
        if tier == Tier::Complete {
            total += pst::placement(position);
        }
        Ok(Score::new(total))
    }
}
