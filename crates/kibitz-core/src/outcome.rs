//! Game outcomes reported by a position.

use std::fmt;

use shakmaty::Color;

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    /// The result in which `color` wins.
    pub const fn win_for(color: Color) -> GameResult {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    /// A hundred half-moves without a capture or pawn move.
    FiftyMoves,
    /// Ended by a rule outside standard chess.
    VariantEnd,
}

impl Termination {
    /// Whether this termination ends the game in a draw under standard rules.
    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            Termination::Stalemate | Termination::InsufficientMaterial | Termination::FiftyMoves
        )
    }
}

/// A terminal game state: who won and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outcome {
    pub result: GameResult,
    pub termination: Termination,
}

impl Outcome {
    /// Checkmate delivered against `loser`.
    pub fn checkmate(loser: Color) -> Outcome {
        Outcome {
            result: GameResult::win_for(!loser),
            termination: Termination::Checkmate,
        }
    }

    /// A drawn game ended by `termination`.
    pub const fn draw(termination: Termination) -> Outcome {
        Outcome {
            result: GameResult::Draw,
            termination,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self.result {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        };
        write!(f, "{result} ({:?})", self.termination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkmate_credits_the_other_side() {
        let outcome = Outcome::checkmate(Color::Black);
        assert_eq!(outcome.result, GameResult::WhiteWins);
        assert_eq!(outcome.termination, Termination::Checkmate);
    }

    #[test]
    fn draw_terminations() {
        assert!(Termination::Stalemate.is_draw());
        assert!(Termination::FiftyMoves.is_draw());
        assert!(Termination::InsufficientMaterial.is_draw());
        assert!(!Termination::Checkmate.is_draw());
        assert!(!Termination::VariantEnd.is_draw());
    }

    #[test]
    fn display() {
        let outcome = Outcome::draw(Termination::Stalemate);
        assert_eq!(outcome.to_string(), "1/2-1/2 (Stalemate)");
    }
}
