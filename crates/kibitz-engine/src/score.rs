//! Search score: a number plus an optional terminal tag.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Mul, Neg};

use kibitz_core::{GameResult, Outcome, Termination};

use crate::error::SearchError;

/// Magnitude of a mate found at the root. A mate `n` plies deep scores
/// `MATE_VALUE - n`.
pub const MATE_VALUE: f64 = 1_000_000.0;

/// Values are compared after rounding to a multiple of this.
const TOLERANCE: f64 = 1e-9;

/// How a scored line ended, if it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Checkmate,
    Draw,
}

/// Ordering bands. Mates dominate everything on their side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Band {
    Mated,
    Level,
    Mating,
}

/// A search score with a strict total order.
///
/// Checkmates sign their value by who is mated: a non-negative checkmate
/// is a win for the side the score belongs to and beats every plain number,
/// a negative one loses to every plain number. Among wins the larger value
/// is better; among losses the less negative one is. A draw compares as
/// exactly zero against plain numbers and equal to any other draw.
///
/// Numbers are rounded to a multiple of `1e-9` before comparing, so float
/// noise below that step does not split equal scores. Two values a hair
/// apart can still round to neighbouring steps.
///
/// `==` follows the order, so a draw equals a plain zero. Use
/// [`Score::same_as`] when the tag must match too.
///
/// Negation flips the number and keeps the tag and reverses the order,
/// which is what negamax needs when it hands a child's score to the parent.
#[derive(Clone, Copy)]
pub struct Score {
    value: f64,
    terminal: Option<Terminal>,
}

impl Score {
    /// Even position.
    pub const ZERO: Score = Score::new(0.0);

    /// A drawn position.
    pub const DRAW: Score = Score {
        value: 0.0,
        terminal: Some(Terminal::Draw),
    };

    /// Checkmate for the side this score belongs to, at unknown distance.
    pub const WIN: Score = Score {
        value: f64::INFINITY,
        terminal: Some(Terminal::Checkmate),
    };

    /// Checkmate against the side this score belongs to, at unknown distance.
    pub const LOSS: Score = Score {
        value: f64::NEG_INFINITY,
        terminal: Some(Terminal::Checkmate),
    };

    /// Lowest possible score; the initial alpha.
    pub const MIN: Score = Score::LOSS;

    /// Highest possible score; the initial beta.
    pub const MAX: Score = Score::WIN;

    /// A plain, non-terminal score.
    pub const fn new(value: f64) -> Score {
        Score {
            value,
            terminal: None,
        }
    }

    /// Score a finished game from White's point of view.
    pub fn from_outcome(outcome: Outcome) -> Result<Score, SearchError> {
        match (outcome.termination, outcome.result) {
            (Termination::Checkmate, GameResult::WhiteWins) => Ok(Score::WIN),
            (Termination::Checkmate, GameResult::BlackWins) => Ok(Score::LOSS),
            (termination, GameResult::Draw) if termination.is_draw() => Ok(Score::DRAW),
            _ => Err(SearchError::UnrecognizedOutcome { outcome }),
        }
    }

    pub const fn value(self) -> f64 {
        self.value
    }

    pub const fn terminal(self) -> Option<Terminal> {
        self.terminal
    }

    pub fn is_mate(self) -> bool {
        self.terminal == Some(Terminal::Checkmate)
    }

    pub fn is_draw(self) -> bool {
        self.terminal == Some(Terminal::Draw)
    }

    /// Equal in the order and carrying the same terminal tag.
    pub fn same_as(self, other: Score) -> bool {
        self == other && self.terminal == other.terminal
    }

    /// Pin an open-ended mate to the ply it was found at.
    ///
    /// Infinite checkmate values become `±(MATE_VALUE - ply)` so that shorter
    /// mates rank above longer ones. Every other score is returned as is.
    pub fn at_ply(self, ply: u32) -> Score {
        if self.is_mate() && self.value.is_infinite() {
            let magnitude = MATE_VALUE - f64::from(ply);
            Score {
                value: magnitude.copysign(self.value),
                terminal: self.terminal,
            }
        } else {
            self
        }
    }

    /// Plies until mate, if this is a distance-pinned checkmate.
    pub fn mate_plies(self) -> Option<u32> {
        if !self.is_mate() {
            return None;
        }
        if self.value.is_infinite() {
            return Some(0);
        }
        let plies = (MATE_VALUE - self.value.abs()).round();
        (plies >= 0.0).then_some(plies as u32)
    }

    fn band(self) -> Band {
        match self.terminal {
            Some(Terminal::Checkmate) if self.value < 0.0 => Band::Mated,
            Some(Terminal::Checkmate) => Band::Mating,
            _ => Band::Level,
        }
    }

    /// Value used for comparison inside the level band.
    fn level(self) -> f64 {
        match self.terminal {
            Some(Terminal::Draw) => 0.0,
            _ => self.value,
        }
    }
}

/// Round to the comparison step. Monotone, so the order stays transitive.
fn quantize(value: f64) -> f64 {
    (value / TOLERANCE).round()
}

fn compare_values(a: f64, b: f64) -> Ordering {
    let (a, b) = (quantize(a), quantize(b));
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        let band = self.band();
        match band.cmp(&other.band()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }

        match band {
            Band::Level => compare_values(self.level(), other.level()),
            Band::Mated | Band::Mating => compare_values(self.value, other.value),
        }
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        Score {
            value: -self.value,
            terminal: self.terminal,
        }
    }
}

/// Orient a White-relative score for the side to move (`sign` is +1 or -1).
impl Mul<Score> for i32 {
    type Output = Score;

    fn mul(self, score: Score) -> Score {
        Score {
            value: score.value * f64::from(self),
            terminal: score.terminal,
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Score::ZERO
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.terminal {
            Some(Terminal::Draw) => f.write_str("draw"),
            Some(Terminal::Checkmate) => {
                let sign = if self.value < 0.0 { "-" } else { "" };
                match self.mate_plies() {
                    Some(plies) if self.value.is_finite() => write!(f, "#{sign}{plies}"),
                    _ => write!(f, "#{sign}"),
                }
            }
            None => write!(f, "{:.2}", self.value),
        }
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({self})")
    }
}
