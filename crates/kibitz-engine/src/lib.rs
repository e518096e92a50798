//! Search and evaluation for kibitz.

pub mod error;
pub mod eval;
pub mod score;
pub mod search;
pub mod time;

pub use error::SearchError;
pub use eval::{Evaluator, PieceSquareEvaluator, Tier};
pub use score::{MATE_VALUE, Score};
pub use search::control::SearchControl;
pub use search::{Iteration, SearchConfig, SearchResult, SearchTree, Searcher};
pub use time::limits_from_go;
