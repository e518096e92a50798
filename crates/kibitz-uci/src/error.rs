//! UCI protocol errors.

use kibitz_core::PositionError;

/// Errors raised while reading or parsing UCI input.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// `position` without `startpos` or `fen`.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    #[error("invalid FEN {fen}: {source}")]
    InvalidFen {
        fen: String,
        #[source]
        source: PositionError,
    },

    /// A move in `position ... moves` that does not parse or is not legal.
    #[error("invalid move {uci_move}: {source}")]
    InvalidMove {
        uci_move: String,
        #[source]
        source: PositionError,
    },

    /// A `go` parameter was given without its value.
    #[error("missing value for go parameter: {param}")]
    MissingGoValue { param: String },

    #[error("invalid value for go parameter {param}: {value}")]
    InvalidGoValue { param: String, value: String },

    /// `setoption` for an unknown option or with an out-of-range value.
    #[error("invalid option: {detail}")]
    InvalidOption { detail: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
