//! Error types for position setup and move application.

/// Errors raised while building a position or applying a move to it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The FEN text could not be parsed.
    #[error("invalid FEN \"{fen}\": {reason}")]
    InvalidFen {
        /// The offending FEN string.
        fen: String,
        /// Parser message.
        reason: String,
    },

    /// The FEN parsed but describes an impossible position.
    #[error("invalid position \"{fen}\": {reason}")]
    InvalidPosition {
        /// The offending FEN string.
        fen: String,
        /// Validation message.
        reason: String,
    },

    /// A move string is not well-formed UCI notation.
    #[error("invalid move notation: {uci_move}")]
    InvalidMove {
        /// The text that failed to parse.
        uci_move: String,
    },

    /// A well-formed move is not legal in the current position.
    #[error("illegal move {uci_move} in {fen}")]
    IllegalMove {
        /// The move in UCI notation.
        uci_move: String,
        /// The position it was applied to.
        fen: String,
    },
}

#[cfg(test)]
mod tests {
    use super::PositionError;

    #[test]
    fn invalid_move_display() {
        let err = PositionError::InvalidMove {
            uci_move: "e9e4".to_string(),
        };
        assert_eq!(format!("{err}"), "invalid move notation: e9e4");
    }

    #[test]
    fn illegal_move_display_names_position() {
        let err = PositionError::IllegalMove {
            uci_move: "e2e5".to_string(),
            fen: "8/8/8/8/8/8/8/8 w - - 0 1".to_string(),
        };
        let text = format!("{err}");
        assert!(text.starts_with("illegal move e2e5"));
        assert!(text.ends_with("w - - 0 1"));
    }
}
