//! Errors used throughout the chess engine core.
//!
//! `ChessError` is the single error type returned by parsing, move reversal
//! and diagnostic checks. Reaching a position with no legal move is not an
//! error: generation returns an empty list and search returns `None`.

use thiserror::Error;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// FEN, square or move text that could not be parsed.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// `unapply` was called with nothing left in the undo log.
    #[error("no applied move left to reverse")]
    EmptyHistory,

    /// The incrementally maintained hash no longer matches a full recompute.
    ///
    /// Indicates a make/unmake bug; surfaced by the diagnostic check only.
    #[error("hash mismatch: incremental {incremental:#018x}, absolute {absolute:#018x}")]
    ConsistencyViolation { incremental: u64, absolute: u64 },

    /// A square index outside `0..=63` was supplied to a move constructor.
    #[error("square index out of bounds: {0}")]
    InvalidSquare(u8),

    /// A move was applied from a square holding no piece.
    #[error("no piece on origin square {0}")]
    EmptyOrigin(u8),
}

impl ChessError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        ChessError::MalformedInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::ChessError;

    #[test]
    fn consistency_violation_message_shows_both_hashes() {
        let err = ChessError::ConsistencyViolation {
            incremental: 0x1,
            absolute: 0x2,
        };
        let text = err.to_string();
        assert!(text.contains("0x0000000000000001"));
        assert!(text.contains("0x0000000000000002"));
    }
}
