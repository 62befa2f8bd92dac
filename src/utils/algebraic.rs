//! Coordinate text (`a1`..`h8`) to and from square indices, a1 = 0, h8 = 63.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Parse a two-character coordinate such as `e4`.
pub fn algebraic_to_square(text: &str) -> ChessResult<Square> {
    match text.as_bytes() {
        &[file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok((rank - b'1') * 8 + (file - b'a')),
        _ => Err(ChessError::malformed(format!("invalid square: {text:?}"))),
    }
}

pub fn square_to_algebraic(square: Square) -> ChessResult<String> {
    if square > 63 {
        return Err(ChessError::InvalidSquare(square));
    }
    let file = char::from(b'a' + square % 8);
    let rank = char::from(b'1' + square / 8);
    Ok(format!("{file}{rank}"))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};
    use crate::errors::ChessError;

    #[test]
    fn corners_and_center() {
        for (text, square) in [("a1", 0), ("h1", 7), ("e4", 28), ("a8", 56), ("h8", 63)] {
            assert_eq!(algebraic_to_square(text), Ok(square));
            assert_eq!(square_to_algebraic(square).as_deref(), Ok(text));
        }
    }

    #[test]
    fn rejects_bad_coordinates() {
        for text in ["i1", "a9", "e", "E4", "e44", ""] {
            assert!(algebraic_to_square(text).is_err(), "{text}");
        }
        assert_eq!(square_to_algebraic(64), Err(ChessError::InvalidSquare(64)));
    }
}
