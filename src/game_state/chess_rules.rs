//! Canonical chess-rule constants.
//!
//! Starting position, castling geometry and the squares whose vacancy or
//! capture revokes a castling right.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const WHITE_KING_START: Square = 4;
pub const BLACK_KING_START: Square = 60;

/// One castling option: the right that enables it and the squares involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleRule {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook; all must be empty.
    pub between: u64,
    /// Squares the king stands on, passes through, or lands on.
    pub king_path: [Square; 3],
}

pub const CASTLE_RULES: [CastleRule; 4] = [
    CastleRule {
        right: CASTLE_WHITE_KINGSIDE,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        rook_to: 5,
        between: (1 << 5) | (1 << 6),
        king_path: [4, 5, 6],
    },
    CastleRule {
        right: CASTLE_WHITE_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        rook_to: 3,
        between: (1 << 1) | (1 << 2) | (1 << 3),
        king_path: [4, 3, 2],
    },
    CastleRule {
        right: CASTLE_BLACK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        rook_to: 61,
        between: (1 << 61) | (1 << 62),
        king_path: [60, 61, 62],
    },
    CastleRule {
        right: CASTLE_BLACK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        rook_to: 59,
        between: (1 << 57) | (1 << 58) | (1 << 59),
        king_path: [60, 59, 58],
    },
];

#[inline]
pub fn castle_rules_for(color: Color) -> &'static [CastleRule] {
    match color {
        Color::White => &CASTLE_RULES[0..2],
        Color::Black => &CASTLE_RULES[2..4],
    }
}

/// Castle rule matching a king move's destination, if any.
#[inline]
pub fn castle_rule_by_king_destination(king_to: Square) -> Option<&'static CastleRule> {
    CASTLE_RULES.iter().find(|rule| rule.king_to == king_to)
}

/// Rights lost when a piece leaves or is captured on `square`.
#[inline]
pub const fn rights_revoked_by_square(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        4 => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        60 => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castle_rules_are_split_by_color() {
        assert!(castle_rules_for(Color::White).iter().all(|r| r.king_from == WHITE_KING_START));
        assert!(castle_rules_for(Color::Black).iter().all(|r| r.king_from == BLACK_KING_START));
    }

    #[test]
    fn king_and_rook_squares_revoke_rights() {
        assert_eq!(rights_revoked_by_square(7), CASTLE_WHITE_KINGSIDE);
        assert_eq!(
            rights_revoked_by_square(60),
            CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE
        );
        assert_eq!(rights_revoked_by_square(27), 0);
    }
}
