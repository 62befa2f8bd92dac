//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.
//! Scores are centipawns from the perspective of the side to move.

use crate::game_state::chess_types::*;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, position: &Position) -> i32;
}

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

#[inline]
fn from_side_to_move(position: &Position, white_minus_black: i32) -> i32 {
    match position.side_to_move {
        Color::White => white_minus_black,
        Color::Black => -white_minus_black,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    fn material_balance_white_minus_black(position: &Position) -> i32 {
        PieceKind::ALL
            .into_iter()
            .map(|piece| {
                let white = position.pieces_of(Color::White, piece).count_ones() as i32;
                let black = position.pieces_of(Color::Black, piece).count_ones() as i32;
                (white - black) * piece_value(piece)
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position) -> i32 {
        from_side_to_move(position, Self::material_balance_white_minus_black(position))
    }
}

// Bonus tables are written from White's point of view with rank 8 on the first
// row, so a white piece on `sq` reads entry `mirror(sq)` and a black piece
// reads `sq` directly.

#[rustfmt::skip]
const KNIGHT_BONUS: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  20,  20,  10,   0, -30,
    -30,  10,  20,  30,  30,  20,  10, -30,
    -30,   0,  20,  30,  30,  20,   0, -30,
    -30,  10,  10,  20,  20,  10,  10, -30,
    -40, -20,   0,  10,  10,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const PAWN_BONUS: [i32; 64] = [
     0,  0,   0,   0,   0,   0,  0,  0,
    50, 50,  50,  50,  50,  50, 50, 50,
    10, 10,  20,  30,  30,  20, 10, 10,
     5,  5,  10,  25,  25,  10,  5,  5,
     0,  0,   0,  20,  20,   0,  0,  0,
     5, -5, -10,   0,   0, -10, -5,  5,
     5, 10,  10, -20, -20,  10, 10,  5,
     0,  0,   0,   0,   0,   0,  0,  0,
];

#[rustfmt::skip]
const ROOK_BONUS: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const BISHOP_BONUS: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,  10,  20,  20,  10,   0, -10,
    -10,  10,  10,  20,  20,  10,  10, -10,
    -10,   0,  20,  20,  20,  20,   0, -10,
    -10,  20,  20,  20,  20,  20,  20, -10,
    -10,  10,   0,   0,   0,   0,  10, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const QUEEN_BONUS: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10,   0,   0,  0,  0,   0,   0, -10,
    -10,   0,   5,  5,  5,   5,   0, -10,
     -5,   0,   5,  5,  5,   5,   0,  -5,
      0,   0,   5,  5,  5,   5,   0,  -5,
    -10,   5,   5,  5,  5,   5,   0, -10,
    -10,   0,   5,  0,  0,   0,   0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_BONUS: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

#[inline]
const fn mirror(square: Square) -> usize {
    ((7 - square / 8) * 8 + square % 8) as usize
}

#[inline]
const fn bonus_table(piece: PieceKind) -> &'static [i32; 64] {
    match piece {
        PieceKind::Pawn => &PAWN_BONUS,
        PieceKind::Knight => &KNIGHT_BONUS,
        PieceKind::Bishop => &BISHOP_BONUS,
        PieceKind::Rook => &ROOK_BONUS,
        PieceKind::Queen => &QUEEN_BONUS,
        PieceKind::King => &KING_BONUS,
    }
}

/// Material plus a per-piece square bonus.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl PieceSquareScorer {
    #[inline]
    pub fn square_bonus(color: Color, piece: PieceKind, square: Square) -> i32 {
        let index = match color {
            Color::White => mirror(square),
            Color::Black => square as usize,
        };
        bonus_table(piece)[index]
    }

    fn side_total(position: &Position, color: Color) -> i32 {
        let mut total = 0i32;
        for piece in PieceKind::ALL {
            let mut bb = position.pieces_of(color, piece);
            while bb != 0 {
                let sq = bb.trailing_zeros() as Square;
                total += piece_value(piece) + Self::square_bonus(color, piece, sq);
                bb &= bb - 1;
            }
        }
        total
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, position: &Position) -> i32 {
        let white_minus_black =
            Self::side_total(position, Color::White) - Self::side_total(position, Color::Black);
        from_side_to_move(position, white_minus_black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        let game = Position::new_game();
        assert_eq!(MaterialScorer.score(&game), 0);
        assert_eq!(PieceSquareScorer.score(&game), 0);
    }

    #[test]
    fn material_is_reported_for_the_side_to_move() {
        let white = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        let black = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").expect("FEN should parse");
        assert_eq!(MaterialScorer.score(&white), 900);
        assert_eq!(MaterialScorer.score(&black), -900);
    }

    #[test]
    fn square_bonus_is_mirrored_between_colors() {
        // e2 for white and e7 for black are the same relative square.
        assert_eq!(
            PieceSquareScorer::square_bonus(Color::White, PieceKind::Pawn, 12),
            PieceSquareScorer::square_bonus(Color::Black, PieceKind::Pawn, 52)
        );
        assert_eq!(PieceSquareScorer::square_bonus(Color::White, PieceKind::Pawn, 12), -20);
        assert_eq!(PieceSquareScorer::square_bonus(Color::White, PieceKind::Pawn, 52), 50);
        assert_eq!(PieceSquareScorer::square_bonus(Color::White, PieceKind::King, 6), 30);
    }

    #[test]
    fn central_knight_beats_rim_knight() {
        let centre = Position::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let rim = Position::from_fen("4k3/8/8/8/N7/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(PieceSquareScorer.score(&centre) > PieceSquareScorer.score(&rim));
    }
}
