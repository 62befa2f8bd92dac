//! Packed move value.
//!
//! A move is an opaque 16-bit value: origin in bits 0-5, destination in bits
//! 6-11 and the flag in bits 12-14. Only this module knows the layout; every
//! other module goes through `Move::new` and the accessors.

use std::fmt;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

const ORIGIN_SHIFT: u16 = 0;
const DESTINATION_SHIFT: u16 = 6;
const FLAG_SHIFT: u16 = 12;

const SQUARE_MASK: u16 = 0x3F;
const FLAG_MASK: u16 = 0x7;

/// What kind of move this is, beyond its two squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Normal,
    /// Pawn captures en passant; the captured pawn is not on the destination.
    EnPassantCapture,
    /// Pawn double push; makes an en-passant capture available next ply.
    DoublePawnPush,
    PromoteQueen,
    PromoteRook,
    PromoteBishop,
    PromoteKnight,
    Castle,
}

impl MoveFlag {
    pub const ALL: [MoveFlag; 8] = [
        MoveFlag::Normal,
        MoveFlag::EnPassantCapture,
        MoveFlag::DoublePawnPush,
        MoveFlag::PromoteQueen,
        MoveFlag::PromoteRook,
        MoveFlag::PromoteBishop,
        MoveFlag::PromoteKnight,
        MoveFlag::Castle,
    ];

    pub const PROMOTIONS: [MoveFlag; 4] = [
        MoveFlag::PromoteQueen,
        MoveFlag::PromoteRook,
        MoveFlag::PromoteBishop,
        MoveFlag::PromoteKnight,
    ];

    #[inline]
    const fn code(self) -> u16 {
        match self {
            MoveFlag::Normal => 0,
            MoveFlag::EnPassantCapture => 1,
            MoveFlag::DoublePawnPush => 2,
            MoveFlag::PromoteQueen => 3,
            MoveFlag::PromoteRook => 4,
            MoveFlag::PromoteBishop => 5,
            MoveFlag::PromoteKnight => 6,
            MoveFlag::Castle => 7,
        }
    }

    #[inline]
    const fn from_code(code: u16) -> MoveFlag {
        match code & FLAG_MASK {
            1 => MoveFlag::EnPassantCapture,
            2 => MoveFlag::DoublePawnPush,
            3 => MoveFlag::PromoteQueen,
            4 => MoveFlag::PromoteRook,
            5 => MoveFlag::PromoteBishop,
            6 => MoveFlag::PromoteKnight,
            7 => MoveFlag::Castle,
            _ => MoveFlag::Normal,
        }
    }

    /// Piece a pawn turns into, for the four promotion flags.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromoteQueen => Some(PieceKind::Queen),
            MoveFlag::PromoteRook => Some(PieceKind::Rook),
            MoveFlag::PromoteBishop => Some(PieceKind::Bishop),
            MoveFlag::PromoteKnight => Some(PieceKind::Knight),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Pack a move. Squares are masked to six bits; use `try_new` for
    /// unvalidated input.
    #[inline]
    pub const fn new(origin: Square, destination: Square, flag: MoveFlag) -> Self {
        Move(
            ((origin as u16 & SQUARE_MASK) << ORIGIN_SHIFT)
                | ((destination as u16 & SQUARE_MASK) << DESTINATION_SHIFT)
                | (flag.code() << FLAG_SHIFT),
        )
    }

    pub fn try_new(origin: Square, destination: Square, flag: MoveFlag) -> ChessResult<Self> {
        if origin > 63 {
            return Err(ChessError::InvalidSquare(origin));
        }
        if destination > 63 {
            return Err(ChessError::InvalidSquare(destination));
        }
        Ok(Self::new(origin, destination, flag))
    }

    #[inline]
    pub const fn origin(self) -> Square {
        ((self.0 >> ORIGIN_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn destination(self) -> Square {
        ((self.0 >> DESTINATION_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_code(self.0 >> FLAG_SHIFT)
    }

    #[inline]
    pub const fn decompose(self) -> (Square, Square, MoveFlag) {
        (self.origin(), self.destination(), self.flag())
    }

    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        self.flag().promotion_piece()
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}, {:?})", self.flag())
    }
}

/// Long algebraic text, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from = square_to_algebraic(self.origin()).map_err(|_| fmt::Error)?;
        let to = square_to_algebraic(self.destination()).map_err(|_| fmt::Error)?;
        write!(f, "{from}{to}")?;
        match self.promotion_piece() {
            Some(PieceKind::Queen) => write!(f, "q"),
            Some(PieceKind::Rook) => write!(f, "r"),
            Some(PieceKind::Bishop) => write!(f, "b"),
            Some(PieceKind::Knight) => write!(f, "n"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, MoveFlag};
    use crate::errors::ChessError;

    #[test]
    fn every_field_combination_decodes_exactly() {
        for origin in 0..64u8 {
            for destination in 0..64u8 {
                for flag in MoveFlag::ALL {
                    let mv = Move::new(origin, destination, flag);
                    assert_eq!(mv.decompose(), (origin, destination, flag));
                }
            }
        }
    }

    #[test]
    fn try_new_rejects_off_board_squares() {
        assert_eq!(
            Move::try_new(64, 0, MoveFlag::Normal),
            Err(ChessError::InvalidSquare(64))
        );
        assert_eq!(
            Move::try_new(0, 70, MoveFlag::Normal),
            Err(ChessError::InvalidSquare(70))
        );
    }

    #[test]
    fn display_uses_long_algebraic() {
        assert_eq!(Move::new(12, 28, MoveFlag::DoublePawnPush).to_string(), "e2e4");
        assert_eq!(Move::new(52, 60, MoveFlag::PromoteKnight).to_string(), "e7e8n");
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(
            Move::new(4, 6, MoveFlag::Castle),
            Move::new(4, 6, MoveFlag::Castle)
        );
        assert_ne!(Move::new(4, 6, MoveFlag::Castle), Move::new(4, 6, MoveFlag::Normal));
    }
}
