//! Small helpers shared by the per-piece generators.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::{Move, MoveFlag};

#[inline]
pub fn enemy_piece_on(position: &Position, square: Square) -> Option<PieceKind> {
    position.piece_kind_at(position.side_to_move.opposite(), square)
}

/// Emit one `Normal` move per set bit of `targets`.
#[inline]
pub fn push_targets(out: &mut Vec<Move>, from: Square, mut targets: u64) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        out.push(Move::new(from, to, MoveFlag::Normal));
        targets &= targets - 1;
    }
}

/// Whether `mv` takes a piece. Must be asked before the move is applied.
#[inline]
pub fn is_capture(position: &Position, mv: Move) -> bool {
    match mv.flag() {
        MoveFlag::EnPassantCapture => true,
        MoveFlag::Castle => false,
        _ => enemy_piece_on(position, mv.destination()).is_some(),
    }
}

/// Captures and promotions; the moves quiescence search keeps.
#[inline]
pub fn is_tactical(position: &Position, mv: Move) -> bool {
    mv.is_promotion() || is_capture(position, mv)
}
