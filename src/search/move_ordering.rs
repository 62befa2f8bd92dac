//! Heuristic move ordering: hash move first, then captures by MVV-LVA, then
//! promotions, then quiet moves in generation order.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::moves::chess_move::{Move, MoveFlag};
use crate::search::board_scoring::piece_value;

const HASH_MOVE_SCORE: i32 = 1_000_000;
const CAPTURE_BASE: i32 = 100_000;
const PROMOTION_BASE: i32 = 90_000;

#[inline]
fn ordering_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::King => 1_000,
        other => piece_value(other),
    }
}

pub fn move_order_score(position: &Position, mv: Move, hash_move: Option<Move>) -> i32 {
    if Some(mv) == hash_move {
        return HASH_MOVE_SCORE;
    }

    let victim = match mv.flag() {
        MoveFlag::EnPassantCapture => Some(PieceKind::Pawn),
        MoveFlag::Castle => None,
        _ => enemy_piece_on(position, mv.destination()),
    };

    let mut score = 0;
    if let Some(victim) = victim {
        let attacker = position
            .piece_kind_at(position.side_to_move, mv.origin())
            .map_or(0, ordering_value);
        score += CAPTURE_BASE + ordering_value(victim) * 10 - attacker;
    }
    if let Some(promoted) = mv.promotion_piece() {
        score += PROMOTION_BASE + piece_value(promoted);
    }
    score
}

/// Stable sort, best candidates first.
pub fn order_moves(position: &Position, moves: &mut [Move], hash_move: Option<Move>) {
    moves.sort_by_cached_key(|&mv| -move_order_score(position, mv, hash_move));
}
