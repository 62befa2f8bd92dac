//! King steps and castling.
//!
//! Castling is emitted only when the right is held, the king and rook stand on
//! their home squares, every square between them is empty and no square the
//! king stands on, crosses or lands on is attacked.

use crate::game_state::chess_rules::{castle_rules_for, CastleRule};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::{Move, MoveFlag};

pub fn generate_king_moves(position: &Position, table: &AttackTable, out: &mut Vec<Move>) {
    let side = position.side_to_move;
    let own_occ = position.occupancy_by_color[side.index()];
    let Some(from) = position.king_square(side) else {
        return;
    };

    push_targets(out, from, table.king(from) & !own_occ);
    generate_castling_moves(position, table, out);
}

fn generate_castling_moves(position: &Position, table: &AttackTable, out: &mut Vec<Move>) {
    let side = position.side_to_move;
    for rule in castle_rules_for(side) {
        if can_castle(position, table, side, rule) {
            out.push(Move::new(rule.king_from, rule.king_to, MoveFlag::Castle));
        }
    }
}

fn can_castle(position: &Position, table: &AttackTable, side: Color, rule: &CastleRule) -> bool {
    if position.castling_rights & rule.right == 0 {
        return false;
    }
    if position.pieces_of(side, PieceKind::King) & square_mask(rule.king_from) == 0 {
        return false;
    }
    if position.pieces_of(side, PieceKind::Rook) & square_mask(rule.rook_from) == 0 {
        return false;
    }
    if position.occupancy_all() & rule.between != 0 {
        return false;
    }

    let enemy = side.opposite();
    rule.king_path
        .iter()
        .all(|&sq| !is_square_attacked(position, table, sq, enemy))
}
