use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::Move;

pub fn generate_knight_moves(position: &Position, table: &AttackTable, out: &mut Vec<Move>) {
    let side = position.side_to_move;
    let own_occ = position.occupancy_by_color[side.index()];

    let mut knights = position.pieces_of(side, PieceKind::Knight);
    while knights != 0 {
        let from = knights.trailing_zeros() as Square;
        push_targets(out, from, table.knight(from) & !own_occ);
        knights &= knights - 1;
    }
}
