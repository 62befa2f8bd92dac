//! Bishop, rook and queen move generation.
//!
//! Each slider walks its rays against the combined occupancy; the first
//! blocker ends the ray and is kept only when it belongs to the enemy.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::Move;
use crate::moves::ray_moves::Direction;

const SLIDERS: [(PieceKind, &[Direction]); 3] = [
    (PieceKind::Bishop, &Direction::DIAGONAL),
    (PieceKind::Rook, &Direction::ORTHOGONAL),
    (PieceKind::Queen, &Direction::ALL),
];

pub fn generate_slider_moves(position: &Position, table: &AttackTable, out: &mut Vec<Move>) {
    let side = position.side_to_move;
    let own_occ = position.occupancy_by_color[side.index()];
    let occupancy = position.occupancy_all();

    for (kind, directions) in SLIDERS {
        let mut sliders = position.pieces_of(side, kind);
        while sliders != 0 {
            let from = sliders.trailing_zeros() as Square;
            let attacks = table.slider_attacks(from, occupancy, directions) & !own_occ;
            push_targets(out, from, attacks);
            sliders &= sliders - 1;
        }
    }
}
