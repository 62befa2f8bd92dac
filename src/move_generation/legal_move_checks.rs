//! Attack queries: is a square attacked, is a king in check.
//!
//! Every query works backwards from the target square: a square is attacked by
//! a knight if a knight sits on one of its knight squares, by a bishop or
//! queen if one sits at the end of a blocked diagonal ray, and so on.

use crate::game_state::chess_types::*;
use crate::moves::attack_table::AttackTable;

pub fn is_square_attacked(
    position: &Position,
    table: &AttackTable,
    square: Square,
    attacker_color: Color,
) -> bool {
    attackers_to_square(position, table, square, attacker_color) != 0
}

/// Bitboard of `attacker_color` pieces that attack `square`.
pub fn attackers_to_square(
    position: &Position,
    table: &AttackTable,
    square: Square,
    attacker_color: Color,
) -> u64 {
    let occupancy = position.occupancy_all();
    let them = &position.pieces[attacker_color.index()];

    // A pawn of `attacker_color` hits `square` iff a pawn of the other color
    // on `square` would hit the pawn.
    let pawns = table.pawn_attacks(attacker_color.opposite(), square) & them[PieceKind::Pawn.index()];
    let knights = table.knight(square) & them[PieceKind::Knight.index()];
    let kings = table.king(square) & them[PieceKind::King.index()];

    let queens = them[PieceKind::Queen.index()];
    let diagonal = table.bishop_attacks(square, occupancy) & (them[PieceKind::Bishop.index()] | queens);
    let orthogonal = table.rook_attacks(square, occupancy) & (them[PieceKind::Rook.index()] | queens);

    pawns | knights | kings | diagonal | orthogonal
}

#[inline]
pub fn is_king_in_check(position: &Position, table: &AttackTable, color: Color) -> bool {
    let Some(king_sq) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(position, table, king_sq, color.opposite())
}

/// Whether the side to move is in check.
#[inline]
pub fn is_in_check(position: &Position, table: &AttackTable) -> bool {
    is_king_in_check(position, table, position.side_to_move)
}
