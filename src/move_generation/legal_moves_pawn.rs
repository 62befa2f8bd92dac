//! Pawn pseudo-legal move generation: pushes, double pushes, captures,
//! promotions and en passant.

use crate::game_state::chess_types::*;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::{Move, MoveFlag};

pub fn generate_pawn_moves(position: &Position, table: &AttackTable, out: &mut Vec<Move>) {
    let side = position.side_to_move;
    let occupancy = position.occupancy_all();
    let enemy_occ = position.occupancy_by_color[side.opposite().index()];
    let enemy_pawns = position.pieces_of(side.opposite(), PieceKind::Pawn);

    let mut pawns = position.pieces_of(side, PieceKind::Pawn);
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;

        let pushes = table.pawn_pushes(side, from);
        if pushes != 0 {
            // Nearest push square first; a blocked single push also blocks the double.
            let single = match side {
                Color::White => pushes.trailing_zeros(),
                Color::Black => 63 - pushes.leading_zeros(),
            } as Square;
            if occupancy & square_mask(single) == 0 {
                push_pawn_move(out, side, from, single);

                let double = pushes & !square_mask(single);
                if double != 0 && occupancy & double == 0 {
                    out.push(Move::new(
                        from,
                        double.trailing_zeros() as Square,
                        MoveFlag::DoublePawnPush,
                    ));
                }
            }
        }

        let attacks = table.pawn_attacks(side, from);
        let mut captures = attacks & enemy_occ;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            push_pawn_move(out, side, from, to);
            captures &= captures - 1;
        }

        if let Some(ep) = position.en_passant_square {
            let victim = en_passant_victim_square(side, ep);
            if ep / 8 == en_passant_target_rank(side)
                && attacks & square_mask(ep) != 0
                && occupancy & square_mask(ep) == 0
                && enemy_pawns & square_mask(victim) != 0
            {
                out.push(Move::new(from, ep, MoveFlag::EnPassantCapture));
            }
        }

        pawns &= pawns - 1;
    }
}

#[inline]
const fn en_passant_target_rank(side: Color) -> u8 {
    match side {
        Color::White => 5,
        Color::Black => 2,
    }
}

/// Square of the pawn removed by an en-passant capture landing on `target`.
#[inline]
pub fn en_passant_victim_square(mover: Color, target: Square) -> Square {
    match mover {
        Color::White => target.wrapping_sub(8),
        Color::Black => target.wrapping_add(8),
    }
}

#[inline]
fn push_pawn_move(out: &mut Vec<Move>, side: Color, from: Square, to: Square) {
    let promotion_rank = match side {
        Color::White => 7,
        Color::Black => 0,
    };
    if to / 8 == promotion_rank {
        for flag in MoveFlag::PROMOTIONS {
            out.push(Move::new(from, to, flag));
        }
    } else {
        out.push(Move::new(from, to, MoveFlag::Normal));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn_moves(fen: &str) -> Vec<Move> {
        let table = AttackTable::new();
        let position = Position::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&position, &table, &mut out);
        out
    }

    #[test]
    fn starting_pawns_have_sixteen_moves() {
        let moves = pawn_moves("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(moves.len(), 16);
        assert_eq!(
            moves.iter().filter(|m| m.flag() == MoveFlag::DoublePawnPush).count(),
            8
        );
    }

    #[test]
    fn blocked_single_push_also_blocks_double() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(moves.is_empty());
    }

    #[test]
    fn promotion_emits_four_flags() {
        let moves = pawn_moves("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.is_promotion() && m.destination() == 56));
    }

    #[test]
    fn en_passant_requires_enemy_pawn_behind_target() {
        let moves = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(moves.contains(&Move::new(36, 43, MoveFlag::EnPassantCapture)));

        let black = pawn_moves("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
        assert!(black.contains(&Move::new(27, 20, MoveFlag::EnPassantCapture)));
    }

    #[test]
    fn target_behind_own_pawn_is_ignored() {
        let table = AttackTable::new();
        let mut position =
            Position::from_fen("4k3/8/8/8/8/8/3Pp3/7K w - - 0 1").expect("FEN should parse");
        position.en_passant_square = Some(20);

        let mut moves = Vec::new();
        generate_pawn_moves(&position, &table, &mut moves);
        assert!(moves.iter().all(|mv| mv.flag() != MoveFlag::EnPassantCapture));
    }
}
