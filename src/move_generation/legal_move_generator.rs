//! Full legal move generation pipeline.
//!
//! Orchestrates piece-wise pseudo-legal generation, then applies each
//! candidate on the live position and keeps it only if the mover's king is
//! not attacked afterwards. The position is restored before returning.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{is_in_check, is_king_in_check};
use crate::move_generation::legal_move_shared::is_tactical;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_slider::generate_slider_moves;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::Move;

/// Terminal classification of a position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

/// Moves obeying piece movement rules, before the self-check filter.
pub fn generate_pseudo_legal_moves(position: &Position, table: &AttackTable) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(128);

    generate_pawn_moves(position, table, &mut pseudo);
    generate_knight_moves(position, table, &mut pseudo);
    generate_slider_moves(position, table, &mut pseudo);
    generate_king_moves(position, table, &mut pseudo);

    pseudo
}

/// All legal moves for the side to move, in generation order.
pub fn generate_legal_moves(position: &mut Position, table: &AttackTable) -> Vec<Move> {
    let pseudo = generate_pseudo_legal_moves(position, table);
    retain_legal(position, table, pseudo)
}

/// Legal captures (en passant included) and promotions.
pub fn generate_legal_captures(position: &mut Position, table: &AttackTable) -> Vec<Move> {
    let mut pseudo = generate_pseudo_legal_moves(position, table);
    pseudo.retain(|&mv| is_tactical(position, mv));
    retain_legal(position, table, pseudo)
}

fn retain_legal(position: &mut Position, table: &AttackTable, mut moves: Vec<Move>) -> Vec<Move> {
    let side = position.side_to_move;
    moves.retain(|&mv| {
        if position.try_apply(mv).is_err() {
            return false;
        }
        let legal = !is_king_in_check(position, table, side);
        position.unapply().is_ok() && legal
    });
    moves
}

/// Whether the side to move has at least one legal move.
pub fn has_legal_move(position: &mut Position, table: &AttackTable) -> bool {
    let side = position.side_to_move;
    for mv in generate_pseudo_legal_moves(position, table) {
        if position.try_apply(mv).is_err() {
            continue;
        }
        let legal = !is_king_in_check(position, table, side);
        if position.unapply().is_err() {
            return false;
        }
        if legal {
            return true;
        }
    }
    false
}

pub fn game_status(position: &mut Position, table: &AttackTable) -> GameStatus {
    if has_legal_move(position, table) {
        GameStatus::Ongoing
    } else if is_in_check(position, table) {
        GameStatus::Checkmate
    } else {
        GameStatus::Stalemate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::chess_move::MoveFlag;
    use std::collections::HashSet;

    #[test]
    fn starting_position_has_twenty_moves() {
        let table = AttackTable::new();
        let mut game = Position::new_game();
        let before = game.clone();
        let moves = generate_legal_moves(&mut game, &table);
        assert_eq!(moves.len(), 20);
        assert_eq!(game, before);
    }

    #[test]
    fn legal_moves_contain_no_duplicates() {
        let table = AttackTable::new();
        let mut game = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let moves = generate_legal_moves(&mut game, &table);
        let unique: HashSet<Move> = moves.iter().copied().collect();
        assert_eq!(unique.len(), moves.len());
        assert_eq!(moves.len(), 48);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let table = AttackTable::new();
        let mut game =
            Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let moves = generate_legal_moves(&mut game, &table);
        assert!(moves.iter().all(|m| m.origin() != 12));
    }

    #[test]
    fn captures_only_lists_tactical_moves() {
        let table = AttackTable::new();
        let mut game = Position::from_fen("4k3/P7/8/3p4/4P3/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let captures = generate_legal_captures(&mut game, &table);
        assert!(captures.contains(&Move::new(28, 35, MoveFlag::Normal)));
        assert!(captures.contains(&Move::new(48, 56, MoveFlag::PromoteQueen)));
        assert_eq!(captures.len(), 5);
    }

    #[test]
    fn terminal_positions_are_classified() {
        let table = AttackTable::new();
        let mut mate = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("FEN should parse");
        assert!(generate_legal_moves(&mut mate, &table).is_empty());
        assert_eq!(game_status(&mut mate, &table), GameStatus::Checkmate);

        let mut stalemate =
            Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(game_status(&mut stalemate, &table), GameStatus::Stalemate);

        let mut game = Position::new_game();
        assert_eq!(game_status(&mut game, &table), GameStatus::Ongoing);
    }
}
