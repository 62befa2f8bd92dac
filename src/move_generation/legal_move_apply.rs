//! In-place move application and reversal.
//!
//! `apply_move` mutates the position and pushes one undo record;
//! `unapply_move` pops it and performs the exact inverse bit operations.
//! Neither touches `side_to_move`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castle_rule_by_king_destination, rights_revoked_by_square};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_pawn::en_passant_victim_square;
use crate::moves::chess_move::{Move, MoveFlag};
use crate::search::zobrist::incremental_update;

/// Apply `mv` without any legality check.
///
/// The mover is whoever stands on the origin square. An empty origin square
/// fails with `EmptyOrigin` before anything is touched, so no undo record is
/// pushed and the caller must not pair the failed apply with an unapply.
pub fn apply_move(position: &mut Position, mv: Move) -> ChessResult<()> {
    let (from, to, flag) = mv.decompose();

    let moved = position.piece_at(from).ok_or(ChessError::EmptyOrigin(from))?;
    let mover = moved.color;
    let enemy = mover.opposite();

    let captured_piece = match flag {
        MoveFlag::EnPassantCapture => Some(PieceKind::Pawn),
        MoveFlag::Castle => None,
        _ => position.piece_kind_at(enemy, to),
    };

    let undo = UndoState {
        mv,
        moved_piece: moved.kind,
        captured_piece,
        prev_castling_rights: position.castling_rights,
        prev_en_passant_square: position.en_passant_square,
        prev_halfmove_clock: position.halfmove_clock,
        prev_fullmove_number: position.fullmove_number,
        prev_zobrist_key: position.zobrist_key,
    };

    match (flag, captured_piece) {
        (MoveFlag::EnPassantCapture, _) => {
            position.toggle_piece_bits(enemy, PieceKind::Pawn, en_passant_victim_square(mover, to));
        }
        (_, Some(kind)) => position.toggle_piece_bits(enemy, kind, to),
        _ => {}
    }

    position.toggle_piece_bits(mover, moved.kind, from);
    position.toggle_piece_bits(mover, flag.promotion_piece().unwrap_or(moved.kind), to);

    if flag == MoveFlag::Castle {
        if let Some(rule) = castle_rule_by_king_destination(to) {
            position.toggle_piece_bits(mover, PieceKind::Rook, rule.rook_from);
            position.toggle_piece_bits(mover, PieceKind::Rook, rule.rook_to);
        }
    }

    position.castling_rights &= !(rights_revoked_by_square(from) | rights_revoked_by_square(to));
    position.en_passant_square = if flag == MoveFlag::DoublePawnPush {
        Some((from + to) / 2)
    } else {
        None
    };

    if moved.kind == PieceKind::Pawn || captured_piece.is_some() {
        position.halfmove_clock = 0;
    } else {
        position.halfmove_clock = position.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Black {
        position.fullmove_number = position.fullmove_number.saturating_add(1);
    }

    position.zobrist_key = incremental_update(
        position.zobrist_key,
        mover,
        &undo,
        position.castling_rights,
        position.en_passant_square,
    );
    position.undo_log.push(undo);
    Ok(())
}

/// Reverse the most recent `apply_move`.
pub fn unapply_move(position: &mut Position) -> ChessResult<UndoState> {
    let undo = position.undo_log.pop().ok_or(ChessError::EmptyHistory)?;
    let (from, to, flag) = undo.mv.decompose();

    let mover = position
        .piece_at(to)
        .map_or(position.side_to_move, |piece| piece.color);
    let enemy = mover.opposite();

    position.toggle_piece_bits(mover, flag.promotion_piece().unwrap_or(undo.moved_piece), to);
    position.toggle_piece_bits(mover, undo.moved_piece, from);

    match (flag, undo.captured_piece) {
        (MoveFlag::EnPassantCapture, _) => {
            position.toggle_piece_bits(enemy, PieceKind::Pawn, en_passant_victim_square(mover, to));
        }
        (MoveFlag::Castle, _) => {
            if let Some(rule) = castle_rule_by_king_destination(to) {
                position.toggle_piece_bits(mover, PieceKind::Rook, rule.rook_to);
                position.toggle_piece_bits(mover, PieceKind::Rook, rule.rook_from);
            }
        }
        (_, Some(kind)) => position.toggle_piece_bits(enemy, kind, to),
        _ => {}
    }

    position.castling_rights = undo.prev_castling_rights;
    position.en_passant_square = undo.prev_en_passant_square;
    position.halfmove_clock = undo.prev_halfmove_clock;
    position.fullmove_number = undo.prev_fullmove_number;
    position.zobrist_key = undo.prev_zobrist_key;

    Ok(undo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(position: &Position) -> ([[u64; 6]; 2], [u64; 2], CastlingRights, Option<Square>, u64) {
        (
            position.pieces,
            position.occupancy_by_color,
            position.castling_rights,
            position.en_passant_square,
            position.zobrist_key,
        )
    }

    #[test]
    fn double_push_sets_en_passant_square() {
        let mut position = Position::new_game();
        apply_move(&mut position, Move::new(12, 28, MoveFlag::DoublePawnPush)).expect("pawn on e2");
        assert_eq!(position.en_passant_square, Some(20));
        assert_eq!(position.halfmove_clock, 0);
        assert_eq!(position.side_to_move, Color::White);
        assert_eq!(position.history().len(), 1);
    }

    #[test]
    fn castle_moves_the_rook_and_clears_rights() {
        let mut position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").expect("FEN should parse");
        let before = snapshot(&position);

        apply_move(&mut position, Move::new(4, 2, MoveFlag::Castle)).expect("king on e1");
        assert_eq!(position.piece_at(2).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(position.piece_at(3).map(|p| p.kind), Some(PieceKind::Rook));
        assert_eq!(position.piece_at(0), None);
        assert_eq!(position.castling_rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
        assert_eq!(position.halfmove_clock, 4);

        unapply_move(&mut position).expect("castle should reverse");
        assert_eq!(snapshot(&position), before);
        assert_eq!(position.halfmove_clock, 3);
    }

    #[test]
    fn en_passant_removes_the_pawn_behind_the_target() {
        let mut position =
            Position::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        let before = snapshot(&position);

        apply_move(&mut position, Move::new(27, 20, MoveFlag::EnPassantCapture)).expect("pawn on d4");
        assert_eq!(position.piece_at(28), None);
        assert_eq!(
            position.piece_at(20),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(position.fullmove_number, 2);

        unapply_move(&mut position).expect("en passant should reverse");
        assert_eq!(snapshot(&position), before);
    }

    #[test]
    fn capture_promotion_round_trips() {
        let mut position =
            Position::from_fen("r3k3/1P6/8/8/8/8/8/4K3 w q - 0 1").expect("FEN should parse");
        let before = snapshot(&position);

        apply_move(&mut position, Move::new(49, 56, MoveFlag::PromoteQueen)).expect("pawn on b7");
        assert_eq!(
            position.piece_at(56),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(position.castling_rights, 0);
        assert_eq!(position.last_undo().and_then(|u| u.captured_piece), Some(PieceKind::Rook));

        unapply_move(&mut position).expect("promotion should reverse");
        assert_eq!(snapshot(&position), before);
    }

    #[test]
    fn unapply_with_empty_log_fails() {
        let mut position = Position::new_game();
        assert_eq!(unapply_move(&mut position), Err(ChessError::EmptyHistory));
    }

    #[test]
    fn empty_origin_is_rejected_without_touching_the_log() {
        let mut position = Position::new_game();
        apply_move(&mut position, Move::new(12, 28, MoveFlag::DoublePawnPush)).expect("pawn on e2");
        let after_push = position.clone();

        assert_eq!(
            apply_move(&mut position, Move::new(20, 28, MoveFlag::Normal)),
            Err(ChessError::EmptyOrigin(20))
        );
        assert_eq!(position, after_push);

        // The only record left is still the double push.
        let undo = unapply_move(&mut position).expect("double push recorded");
        assert_eq!(undo.mv, Move::new(12, 28, MoveFlag::DoublePawnPush));
        assert_eq!(unapply_move(&mut position), Err(ChessError::EmptyHistory));
    }
}
