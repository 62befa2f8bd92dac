//! Long algebraic move text (`e2e4`, `e1g1`, `e7e8q`).
//!
//! Formatting is the `Display` impl of `Move`; parsing resolves the text
//! against the legal move list so the flag (castle, en passant, double push)
//! never has to be guessed from the board.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

#[inline]
pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

/// Resolve long algebraic text to the matching legal move.
pub fn long_algebraic_to_move(
    long_algebraic: &str,
    position: &mut Position,
    table: &AttackTable,
) -> ChessResult<Move> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::malformed(format!(
            "invalid long algebraic move: {long_algebraic}"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text.as_bytes().get(4) {
        None => None,
        Some(&ch) => Some(promotion_from_char(char::from(ch))?),
    };

    generate_legal_moves(position, table)
        .into_iter()
        .find(|mv| mv.origin() == from && mv.destination() == to && mv.promotion_piece() == promotion)
        .ok_or_else(|| {
            ChessError::malformed(format!(
                "{text} is not a legal move in {}",
                position.to_fen()
            ))
        })
}

fn promotion_from_char(ch: char) -> ChessResult<PieceKind> {
    match ch.to_ascii_lowercase() {
        'q' => Ok(PieceKind::Queen),
        'r' => Ok(PieceKind::Rook),
        'b' => Ok(PieceKind::Bishop),
        'n' => Ok(PieceKind::Knight),
        _ => Err(ChessError::malformed(format!(
            "invalid promotion piece: {ch}"
        ))),
    }
}
