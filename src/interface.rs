//! Value-oriented boundary surface for a presentation layer.
//!
//! Each function is a thin, safe wrapper over the engine modules so a front
//! end can drive a game through one flat import. Terminal states are plain
//! values: `legal_moves` returns an empty list and `best_move` returns `None`.

use crate::errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks;
use crate::move_generation::legal_move_generator::{self, GameStatus};
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::{Move, MoveFlag};
use crate::search::search_algorithm::{self, SearchAlgorithm};
use crate::search::zobrist;

/// Build the hashing key table. Call once at startup; later calls are no-ops.
pub fn init_hashing() {
    zobrist::init();
}

pub fn create_empty_position() -> Position {
    Position::new_empty()
}

pub fn create_starting_position() -> Position {
    Position::new_game()
}

pub fn create_position_from_fen(fen: &str) -> ChessResult<Position> {
    Position::from_fen(fen)
}

pub fn create_attack_table() -> AttackTable {
    AttackTable::new()
}

/// Piece on `square`, or `None` for an empty square.
pub fn piece_at(position: &Position, square: Square) -> Option<Piece> {
    position.piece_at(square)
}

pub fn position_fen(position: &Position) -> String {
    position.to_fen()
}

pub fn incremental_hash(position: &Position) -> u64 {
    position.incremental_hash()
}

pub fn absolute_hash(position: &Position) -> u64 {
    position.absolute_hash()
}

pub fn toggle_side_to_move(position: &mut Position) {
    position.toggle_side_to_move();
}

/// Low-level apply; pair with `toggle_side_to_move`.
pub fn apply_move(position: &mut Position, mv: Move) {
    position.apply(mv);
}

/// Low-level reverse; pair with `toggle_side_to_move`.
pub fn unapply_move(position: &mut Position) -> ChessResult<()> {
    position.unapply().map(|_| ())
}

pub fn encode_move(origin: Square, destination: Square, flag: MoveFlag) -> ChessResult<Move> {
    Move::try_new(origin, destination, flag)
}

pub fn decode_move(mv: Move) -> (Square, Square, MoveFlag) {
    mv.decompose()
}

pub fn legal_moves(position: &mut Position, table: &AttackTable) -> Vec<Move> {
    legal_move_generator::generate_legal_moves(position, table)
}

pub fn is_in_check(position: &Position, table: &AttackTable) -> bool {
    legal_move_checks::is_in_check(position, table)
}

pub fn game_status(position: &mut Position, table: &AttackTable) -> GameStatus {
    legal_move_generator::game_status(position, table)
}

pub fn best_move(
    position: &mut Position,
    table: &AttackTable,
    depth: u8,
    algorithm: SearchAlgorithm,
) -> Option<Move> {
    search_algorithm::best_move(position, table, depth, algorithm)
}
