//! Zobrist hashing support for fast position identity and transposition lookups.
//!
//! The keys come from a fixed-seed `StdRng` so hashes are deterministic across
//! runs, which is useful for testing and debugging. The table is built once
//! per process and read-only afterwards.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_rules::castle_rule_by_king_destination;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::MoveFlag;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.random::<u64>();
            }
        }
    }

    let side_to_move = rng.random::<u64>();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random::<u64>();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random::<u64>();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Build the key table now instead of on first hash.
///
/// Safe to call any number of times; only the first call does work.
pub fn init() {
    let _ = tables();
}

/// Return the Zobrist key for a `(color, piece, square)` occupancy term.
#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square as usize]
}

/// Return the Zobrist key contribution for castling rights mask (`0..=15`).
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & 0x0F) as usize]
}

/// Return the Zobrist key contribution for a valid en-passant file.
#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    tables().en_passant_file[(file & 7) as usize]
}

/// Return the side-to-move toggle key (xor in when black to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

#[inline]
fn en_passant_key(square: Option<Square>) -> u64 {
    square.map_or(0, |sq| en_passant_file_key(sq % 8))
}

/// Hash after one `apply`, derived from the hash before it.
///
/// `undo` is the record pushed for the move (it carries the move, the moved
/// and captured kinds and the prior rights/en-passant square); `rights` and
/// `en_passant` are the values after the move. Side to move is untouched,
/// matching `apply`.
pub fn incremental_update(
    hash: u64,
    mover: Color,
    undo: &UndoState,
    rights: CastlingRights,
    en_passant: Option<Square>,
) -> u64 {
    let (from, to, flag) = undo.mv.decompose();
    let enemy = mover.opposite();
    let placed = flag.promotion_piece().unwrap_or(undo.moved_piece);

    let mut key = hash;
    key ^= piece_square_key(mover, undo.moved_piece, from);
    key ^= piece_square_key(mover, placed, to);

    match flag {
        MoveFlag::EnPassantCapture => {
            let captured_square = match mover {
                Color::White => to.wrapping_sub(8),
                Color::Black => to.wrapping_add(8),
            };
            key ^= piece_square_key(enemy, PieceKind::Pawn, captured_square);
        }
        MoveFlag::Castle => {
            if let Some(rule) = castle_rule_by_king_destination(to) {
                key ^= piece_square_key(mover, PieceKind::Rook, rule.rook_from);
                key ^= piece_square_key(mover, PieceKind::Rook, rule.rook_to);
            }
        }
        _ => {
            if let Some(captured) = undo.captured_piece {
                key ^= piece_square_key(enemy, captured, to);
            }
        }
    }

    key ^= castling_key(undo.prev_castling_rights) ^ castling_key(rights);
    key ^= en_passant_key(undo.prev_en_passant_square) ^ en_passant_key(en_passant);
    key
}

/// Compute the full position Zobrist key from scratch.
pub fn compute_zobrist_key(position: &Position) -> u64 {
    let mut key = 0u64;

    for color in [Color::White, Color::Black] {
        for piece in PieceKind::ALL {
            let mut bb = position.pieces[color.index()][piece.index()];
            while bb != 0 {
                let sq = bb.trailing_zeros() as Square;
                key ^= piece_square_key(color, piece, sq);
                bb &= bb - 1;
            }
        }
    }

    if position.side_to_move == Color::Black {
        key ^= side_to_move_key();
    }

    key ^= castling_key(position.castling_rights);
    key ^= en_passant_key(position.en_passant_square);

    key
}

#[cfg(test)]
mod tests {
    use super::{compute_zobrist_key, init, piece_square_key};
    use crate::game_state::chess_types::*;
    use crate::moves::chess_move::{Move, MoveFlag};

    #[test]
    fn starting_position_hash_is_deterministic() {
        init();
        let a = Position::new_game();
        let b = Position::new_game();
        assert_eq!(a.zobrist_key, b.zobrist_key);
        assert_ne!(a.zobrist_key, 0);
    }

    #[test]
    fn keys_are_distinct_per_color() {
        assert_ne!(
            piece_square_key(Color::White, PieceKind::Pawn, 12),
            piece_square_key(Color::Black, PieceKind::Pawn, 12)
        );
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_ne!(w.zobrist_key, b.zobrist_key);
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights =
            Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let without_rights =
            Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert_ne!(with_rights.zobrist_key, without_rights.zobrist_key);
    }

    #[test]
    fn en_passant_file_changes_hash() {
        let no_ep =
            Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let ep = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        assert_ne!(no_ep.zobrist_key, ep.zobrist_key);
    }

    #[test]
    fn incremental_matches_recompute_for_special_moves() {
        let mut castle =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        castle.make_move(Move::new(4, 6, MoveFlag::Castle));
        assert_eq!(castle.zobrist_key, compute_zobrist_key(&castle));

        let mut en_passant = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1")
            .expect("FEN should parse");
        en_passant.make_move(Move::new(36, 43, MoveFlag::EnPassantCapture));
        assert_eq!(en_passant.zobrist_key, compute_zobrist_key(&en_passant));

        let mut promotion =
            Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        promotion.make_move(Move::new(48, 57, MoveFlag::PromoteKnight));
        assert_eq!(promotion.zobrist_key, compute_zobrist_key(&promotion));
    }
}
