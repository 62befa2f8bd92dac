//! Precomputed per-square attack data shared by every position and search.
//!
//! An `AttackTable` is built once, never mutated, and passed around by shared
//! reference. `AttackTable::shared()` hands out a process-wide instance.

use std::sync::OnceLock;

use crate::game_state::chess_types::{Color, Square};
use crate::moves::king_moves::KING_ATTACKS;
use crate::moves::knight_moves::KNIGHT_ATTACKS;
use crate::moves::pawn_moves::{
    BLACK_PAWN_ATTACKS, BLACK_PAWN_PUSHES, WHITE_PAWN_ATTACKS, WHITE_PAWN_PUSHES,
};
use crate::moves::ray_moves::{blocked_ray, Direction, RAYS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackTable {
    king: [u64; 64],
    knight: [u64; 64],
    pawn_pushes: [[u64; 64]; 2],
    pawn_attacks: [[u64; 64]; 2],
    rays: [[u64; 8]; 64],
}

static SHARED: OnceLock<AttackTable> = OnceLock::new();

impl Default for AttackTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackTable {
    /// Build the tables from board geometry alone. Deterministic.
    pub fn new() -> Self {
        Self {
            king: KING_ATTACKS,
            knight: KNIGHT_ATTACKS,
            pawn_pushes: [WHITE_PAWN_PUSHES, BLACK_PAWN_PUSHES],
            pawn_attacks: [WHITE_PAWN_ATTACKS, BLACK_PAWN_ATTACKS],
            rays: RAYS,
        }
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> &'static AttackTable {
        SHARED.get_or_init(AttackTable::new)
    }

    #[inline]
    pub fn king(&self, square: Square) -> u64 {
        self.king[square as usize]
    }

    #[inline]
    pub fn knight(&self, square: Square) -> u64 {
        self.knight[square as usize]
    }

    /// Quiet push targets (single and, from the start rank, double).
    #[inline]
    pub fn pawn_pushes(&self, color: Color, square: Square) -> u64 {
        self.pawn_pushes[color.index()][square as usize]
    }

    /// Diagonal capture targets.
    #[inline]
    pub fn pawn_attacks(&self, color: Color, square: Square) -> u64 {
        self.pawn_attacks[color.index()][square as usize]
    }

    /// Empty-board ray from `square` in `direction`.
    #[inline]
    pub fn ray(&self, square: Square, direction: Direction) -> u64 {
        self.rays[square as usize][direction.index()]
    }

    /// Union of the given rays, each cut at its first blocker (inclusive).
    #[inline]
    pub fn slider_attacks(&self, square: Square, occupancy: u64, directions: &[Direction]) -> u64 {
        directions
            .iter()
            .fold(0u64, |acc, &dir| acc | blocked_ray(&self.rays, square, dir, occupancy))
    }

    #[inline]
    pub fn bishop_attacks(&self, square: Square, occupancy: u64) -> u64 {
        self.slider_attacks(square, occupancy, &Direction::DIAGONAL)
    }

    #[inline]
    pub fn rook_attacks(&self, square: Square, occupancy: u64) -> u64 {
        self.slider_attacks(square, occupancy, &Direction::ORTHOGONAL)
    }

    #[inline]
    pub fn queen_attacks(&self, square: Square, occupancy: u64) -> u64 {
        self.slider_attacks(square, occupancy, &Direction::ALL)
    }
}
