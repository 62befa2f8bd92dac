//! Pawn push and capture tables, one pair per color.
//!
//! Push masks hold the single step and, from the starting rank, the double
//! step; generation drops them when a square on the way is occupied.

use crate::game_state::chess_types::Color;

pub const WHITE_PAWN_PUSHES: [u64; 64] = generate_pawn_pushes(Color::White);
pub const BLACK_PAWN_PUSHES: [u64; 64] = generate_pawn_pushes(Color::Black);
pub const WHITE_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(Color::White);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(Color::Black);

const fn generate_pawn_pushes(color: Color) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let rank = sq / 8;
        let mut pushes = 0u64;

        match color {
            Color::White => {
                if rank < 7 {
                    pushes |= 1u64 << (sq + 8);
                }
                if rank == 1 {
                    pushes |= 1u64 << (sq + 16);
                }
            }
            Color::Black => {
                if rank > 0 {
                    pushes |= 1u64 << (sq - 8);
                }
                if rank == 6 {
                    pushes |= 1u64 << (sq - 16);
                }
            }
        }

        table[sq] = pushes;
        sq += 1;
    }

    table
}

const fn generate_pawn_attacks(color: Color) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        match color {
            Color::White => {
                if rank < 7 {
                    if file > 0 {
                        attacks |= 1u64 << (sq + 7);
                    }
                    if file < 7 {
                        attacks |= 1u64 << (sq + 9);
                    }
                }
            }
            Color::Black => {
                if rank > 0 {
                    if file > 0 {
                        attacks |= 1u64 << (sq - 9);
                    }
                    if file < 7 {
                        attacks |= 1u64 << (sq - 7);
                    }
                }
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}
