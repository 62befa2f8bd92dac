//! King step tables.
//!
//! Occupancy-independent; friendly pieces are masked out at generation time.

use crate::moves::ray_moves::square_bit;

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KING_ATTACKS: [u64; 64] = generate_king_attacks();

const fn generate_king_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut i = 0usize;

        while i < KING_STEPS.len() {
            table[sq] |= square_bit(file + KING_STEPS[i].0, rank + KING_STEPS[i].1);
            i += 1;
        }
        sq += 1;
    }

    table
}
