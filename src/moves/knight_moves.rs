use crate::moves::ray_moves::square_bit;

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KNIGHT_ATTACKS: [u64; 64] = generate_knight_attacks();

const fn generate_knight_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut i = 0usize;

        while i < KNIGHT_JUMPS.len() {
            table[sq] |= square_bit(file + KNIGHT_JUMPS[i].0, rank + KNIGHT_JUMPS[i].1);
            i += 1;
        }
        sq += 1;
    }

    table
}
