//! Sliding-piece ray geometry.
//!
//! `RAYS[square][direction]` holds every square reachable from `square` in
//! one compass direction on an empty board. Occupancy is applied only at
//! query time: the ray is cut just past its first blocker.

/// Compass direction, `North` meaning towards rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `(file_step, rank_step)` for one step along the direction.
    #[inline]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    /// Square indices increase along this direction.
    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::NorthEast | Direction::East | Direction::NorthWest
        )
    }
}

pub const RAYS: [[u64; 8]; 64] = generate_rays();

/// Bit for `(file, rank)`, or an empty mask when off the board.
pub(crate) const fn square_bit(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << ((rank as usize) * 8 + (file as usize))
}

const fn generate_rays() -> [[u64; 8]; 64] {
    let mut table = [[0u64; 8]; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut dir = 0usize;
        while dir < 8 {
            let (file_step, rank_step) = Direction::ALL[dir].step();
            let mut file = (sq % 8) as i32 + file_step;
            let mut rank = (sq / 8) as i32 + rank_step;
            let mut ray = 0u64;

            while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
                ray |= square_bit(file, rank);
                file += file_step;
                rank += rank_step;
            }

            table[sq][dir] = ray;
            dir += 1;
        }
        sq += 1;
    }

    table
}

/// Ray from `square` in `direction`, stopping at (and including) the first
/// occupied square.
#[inline]
pub fn blocked_ray(rays: &[[u64; 8]; 64], square: u8, direction: Direction, occupancy: u64) -> u64 {
    let ray = rays[square as usize][direction.index()];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }

    let first = if direction.is_positive() {
        blockers.trailing_zeros()
    } else {
        63 - blockers.leading_zeros()
    };

    ray ^ rays[first as usize][direction.index()]
}
