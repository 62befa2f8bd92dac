//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Direct-mapped with a power-of-two slot count, depth-preferred replacement
//! and generation aging to evict stale entries. Mate scores are stored
//! relative to the node that produced them (see `score_to_tt`).

use crate::moves::chess_move::Move;
use crate::search::negamax::MATE_SCORE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    generations: Vec<u8>,
    mask: usize,
    current_generation: u8,
    stats: TTStats,
}

impl TranspositionTable {
    const AGE_REPLACE_THRESHOLD: u8 = 4;
    const DEPTH_REPLACE_MARGIN: u8 = 2;

    /// Largest power-of-two slot count fitting in `size_mb` MiB (at least 1 MiB).
    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let slot_size = std::mem::size_of::<Option<TTEntry>>() + std::mem::size_of::<u8>();
        let fitting = (bytes / slot_size).max(1);
        let count = if fitting.is_power_of_two() {
            fitting
        } else {
            fitting.next_power_of_two() >> 1
        };
        Self {
            entries: vec![None; count],
            generations: vec![0; count],
            mask: count - 1,
            current_generation: 0,
            stats: TTStats::default(),
        }
    }

    /// Advance TT generation (once per iterative-deepening iteration).
    #[inline]
    pub fn new_generation(&mut self) {
        self.current_generation = self.current_generation.wrapping_add(1);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.generations.fill(0);
        self.current_generation = 0;
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    pub fn probe(&mut self, key: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        let idx = self.idx(key);
        let hit = self.entries[idx].filter(|e| e.key == key);
        if hit.is_some() {
            self.stats.hits += 1;
            self.generations[idx] = self.current_generation;
        }
        hit
    }

    pub fn store(&mut self, entry: TTEntry) {
        self.stats.stores += 1;
        let idx = self.idx(entry.key);
        let replace = match self.entries[idx] {
            None => true,
            Some(existing) if existing.key == entry.key => entry.depth >= existing.depth,
            Some(existing) => {
                let age = self.current_generation.wrapping_sub(self.generations[idx]);
                age >= Self::AGE_REPLACE_THRESHOLD
                    || entry.depth.saturating_add(Self::DEPTH_REPLACE_MARGIN) >= existing.depth
            }
        };

        if replace {
            self.entries[idx] = Some(entry);
            self.generations[idx] = self.current_generation;
        }
    }
}

/// Mate scores beyond this magnitude carry a distance-to-mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

/// Convert a root-relative mate score into one relative to the current node.
#[inline]
pub fn score_to_tt(score: i32, ply: u8) -> i32 {
    if score >= MATE_THRESHOLD {
        score + i32::from(ply)
    } else if score <= -MATE_THRESHOLD {
        score - i32::from(ply)
    } else {
        score
    }
}

/// Inverse of `score_to_tt`.
#[inline]
pub fn score_from_tt(score: i32, ply: u8) -> i32 {
    if score >= MATE_THRESHOLD {
        score - i32::from(ply)
    } else if score <= -MATE_THRESHOLD {
        score + i32::from(ply)
    } else {
        score
    }
}
