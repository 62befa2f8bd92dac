//! Search entry points and the selectable algorithm set.
//!
//! `search` runs one of four interchangeable strategies over the shared
//! negamax skeleton and reports statistics; `best_move` is the thin wrapper
//! that returns only the move (or `None` when the root has no legal move).

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
use crate::search::negamax::{NodePolicy, Searcher};
use crate::search::transposition_table::{TTStats, TranspositionTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchAlgorithm {
    /// Full-width negamax, no pruning.
    Minimax,
    AlphaBeta,
    /// Alpha-beta with captures and promotions searched first.
    AlphaBetaOrdered,
    /// Ordered alpha-beta at depths `1..=depth`, seeding each pass with the
    /// previous best move and a shared transposition table.
    IterativeDeepening,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 4] = [
        SearchAlgorithm::Minimax,
        SearchAlgorithm::AlphaBeta,
        SearchAlgorithm::AlphaBetaOrdered,
        SearchAlgorithm::IterativeDeepening,
    ];

    pub const fn policy(self, quiescence: bool) -> NodePolicy {
        let (prune, order, use_tt) = match self {
            SearchAlgorithm::Minimax => (false, false, false),
            SearchAlgorithm::AlphaBeta => (true, false, false),
            SearchAlgorithm::AlphaBetaOrdered => (true, true, false),
            SearchAlgorithm::IterativeDeepening => (true, true, true),
        };
        NodePolicy {
            prune,
            order,
            use_tt,
            quiescence,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SearchAlgorithm::Minimax => "minimax",
            SearchAlgorithm::AlphaBeta => "alpha-beta",
            SearchAlgorithm::AlphaBetaOrdered => "alpha-beta-ordered",
            SearchAlgorithm::IterativeDeepening => "iterative-deepening",
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = ChessError;

    fn from_str(s: &str) -> ChessResult<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        SearchAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == normalized)
            .ok_or_else(|| ChessError::malformed(format!("unknown search algorithm: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
    pub algorithm: SearchAlgorithm,
    /// Extend leaves with a captures-only search.
    pub quiescence: bool,
    /// Budget for `IterativeDeepening`; ignored by the other algorithms.
    pub transposition_table_mb: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            algorithm: SearchAlgorithm::AlphaBetaOrdered,
            quiescence: true,
            transposition_table_mb: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// From the perspective of the side to move at the root.
    pub score: i32,
    pub depth_reached: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    pub tt_stats: TTStats,
}

/// Search `position` under `config`. The position is left unchanged.
pub fn search<S: BoardScorer + ?Sized>(
    position: &mut Position,
    table: &AttackTable,
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    let started = Instant::now();
    let depth = config.depth.max(1);
    let policy = config.algorithm.policy(config.quiescence);

    let mut result = if config.algorithm == SearchAlgorithm::IterativeDeepening {
        iterative_deepening(position, table, scorer, depth, policy, config.transposition_table_mb)
    } else {
        let mut searcher = Searcher::new(table, scorer, policy, None);
        let (best_move, score) = searcher.search_root(position, depth, None);
        SearchResult {
            best_move,
            score,
            depth_reached: depth,
            nodes: searcher.nodes(),
            ..SearchResult::default()
        }
    };
    result.elapsed = started.elapsed();

    debug!(
        "{} depth {}: best {} score {} nodes {} in {:?}",
        config.algorithm,
        result.depth_reached,
        result
            .best_move
            .map_or_else(|| "none".to_owned(), |mv| mv.to_string()),
        result.score,
        result.nodes,
        result.elapsed
    );
    result
}

fn iterative_deepening<S: BoardScorer + ?Sized>(
    position: &mut Position,
    table: &AttackTable,
    scorer: &S,
    depth: u8,
    policy: NodePolicy,
    tt_mb: usize,
) -> SearchResult {
    let mut tt = TranspositionTable::new_with_mb(tt_mb);
    let mut result = SearchResult::default();

    for current in 1..=depth {
        tt.new_generation();
        let mut searcher = Searcher::new(table, scorer, policy, Some(&mut tt));
        let (best_move, score) = searcher.search_root(position, current, result.best_move);

        result.best_move = best_move;
        result.score = score;
        result.depth_reached = current;
        result.nodes += searcher.nodes();

        debug!(
            "iteration {current}: best {} score {score} nodes {}",
            best_move.map_or_else(|| "none".to_owned(), |mv| mv.to_string()),
            result.nodes
        );

        if best_move.is_none() {
            break;
        }
    }

    result.tt_stats = tt.stats();
    result
}

/// Best move at `depth` under `algorithm`, using the piece-square evaluation
/// with quiescence. `None` when the side to move has no legal move.
pub fn best_move(
    position: &mut Position,
    table: &AttackTable,
    depth: u8,
    algorithm: SearchAlgorithm,
) -> Option<Move> {
    let config = SearchConfig {
        depth,
        algorithm,
        ..SearchConfig::default()
    };
    search(position, table, &PieceSquareScorer, config).best_move
}
