//! Shared negamax recursion behind every search algorithm.
//!
//! One skeleton serves minimax, alpha-beta, ordered alpha-beta and the
//! iterative-deepening driver; a `NodePolicy` switches pruning, move ordering
//! and transposition-table use on or off. Every score is from the perspective
//! of the side to move at the node that returns it.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_legal_move};
use crate::move_generation::legal_move_shared::is_tactical;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::order_moves;
use crate::search::transposition_table::{
    score_from_tt, score_to_tt, Bound, TTEntry, TranspositionTable,
};

pub const MATE_SCORE: i32 = 100_000;
pub const INFINITY: i32 = MATE_SCORE + 1;
/// Extra plies quiescence may add below the nominal horizon.
pub const MAX_QUIESCENCE_PLY: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodePolicy {
    pub prune: bool,
    pub order: bool,
    pub use_tt: bool,
    pub quiescence: bool,
}

/// Score of a node with no legal move: mated (shallower is worse for the
/// side to move) or stalemated.
#[inline]
pub fn terminal_score(position: &Position, table: &AttackTable, ply: u8) -> i32 {
    if is_in_check(position, table) {
        -(MATE_SCORE - i32::from(ply))
    } else {
        0
    }
}

pub struct Searcher<'a, S: BoardScorer + ?Sized> {
    table: &'a AttackTable,
    scorer: &'a S,
    policy: NodePolicy,
    tt: Option<&'a mut TranspositionTable>,
    nodes: u64,
}

impl<'a, S: BoardScorer + ?Sized> Searcher<'a, S> {
    pub fn new(
        table: &'a AttackTable,
        scorer: &'a S,
        policy: NodePolicy,
        tt: Option<&'a mut TranspositionTable>,
    ) -> Self {
        Self {
            table,
            scorer,
            policy,
            tt: if policy.use_tt { tt } else { None },
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Best root move and its score at `depth` (at least 1).
    pub fn search_root(
        &mut self,
        position: &mut Position,
        depth: u8,
        hash_move: Option<Move>,
    ) -> (Option<Move>, i32) {
        let depth = depth.max(1);
        self.nodes += 1;

        let mut moves = generate_legal_moves(position, self.table);
        if moves.is_empty() {
            return (None, terminal_score(position, self.table, 0));
        }

        let hash_move = hash_move.or_else(|| self.probe(position.zobrist_key).and_then(|e| e.best_move));
        if self.policy.order {
            order_moves(position, &mut moves, hash_move);
        }

        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best_move = None;
        let mut best_score = -INFINITY;

        for mv in moves {
            if !position.descend(mv) {
                continue;
            }
            let score = -self.negamax(position, depth - 1, -beta, -alpha, 1);
            position.ascend();

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if self.policy.prune && score > alpha {
                alpha = score;
            }
        }

        self.store(position.zobrist_key, depth, best_score, Bound::Exact, best_move, 0);
        (best_move, best_score)
    }

    fn negamax(&mut self, position: &mut Position, depth: u8, mut alpha: i32, beta: i32, ply: u8) -> i32 {
        self.nodes += 1;

        let mut hash_move = None;
        if let Some(entry) = self.probe(position.zobrist_key) {
            if entry.depth >= depth {
                let score = score_from_tt(entry.score, ply);
                match entry.bound {
                    Bound::Exact => return score,
                    Bound::Lower if score >= beta => return score,
                    Bound::Upper if score <= alpha => return score,
                    _ => {}
                }
            }
            hash_move = entry.best_move;
        }

        if depth == 0 {
            return if self.policy.quiescence {
                self.quiescence(position, alpha, beta, ply, 0)
            } else {
                self.evaluate_leaf(position, ply)
            };
        }

        let mut moves = generate_legal_moves(position, self.table);
        if moves.is_empty() {
            return terminal_score(position, self.table, ply);
        }
        if self.policy.order {
            order_moves(position, &mut moves, hash_move);
        }

        let alpha_orig = alpha;
        let mut best = -INFINITY;
        let mut best_move = None;

        for mv in moves {
            if !position.descend(mv) {
                continue;
            }
            let score = -self.negamax(position, depth - 1, -beta, -alpha, ply.saturating_add(1));
            position.ascend();

            if score > best {
                best = score;
                best_move = Some(mv);
            }
            if self.policy.prune {
                if score > alpha {
                    alpha = score;
                }
                if alpha >= beta {
                    break;
                }
            }
        }

        let bound = if !self.policy.prune {
            Bound::Exact
        } else if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.store(position.zobrist_key, depth, best, bound, best_move, ply);

        best
    }

    /// Horizon evaluation without quiescence; terminal positions still score
    /// as mate or stalemate.
    fn evaluate_leaf(&mut self, position: &mut Position, ply: u8) -> i32 {
        if has_legal_move(position, self.table) {
            self.scorer.score(position)
        } else {
            terminal_score(position, self.table, ply)
        }
    }

    /// Captures-and-promotions extension below the horizon with a stand-pat
    /// floor, bounded to `MAX_QUIESCENCE_PLY` extra plies.
    fn quiescence(&mut self, position: &mut Position, mut alpha: i32, beta: i32, ply: u8, qply: u8) -> i32 {
        if qply > 0 {
            self.nodes += 1;
        }

        let moves = generate_legal_moves(position, self.table);
        if moves.is_empty() {
            return terminal_score(position, self.table, ply);
        }

        let stand_pat = self.scorer.score(position);
        if qply >= MAX_QUIESCENCE_PLY {
            return stand_pat;
        }

        let mut best = stand_pat;
        if self.policy.prune {
            if stand_pat >= beta {
                return stand_pat;
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
        }

        let mut tactical: Vec<Move> = moves
            .into_iter()
            .filter(|&mv| is_tactical(position, mv))
            .collect();
        if self.policy.order {
            order_moves(position, &mut tactical, None);
        }

        for mv in tactical {
            if !position.descend(mv) {
                continue;
            }
            let score = -self.quiescence(position, -beta, -alpha, ply.saturating_add(1), qply + 1);
            position.ascend();

            if score > best {
                best = score;
            }
            if self.policy.prune {
                if score > alpha {
                    alpha = score;
                }
                if alpha >= beta {
                    break;
                }
            }
        }

        best
    }

    #[inline]
    fn probe(&mut self, key: u64) -> Option<TTEntry> {
        self.tt.as_deref_mut().and_then(|tt| tt.probe(key))
    }

    #[inline]
    fn store(&mut self, key: u64, depth: u8, score: i32, bound: Bound, best_move: Option<Move>, ply: u8) {
        if let Some(tt) = self.tt.as_deref_mut() {
            tt.store(TTEntry {
                key,
                depth,
                score: score_to_tt(score, ply),
                bound,
                best_move,
            });
        }
    }
}
