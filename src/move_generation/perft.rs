//! Perft: exhaustive move-path enumeration used to validate generation.

use log::trace;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_legal_move};
use crate::move_generation::legal_move_shared::is_capture;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::{Move, MoveFlag};

/// Leaf statistics collected by `perft`. Every counter refers to the moves
/// made at the final ply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Full perft with leaf statistics. Leaves the position as it found it.
pub fn perft(position: &mut Position, table: &AttackTable, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(position, table) {
        if depth == 1 {
            total.merge(leaf_counts(position, table, mv));
            continue;
        }
        if position.descend(mv) {
            total.merge(perft(position, table, depth - 1));
            position.ascend();
        }
    }

    total
}

fn leaf_counts(position: &mut Position, table: &AttackTable, mv: Move) -> PerftCounts {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };

    if is_capture(position, mv) {
        counts.captures += 1;
    }
    match mv.flag() {
        MoveFlag::EnPassantCapture => counts.en_passant += 1,
        MoveFlag::Castle => counts.castles += 1,
        _ => {}
    }
    if mv.is_promotion() {
        counts.promotions += 1;
    }

    if !position.descend(mv) {
        return PerftCounts::default();
    }
    if is_in_check(position, table) {
        counts.checks += 1;
        if !has_legal_move(position, table) {
            counts.checkmates += 1;
        }
    }
    position.ascend();

    counts
}

/// Node count only; the fast path used by benchmarks.
pub fn perft_nodes(position: &mut Position, table: &AttackTable, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(position, table);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        if position.descend(mv) {
            nodes += perft_nodes(position, table, depth - 1);
            position.ascend();
        }
    }
    nodes
}

/// Node count below each root move, in generation order.
pub fn perft_divide(position: &mut Position, table: &AttackTable, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for mv in generate_legal_moves(position, table) {
        if !position.descend(mv) {
            continue;
        }
        let nodes = perft_nodes(position, table, depth - 1);
        position.ascend();

        trace!("{mv}: {nodes}");
        lines.push((mv, nodes));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let table = AttackTable::new();
        let mut game = Position::new_game();
        assert_eq!(
            perft(&mut game, &table, 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position_depth_two() {
        let table = AttackTable::new();
        let mut game = Position::new_game();
        let before = game.clone();
        let counts = perft(&mut game, &table, 2);
        assert_eq!(counts.nodes, 400);
        assert_eq!(counts.captures, 0);
        assert_eq!(perft_nodes(&mut game, &table, 2), 400);
        assert_eq!(game, before);
    }

    #[test]
    fn divide_sums_to_perft() {
        let table = AttackTable::new();
        let mut game = Position::new_game();
        let lines = perft_divide(&mut game, &table, 2);
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(lines.iter().map(|(_, n)| n).sum::<u64>(), 400);
    }

    #[test]
    fn leaf_counters_see_mates_and_promotions() {
        let table = AttackTable::new();
        let mut game =
            Position::from_fen("6k1/P4ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("FEN should parse");
        let counts = perft(&mut game, &table, 1);
        assert_eq!(counts.promotions, 4);
        // a8=Q and a8=R mate on the back rank.
        assert_eq!(counts.checkmates, 2);
        assert_eq!(counts.checks, 2);
    }
}
