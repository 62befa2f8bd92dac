use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bitboard_chess::game_state::chess_types::Position;
use bitboard_chess::moves::attack_table::AttackTable;
use bitboard_chess::search::board_scoring::PieceSquareScorer;
use bitboard_chess::search::search_algorithm::{search, SearchAlgorithm, SearchConfig};

const SEARCH_FENS: &[(&str, &str)] = &[
    ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
];

fn bench_search(c: &mut Criterion) {
    let table = AttackTable::new();
    let mut group = c.benchmark_group("search_d3");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for (name, fen) in SEARCH_FENS {
        let position = Position::from_fen(fen).expect("benchmark FEN should parse");

        // Minimax is left out: its tree at depth 3 dwarfs the others.
        for algorithm in [
            SearchAlgorithm::AlphaBeta,
            SearchAlgorithm::AlphaBetaOrdered,
            SearchAlgorithm::IterativeDeepening,
        ] {
            let config = SearchConfig {
                depth: 3,
                algorithm,
                ..SearchConfig::default()
            };
            let mut bench_position = position.clone();

            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), name),
                &config,
                |b, config| {
                    b.iter(|| {
                        let result = search(
                            black_box(&mut bench_position),
                            &table,
                            &PieceSquareScorer,
                            *config,
                        );
                        black_box(result.best_move)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
