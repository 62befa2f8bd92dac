//! Command-line driver: perft counts, a single search, or a board dump.
//!
//! Log output goes through `env_logger`; set `RUST_LOG=debug` to see search
//! iterations or `RUST_LOG=trace` for perft divide lines.

use std::time::Instant;

use clap::{Parser, Subcommand};

use bitboard_chess::errors::ChessResult;
use bitboard_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use bitboard_chess::game_state::chess_types::Position;
use bitboard_chess::move_generation::legal_move_generator::game_status;
use bitboard_chess::move_generation::perft::{perft, perft_divide};
use bitboard_chess::moves::attack_table::AttackTable;
use bitboard_chess::search::board_scoring::PieceSquareScorer;
use bitboard_chess::search::search_algorithm::{search, SearchAlgorithm, SearchConfig};
use bitboard_chess::search::zobrist;
use bitboard_chess::utils::long_algebraic::long_algebraic_to_move;
use bitboard_chess::utils::render_game_state::render_with_details;

#[derive(Parser, Debug)]
#[command(name = "bitboard_chess_cli", version, about = "Bitboard chess engine driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count move paths to a fixed depth.
    Perft {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        #[arg(long, default_value = "3")]
        depth: u8,

        /// Print the node count below each root move.
        #[arg(long)]
        divide: bool,
    },

    /// Pick a move for the side to move.
    Search {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        #[arg(long, default_value = "4")]
        depth: u8,

        /// minimax, alpha-beta, alpha-beta-ordered or iterative-deepening
        #[arg(long, default_value = "alpha-beta-ordered")]
        algorithm: SearchAlgorithm,

        /// Evaluate leaves statically instead of resolving captures.
        #[arg(long)]
        no_quiescence: bool,

        /// Transposition table size for iterative deepening.
        #[arg(long, default_value = "16")]
        tt_mb: usize,
    },

    /// Print the board, FEN, hash and game status.
    Show {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        /// Long algebraic moves to play first, e.g. `--moves e2e4 e7e5`.
        #[arg(long, num_args = 1..)]
        moves: Vec<String>,
    },
}

fn main() -> ChessResult<()> {
    env_logger::init();
    zobrist::init();

    let cli = Cli::parse();
    let table = AttackTable::new();

    match cli.command {
        Command::Perft { fen, depth, divide } => {
            let mut position = Position::from_fen(&fen)?;
            let started = Instant::now();
            if divide {
                let lines = perft_divide(&mut position, &table, depth);
                for (mv, nodes) in &lines {
                    println!("{mv}: {nodes}");
                }
                let total: u64 = lines.iter().map(|(_, nodes)| nodes).sum();
                println!("\nmoves: {}  nodes: {total}", lines.len());
            } else {
                let counts = perft(&mut position, &table, depth);
                println!("depth:      {depth}");
                println!("nodes:      {}", counts.nodes);
                println!("captures:   {}", counts.captures);
                println!("en passant: {}", counts.en_passant);
                println!("castles:    {}", counts.castles);
                println!("promotions: {}", counts.promotions);
                println!("checks:     {}", counts.checks);
                println!("checkmates: {}", counts.checkmates);
            }
            println!("time:       {:?}", started.elapsed());
        }
        Command::Search {
            fen,
            depth,
            algorithm,
            no_quiescence,
            tt_mb,
        } => {
            let mut position = Position::from_fen(&fen)?;
            let config = SearchConfig {
                depth,
                algorithm,
                quiescence: !no_quiescence,
                transposition_table_mb: tt_mb,
            };
            let result = search(&mut position, &table, &PieceSquareScorer, config);
            match result.best_move {
                Some(mv) => println!("bestmove {mv}"),
                None => println!("bestmove (none): {:?}", game_status(&mut position, &table)),
            }
            println!(
                "score {} depth {} nodes {} time {:?}",
                result.score, result.depth_reached, result.nodes, result.elapsed
            );
            if algorithm == SearchAlgorithm::IterativeDeepening {
                let stats = result.tt_stats;
                println!("tt probes {} hits {} stores {}", stats.probes, stats.hits, stats.stores);
            }
        }
        Command::Show { fen, moves } => {
            let mut position = Position::from_fen(&fen)?;
            for text in &moves {
                let mv = long_algebraic_to_move(text, &mut position, &table)?;
                position.make_move(mv);
            }
            println!("{}", render_with_details(&position));
            println!("status: {:?}", game_status(&mut position, &table));
        }
    }

    Ok(())
}
