//! Core incremental board state representation.
//!
//! `Position` is the central model for the engine. It stores the twelve piece
//! bitboards, the two per-color occupancy aggregates, turn/state flags, move
//! clocks, the incrementally maintained Zobrist key and the undo log used by
//! the make/unmake workflow.
//!
//! Turn handling is deliberately two-step at the low level: `apply` and
//! `unapply` never touch `side_to_move`, and every call must be paired with
//! `toggle_side_to_move`. `make_move`/`unmake_move` perform both steps.

use log::warn;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, unapply_move};
use crate::moves::chess_move::Move;
use crate::search::zobrist::{compute_zobrist_key, side_to_move_key};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],
    // Union of each color's six boards.
    pub occupancy_by_color: [u64; 2],

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub zobrist_key: u64,

    pub(crate) undo_log: UndoLog,
}

impl Default for Position {
    fn default() -> Self {
        let mut position = Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,
            undo_log: UndoLog::with_capacity(64),
        };
        position.refresh_hash();
        position
    }
}

impl Position {
    /// Empty board, white to move, no rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting arrangement.
    pub fn new_game() -> Self {
        let mut position = Self::default();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as Square;
            position.toggle_piece_bits(Color::White, *kind, file);
            position.toggle_piece_bits(Color::White, PieceKind::Pawn, 8 + file);
            position.toggle_piece_bits(Color::Black, PieceKind::Pawn, 48 + file);
            position.toggle_piece_bits(Color::Black, *kind, 56 + file);
        }
        position.castling_rights = CASTLE_ALL;
        position.refresh_hash();
        position
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn is_starting_position(&self) -> bool {
        self.to_fen() == STARTING_POSITION_FEN
    }

    #[inline]
    pub fn occupancy_all(&self) -> u64 {
        self.occupancy_by_color[0] | self.occupancy_by_color[1]
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    /// Kind of the `color` piece on `square`, if any.
    #[inline]
    pub fn piece_kind_at(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_mask(square);
        if self.occupancy_by_color[color.index()] & mask == 0 {
            return None;
        }
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
    }

    /// Piece on `square`, or `None` for an empty (or off-board) square.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if square > 63 {
            return None;
        }
        [Color::White, Color::Black].into_iter().find_map(|color| {
            self.piece_kind_at(color, square)
                .map(|kind| Piece::new(color, kind))
        })
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces_of(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// Flip a single piece bit and the matching occupancy bit. Hash untouched.
    #[inline]
    pub(crate) fn toggle_piece_bits(&mut self, color: Color, kind: PieceKind, square: Square) {
        let mask = square_mask(square);
        self.pieces[color.index()][kind.index()] ^= mask;
        self.occupancy_by_color[color.index()] ^= mask;
    }

    /// Place a piece on an empty square and fold it into the hash.
    pub fn put_piece(&mut self, piece: Piece, square: Square) -> ChessResult<()> {
        if square > 63 {
            return Err(ChessError::InvalidSquare(square));
        }
        if self.piece_at(square).is_some() {
            return Err(ChessError::malformed(format!("square {square} is already occupied")));
        }
        self.toggle_piece_bits(piece.color, piece.kind, square);
        self.refresh_hash();
        Ok(())
    }

    /// Hand the move to the other side. Must be paired with every
    /// `apply`/`unapply`.
    #[inline]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
        self.zobrist_key ^= side_to_move_key();
    }

    /// Low-level apply: board, rights, en passant, clocks and hash. Does not
    /// toggle the side to move and does not check legality.
    ///
    /// A move from an empty square changes nothing; it is logged and trips a
    /// debug assertion. Use `try_apply` to observe the failure instead.
    #[inline]
    pub fn apply(&mut self, mv: Move) {
        if let Err(err) = self.try_apply(mv) {
            report_apply_failure(mv, &err);
        }
    }

    /// Low-level apply that reports an empty origin square as `EmptyOrigin`.
    /// On failure nothing is pushed, so there is nothing to unapply.
    #[inline]
    pub fn try_apply(&mut self, mv: Move) -> ChessResult<()> {
        apply_move(self, mv)
    }

    /// Low-level reverse of the most recent `apply`.
    #[inline]
    pub fn unapply(&mut self) -> ChessResult<UndoState> {
        unapply_move(self)
    }

    /// Apply a move and hand the turn over in one step.
    pub fn make_move(&mut self, mv: Move) {
        if self.descend(mv) {
            debug_assert_eq!(self.zobrist_key, compute_zobrist_key(self));
        }
    }

    /// Reverse the last `make_move`.
    pub fn unmake_move(&mut self) -> ChessResult<UndoState> {
        if self.undo_log.is_empty() {
            return Err(ChessError::EmptyHistory);
        }
        self.toggle_side_to_move();
        let undo = self.unapply()?;
        debug_assert_eq!(self.zobrist_key, compute_zobrist_key(self));
        Ok(undo)
    }

    /// Apply plus turn toggle for internal tree walks. Returns `false`, with
    /// the position untouched, when the move could not be applied; the
    /// caller must then skip the matching `ascend`.
    pub(crate) fn descend(&mut self, mv: Move) -> bool {
        match self.try_apply(mv) {
            Ok(()) => {
                self.toggle_side_to_move();
                true
            }
            Err(err) => {
                report_apply_failure(mv, &err);
                false
            }
        }
    }

    /// Inverse of a successful `descend`.
    pub(crate) fn ascend(&mut self) {
        self.toggle_side_to_move();
        if let Err(err) = self.unapply() {
            warn!("ascend found no move to reverse at {}: {err}", self.to_fen());
            debug_assert!(false, "ascend without a matching descend: {err}");
        }
    }

    #[inline]
    pub fn history(&self) -> &UndoLog {
        &self.undo_log
    }

    #[inline]
    pub fn last_undo(&self) -> Option<&UndoState> {
        self.undo_log.last()
    }

    /// Forget every applied move; the current board becomes the new root.
    #[inline]
    pub fn clear_history(&mut self) {
        self.undo_log.clear();
    }

    /// Hash maintained alongside every mutation.
    #[inline]
    pub fn incremental_hash(&self) -> u64 {
        self.zobrist_key
    }

    /// Hash recomputed from the full board.
    #[inline]
    pub fn absolute_hash(&self) -> u64 {
        compute_zobrist_key(self)
    }

    #[inline]
    pub(crate) fn refresh_hash(&mut self) {
        self.zobrist_key = compute_zobrist_key(self);
    }

    /// Diagnostic check that the incremental hash still matches a recompute.
    pub fn verify_hash_consistency(&self) -> ChessResult<()> {
        let absolute = self.absolute_hash();
        if absolute == self.zobrist_key {
            return Ok(());
        }
        warn!(
            "hash consistency violated at {} (incremental {:#018x}, absolute {:#018x})",
            self.to_fen(),
            self.zobrist_key,
            absolute
        );
        Err(ChessError::ConsistencyViolation {
            incremental: self.zobrist_key,
            absolute,
        })
    }
}

fn report_apply_failure(mv: Move, err: &ChessError) {
    warn!("apply {mv:?} failed: {err}");
    debug_assert!(false, "apply {mv:?} failed: {err}");
}
