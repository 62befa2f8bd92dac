use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

/// Single undo record pushed by `apply` and consumed by `unapply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: PieceKind,
    pub captured_piece: Option<PieceKind>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    pub prev_zobrist_key: u64,
}

/// Growable stack of undo records owned by exactly one `Position`.
///
/// Popping truncates logically; the backing storage keeps its capacity so a
/// search that repeatedly applies and reverses moves stops allocating once
/// the deepest line has been reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoLog {
    entries: Vec<UndoState>,
}

impl UndoLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, record: UndoState) {
        self.entries.push(record);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<UndoState> {
        self.entries.pop()
    }

    #[inline]
    pub fn last(&self) -> Option<&UndoState> {
        self.entries.last()
    }

    /// Record at `index`, oldest first.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&UndoState> {
        self.entries.get(index)
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
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &UndoState> {
        self.entries.iter()
    }
}
