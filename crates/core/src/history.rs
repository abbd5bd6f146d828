//! Move records and the append-only history ledger

use serde::{Deserialize, Serialize};

use crate::coords::Coord;
use crate::piece::PieceCode;

/// A move that the rules engine accepted.
///
/// `piece` is the code of the piece that moved, as it stood on `from`
/// before the move. A promoting pawn is logged as a pawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub piece: PieceCode,
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    /// `"<index + 1>. <piece> <from> → <to>"`
    pub fn numbered(&self, index: usize) -> String {
        format!(
            "{}. {} {} → {}",
            index + 1,
            self.piece,
            self.from.to_algebraic(),
            self.to.to_algebraic()
        )
    }
}

pub fn format_move(mv: &Move, index: usize) -> String {
    mv.numbered(index)
}

/// Moves in play order. Entries are only ever appended or cleared all at
/// once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Every entry run through [`format_move`].
    pub fn formatted(&self) -> Vec<String> {
        self.moves
            .iter()
            .enumerate()
            .map(|(idx, mv)| mv.numbered(idx))
            .collect()
    }
}
