//! Click-to-move interaction
//!
//! The browser board is driven by two kinds of input: clicking squares one
//! at a time and dragging a piece onto another square. Clicks need a bit of
//! state between them (which piece is picked up and where it may go), which
//! lives here so the web layer only forwards events and renders.

use serde::Serialize;

use crate::adapter::{BoardAdapter, MoveRejection};
use crate::coords::{AlgebraicSquare, Coord};
use crate::history::Move;
use crate::rules::{RulesEngine, ShakmatyEngine};

/// A picked-up piece and the squares it can legally reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub from: Coord,
    pub targets: Vec<AlgebraicSquare>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected,
    Deselected,
    Moved(Move),
    /// The square was a target but the engine refused the move anyway.
    Rejected,
    Ignored,
}

pub struct BoardController<E = ShakmatyEngine> {
    adapter: BoardAdapter<E>,
    selection: Option<Selection>,
}

impl BoardController<ShakmatyEngine> {
    pub fn new() -> Self {
        Self::with_adapter(BoardAdapter::new())
    }
}

impl Default for BoardController<ShakmatyEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RulesEngine> BoardController<E> {
    pub fn with_adapter(adapter: BoardAdapter<E>) -> Self {
        Self {
            adapter,
            selection: None,
        }
    }

    pub fn adapter(&self) -> &BoardAdapter<E> {
        &self.adapter
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn is_selected(&self, at: Coord) -> bool {
        self.selection.as_ref().is_some_and(|s| s.from == at)
    }

    pub fn is_target(&self, at: Coord) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|s| s.targets.contains(&at.to_algebraic()))
    }

    pub fn click(&mut self, at: Coord) -> ClickOutcome {
        if let Some(selection) = self.selection.take() {
            if selection.from == at {
                return ClickOutcome::Deselected;
            }
            if selection.targets.contains(&at.to_algebraic()) {
                return match self.adapter.move_piece(selection.from, at) {
                    Some(mv) => ClickOutcome::Moved(mv),
                    None => ClickOutcome::Rejected,
                };
            }
        }

        if self.is_own_piece(at) && !self.adapter.is_game_over() {
            self.selection = Some(Selection {
                from: at,
                targets: self.adapter.legal_moves(at),
            });
            return ClickOutcome::Selected;
        }

        ClickOutcome::Ignored
    }

    /// Drag-and-drop: no selection involved, the move goes straight to the
    /// adapter. Like a click, it is refused once the game is over.
    pub fn drop_piece(&mut self, from: Coord, to: Coord) -> Option<Move> {
        self.try_drop_piece(from, to).ok()
    }

    pub fn try_drop_piece(&mut self, from: Coord, to: Coord) -> Result<Move, MoveRejection> {
        self.selection = None;
        if self.adapter.is_game_over() {
            return Err(MoveRejection::GameOver);
        }
        self.adapter.try_move_piece(from, to)
    }

    pub fn reset_game(&mut self) {
        self.selection = None;
        self.adapter.reset_game();
    }

    pub fn clear_history(&mut self) {
        self.selection = None;
        self.adapter.clear_history();
    }

    fn is_own_piece(&self, at: Coord) -> bool {
        self.adapter
            .piece_at(at)
            .is_some_and(|piece| piece.color == self.adapter.current_turn())
    }
}
