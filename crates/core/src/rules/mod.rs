//! Chess rules behind a narrow capability trait
//!
//! The board adapter never decides legality itself. Everything it knows
//! about the position comes through [`RulesEngine`], so any engine that can
//! answer these questions can sit behind it.

mod standard;

pub use standard::ShakmatyEngine;

use crate::coords::AlgebraicSquare;
use crate::error::Result;
use crate::piece::{Color, PieceCode, PieceKind};

pub trait RulesEngine {
    /// Occupant of `square`, if any.
    fn piece_at(&self, square: AlgebraicSquare) -> Option<PieceCode>;

    /// Plays `from -> to` if it is legal in the current position.
    ///
    /// `promotion` picks the piece a pawn turns into on the last rank. A
    /// rejected move must leave the position untouched.
    fn try_move(
        &mut self,
        from: AlgebraicSquare,
        to: AlgebraicSquare,
        promotion: Option<PieceKind>,
    ) -> Result<()>;

    /// Destinations reachable from `from`. Empty if the square is empty or
    /// the piece has no legal move.
    fn legal_destinations(&self, from: AlgebraicSquare) -> Vec<AlgebraicSquare>;

    fn turn(&self) -> Color;

    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_draw(&self) -> bool;

    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    /// Back to the standard starting position.
    fn reset(&mut self);
}
