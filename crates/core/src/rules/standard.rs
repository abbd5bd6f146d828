//! Standard chess rules backed by shakmaty

use shakmaty::{fen::Fen, CastlingMode, Chess, EnPassantMode, File, Move, Position, Rank, Square};
use tracing::debug;

use super::RulesEngine;
use crate::coords::AlgebraicSquare;
use crate::error::{Error, Result};
use crate::piece::{Color, PieceCode, PieceKind};

/// A game session over a `shakmaty::Chess` position.
///
/// shakmaty knows nothing about the game's past, so the engine keeps the
/// position keys seen since the last reset to detect threefold repetition.
#[derive(Debug, Clone)]
pub struct ShakmatyEngine {
    position: Chess,
    seen: Vec<String>,
}

impl ShakmatyEngine {
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    /// Starts from an arbitrary position given as FEN.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let parsed: Fen = fen
            .parse()
            .map_err(|e| Error::InvalidFen(format!("{}: {}", fen, e)))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| Error::InvalidFen(format!("{}: {}", fen, e)))?;
        Ok(Self::from_position(position))
    }

    fn from_position(position: Chess) -> Self {
        let seen = vec![position_key(&position)];
        Self { position, seen }
    }

    pub fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    fn is_threefold_repetition(&self) -> bool {
        match self.seen.last() {
            Some(current) => self.seen.iter().filter(|key| *key == current).count() >= 3,
            None => false,
        }
    }
}

impl Default for ShakmatyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for ShakmatyEngine {
    fn piece_at(&self, square: AlgebraicSquare) -> Option<PieceCode> {
        self.position
            .board()
            .piece_at(to_square(square))
            .map(PieceCode::from)
    }

    fn try_move(
        &mut self,
        from: AlgebraicSquare,
        to: AlgebraicSquare,
        promotion: Option<PieceKind>,
    ) -> Result<()> {
        let illegal = || Error::IllegalMove { from, to };
        let (from_sq, to_sq) = (to_square(from), to_square(to));
        let promotion = promotion.map(shakmaty::Role::from);

        let mv = self
            .position
            .legal_moves()
            .into_iter()
            .find(|m| {
                m.from() == Some(from_sq)
                    && destination(m) == to_sq
                    && m.promotion().map_or(true, |role| promotion == Some(role))
            })
            .ok_or_else(illegal)?;

        let next = self.position.clone().play(mv).map_err(|_| illegal())?;
        self.position = next;
        self.seen.push(position_key(&self.position));
        debug!(%from, %to, fen = %self.fen(), "engine accepted move");
        Ok(())
    }

    fn legal_destinations(&self, from: AlgebraicSquare) -> Vec<AlgebraicSquare> {
        let from_sq = to_square(from);
        let mut destinations: Vec<AlgebraicSquare> = Vec::new();

        for m in self.position.legal_moves() {
            if m.from() != Some(from_sq) {
                continue;
            }
            let Some(square) = from_square(destination(&m)) else {
                continue;
            };
            if !destinations.contains(&square) {
                destinations.push(square);
            }
        }

        destinations
    }

    fn turn(&self) -> Color {
        self.position.turn().into()
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_draw(&self) -> bool {
        self.position.is_stalemate()
            || self.position.is_insufficient_material()
            || self.position.halfmoves() >= 100
            || self.is_threefold_repetition()
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

fn to_square(square: AlgebraicSquare) -> Square {
    let coord = square.to_coord();
    let file = File::new(u32::from(coord.col()));
    let rank = Rank::new(u32::from(7 - coord.row()));
    Square::from_coords(file, rank)
}

fn from_square(square: Square) -> Option<AlgebraicSquare> {
    AlgebraicSquare::from_chars(square.file().char(), square.rank().char()).ok()
}

/// Where the moving piece lands. shakmaty encodes castling as king takes
/// rook; a player clicks the king's target square instead.
fn destination(mv: &Move) -> Square {
    match *mv {
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() { File::G } else { File::C };
            Square::from_coords(file, king.rank())
        }
        _ => mv.to(),
    }
}

/// FEN without the move clocks: two positions with equal keys are the
/// same position for repetition purposes.
fn position_key(position: &Chess) -> String {
    Fen::from_position(position, EnPassantMode::Legal)
        .to_string()
        .split(' ')
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}
