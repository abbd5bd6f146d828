//! Error types for chessboard-core

use thiserror::Error;

use crate::coords::AlgebraicSquare;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("coordinate ({row}, {col}) is off the board")]
    CoordOutOfRange { row: u8, col: u8 },

    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("invalid piece code: {0:?}")]
    InvalidPieceCode(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("illegal move {from} → {to}")]
    IllegalMove {
        from: AlgebraicSquare,
        to: AlgebraicSquare,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
