//! Chessboard Core Library
//!
//! The logic behind the browser chess board: grid/algebraic coordinate
//! conversion, a board adapter over a chess rules engine, and the history
//! of moves played.

pub mod adapter;
pub mod controller;
pub mod coords;
pub mod error;
pub mod history;
pub mod piece;
pub mod rules;
pub mod status;

pub use adapter::{Board, BoardAdapter, MoveRejection, DEFAULT_PROMOTION};
pub use controller::{BoardController, ClickOutcome, Selection};
pub use coords::{alg_to_coord, coord_to_alg, is_dark_square, AlgebraicSquare, Coord};
pub use error::{Error, Result};
pub use history::{format_move, Move, MoveHistory};
pub use piece::{Color, PieceCode, PieceKind};
pub use rules::{RulesEngine, ShakmatyEngine};
pub use status::GameStatus;
