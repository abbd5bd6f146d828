//! Grid coordinates and algebraic squares
//!
//! The board is addressed two ways. The UI uses zero-based `(row, col)`
//! with row 0 at rank 8 and col 0 at file a. The rules engine speaks
//! algebraic notation ("e4"). Both types are validated on construction so
//! nothing off the board can be represented.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const BOARD_SIZE: u8 = 8;

/// A square on the 8x8 grid, `row` and `col` both in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCoord")]
pub struct Coord {
    row: u8,
    col: u8,
}

#[derive(Deserialize)]
struct RawCoord {
    row: u8,
    col: u8,
}

impl TryFrom<RawCoord> for Coord {
    type Error = Error;

    fn try_from(raw: RawCoord) -> Result<Self> {
        Coord::new(raw.row, raw.col)
    }
}

impl Coord {
    pub fn new(row: u8, col: u8) -> Result<Self> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(Error::CoordOutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// All 64 squares, row by row from a8 to h1.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord { row, col }))
    }

    pub fn to_algebraic(self) -> AlgebraicSquare {
        AlgebraicSquare {
            file: self.col,
            rank: BOARD_SIZE - self.row,
        }
    }

    /// a8 is light, so a square is dark when `row + col` is odd.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A square in algebraic notation: file `a..=h`, rank `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlgebraicSquare {
    /// 0 = a, 7 = h
    file: u8,
    /// 1..=8
    rank: u8,
}

impl AlgebraicSquare {
    pub fn file(self) -> char {
        char::from(b'a' + self.file)
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub(crate) fn from_chars(file: char, rank: char) -> Result<Self> {
        match (file, rank) {
            ('a'..='h', '1'..='8') => Ok(Self {
                file: file as u8 - b'a',
                rank: rank as u8 - b'0',
            }),
            _ => Err(Error::InvalidSquare(format!("{file}{rank}"))),
        }
    }

    pub fn to_coord(self) -> Coord {
        Coord {
            row: BOARD_SIZE - self.rank,
            col: self.file,
        }
    }
}

impl fmt::Display for AlgebraicSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank)
    }
}

impl FromStr for AlgebraicSquare {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Self::from_chars(file, rank)
                .map_err(|_| Error::InvalidSquare(s.to_string())),
            _ => Err(Error::InvalidSquare(s.to_string())),
        }
    }
}

impl TryFrom<String> for AlgebraicSquare {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<AlgebraicSquare> for String {
    fn from(square: AlgebraicSquare) -> Self {
        square.to_string()
    }
}

impl From<Coord> for AlgebraicSquare {
    fn from(coord: Coord) -> Self {
        coord.to_algebraic()
    }
}

impl From<AlgebraicSquare> for Coord {
    fn from(square: AlgebraicSquare) -> Self {
        square.to_coord()
    }
}

/// file = 'a' + col, rank = 8 - row
pub fn coord_to_alg(coord: Coord) -> AlgebraicSquare {
    coord.to_algebraic()
}

/// col = file - 'a', row = 8 - rank
pub fn alg_to_coord(square: AlgebraicSquare) -> Coord {
    square.to_coord()
}

pub fn is_dark_square(coord: Coord) -> bool {
    coord.is_dark()
}
