//! Ship definitions and placed ships.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::core::bitboard::BitBoard;
use crate::core::common::BoardError;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Both orientations in scan order.
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Coordinate of the `k`-th segment of a run starting at (`row`, `col`).
    #[inline]
    pub fn step(self, row: usize, col: usize, k: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (row, col + k),
            Orientation::Vertical => (row + k, col),
        }
    }

    /// True if a run of `len` starting at (`row`, `col`) stays on a `size` board.
    #[inline]
    pub fn fits(self, row: usize, col: usize, len: usize, size: usize) -> bool {
        match self {
            Orientation::Horizontal => row < size && col + len <= size,
            Orientation::Vertical => col < size && row + len <= size,
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipSpec {
    name: Cow<'static, str>,
    #[cfg_attr(feature = "std", serde(rename = "len"))]
    length: usize,
}

impl ShipSpec {
    /// Create a ship spec with a static name.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self {
            name: Cow::Borrowed(name),
            length,
        }
    }

    /// Create a ship spec with a runtime name.
    pub fn named(name: impl Into<Cow<'static, str>>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    /// Ship's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship placed on the board, with hits tracked in a `BitBoard`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedShip {
    spec: usize,
    orientation: Orientation,
    row: usize,
    col: usize,
    length: usize,
    mask: BitBoard,
    hits: BitBoard,
}

impl PlacedShip {
    /// Place fleet entry `spec` of length `length` at (`row`, `col`).
    pub fn new(
        spec: usize,
        length: usize,
        orientation: Orientation,
        row: usize,
        col: usize,
        size: usize,
    ) -> Result<Self, BoardError> {
        if !orientation.fits(row, col, length, size) {
            return Err(BoardError::ShipOutOfBounds);
        }
        let mut mask = BitBoard::new(size);
        for k in 0..length {
            let (r, c) = orientation.step(row, col, k);
            mask.set(r, c)?;
        }
        Ok(PlacedShip {
            spec,
            orientation,
            row,
            col,
            length,
            mask,
            hits: BitBoard::new(size),
        })
    }

    /// Register a hit at (`row`, `col`). Returns `true` if the ship covers it.
    pub fn register_hit(&mut self, row: usize, col: usize) -> bool {
        if self.contains(row, col) {
            let _ = self.hits.set(row, col);
            true
        } else {
            false
        }
    }

    /// True if the ship covers (`row`, `col`).
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.mask.get(row, col).unwrap_or(false)
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.count_ones() == self.length
    }

    /// Fleet index of this ship.
    pub fn spec(&self) -> usize {
        self.spec
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> &BitBoard {
        &self.mask
    }

    /// Cells covered by the ship, from the origin outward.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        (0..self.length)
            .map(|k| self.orientation.step(self.row, self.col, k))
            .collect()
    }
}
