//! A square bitboard whose side length is chosen at runtime.
//!
//! The grid is packed row-major into a vector of unsigned words `T`, so a
//! 12×12 board (144 cells) spans three `u64` words. Basic constructors and
//! bitwise operations are provided. Operations combining two boards require
//! both to have the same side length.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{BitAnd, BitOr, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Row or column index is out of bounds [0..N).
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

/// An N×N bitboard stored in a vector of unsigned words `T`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitBoard<T = u64>
where
    T: PrimInt + Unsigned + Zero,
{
    size: usize,
    words: Vec<T>,
}

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    const WORD_BITS: usize = mem::size_of::<T>() * 8;

    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        let len = cells.div_ceil(Self::WORD_BITS);
        BitBoard {
            size,
            words: vec![T::zero(); len],
        }
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of set bits (occupied cells).
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Gets the bit at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        let (word, bit) = self.locate(row, col)?;
        Ok(((self.words[word] >> bit) & T::one()) != T::zero())
    }

    /// Sets the bit at (row, col) to 1.
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        let (word, bit) = self.locate(row, col)?;
        self.words[word] = self.words[word] | (T::one() << bit);
        Ok(())
    }

    /// Returns true if `self` and `other` share at least one set cell.
    pub fn intersects(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| !(*a & *b).is_zero())
    }

    #[inline]
    fn locate(&self, row: usize, col: usize) -> Result<(usize, usize), BitBoardError> {
        if row >= self.size || col >= self.size {
            return Err(BitBoardError::IndexOutOfBounds { row, col });
        }
        let idx = row * self.size + col;
        Ok((idx / Self::WORD_BITS, idx % Self::WORD_BITS))
    }

    /// Zero any bits past the last cell so that `count_ones` stays exact.
    fn mask_tail(&mut self) {
        let cells = self.size * self.size;
        let used = cells % Self::WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = *last & ((T::one() << used) - T::one());
            }
        }
    }

    fn zip_with(&self, rhs: &Self, op: impl Fn(T, T) -> T) -> Self {
        let words = self
            .words
            .iter()
            .zip(rhs.words.iter())
            .map(|(a, b)| op(*a, *b))
            .collect();
        BitBoard {
            size: self.size,
            words,
        }
    }
}

impl<T> fmt::Debug for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}x{}>:", self.size, self.size)?;
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.get(r, c).unwrap_or(false) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Bitwise AND for combining two bitboards.
impl<'a, T> BitAnd for &'a BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = BitBoard<T>;
    fn bitand(self, rhs: Self) -> BitBoard<T> {
        self.zip_with(rhs, |a, b| a & b)
    }
}

/// Bitwise OR for combining two bitboards.
impl<'a, T> BitOr for &'a BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = BitBoard<T>;
    fn bitor(self, rhs: Self) -> BitBoard<T> {
        self.zip_with(rhs, |a, b| a | b)
    }
}

/// Bitwise NOT for inverting a bitboard (within board bounds).
impl<'a, T> Not for &'a BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = BitBoard<T>;
    fn not(self) -> BitBoard<T> {
        let mut out = BitBoard {
            size: self.size,
            words: self.words.iter().map(|w| !*w).collect(),
        };
        out.mask_tail();
        out
    }
}
