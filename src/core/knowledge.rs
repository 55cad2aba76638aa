//! What a shooter has learned about the opponent's board, and the queue of
//! follow-up targets it keeps after a hit.

use alloc::vec::Vec;

use crate::core::bitboard::BitBoard;
use crate::core::common::{BoardError, Shot};

/// Per-cell knowledge of the opponent grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKnowledge {
    Unknown,
    Miss,
    Hit,
}

/// Results of a player's own shots against the opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Knowledge {
    size: usize,
    hits: BitBoard,
    misses: BitBoard,
}

impl Knowledge {
    /// Everything unknown.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            hits: BitBoard::new(size),
            misses: BitBoard::new(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn hits(&self) -> &BitBoard {
        &self.hits
    }

    pub fn misses(&self) -> &BitBoard {
        &self.misses
    }

    /// State of (row, col); out of range reads as `Unknown`.
    pub fn state(&self, row: usize, col: usize) -> CellKnowledge {
        if self.hits.get(row, col).unwrap_or(false) {
            CellKnowledge::Hit
        } else if self.misses.get(row, col).unwrap_or(false) {
            CellKnowledge::Miss
        } else {
            CellKnowledge::Unknown
        }
    }

    /// True once a shot has landed on (row, col).
    pub fn is_resolved(&self, row: usize, col: usize) -> bool {
        self.state(row, col) != CellKnowledge::Unknown
    }

    pub fn mark_hit(&mut self, row: usize, col: usize) -> Result<(), BoardError> {
        self.ensure_unknown(row, col)?;
        self.hits.set(row, col)?;
        Ok(())
    }

    pub fn mark_miss(&mut self, row: usize, col: usize) -> Result<(), BoardError> {
        self.ensure_unknown(row, col)?;
        self.misses.set(row, col)?;
        Ok(())
    }

    fn ensure_unknown(&self, row: usize, col: usize) -> Result<(), BoardError> {
        if self.hits.get(row, col)? || self.misses.get(row, col)? {
            return Err(BoardError::AlreadyResolved);
        }
        Ok(())
    }

    /// Number of resolved cells (hits + misses).
    pub fn resolved_count(&self) -> usize {
        self.hits.count_ones() + self.misses.count_ones()
    }

    /// First unresolved cell in row-major order.
    pub fn first_unresolved(&self) -> Option<Shot> {
        for r in 0..self.size {
            for c in 0..self.size {
                if !self.is_resolved(r, c) {
                    return Some(Shot::new(r, c));
                }
            }
        }
        None
    }
}

/// LIFO queue of follow-up targets. Entries are never filtered on push;
/// stale ones are skipped when popped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetStack {
    entries: Vec<Shot>,
}

impl TargetStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shot: Shot) {
        self.entries.push(shot);
    }

    pub fn pop(&mut self) -> Option<Shot> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in push order.
    pub fn as_slice(&self) -> &[Shot] {
        &self.entries
    }

    /// Queue the in-bounds orthogonal neighbours of `hit`: up, down, left, right.
    pub fn push_neighbors(&mut self, hit: Shot, size: usize) {
        let (r, c) = (hit.row as isize, hit.col as isize);
        for (nr, nc) in [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)] {
            if nr >= 0 && nc >= 0 && (nr as usize) < size && (nc as usize) < size {
                self.push(Shot::new(nr as usize, nc as usize));
            }
        }
    }

    /// Pop until an in-bounds, unresolved entry turns up.
    pub fn pop_unresolved(&mut self, knowledge: &Knowledge) -> Option<Shot> {
        while let Some(shot) = self.pop() {
            if shot.row < knowledge.size()
                && shot.col < knowledge.size()
                && !knowledge.is_resolved(shot.row, shot.col)
            {
                return Some(shot);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_once() {
        let mut k = Knowledge::new(12);
        assert_eq!(k.state(3, 3), CellKnowledge::Unknown);
        k.mark_hit(3, 3).unwrap();
        assert_eq!(k.state(3, 3), CellKnowledge::Hit);
        assert_eq!(k.mark_miss(3, 3), Err(BoardError::AlreadyResolved));
        k.mark_miss(0, 0).unwrap();
        assert_eq!(k.resolved_count(), 2);
        assert_eq!(k.first_unresolved(), Some(Shot::new(0, 1)));
    }

    #[test]
    fn neighbours_push_order_and_lifo_pop() {
        let mut stack = TargetStack::new();
        stack.push_neighbors(Shot::new(5, 5), 12);
        assert_eq!(
            stack.as_slice(),
            &[
                Shot::new(4, 5),
                Shot::new(6, 5),
                Shot::new(5, 4),
                Shot::new(5, 6)
            ]
        );
        assert_eq!(stack.pop(), Some(Shot::new(5, 6)));
    }

    #[test]
    fn neighbours_are_bounds_checked() {
        let mut stack = TargetStack::new();
        stack.push_neighbors(Shot::new(0, 11), 12);
        assert_eq!(stack.as_slice(), &[Shot::new(1, 11), Shot::new(0, 10)]);
    }

    #[test]
    fn stale_entries_are_dropped_lazily() {
        let mut k = Knowledge::new(12);
        let mut stack = TargetStack::new();
        stack.push_neighbors(Shot::new(5, 5), 12);
        k.mark_miss(5, 6).unwrap();
        k.mark_miss(5, 4).unwrap();
        // Still queued until popped.
        assert_eq!(stack.len(), 4);
        assert_eq!(stack.pop_unresolved(&k), Some(Shot::new(6, 5)));
        assert_eq!(stack.len(), 1);
    }
}
